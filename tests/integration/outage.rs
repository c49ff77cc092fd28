use crate::common::{
    landsearch_page, landwatch_page, two_source_config, StubFetcher, LANDSEARCH_INDEX,
    LANDWATCH_INDEX,
};
use landtrack_core::{MemoryStore, StorageGateway};
use landtrack_scrapers::runner::RunCoordinator;
use std::sync::Arc;

#[tokio::test]
async fn test_one_dead_source_does_not_stop_the_other() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::new());
    // LandSearch is reachable, LandWatch is not.
    fetcher.set_page(
        LANDSEARCH_INDEX,
        &landsearch_page(&[(
            "/properties/caroline-county-va/40112",
            "River Bend 18 Acres",
            "$480,000",
            "18 acres",
        )]),
    );

    let coordinator = RunCoordinator::new(two_source_config(), fetcher, store.clone());
    let report = coordinator.run_once().await.unwrap();

    assert!(report.committed);
    assert!(report.source_status["LandSearch"].ok);
    assert!(!report.source_status["LandWatch"].ok);
    assert!(report.source_status["LandWatch"]
        .error
        .as_deref()
        .unwrap()
        .contains("fetch"));

    let listings = store.get_listings().await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].source, "LandSearch");
}

#[tokio::test]
async fn test_total_outage_preserves_last_known_good_state() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::new());
    fetcher.set_page(
        LANDWATCH_INDEX,
        &landwatch_page(&[(
            "/property/wooded-parcel/123",
            "Wooded 15 Acre Parcel",
            "$400,000",
            "15 acres",
        )]),
    );
    fetcher.set_page(
        LANDSEARCH_INDEX,
        &landsearch_page(&[(
            "/properties/caroline-county-va/40112",
            "River Bend 18 Acres",
            "$480,000",
            "18 acres",
        )]),
    );

    let coordinator = RunCoordinator::new(two_source_config(), fetcher.clone(), store.clone());
    let good = coordinator.run_once().await.unwrap();
    assert!(good.committed);

    // Both sites drop off the network.
    fetcher.clear();
    let bad = coordinator.run_once().await.unwrap();
    assert!(!bad.committed);
    assert!(bad.source_status.values().all(|s| !s.ok));

    let state = store.get_system_state().await.unwrap();
    // The failed attempt is visible, the data timestamp is not wiped.
    assert_eq!(state.last_attempted_utc, Some(bad.started_utc));
    assert_eq!(state.last_updated_utc, Some(good.started_utc));

    // Listings from the good run are untouched, still active.
    let listings = store.get_listings().await.unwrap();
    assert_eq!(listings.len(), 2);
    assert!(listings.iter().all(|l| l.active));
}

#[tokio::test]
async fn test_recovery_after_outage() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::new());
    let page = landwatch_page(&[(
        "/property/wooded-parcel/123",
        "Wooded 15 Acre Parcel",
        "$400,000",
        "15 acres",
    )]);
    fetcher.set_page(LANDWATCH_INDEX, &page);
    fetcher.set_page(
        LANDSEARCH_INDEX,
        &landsearch_page(&[(
            "/properties/caroline-county-va/40112",
            "River Bend 18 Acres",
            "$480,000",
            "18 acres",
        )]),
    );

    let coordinator = RunCoordinator::new(two_source_config(), fetcher.clone(), store.clone());
    coordinator.run_once().await.unwrap();

    fetcher.clear();
    coordinator.run_once().await.unwrap();

    // Network comes back with the same pages.
    fetcher.set_page(LANDWATCH_INDEX, &page);
    fetcher.set_page(
        LANDSEARCH_INDEX,
        &landsearch_page(&[(
            "/properties/caroline-county-va/40112",
            "River Bend 18 Acres",
            "$480,000",
            "18 acres",
        )]),
    );
    let recovered = coordinator.run_once().await.unwrap();

    assert!(recovered.committed);
    let state = store.get_system_state().await.unwrap();
    assert_eq!(state.last_updated_utc, Some(recovered.started_utc));

    // The outage did not deactivate anything or create duplicates.
    let listings = store.get_listings().await.unwrap();
    assert_eq!(listings.len(), 2);
    assert!(listings.iter().all(|l| l.active));
}
