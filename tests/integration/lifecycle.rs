use crate::common::{landwatch_only_config, landwatch_page, StubFetcher, LANDWATCH_INDEX};
use landtrack_core::{MemoryStore, StorageGateway};
use landtrack_scrapers::runner::RunCoordinator;
use std::sync::Arc;

const PARCEL: (&str, &str, &str, &str) = (
    "/property/wooded-parcel/123",
    "Wooded 15 Acre Parcel",
    "$400,000",
    "15 acres",
);

#[tokio::test]
async fn test_new_listing_is_created_on_first_sight() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::new());
    fetcher.set_page(LANDWATCH_INDEX, &landwatch_page(&[PARCEL]));

    let coordinator = RunCoordinator::new(landwatch_only_config(), fetcher, store.clone());
    let report = coordinator.run_once().await.unwrap();
    assert!(report.committed);

    let listings = store.get_listings().await.unwrap();
    assert_eq!(listings.len(), 1);

    let listing = &listings[0];
    assert!(listing.active);
    assert_eq!(listing.source, "LandWatch");
    assert_eq!(listing.price, Some(400_000));
    assert_eq!(listing.acres, Some(15.0));
    assert_eq!(listing.first_seen_utc, listing.last_seen_utc);

    let state = store.get_system_state().await.unwrap();
    assert_eq!(state.last_attempted_utc, Some(report.started_utc));
    assert_eq!(state.last_updated_utc, Some(report.started_utc));
}

#[tokio::test]
async fn test_price_change_updates_in_place() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::new());
    fetcher.set_page(LANDWATCH_INDEX, &landwatch_page(&[PARCEL]));

    let coordinator = RunCoordinator::new(landwatch_only_config(), fetcher.clone(), store.clone());
    coordinator.run_once().await.unwrap();
    let original = store.get_listings().await.unwrap().remove(0);

    // Same parcel, new price.
    fetcher.set_page(
        LANDWATCH_INDEX,
        &landwatch_page(&[(
            "/property/wooded-parcel/123",
            "Wooded 15 Acre Parcel",
            "$425,000",
            "15 acres",
        )]),
    );
    let second = coordinator.run_once().await.unwrap();

    let listings = store.get_listings().await.unwrap();
    assert_eq!(listings.len(), 1, "no duplicate may appear for the same URL");

    let updated = &listings[0];
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.price, Some(425_000));
    assert_eq!(updated.first_seen_utc, original.first_seen_utc);
    assert_eq!(updated.last_seen_utc, second.started_utc);
    assert!(updated.last_seen_utc >= original.last_seen_utc);
}

#[tokio::test]
async fn test_disappeared_listing_is_kept_inactive() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::new());
    fetcher.set_page(LANDWATCH_INDEX, &landwatch_page(&[PARCEL]));

    let coordinator = RunCoordinator::new(landwatch_only_config(), fetcher.clone(), store.clone());
    coordinator.run_once().await.unwrap();
    let original = store.get_listings().await.unwrap().remove(0);

    // The parcel is gone; another one is listed in its place.
    fetcher.set_page(
        LANDWATCH_INDEX,
        &landwatch_page(&[(
            "/property/roadside-lot/999",
            "Roadside 20 Acres",
            "$300,000",
            "20 acres",
        )]),
    );
    coordinator.run_once().await.unwrap();

    let listings = store.get_listings().await.unwrap();
    assert_eq!(listings.len(), 2, "soft-deleted listings stay fetchable");

    let gone = listings.iter().find(|l| l.id == original.id).unwrap();
    assert!(!gone.active);
    assert_eq!(gone.first_seen_utc, original.first_seen_utc);
    assert_eq!(gone.last_seen_utc, original.last_seen_utc);
    assert_eq!(gone.price, original.price);

    let fresh = listings.iter().find(|l| l.id != original.id).unwrap();
    assert!(fresh.active);
}

#[tokio::test]
async fn test_candidates_outside_criteria_are_not_persisted() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::new());
    fetcher.set_page(
        LANDWATCH_INDEX,
        &landwatch_page(&[
            PARCEL,
            // Too small, too expensive, and unparseable price.
            ("/property/tiny-lot/1", "Tiny Lot", "$50,000", "2 acres"),
            ("/property/estate/2", "Estate", "$2.5m", "30 acres"),
            ("/property/mystery/3", "Mystery Tract", "Call for price", "25 acres"),
        ]),
    );

    let coordinator = RunCoordinator::new(landwatch_only_config(), fetcher, store.clone());
    let report = coordinator.run_once().await.unwrap();

    assert_eq!(report.source_status["LandWatch"].items, 1);
    let listings = store.get_listings().await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Wooded 15 Acre Parcel");
}
