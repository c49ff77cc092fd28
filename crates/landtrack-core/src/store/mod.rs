mod rest;

pub use rest::RestStore;

use crate::model::{Listing, RunState};
use crate::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Contract against the external persistence service.
///
/// The tracker owns no durable state of its own; listings and the run-state
/// record live behind this interface. Each call is an independent atomic
/// operation; nothing here assumes cross-record transactions.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Insert-or-replace keyed by `Listing::id`.
    async fn upsert_listing(&self, listing: &Listing) -> Result<()>;

    /// All listings, optionally restricted to one source. Inactive listings
    /// are included.
    async fn fetch_listings(&self, source: Option<&str>) -> Result<Vec<Listing>>;

    async fn read_run_state(&self) -> Result<RunState>;

    async fn write_run_state(&self, state: &RunState) -> Result<()>;

    /// Read surface for the dashboard: every listing across all sources.
    /// Display filtering is the dashboard's concern, not ours.
    async fn get_listings(&self) -> Result<Vec<Listing>> {
        self.fetch_listings(None).await
    }

    /// Read surface for the dashboard's "last updated" / "last attempted"
    /// header.
    async fn get_system_state(&self) -> Result<RunState> {
        self.read_run_state().await
    }
}

/// In-memory gateway used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    listings: BTreeMap<String, Listing>,
    run_state: RunState,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageGateway for MemoryStore {
    async fn upsert_listing(&self, listing: &Listing) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.listings.insert(listing.id.clone(), listing.clone());
        Ok(())
    }

    async fn fetch_listings(&self, source: Option<&str>) -> Result<Vec<Listing>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .listings
            .values()
            .filter(|l| source.map_or(true, |s| l.source == s))
            .cloned()
            .collect())
    }

    async fn read_run_state(&self) -> Result<RunState> {
        Ok(self.inner.lock().unwrap().run_state.clone())
    }

    async fn write_run_state(&self, state: &RunState) -> Result<()> {
        self.inner.lock().unwrap().run_state = state.clone();
        Ok(())
    }
}
