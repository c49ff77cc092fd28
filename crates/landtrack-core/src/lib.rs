mod display;
mod model;
mod reconcile;
pub mod store;

pub use display::{create_listing_table, ListingTableRow};
pub use model::{listing_id, Candidate, Criteria, Listing, RunState, SourceStatus};
pub use reconcile::{reconcile, ReconcileOutcome};
pub use store::{MemoryStore, RestStore, StorageGateway};

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Scraping error: {0}")]
    Scraping(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}
