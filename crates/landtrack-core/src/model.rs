use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use url::Url;

/// A land listing as persisted in the listings collection.
///
/// Listings are never deleted. A listing that disappears from its source is
/// flipped to `active = false` and kept for history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub source: String,
    pub title: String,
    pub url: Url,
    pub address: String,
    pub price: Option<i64>,
    pub acres: Option<f64>,
    pub first_seen_utc: DateTime<Utc>,
    pub last_seen_utc: DateTime<Utc>,
    pub active: bool,
}

/// A normalized scrape result, ready for filtering and reconciliation.
///
/// Unparseable price or acreage fields come through as `None`; that is an
/// expected outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub source: String,
    pub title: String,
    pub url: Url,
    pub address: String,
    pub price: Option<i64>,
    pub acres: Option<f64>,
}

/// Global acreage/price bounds a candidate must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criteria {
    pub min_acres: f64,
    pub max_acres: f64,
    pub max_price: i64,
}

impl Criteria {
    /// All bounds are inclusive. A candidate with unknown acreage or price
    /// cannot be verified to match and is excluded.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        match (candidate.acres, candidate.price) {
            (Some(acres), Some(price)) => {
                acres >= self.min_acres && acres <= self.max_acres && price <= self.max_price
            }
            _ => false,
        }
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            min_acres: 11.0,
            max_acres: 50.0,
            max_price: 600_000,
        }
    }
}

/// Per-source outcome of the most recent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub ok: bool,
    pub items: usize,
    pub error: Option<String>,
}

impl SourceStatus {
    pub fn succeeded(items: usize) -> Self {
        Self {
            ok: true,
            items,
            error: None,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: 0,
            error: Some(detail.into()),
        }
    }
}

/// Singleton run bookkeeping record.
///
/// `last_attempted_utc` moves on every run, `last_updated_utc` only when at
/// least one source merged successfully, so `last_attempted_utc` is always
/// at or past `last_updated_utc`. The dashboard uses the gap between the two
/// to tell "stale" apart from "never succeeded".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub last_attempted_utc: Option<DateTime<Utc>>,
    pub last_updated_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source_status: BTreeMap<String, SourceStatus>,
}

/// Derives the stable listing identifier from its detail-page URL.
///
/// The URL is reduced to lowercased host plus path (query, fragment and any
/// trailing slash dropped) before hashing, so cosmetic URL variants map to
/// the same listing across runs.
pub fn listing_id(url: &Url) -> String {
    let host = url.host_str().unwrap_or("").to_ascii_lowercase();
    let path = url.path().trim_end_matches('/');
    let mut hasher = Sha256::new();
    hasher.update(host.as_bytes());
    hasher.update(path.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}
