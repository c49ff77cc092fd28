use super::StorageGateway;
use crate::model::{Listing, RunState};
use crate::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// The run-state collection is a single-row table; everything reads and
/// writes this fixed key.
const RUN_STATE_ROW_ID: i64 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct RunStateRow {
    id: i64,
    #[serde(flatten)]
    state: RunState,
}

/// Storage gateway backed by a PostgREST-style structured-storage service
/// (a Supabase project in the deployed setup).
///
/// The endpoint and service key arrive as opaque, already-resolved strings;
/// secret retrieval is somebody else's job.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    listings_url: Url,
    run_state_url: Url,
    key: String,
}

impl RestStore {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self> {
        let mut base = Url::parse(endpoint)?;
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let rest = base.join("rest/v1/")?;
        Ok(Self {
            client: reqwest::Client::new(),
            listings_url: rest.join("listings")?,
            run_state_url: rest.join("run_state")?,
            key: api_key.to_string(),
        })
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.key).bearer_auth(&self.key)
    }

    fn storage_err(context: &str, err: reqwest::Error) -> TrackerError {
        TrackerError::Storage(format!("{context}: {err}"))
    }
}

#[async_trait]
impl StorageGateway for RestStore {
    async fn upsert_listing(&self, listing: &Listing) -> Result<()> {
        debug!(id = %listing.id, source = %listing.source, "upserting listing");
        let mut url = self.listings_url.clone();
        url.query_pairs_mut().append_pair("on_conflict", "id");

        self.authed(self.client.post(url))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[listing])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Self::storage_err("upsert listing", e))?;
        Ok(())
    }

    async fn fetch_listings(&self, source: Option<&str>) -> Result<Vec<Listing>> {
        let mut url = self.listings_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            if let Some(source) = source {
                pairs.append_pair("source", &format!("eq.{source}"));
            }
        }

        let response = self
            .authed(self.client.get(url))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Self::storage_err("fetch listings", e))?;

        response
            .json::<Vec<Listing>>()
            .await
            .map_err(|e| Self::storage_err("decode listings", e))
    }

    async fn read_run_state(&self) -> Result<RunState> {
        let mut url = self.run_state_url.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("id", &format!("eq.{RUN_STATE_ROW_ID}"))
            .append_pair("limit", "1");

        let response = self
            .authed(self.client.get(url))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Self::storage_err("read run state", e))?;

        let rows: Vec<RunStateRow> = response
            .json()
            .await
            .map_err(|e| Self::storage_err("decode run state", e))?;

        Ok(rows.into_iter().next().map(|r| r.state).unwrap_or_default())
    }

    async fn write_run_state(&self, state: &RunState) -> Result<()> {
        let mut url = self.run_state_url.clone();
        url.query_pairs_mut().append_pair("on_conflict", "id");

        let row = RunStateRow {
            id: RUN_STATE_ROW_ID,
            state: state.clone(),
        };
        self.authed(self.client.post(url))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[row])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Self::storage_err("write run state", e))?;
        Ok(())
    }
}
