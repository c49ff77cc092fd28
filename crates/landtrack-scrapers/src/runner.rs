use crate::config::{AppConfig, SourceConfig};
use crate::fetch::PageFetcher;
use chrono::{DateTime, Utc};
use landtrack_core::{listing_id, reconcile, Candidate, Result, SourceStatus, StorageGateway};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

/// What one scrape cycle did, for logging and callers.
#[derive(Debug)]
pub struct RunReport {
    pub started_utc: DateTime<Utc>,
    pub committed: bool,
    pub source_status: BTreeMap<String, SourceStatus>,
}

/// Outcome of one source's pipeline. Fetch and parse problems are values
/// here, not errors; only storage trouble escapes as `Err`.
enum SourceOutcome {
    Merged { items: usize },
    SoftFailure(String),
}

/// Drives one full scrape cycle: fetch each source's index pages, extract
/// and filter candidates, reconcile against prior listings, and record run
/// state. A failing source never takes the others down with it.
pub struct RunCoordinator {
    config: AppConfig,
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn StorageGateway>,
}

impl RunCoordinator {
    pub fn new(
        config: AppConfig,
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn StorageGateway>,
    ) -> Self {
        Self {
            config,
            fetcher,
            store,
        }
    }

    pub async fn run_once(&self) -> Result<RunReport> {
        // One timestamp for the whole run; it stamps both the attempt and,
        // on success, the update, which keeps attempted >= updated.
        let now = Utc::now();

        let mut state = self.store.read_run_state().await?;
        state.last_attempted_utc = Some(now);
        // Written before any scraping so "we tried" survives a total wreck.
        self.store.write_run_state(&state).await?;

        let mut statuses = BTreeMap::new();
        for source in &self.config.sources {
            let status = match self.process_source(source, now).await? {
                SourceOutcome::Merged { items } => {
                    info!(source = %source.name, items, "source merged");
                    SourceStatus::succeeded(items)
                }
                SourceOutcome::SoftFailure(detail) => {
                    warn!(source = %source.name, %detail, "source failed");
                    SourceStatus::failed(detail)
                }
            };
            statuses.insert(source.name.clone(), status);
        }

        let committed = statuses.values().any(|s| s.ok);
        if committed {
            state.last_updated_utc = Some(now);
        }
        state.source_status = statuses.clone();
        self.store.write_run_state(&state).await?;

        info!(committed, "run finished");
        Ok(RunReport {
            started_utc: now,
            committed,
            source_status: statuses,
        })
    }

    async fn process_source(
        &self,
        source: &SourceConfig,
        now: DateTime<Utc>,
    ) -> Result<SourceOutcome> {
        let mut pages = Vec::new();
        for index_url in &source.index_urls {
            match self.fetcher.fetch(index_url).await {
                Ok(html) => pages.push(html),
                // One unfetched page means we cannot tell "listing gone"
                // from "page missing", so the whole source sits this run
                // out rather than falsely deactivating listings.
                Err(e) => {
                    return Ok(SourceOutcome::SoftFailure(format!(
                        "fetch {index_url}: {e}"
                    )))
                }
            }
        }

        let mut raw = Vec::new();
        for html in &pages {
            raw.extend(source.kind.extract(html, &source.base_url, &source.name));
        }
        if raw.is_empty() {
            return Ok(SourceOutcome::SoftFailure(
                "no candidates extracted from any index page".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let candidates: Vec<Candidate> = raw
            .into_iter()
            .map(|r| r.normalize())
            .filter(|c| seen.insert(listing_id(&c.url)))
            .filter(|c| self.config.criteria.matches(c))
            .collect();

        let prior = self.store.fetch_listings(Some(&source.name)).await?;
        let outcome = reconcile(&candidates, &prior, now);
        info!(
            source = %source.name,
            matched = candidates.len(),
            created = outcome.created,
            updated = outcome.updated,
            deactivated = outcome.deactivated,
            "reconciled"
        );

        for listing in &outcome.upserts {
            self.store.upsert_listing(listing).await?;
        }

        Ok(SourceOutcome::Merged {
            items: candidates.len(),
        })
    }
}
