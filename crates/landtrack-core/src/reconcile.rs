use crate::model::{listing_id, Candidate, Listing};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// The writes one source's reconciliation produced, plus counts for logging
/// and the run report.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub upserts: Vec<Listing>,
    pub created: usize,
    pub updated: usize,
    pub deactivated: usize,
}

/// Merges one source's filtered candidates into its previously persisted
/// listings.
///
/// - A candidate whose id already exists refreshes the mutable fields and
///   advances `last_seen_utc`; `first_seen_utc` is never touched.
/// - An unknown id becomes a new listing with `first_seen_utc ==
///   last_seen_utc == now`.
/// - A prior listing absent from this run's candidates is flipped to
///   `active = false` and otherwise left alone. Already-inactive listings
///   that stay absent produce no write.
///
/// `prior` must contain only listings of the candidates' source; under that
/// contract, reconciling different sources in any order yields the same
/// final state.
pub fn reconcile(
    candidates: &[Candidate],
    prior: &[Listing],
    now: DateTime<Utc>,
) -> ReconcileOutcome {
    let prior_by_id: HashMap<&str, &Listing> =
        prior.iter().map(|l| (l.id.as_str(), l)).collect();

    let mut outcome = ReconcileOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for candidate in candidates {
        let id = listing_id(&candidate.url);
        // The same detail page can surface on several index pages; the first
        // occurrence wins.
        if !seen.insert(id.clone()) {
            continue;
        }

        match prior_by_id.get(id.as_str()) {
            Some(existing) => {
                outcome.upserts.push(Listing {
                    id,
                    source: candidate.source.clone(),
                    title: candidate.title.clone(),
                    url: candidate.url.clone(),
                    address: candidate.address.clone(),
                    price: candidate.price,
                    acres: candidate.acres,
                    first_seen_utc: existing.first_seen_utc,
                    last_seen_utc: now,
                    active: true,
                });
                outcome.updated += 1;
            }
            None => {
                outcome.upserts.push(Listing {
                    id,
                    source: candidate.source.clone(),
                    title: candidate.title.clone(),
                    url: candidate.url.clone(),
                    address: candidate.address.clone(),
                    price: candidate.price,
                    acres: candidate.acres,
                    first_seen_utc: now,
                    last_seen_utc: now,
                    active: true,
                });
                outcome.created += 1;
            }
        }
    }

    for listing in prior {
        if listing.active && !seen.contains(&listing.id) {
            let mut gone = listing.clone();
            gone.active = false;
            outcome.upserts.push(gone);
            outcome.deactivated += 1;
        }
    }

    outcome
}
