pub mod config;
pub mod fetch;
mod landandfarm;
mod landsearch;
mod landwatch;
pub mod parse;
pub mod runner;

use landtrack_core::Candidate;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// The sites this tracker knows how to read. Adapters are selected at
/// configuration time; there is no runtime lookup by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    LandSearch,
    LandWatch,
    LandAndFarm,
}

impl SourceKind {
    /// Extracts raw candidates from one listing-index page. Purely
    /// in-memory; fetching the page is the run coordinator's job so fetch
    /// failures and parse failures stay distinguishable.
    pub fn extract(&self, html: &str, base: &Url, source: &str) -> Vec<RawCandidate> {
        match self {
            SourceKind::LandSearch => landsearch::extract(html, base, source),
            SourceKind::LandWatch => landwatch::extract(html, base, source),
            SourceKind::LandAndFarm => landandfarm::extract(html, base, source),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::LandSearch => write!(f, "LandSearch"),
            SourceKind::LandWatch => write!(f, "LandWatch"),
            SourceKind::LandAndFarm => write!(f, "LandAndFarm"),
        }
    }
}

/// One listing as pulled out of a page, fields still raw text. Discarded
/// after [`RawCandidate::normalize`].
#[derive(Debug, Clone)]
pub struct RawCandidate {
    pub source: String,
    pub title: String,
    pub url: Url,
    pub price_text: String,
    pub acres_text: String,
    pub address_text: String,
}

/// Titles the sites emit for navigation chrome instead of listings.
const BAD_TITLES: &[&str] = &["", "land listing", "listing", "skip to navigation", "skip to content"];

impl RawCandidate {
    /// Turns raw text fields into a typed candidate. Unparseable price or
    /// acreage becomes `None`; a useless title is replaced with a generic
    /// per-source one.
    pub fn normalize(self) -> Candidate {
        let title = collapse_ws(&self.title);
        let title = if BAD_TITLES.contains(&title.to_ascii_lowercase().as_str()) {
            format!("{} listing", self.source)
        } else {
            title
        };

        Candidate {
            title,
            address: collapse_ws(&self.address_text),
            price: parse::parse_price(&self.price_text),
            acres: parse::parse_acres(&self.acres_text),
            source: self.source,
            url: self.url,
        }
    }
}

pub(crate) fn selector(s: &str) -> Option<Selector> {
    Selector::parse(s).ok()
}

pub(crate) fn element_text(el: ElementRef) -> String {
    collapse_ws(&el.text().collect::<Vec<_>>().join(" "))
}

pub(crate) fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Last-resort extraction when a page's card markup has drifted: walk every
/// anchor that still points at a detail page and mine the surrounding card
/// text for price and acreage.
pub(crate) fn anchor_candidates(
    doc: &Html,
    base: &Url,
    source: &str,
    link_ok: &dyn Fn(&Url) -> bool,
) -> Vec<RawCandidate> {
    let Some(anchor_sel) = selector("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for anchor in doc.select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(url) = parse::resolve_url(base, href) else {
            continue;
        };
        if !link_ok(&url) || !seen.insert(url.to_string()) {
            continue;
        }

        let title = element_text(anchor);
        // Climb a few levels; the enclosing card usually carries the price
        // and acreage. Stop before the text balloons into whole-page noise.
        let mut card_text = title.clone();
        for ancestor in anchor.ancestors().filter_map(ElementRef::wrap).take(3) {
            let text = element_text(ancestor);
            if text.len() > 500 {
                break;
            }
            if !text.is_empty() {
                card_text = text;
            }
        }

        let acres_text = parse::scan_acres(&card_text)
            .map(|v| format!("{v} acres"))
            .unwrap_or_default();

        out.push(RawCandidate {
            source: source.to_string(),
            title,
            url,
            price_text: card_text,
            acres_text,
            address_text: String::new(),
        });
    }
    out
}
