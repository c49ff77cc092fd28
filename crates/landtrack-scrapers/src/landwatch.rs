//! LandWatch listing-index extraction.

use crate::{anchor_candidates, element_text, selector, RawCandidate};
use crate::parse;
use scraper::Html;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

pub(crate) fn extract(html: &str, base: &Url, source: &str) -> Vec<RawCandidate> {
    let doc = Html::parse_document(html);
    let candidates = card_candidates(&doc, base, source);
    if !candidates.is_empty() {
        return candidates;
    }
    debug!(source, "no property cards found, falling back to anchor scan");
    anchor_candidates(&doc, base, source, &is_detail_url)
}

fn card_candidates(doc: &Html, base: &Url, source: &str) -> Vec<RawCandidate> {
    let (Some(card_sel), Some(link_sel), Some(title_sel), Some(price_sel), Some(acreage_sel), Some(addr_sel)) = (
        selector("div.property-card"),
        selector("a.property-card__link"),
        selector(".property-card__title"),
        selector(".property-card__price"),
        selector(".property-card__acreage"),
        selector(".property-card__address"),
    ) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for card in doc.select(&card_sel) {
        let Some(href) = card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            debug!(source, "skipping property card without a detail link");
            continue;
        };
        let Some(url) = parse::resolve_url(base, href) else {
            continue;
        };
        if !is_detail_url(&url) || !seen.insert(url.to_string()) {
            continue;
        }

        out.push(RawCandidate {
            source: source.to_string(),
            title: card.select(&title_sel).next().map(element_text).unwrap_or_default(),
            url,
            price_text: card.select(&price_sel).next().map(element_text).unwrap_or_default(),
            acres_text: card.select(&acreage_sel).next().map(element_text).unwrap_or_default(),
            address_text: card.select(&addr_sel).next().map(element_text).unwrap_or_default(),
        });
    }
    out
}

/// LandWatch detail pages all live under `/property/`.
fn is_detail_url(url: &Url) -> bool {
    url.host_str().map_or(false, |h| h.ends_with("landwatch.com"))
        && url.path().contains("/property/")
}
