//! Land And Farm listing-index extraction.

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
    debug!(source, "no result cards found, falling back to anchor scan");
    anchor_candidates(&doc, base, source, &is_detail_url)
}

fn card_candidates(doc: &Html, base: &Url, source: &str) -> Vec<RawCandidate> {
    let (Some(card_sel), Some(link_sel), Some(title_sel), Some(price_sel), Some(size_sel), Some(loc_sel)) = (
        selector("div.result-card"),
        selector("a.result-card__link"),
        selector(".result-card__title"),
        selector(".result-card__price"),
        selector(".result-card__acreage"),
        selector(".result-card__location"),
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
            debug!(source, "skipping result card without a detail link");
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
            acres_text: card.select(&size_sel).next().map(element_text).unwrap_or_default(),
            address_text: card.select(&loc_sel).next().map(element_text).unwrap_or_default(),
        });
    }
    out
}

/// Land And Farm has no single detail-path marker, so require an on-site
/// link at least two path segments deep; that drops the top-level
/// navigation and search pages.
fn is_detail_url(url: &Url) -> bool {
    if !url.host_str().map_or(false, |h| h.ends_with("landandfarm.com")) {
        return false;
    }
    let depth = url
        .path()
        .trim_matches('/')
        .split('/')
        .filter(|p| !p.is_empty())
        .count();
    depth >= 2
}
