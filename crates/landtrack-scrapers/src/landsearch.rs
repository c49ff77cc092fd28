//! LandSearch listing-index extraction.

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
    debug!(source, "no listing cards found, falling back to anchor scan");
    anchor_candidates(&doc, base, source, &is_detail_url)
}

fn card_candidates(doc: &Html, base: &Url, source: &str) -> Vec<RawCandidate> {
    let (Some(card_sel), Some(link_sel), Some(title_sel), Some(price_sel), Some(size_sel), Some(addr_sel)) = (
        selector(".properties__item"),
        selector("a.properties__link"),
        selector(".properties__title"),
        selector(".properties__price"),
        selector(".properties__size"),
        selector(".properties__address"),
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
            debug!(source, "skipping listing card without a detail link");
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
            address_text: card.select(&addr_sel).next().map(element_text).unwrap_or_default(),
        });
    }
    out
}

/// Detail pages look like `/properties/<area>/<numeric id>`; everything else
/// on an index page (county navigation, pagination, filters) is noise.
fn is_detail_url(url: &Url) -> bool {
    if url.fragment().is_some() {
        return false;
    }
    if !url.host_str().map_or(false, |h| h.ends_with("landsearch.com")) {
        return false;
    }
    let parts: Vec<&str> = url.path().trim_matches('/').split('/').collect();
    parts.len() >= 3
        && parts[0] == "properties"
        && parts
            .last()
            .map_or(false, |id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
}
