//! Tolerant field parsing for scraped text fragments.
//!
//! Nothing here performs I/O and nothing here fails: input that cannot be
//! parsed yields `None`, which downstream code treats as a regular value.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static MONEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*([km])?\b").expect("valid regex"));

static ACRES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*acres?\b").expect("valid regex"));

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"));

const SQFT_PER_ACRE: f64 = 43_560.0;

/// Price phrases that mean "there is no number here".
const NO_PRICE_WORDS: &[&str] = &["contact", "call", "tbd", "request"];

/// Extracts a listing price from text.
///
/// Handles `$450,000`, `450000`, `450k`, `1.2m`. Text like `Price on
/// request` yields `None`. When several numbers appear (card text often
/// carries "price drop" amounts next to the price), the largest plausible
/// one wins; values under 1000 are ignored outright so bed/bath counts in
/// surrounding text never read as a price.
pub fn parse_price(text: &str) -> Option<i64> {
    let s = text.trim().to_ascii_lowercase();
    if s.is_empty() || NO_PRICE_WORDS.iter().any(|w| s.contains(w)) {
        return None;
    }
    let s = s.replace(['$', ','], "");

    let mut best: Option<i64> = None;
    for cap in MONEY_RE.captures_iter(&s) {
        let Ok(mut value) = cap[1].parse::<f64>() else {
            continue;
        };
        match cap.get(2).map(|m| m.as_str()) {
            Some("k") => value *= 1_000.0,
            Some("m") => value *= 1_000_000.0,
            _ => {}
        }
        let value = value as i64;
        if value < 1_000 {
            continue;
        }
        best = Some(best.map_or(value, |b| b.max(value)));
    }
    best
}

/// Extracts acreage from a dedicated size fragment such as `15 acres`,
/// `15.5 ac` or a bare `12`.
///
/// Ranges take the first bound (`10 - 20 acres` is 10). Explicit square-feet
/// values are converted to acres.
pub fn parse_acres(text: &str) -> Option<f64> {
    let s = text.trim().to_ascii_lowercase().replace(',', "");
    if s.is_empty() {
        return None;
    }
    let value: f64 = NUMBER_RE.find(&s)?.as_str().parse().ok()?;

    if s.contains("sq") && (s.contains("ft") || s.contains("feet")) {
        return Some(value / SQFT_PER_ACRE);
    }
    Some(value)
}

/// Finds an `N acres` phrase inside arbitrary card text.
///
/// Unlike [`parse_acres`] this does not accept bare numbers, so the room
/// counts and prices that surround a listing link never read as acreage.
pub fn scan_acres(text: &str) -> Option<f64> {
    let s = text.to_ascii_lowercase().replace(',', "");
    ACRES_RE
        .captures(&s)
        .and_then(|cap| cap[1].parse::<f64>().ok())
}

/// Joins a possibly-relative link against the source's base URL.
/// Absolute hrefs pass through unchanged.
pub fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok()
}
