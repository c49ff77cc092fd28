use async_trait::async_trait;
use landtrack_core::{Result, TrackerError};
use landtrack_scrapers::config::{AppConfig, SourceConfig};
use landtrack_scrapers::fetch::PageFetcher;
use landtrack_scrapers::SourceKind;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

pub const LANDWATCH_INDEX: &str =
    "https://www.landwatch.com/virginia-land-for-sale/caroline-county";
pub const LANDSEARCH_INDEX: &str = "https://www.landsearch.com/properties/caroline-county-va";

/// Serves canned pages; URLs without a page fail like a dead network.
/// Pages can be swapped between runs to simulate listings changing.
pub struct StubFetcher {
    pages: Mutex<HashMap<String, String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_page(&self, url: &str, html: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), html.to_string());
    }

    pub fn clear(&self) {
        self.pages.lock().unwrap().clear();
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        self.pages
            .lock()
            .unwrap()
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| TrackerError::Scraping(format!("connection refused: {url}")))
    }
}

pub fn landwatch_only_config() -> AppConfig {
    AppConfig {
        sources: vec![SourceConfig {
            name: "LandWatch".to_string(),
            kind: SourceKind::LandWatch,
            base_url: Url::parse("https://www.landwatch.com/").unwrap(),
            index_urls: vec![Url::parse(LANDWATCH_INDEX).unwrap()],
        }],
        criteria: Default::default(),
        fetch_timeout_secs: 40,
    }
}

pub fn two_source_config() -> AppConfig {
    let mut config = landwatch_only_config();
    config.sources.push(SourceConfig {
        name: "LandSearch".to_string(),
        kind: SourceKind::LandSearch,
        base_url: Url::parse("https://www.landsearch.com/").unwrap(),
        index_urls: vec![Url::parse(LANDSEARCH_INDEX).unwrap()],
    });
    config
}

/// A LandWatch index page holding the given property cards.
pub fn landwatch_page(cards: &[(&str, &str, &str, &str)]) -> String {
    let cards: String = cards
        .iter()
        .map(|(path, title, price, acres)| {
            format!(
                r#"<div class="property-card">
                     <a class="property-card__link" href="{path}">
                       <div class="property-card__title">{title}</div>
                     </a>
                     <div class="property-card__price">{price}</div>
                     <div class="property-card__acreage">{acres}</div>
                     <div class="property-card__address">Caroline County, VA</div>
                   </div>"#
            )
        })
        .collect();
    format!("<html><body><div class=\"search-results\">{cards}</div></body></html>")
}

pub fn landsearch_page(cards: &[(&str, &str, &str, &str)]) -> String {
    let cards: String = cards
        .iter()
        .map(|(path, title, price, acres)| {
            format!(
                r#"<div class="properties__item">
                     <a class="properties__link" href="{path}">
                       <span class="properties__title">{title}</span>
                     </a>
                     <div class="properties__price">{price}</div>
                     <div class="properties__size">{acres}</div>
                     <div class="properties__address">Caroline County, VA</div>
                   </div>"#
            )
        })
        .collect();
    format!("<html><body><div class=\"properties__list\">{cards}</div></body></html>")
}
