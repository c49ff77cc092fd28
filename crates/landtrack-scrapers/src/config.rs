use crate::SourceKind;
use landtrack_core::{Criteria, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// One configured source site. A source can watch several index pages (one
/// per county in the default setup); a run reconciles their union once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub kind: SourceKind,
    pub base_url: Url,
    pub index_urls: Vec<Url>,
}

/// Immutable configuration for a run: sources, criteria and fetch policy.
/// Handed to the coordinator at construction; nothing here is ambient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub criteria: Criteria,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    40
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn url(s: &str) -> Url {
    Url::parse(s).expect("valid built-in URL")
}

impl Default for AppConfig {
    /// The watched counties in Virginia and Maryland, per site.
    fn default() -> Self {
        Self {
            sources: vec![
                SourceConfig {
                    name: "LandSearch".to_string(),
                    kind: SourceKind::LandSearch,
                    base_url: url("https://www.landsearch.com/"),
                    index_urls: vec![
                        url("https://www.landsearch.com/properties/king-george-county-va"),
                        url("https://www.landsearch.com/properties/westmoreland-county-va"),
                        url("https://www.landsearch.com/properties/caroline-county-va"),
                        url("https://www.landsearch.com/properties/stafford-county-va"),
                        url("https://www.landsearch.com/properties/caroline-county-md"),
                        url("https://www.landsearch.com/properties/frederick-county-md"),
                        url("https://www.landsearch.com/properties/anne-arundel-county-md"),
                        url("https://www.landsearch.com/properties/montgomery-county-md"),
                    ],
                },
                SourceConfig {
                    name: "LandWatch".to_string(),
                    kind: SourceKind::LandWatch,
                    base_url: url("https://www.landwatch.com/"),
                    index_urls: vec![
                        url("https://www.landwatch.com/virginia-land-for-sale/king-george"),
                        url("https://www.landwatch.com/virginia-land-for-sale/westmoreland-county"),
                        url("https://www.landwatch.com/virginia-land-for-sale/caroline-county"),
                        url("https://www.landwatch.com/virginia-land-for-sale/stafford-county"),
                        url("https://www.landwatch.com/maryland-land-for-sale/caroline-county"),
                        url("https://www.landwatch.com/maryland-land-for-sale/frederick-county"),
                        url("https://www.landwatch.com/maryland-land-for-sale/anne-arundel-county"),
                        url("https://www.landwatch.com/maryland-land-for-sale/montgomery-county"),
                    ],
                },
                SourceConfig {
                    name: "LandAndFarm".to_string(),
                    kind: SourceKind::LandAndFarm,
                    base_url: url("https://www.landandfarm.com/"),
                    index_urls: vec![
                        url("https://www.landandfarm.com/search/virginia/king-george-county-land-for-sale/"),
                        url("https://www.landandfarm.com/search/virginia/westmoreland-county-land-for-sale/"),
                        url("https://www.landandfarm.com/search/virginia/caroline-county-land-for-sale/"),
                        url("https://www.landandfarm.com/search/virginia/stafford-county-land-for-sale/"),
                        url("https://www.landandfarm.com/search/maryland/caroline-county-land-for-sale/"),
                        url("https://www.landandfarm.com/search/maryland/frederick-county-land-for-sale/"),
                        url("https://www.landandfarm.com/search/maryland/anne-arundel-county-land-for-sale/"),
                        url("https://www.landandfarm.com/search/maryland/montgomery-county-land-for-sale/"),
                    ],
                },
            ],
            criteria: Criteria::default(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}
