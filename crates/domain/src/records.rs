use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceOwner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A marketplace repository as harvested by the scanner.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceRecord {
    pub name: String,
    pub owner: MarketplaceOwner,
    /// Free text; may embed a plugin count ("Collection of 12 plugins")
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "stargazersCount")]
    pub stars: u64,
    #[serde(default, alias = "forksCount")]
    pub forks: u64,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_manifest: bool,
    #[serde(default)]
    pub url: Option<String>,
}

impl MarketplaceRecord {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidRecord(
                "marketplace with empty name".to_string(),
            ));
        }
        if self.owner.login.trim().is_empty() {
            return Err(DomainError::InvalidRecord(format!(
                "marketplace '{}' has an empty owner login",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScan {
    #[serde(default)]
    pub scanned: bool,
    #[serde(default)]
    pub critical_issues: u32,
}

/// A plugin listed by one of the marketplaces.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRecord {
    pub name: String,
    /// `owner/repo` of the marketplace listing this plugin
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "keywords")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub stars: u64,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub security: Option<SecurityScan>,
}

impl PluginRecord {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidRecord(
                "plugin with empty name".to_string(),
            ));
        }
        if let Some(score) = self.quality_score {
            if !score.is_finite() {
                return Err(DomainError::InvalidRecord(format!(
                    "plugin '{}' has a non-finite quality score",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Developer credited for the plugin: the author, else the marketplace owner.
    pub fn developer(&self) -> Option<&str> {
        self.author
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| {
                self.marketplace
                    .as_deref()
                    .and_then(|m| m.split('/').next())
                    .filter(|o| !o.is_empty())
            })
    }

    pub fn first_seen(&self) -> DateTime<Utc> {
        self.created_at.unwrap_or(self.updated_at)
    }

    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

/// The scanner's document after decoding.
///
/// Records whose shape does not decode are dropped and counted in `skipped`
/// instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    pub marketplaces: Vec<MarketplaceRecord>,
    pub plugins: Vec<PluginRecord>,
    pub generated_at: Option<DateTime<Utc>>,
    pub skipped: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    marketplaces: Vec<Value>,
    #[serde(default)]
    plugins: Vec<Value>,
    #[serde(default)]
    generated_at: Option<DateTime<Utc>>,
}

impl RawDataset {
    pub fn new(marketplaces: Vec<MarketplaceRecord>, plugins: Vec<PluginRecord>) -> Self {
        Self {
            marketplaces,
            plugins,
            generated_at: None,
            skipped: 0,
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self, DomainError> {
        let document: RawDocument = serde_json::from_str(input)
            .map_err(|e| DomainError::DataUnavailable(format!("malformed dataset: {}", e)))?;

        let mut skipped = 0;
        let marketplaces = decode_records(document.marketplaces, &mut skipped);
        let plugins = decode_records(document.plugins, &mut skipped);

        Ok(Self {
            marketplaces,
            plugins,
            generated_at: document.generated_at,
            skipped,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.marketplaces.is_empty() && self.plugins.is_empty()
    }
}

fn decode_records<T: DeserializeOwned>(values: Vec<Value>, skipped: &mut usize) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(_) => {
                *skipped += 1;
                None
            }
        })
        .collect()
}
