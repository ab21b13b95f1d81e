use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::ConfigError;

/// Aggregation, caching and fallback settings for the ecosystem statistics
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsConfig {
    /// Path of the JSON document produced by the marketplace scanner
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Lifetime of an assembled statistics object (default: 6 hours)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Ecosystem launch date (YYYY-MM-DD); trend curves never start before it
    #[serde(default = "default_launch_date")]
    pub launch_date: String,

    /// Collapse concurrent cache misses for the same key into one recomputation
    #[serde(default = "default_true")]
    pub single_flight: bool,

    /// Fixed seed for the estimate/jitter random source; random when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Interval of the background refresh job
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl StatsConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn launch_date_utc(&self) -> Result<DateTime<Utc>, ConfigError> {
        let date = NaiveDate::parse_from_str(&self.launch_date, "%Y-%m-%d").map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid launch_date '{}': {}",
                self.launch_date, e
            ))
        })?;
        Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            launch_date: default_launch_date(),
            single_flight: true,
            rng_seed: None,
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

fn default_data_path() -> String {
    "data/marketplaces.json".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    6 * 60 * 60
}

fn default_launch_date() -> String {
    "2025-10-09".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    60 * 60
}

fn default_true() -> bool {
    true
}
