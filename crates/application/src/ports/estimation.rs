use chrono::{DateTime, Utc};
use ecostats_domain::PluginRecord;

/// Pulls a plugin count out of a marketplace's free-text description.
pub trait PluginCountExtractor: Send + Sync {
    fn extract(&self, description: &str) -> Option<u64>;
}

/// Proxy-metric formulas. Upstream exposes no download telemetry, so every
/// figure produced here is an estimate.
pub trait EstimationModel: Send + Sync {
    fn marketplace_downloads(&self, stars: u64, forks: u64) -> u64;

    fn plugin_downloads(&self, plugin: &PluginRecord) -> u64;

    /// Score in `[0, 100]`.
    fn quality_score(&self, plugin: &PluginRecord, now: DateTime<Utc>) -> f64;
}
