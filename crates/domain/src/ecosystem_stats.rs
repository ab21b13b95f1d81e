use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{GrowthTrends, StatsQuery, TimeRange};

/// Data source recorded when the statistics were produced by the synthetic
/// generator instead of the scanner's dataset.
pub const MOCK_DATA_SOURCE: &str = "mock-data-generator";

/// Consolidated ecosystem statistics; the unit of caching and invalidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemStats {
    pub overview: EcosystemOverview,
    pub growth: BTreeMap<TimeRange, GrowthTrends>,
    pub categories: Vec<CategoryAnalytics>,
    pub developers: Vec<DeveloperAnalytics>,
    pub quality: QualityIndicators,
    pub metadata: EcosystemMetadata,
}

impl EcosystemStats {
    pub fn is_synthetic(&self) -> bool {
        self.metadata
            .data_sources
            .iter()
            .any(|s| s == MOCK_DATA_SOURCE)
    }

    pub fn with_cache_info(mut self, cache_info: CacheInfo) -> Self {
        self.metadata.cache_info = cache_info;
        self
    }

    /// Narrows growth to the queried period and re-buckets it by the
    /// queried aggregation. Everything else is passed through.
    pub fn view(&self, query: &StatsQuery) -> EcosystemStats {
        let growth = self
            .growth
            .get(&query.period)
            .map(|trends| {
                let mut narrowed = BTreeMap::new();
                narrowed.insert(query.period, trends.aggregate(query.aggregation));
                narrowed
            })
            .unwrap_or_default();

        EcosystemStats {
            growth,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemOverview {
    pub total_marketplaces: u64,
    pub total_plugins: u64,
    pub total_developers: u64,
    /// Estimated from stars and forks; not measured
    pub total_downloads: u64,
    pub total_stars: u64,
    pub verified_marketplaces: u64,
    pub average_plugins_per_marketplace: f64,
    /// Plugin growth over the last 30 days, percent
    pub monthly_growth_rate: f64,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalytics {
    pub category: String,
    pub plugin_count: u64,
    pub percentage: f64,
    pub average_quality_score: f64,
    /// Estimated from stars; not measured
    pub total_downloads: u64,
    pub developer_count: u64,
    pub growth_rate: f64,
    pub popular_tags: Vec<String>,
    pub top_plugins: Vec<TopPlugin>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPlugin {
    pub name: String,
    pub marketplace: Option<String>,
    pub quality_score: f64,
    pub stars: u64,
    pub estimated_downloads: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperAnalytics {
    pub login: String,
    pub avatar_url: Option<String>,
    pub marketplace_count: u64,
    pub plugin_count: u64,
    /// True when at least one marketplace's plugin count was a fallback guess
    pub plugin_count_estimated: bool,
    pub total_stars: u64,
    pub total_forks: u64,
    pub estimated_downloads: u64,
    pub last_active: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityIndicators {
    pub verification: VerificationMetrics,
    pub maintenance: MaintenanceMetrics,
    pub quality_metrics: QualityMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMetrics {
    pub verified_plugins: u64,
    pub verification_rate: f64,
    pub badges: Vec<QualityBadge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityBadge {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceMetrics {
    pub recently_updated: u64,
    pub active_maintenance_rate: f64,
    /// Mean days since last update
    pub avg_update_frequency: f64,
    pub abandoned_plugins: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub avg_quality_score: f64,
    pub high_quality_plugins: u64,
    pub common_issues: Vec<QualityIssue>,
    pub distribution: QualityDistribution,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityIssue {
    pub issue: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityDistribution {
    pub excellent: u64,
    pub good: u64,
    pub fair: u64,
    pub poor: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityMetrics {
    pub scanned_plugins: u64,
    pub critical_issues: u64,
    pub security_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemMetadata {
    pub last_updated: DateTime<Utc>,
    pub data_sources: Vec<String>,
    pub processing_time_ms: u64,
    pub marketplace_count: u64,
    pub plugin_count: u64,
    pub skipped_records: u64,
    pub cache_info: CacheInfo,
    pub freshness: DataFreshness,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfo {
    pub hit: bool,
    pub ttl_ms: u64,
    pub remaining_ttl_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFreshness {
    pub marketplaces_age_ms: Option<u64>,
    pub plugins_age_ms: Option<u64>,
}
