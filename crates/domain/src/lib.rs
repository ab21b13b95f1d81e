//! Ecostats Domain Layer
pub mod cache_stats;
pub mod category;
pub mod config;
pub mod ecosystem_stats;
pub mod errors;
pub mod records;
pub mod stats_query;
pub mod time_range;
pub mod trend;

pub use cache_stats::CacheStats;
pub use category::PluginCategory;
pub use config::{CliOverrides, Config, LoggingConfig, StatsConfig};
pub use ecosystem_stats::{
    CacheInfo, CategoryAnalytics, DataFreshness, DeveloperAnalytics, EcosystemMetadata,
    EcosystemOverview, EcosystemStats, MaintenanceMetrics, QualityBadge, QualityDistribution,
    QualityIndicators, QualityIssue, QualityMetrics, SecurityMetrics, TopPlugin,
    VerificationMetrics, MOCK_DATA_SOURCE,
};
pub use errors::DomainError;
pub use records::{MarketplaceOwner, MarketplaceRecord, PluginRecord, RawDataset, SecurityScan};
pub use stats_query::StatsQuery;
pub use time_range::{Aggregation, TimeRange};
pub use trend::{GrowthTrends, TrendDataPoint};
