pub mod get_ecosystem_stats;

pub use get_ecosystem_stats::{GetEcosystemStatsUseCase, ECOSYSTEM_STATS_KEY};
