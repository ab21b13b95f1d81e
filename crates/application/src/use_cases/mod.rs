pub mod cache;
pub mod stats;

pub use cache::{ClearCacheUseCase, GetCacheStatsUseCase};
pub use stats::{GetEcosystemStatsUseCase, ECOSYSTEM_STATS_KEY};
