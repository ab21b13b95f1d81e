pub mod clear;
pub mod get_stats;

pub use clear::ClearCacheUseCase;
pub use get_stats::GetCacheStatsUseCase;
