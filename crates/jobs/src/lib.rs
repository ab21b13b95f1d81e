pub mod cache_report;
pub mod runner;
pub mod stats_refresh;

pub use cache_report::CacheReportJob;
pub use runner::{JobRunner, RunningJobs};
pub use stats_refresh::StatsRefreshJob;
