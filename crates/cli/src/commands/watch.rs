use crate::di::UseCases;
use ecostats_domain::Config;
use ecostats_jobs::{CacheReportJob, JobRunner, StatsRefreshJob};
use tracing::info;

pub async fn run_watch(use_cases: &UseCases, config: &Config) -> anyhow::Result<()> {
    let interval_secs = config.stats.refresh_interval_secs;

    let running = JobRunner::new()
        .with_stats_refresh(
            StatsRefreshJob::new(use_cases.get_stats.clone()).with_interval(interval_secs),
        )
        .with_cache_report(
            CacheReportJob::new(use_cases.get_cache_stats.clone()).with_interval(interval_secs),
        )
        .start()
        .await;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    let stopped = running.shutdown().await;
    info!(stopped, "Watch stopped");
    use_cases.clear_cache.execute();
    Ok(())
}
