use ecostats_application::use_cases::GetCacheStatsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_REPORT_INTERVAL_SECS: u64 = 300;

/// Periodically logs cache diagnostics.
pub struct CacheReportJob {
    cache_stats: Arc<GetCacheStatsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheReportJob {
    pub fn new(cache_stats: Arc<GetCacheStatsUseCase>) -> Self {
        Self {
            cache_stats,
            interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(interval_secs = self.interval_secs, "Starting cache report job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheReportJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let stats = self.cache_stats.execute();
                        info!(
                            entries = stats.total_entries,
                            size = stats.total_size,
                            hits = stats.hits,
                            misses = stats.misses,
                            hit_rate = stats.hit_rate,
                            oldest_entry_age_ms = ?stats.oldest_entry_age_ms,
                            "Cache report"
                        );
                    }
                }
            }
        })
    }
}
