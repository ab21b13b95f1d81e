use ecostats_application::use_cases::GetEcosystemStatsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 3600;

/// Force-refreshes the ecosystem statistics on an interval so readers keep
/// hitting a warm cache.
pub struct StatsRefreshJob {
    stats: Arc<GetEcosystemStatsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl StatsRefreshJob {
    pub fn new(stats: Arc<GetEcosystemStatsUseCase>) -> Self {
        Self {
            stats,
            interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
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

    /// Spawns the job loop. The handle resolves once the loop has observed
    /// cancellation.
    pub async fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval_secs,
            "Starting stats refresh job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("StatsRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.refresh_once().await;
                    }
                }
            }
        })
    }

    pub async fn refresh_once(&self) {
        let stats = self.stats.execute(true).await;
        if stats.is_synthetic() {
            warn!("Stats refresh served synthetic data");
            return;
        }
        info!(
            plugins = stats.overview.total_plugins,
            marketplaces = stats.overview.total_marketplaces,
            skipped = stats.metadata.skipped_records,
            processing_time_ms = stats.metadata.processing_time_ms,
            "Stats refresh completed"
        );
    }
}
