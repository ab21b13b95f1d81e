use crate::{CacheReportJob, StatsRefreshJob};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub trait SpawnableJob: Send + Sync + 'static {
    const NAME: &'static str;

    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty, $name:literal) => {
        impl SpawnableJob for $t {
            const NAME: &'static str = $name;

            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> JoinHandle<()> {
                tokio::spawn(async move {
                    if let Err(e) = self.start().await.await {
                        warn!(job = $name, error = %e, "Background job ended abnormally");
                    }
                })
            }
        }
    };
}

impl_spawnable_job!(StatsRefreshJob, "stats-refresh");
impl_spawnable_job!(CacheReportJob, "cache-report");

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &CancellationToken,
    handles: &mut Vec<(&'static str, JoinHandle<()>)>,
) {
    if let Some(job) = job {
        let handle = Arc::new(job.with_cancellation(shutdown.clone())).start_job();
        handles.push((J::NAME, handle));
    }
}

pub struct JobRunner {
    stats_refresh: Option<StatsRefreshJob>,
    cache_report: Option<CacheReportJob>,
    shutdown: CancellationToken,
    grace: Duration,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            stats_refresh: None,
            cache_report: None,
            shutdown: CancellationToken::new(),
            grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }

    pub fn with_stats_refresh(mut self, job: StatsRefreshJob) -> Self {
        self.stats_refresh = Some(job);
        self
    }

    pub fn with_cache_report(mut self, job: CacheReportJob) -> Self {
        self.cache_report = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// How long [`RunningJobs::shutdown`] waits for each job to stop.
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub async fn start(self) -> RunningJobs {
        info!("Starting background job runner");

        let mut handles = Vec::new();
        spawn_job(self.stats_refresh, &self.shutdown, &mut handles);
        spawn_job(self.cache_report, &self.shutdown, &mut handles);

        info!(jobs = handles.len(), "All background jobs started");
        RunningJobs {
            handles,
            shutdown: self.shutdown,
            grace: self.grace,
        }
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Jobs spawned by a [`JobRunner`], sharing one shutdown token.
pub struct RunningJobs {
    handles: Vec<(&'static str, JoinHandle<()>)>,
    shutdown: CancellationToken,
    grace: Duration,
}

impl RunningJobs {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handles.iter().map(|(name, _)| *name).collect()
    }

    /// Cancels every job and waits for each loop to exit. A refresh already
    /// running is allowed to finish. Returns how many jobs stopped in time.
    pub async fn shutdown(self) -> usize {
        self.shutdown.cancel();

        let mut stopped = 0;
        for (name, handle) in self.handles {
            match tokio::time::timeout(self.grace, handle).await {
                Ok(Ok(())) => {
                    debug!(job = name, "Background job stopped");
                    stopped += 1;
                }
                Ok(Err(e)) => warn!(job = name, error = %e, "Background job ended abnormally"),
                Err(_) => warn!(
                    job = name,
                    grace_ms = self.grace.as_millis() as u64,
                    "Background job did not stop within the grace period"
                ),
            }
        }

        info!(stopped, "Background jobs stopped");
        stopped
    }
}
