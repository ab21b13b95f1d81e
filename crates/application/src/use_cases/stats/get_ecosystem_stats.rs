use crate::ports::{Clock, RandomSource, RawDataLoader};
use crate::services::{
    CacheStore, FlightRole, MockDataGenerator, SingleFlight, StatsAssembler, TrendMode,
    DEFAULT_STATS_TTL,
};
use ecostats_domain::{CacheInfo, EcosystemStats, StatsQuery, MOCK_DATA_SOURCE};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Cache key of the consolidated statistics.
pub const ECOSYSTEM_STATS_KEY: &str = "ecosystem-stats";

/// Entry point: serves cached statistics or recomputes them.
///
/// Never fails. When the raw data cannot be loaded, statistics are built
/// from the synthetic generator and tagged with [`MOCK_DATA_SOURCE`].
pub struct GetEcosystemStatsUseCase {
    loader: Arc<dyn RawDataLoader>,
    cache: Arc<CacheStore<EcosystemStats>>,
    assembler: Arc<StatsAssembler>,
    mock_data: Arc<MockDataGenerator>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    ttl: Duration,
    flights: Option<SingleFlight<EcosystemStats>>,
}

impl GetEcosystemStatsUseCase {
    pub fn new(
        loader: Arc<dyn RawDataLoader>,
        cache: Arc<CacheStore<EcosystemStats>>,
        assembler: Arc<StatsAssembler>,
        mock_data: Arc<MockDataGenerator>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            loader,
            cache,
            assembler,
            mock_data,
            clock,
            random,
            ttl: DEFAULT_STATS_TTL,
            flights: Some(SingleFlight::new()),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// With single-flight off, concurrent misses each recompute and the
    /// last store wins.
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.flights = enabled.then(SingleFlight::new);
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn cache(&self) -> Arc<CacheStore<EcosystemStats>> {
        Arc::clone(&self.cache)
    }

    pub async fn execute(&self, force_refresh: bool) -> EcosystemStats {
        if !force_refresh {
            if let Some(stats) = self.cached() {
                return stats;
            }
        }

        let Some(flights) = &self.flights else {
            return self.refresh().await;
        };

        loop {
            match flights.join(ECOSYSTEM_STATS_KEY) {
                FlightRole::Leader(guard) => {
                    // A previous leader may have stored between our lookup and join.
                    let cached = if force_refresh { None } else { self.cached() };
                    let stats = match cached {
                        Some(stats) => stats,
                        None => self.refresh().await,
                    };
                    guard.complete(Arc::new(stats.clone()));
                    return stats;
                }
                FlightRole::Follower(rx) => {
                    debug!(key = ECOSYSTEM_STATS_KEY, "Joining in-flight stats refresh");
                    if let Some(shared) = SingleFlight::wait(rx).await {
                        return (*shared).clone();
                    }
                    debug!(key = ECOSYSTEM_STATS_KEY, "In-flight leader dropped, rejoining");
                }
            }
        }
    }

    pub async fn execute_query(&self, query: &StatsQuery) -> EcosystemStats {
        self.execute(query.force_refresh).await.view(query)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn cached(&self) -> Option<EcosystemStats> {
        self.cache.lookup(ECOSYSTEM_STATS_KEY).map(|found| {
            found.value.with_cache_info(CacheInfo {
                hit: true,
                ttl_ms: found.ttl.as_millis() as u64,
                remaining_ttl_ms: found.remaining_ttl.as_millis() as u64,
            })
        })
    }

    async fn refresh(&self) -> EcosystemStats {
        let now = self.clock.now();
        let random = self.random.as_ref();

        let stats = match self.loader.load().await {
            Ok(dataset) => self.assembler.assemble(
                &dataset,
                now,
                TrendMode::Projection,
                vec![self.loader.source_name().to_string()],
                random,
            ),
            Err(e) => {
                warn!(
                    error = %e,
                    source = self.loader.source_name(),
                    "Raw data unavailable, falling back to synthetic stats"
                );
                let dataset = self.mock_data.generate(now, random);
                self.assembler.assemble(
                    &dataset,
                    now,
                    TrendMode::Synthetic,
                    vec![MOCK_DATA_SOURCE.to_string()],
                    random,
                )
            }
        };

        self.cache.store(ECOSYSTEM_STATS_KEY, stats.clone(), self.ttl);

        let ttl_ms = self.ttl.as_millis() as u64;
        stats.with_cache_info(CacheInfo {
            hit: false,
            ttl_ms,
            remaining_ttl_ms: ttl_ms,
        })
    }
}
