use crate::ports::CacheStatsPort;
use ecostats_domain::CacheStats;
use std::sync::Arc;

pub struct GetCacheStatsUseCase {
    cache: Arc<dyn CacheStatsPort>,
}

impl GetCacheStatsUseCase {
    pub fn new(cache: Arc<dyn CacheStatsPort>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> CacheStats {
        self.cache.cache_stats()
    }
}
