use crate::ports::CacheStatsPort;
use std::sync::Arc;
use tracing::info;

/// Drops every cached entry and resets the hit/miss counters.
pub struct ClearCacheUseCase {
    cache: Arc<dyn CacheStatsPort>,
}

impl ClearCacheUseCase {
    pub fn new(cache: Arc<dyn CacheStatsPort>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) {
        let cleared = self.cache.cache_stats().total_entries;
        self.cache.clear();
        info!(cleared, "Cache cleared");
    }
}
