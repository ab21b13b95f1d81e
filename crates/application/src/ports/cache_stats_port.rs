use ecostats_domain::CacheStats;

/// Diagnostics and teardown of a cache, independent of the cached type.
pub trait CacheStatsPort: Send + Sync {
    fn cache_stats(&self) -> CacheStats;
    fn clear(&self);
}
