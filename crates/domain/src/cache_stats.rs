use serde::{Deserialize, Serialize};

/// Diagnostic snapshot of a cache store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub total_entries: usize,
    /// Approximate bytes, estimated from serialized length
    pub total_size: usize,
    /// hits / (hits + misses), 0 when nothing was looked up
    pub hit_rate: f64,
    pub hits: u64,
    pub misses: u64,
    pub oldest_entry_age_ms: Option<u64>,
    pub newest_entry_age_ms: Option<u64>,
}
