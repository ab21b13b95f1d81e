use crate::ports::{CacheStatsPort, Clock};
use chrono::{DateTime, Utc};
use ecostats_domain::CacheStats;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// TTL used for the assembled ecosystem statistics.
pub const DEFAULT_STATS_TTL: Duration = Duration::from_secs(6 * 60 * 60);

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
    pub access_count: u64,
    pub last_accessed: DateTime<Utc>,
    /// Serialized length, used as a byte estimate
    pub size: usize,
}

impl<T> CacheEntry<T> {
    fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).to_std().unwrap_or_default()
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.age(now) > self.ttl
    }

    fn remaining_ttl(&self, now: DateTime<Utc>) -> Duration {
        self.ttl.saturating_sub(self.age(now))
    }
}

/// A successful read, with the entry's TTL bookkeeping.
#[derive(Debug, Clone)]
pub struct CacheLookup<T> {
    pub value: T,
    pub ttl: Duration,
    pub remaining_ttl: Duration,
    pub access_count: u64,
}

struct CacheState<T> {
    entries: HashMap<String, CacheEntry<T>>,
    total_size: usize,
}

/// In-memory TTL cache keyed by string.
///
/// Expiry is lazy: a stale entry is only evicted by the read that finds it,
/// or by `clear()`.
pub struct CacheStore<T> {
    state: Mutex<CacheState<T>>,
    hits: AtomicU64,
    misses: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl<T: Clone + Serialize> CacheStore<T> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                total_size: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            clock,
        }
    }

    pub fn store(&self, key: &str, value: T, ttl: Duration) {
        let now = self.clock.now();
        let size = estimate_size(&value);
        let entry = CacheEntry {
            data: value,
            created_at: now,
            ttl,
            access_count: 0,
            last_accessed: now,
            size,
        };

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = state.entries.insert(key.to_string(), entry) {
            state.total_size = state.total_size.saturating_sub(previous.size);
        }
        state.total_size += size;

        debug!(key, size, ttl_secs = ttl.as_secs(), "Cache STORE");
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.lookup(key).map(|found| found.value)
    }

    pub fn lookup(&self, key: &str) -> Option<CacheLookup<T>> {
        let now = self.clock.now();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let expired = match state.entries.get(key) {
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key, "Cache MISS");
                return None;
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            if let Some(stale) = state.entries.remove(key) {
                state.total_size = state.total_size.saturating_sub(stale.size);
            }
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key, "Cache MISS (expired entry evicted)");
            return None;
        }

        let entry = state.entries.get_mut(key)?;
        entry.access_count += 1;
        entry.last_accessed = now;
        self.hits.fetch_add(1, Ordering::Relaxed);
        debug!(key, access_count = entry.access_count, "Cache HIT");

        Some(CacheLookup {
            value: entry.data.clone(),
            ttl: entry.ttl,
            remaining_ttl: entry.remaining_ttl(now),
            access_count: entry.access_count,
        })
    }

    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.entries.clear();
        state.total_size = 0;
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;
        let hit_rate = if lookups > 0 {
            hits as f64 / lookups as f64
        } else {
            0.0
        };

        let ages: Vec<u64> = state
            .entries
            .values()
            .map(|e| e.age(now).as_millis() as u64)
            .collect();

        CacheStats {
            total_entries: state.entries.len(),
            total_size: state.total_size,
            hit_rate,
            hits,
            misses,
            oldest_entry_age_ms: ages.iter().copied().max(),
            newest_entry_age_ms: ages.iter().copied().min(),
        }
    }
}

impl<T: Clone + Serialize + Send> CacheStatsPort for CacheStore<T> {
    fn cache_stats(&self) -> CacheStats {
        self.stats()
    }

    fn clear(&self) {
        CacheStore::clear(self)
    }
}

fn estimate_size<T: Serialize>(value: &T) -> usize {
    serde_json::to_vec(value).map(|bytes| bytes.len()).unwrap_or(0)
}
