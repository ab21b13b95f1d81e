use chrono::Duration as ChronoDuration;
use ecostats_application::ports::{CacheStatsPort, Clock};
use ecostats_application::services::{CacheStore, DEFAULT_STATS_TTL};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{ts, ManualClock};

fn store() -> (CacheStore<String>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(ts(2026, 10, 1)));
    (CacheStore::new(clock.clone() as Arc<dyn Clock>), clock)
}

#[test]
fn test_default_ttl_is_six_hours() {
    assert_eq!(DEFAULT_STATS_TTL.as_millis(), 21_600_000);
}

#[test]
fn test_hit_before_ttl_counts_access() {
    let (cache, clock) = store();
    cache.store("k", "v".to_string(), DEFAULT_STATS_TTL);

    clock.advance(ChronoDuration::hours(1));
    let first = cache.lookup("k").unwrap();
    assert_eq!(first.value, "v");
    assert_eq!(first.access_count, 1);
    assert_eq!(first.remaining_ttl, Duration::from_secs(5 * 3600));

    let second = cache.lookup("k").unwrap();
    assert_eq!(second.access_count, 2);

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.hit_rate, 1.0);
}

#[test]
fn test_entry_at_exact_ttl_is_still_fresh() {
    let (cache, clock) = store();
    cache.store("k", "v".to_string(), Duration::from_secs(60));

    clock.advance(ChronoDuration::seconds(60));
    assert_eq!(cache.get("k").as_deref(), Some("v"));
}

#[test]
fn test_scenario_expiry_evicts_and_counts_miss() {
    let (cache, clock) = store();
    cache.store("ecosystem-stats", "snapshot".to_string(), DEFAULT_STATS_TTL);
    assert_eq!(cache.len(), 1);

    clock.advance(ChronoDuration::hours(5));
    assert!(cache.get("ecosystem-stats").is_some());

    clock.advance(ChronoDuration::hours(1) + ChronoDuration::milliseconds(1));
    assert!(cache.get("ecosystem-stats").is_none());
    assert!(cache.is_empty());

    let stats = cache.stats();
    assert_eq!(stats.total_entries, 0);
    assert_eq!(stats.total_size, 0);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hit_rate, 0.5);
}

#[test]
fn test_absent_key_is_a_miss() {
    let (cache, _clock) = store();
    assert!(cache.get("missing").is_none());
    assert_eq!(cache.stats().misses, 1);
}

#[test]
fn test_replacing_entry_adjusts_size_and_resets_access() {
    let (cache, _clock) = store();
    cache.store("k", "a".repeat(100), DEFAULT_STATS_TTL);
    let large = cache.stats().total_size;

    cache.lookup("k");
    cache.store("k", "b".to_string(), DEFAULT_STATS_TTL);
    let stats = cache.stats();
    assert_eq!(stats.total_entries, 1);
    assert!(stats.total_size < large);
    // "b" serializes to three bytes including quotes
    assert_eq!(stats.total_size, 3);
    assert_eq!(cache.lookup("k").unwrap().access_count, 1);
}

#[test]
fn test_entry_ages_reported_in_millis() {
    let (cache, clock) = store();
    assert_eq!(cache.stats().oldest_entry_age_ms, None);
    assert_eq!(cache.stats().newest_entry_age_ms, None);

    cache.store("old", "1".to_string(), DEFAULT_STATS_TTL);
    clock.advance(ChronoDuration::seconds(2));
    cache.store("new", "2".to_string(), DEFAULT_STATS_TTL);
    clock.advance(ChronoDuration::seconds(1));

    let stats = cache.stats();
    assert_eq!(stats.oldest_entry_age_ms, Some(3_000));
    assert_eq!(stats.newest_entry_age_ms, Some(1_000));
}

#[test]
fn test_clear_is_idempotent() {
    let (cache, _clock) = store();
    cache.store("a", "1".to_string(), DEFAULT_STATS_TTL);
    cache.store("b", "2".to_string(), DEFAULT_STATS_TTL);
    cache.get("a");
    cache.get("zzz");

    cache.clear();
    let once = cache.stats();
    cache.clear();
    let twice = cache.stats();

    assert_eq!(once, twice);
    assert_eq!(twice.total_entries, 0);
    assert_eq!(twice.total_size, 0);
    assert_eq!(twice.hits, 0);
    assert_eq!(twice.misses, 0);
    assert_eq!(twice.hit_rate, 0.0);
}

#[test]
fn test_cache_stats_port_delegates() {
    let (cache, _clock) = store();
    let cache = Arc::new(cache);
    cache.store("a", "1".to_string(), DEFAULT_STATS_TTL);

    let port: Arc<dyn CacheStatsPort> = cache.clone();
    assert_eq!(port.cache_stats().total_entries, 1);
    port.clear();
    assert!(cache.is_empty());
}
