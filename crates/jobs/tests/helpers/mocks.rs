#![allow(dead_code)]
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use ecostats_application::ports::{
    Clock, PluginCountExtractor, RandomSource, RawDataLoader,
};
use ecostats_application::services::{
    AnalyticsDeriver, CacheStore, HeuristicEstimationModel, MockDataGenerator, StatsAssembler,
    TrendGenerator,
};
use ecostats_application::use_cases::GetEcosystemStatsUseCase;
use ecostats_domain::{
    DomainError, EcosystemStats, MarketplaceOwner, MarketplaceRecord, RawDataset,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 0, 0, 0).unwrap()
    }
}

pub struct MidRandom;

impl RandomSource for MidRandom {
    fn next_f64(&self) -> f64 {
        0.5
    }

    fn range_u64(&self, low: u64, high: u64) -> u64 {
        low + high.saturating_sub(low) / 2
    }
}

pub struct NoCountExtractor;

impl PluginCountExtractor for NoCountExtractor {
    fn extract(&self, _description: &str) -> Option<u64> {
        None
    }
}

pub struct MockRawDataLoader {
    should_fail: AtomicBool,
    call_count: AtomicU64,
}

impl MockRawDataLoader {
    pub fn new() -> Self {
        Self {
            should_fail: AtomicBool::new(false),
            call_count: AtomicU64::new(0),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockRawDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RawDataLoader for MockRawDataLoader {
    async fn load(&self) -> Result<RawDataset, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DataUnavailable("offline".to_string()));
        }
        Ok(RawDataset::new(
            vec![MarketplaceRecord {
                name: "m".to_string(),
                owner: MarketplaceOwner {
                    login: "acme".to_string(),
                    avatar_url: None,
                },
                description: None,
                stars: 3,
                forks: 0,
                updated_at: Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
                created_at: None,
                has_manifest: false,
                url: None,
            }],
            Vec::new(),
        ))
    }

    fn source_name(&self) -> &str {
        "mock-loader"
    }
}

pub fn make_stats_use_case(
    loader: Arc<MockRawDataLoader>,
) -> (Arc<GetEcosystemStatsUseCase>, Arc<CacheStore<EcosystemStats>>) {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    let launch = Utc.with_ymd_and_hms(2025, 10, 9, 0, 0, 0).unwrap();
    let cache = Arc::new(CacheStore::new(clock.clone()));
    let deriver = AnalyticsDeriver::new(
        Arc::new(NoCountExtractor),
        Arc::new(HeuristicEstimationModel::new()),
    );
    let use_case = GetEcosystemStatsUseCase::new(
        loader,
        cache.clone(),
        Arc::new(StatsAssembler::new(
            Arc::new(deriver),
            Arc::new(TrendGenerator::new(launch)),
        )),
        Arc::new(MockDataGenerator::new(launch)),
        clock,
        Arc::new(MidRandom),
    );
    (Arc::new(use_case), cache)
}
