#![allow(dead_code)]
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use ecostats_application::ports::{Clock, PluginCountExtractor, RandomSource, RawDataLoader};
use ecostats_application::services::{
    AnalyticsDeriver, CacheStore, HeuristicEstimationModel, MockDataGenerator, StatsAssembler,
    TrendGenerator,
};
use ecostats_application::use_cases::GetEcosystemStatsUseCase;
use ecostats_domain::{DomainError, EcosystemStats, RawDataset};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use super::builders::ts;

pub fn launch_date() -> DateTime<Utc> {
    ts(2025, 10, 9)
}

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap() = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Returns a constant for every draw.
pub struct FixedRandom {
    value: f64,
}

impl FixedRandom {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl RandomSource for FixedRandom {
    fn next_f64(&self) -> f64 {
        self.value
    }

    fn range_u64(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        low + ((high - low + 1) as f64 * self.value) as u64
    }
}

pub struct SeededRandom {
    rng: Mutex<fastrand::Rng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        self.rng.lock().unwrap().f64()
    }

    fn range_u64(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        self.rng.lock().unwrap().u64(low..=high)
    }
}

/// Reads "<N> plugins" without a regex engine.
pub struct WordPluginCountExtractor;

impl PluginCountExtractor for WordPluginCountExtractor {
    fn extract(&self, description: &str) -> Option<u64> {
        let words: Vec<&str> = description.split_whitespace().collect();
        words.windows(2).find_map(|pair| {
            let noun = pair[1].to_lowercase();
            if noun.starts_with("plugin") {
                pair[0].replace(',', "").parse().ok()
            } else {
                None
            }
        })
    }
}

#[derive(Clone)]
pub struct MockRawDataLoader {
    dataset: Arc<RwLock<RawDataset>>,
    should_fail: Arc<RwLock<bool>>,
    delay: Arc<RwLock<Option<std::time::Duration>>>,
    call_count: Arc<AtomicU64>,
}

impl MockRawDataLoader {
    pub fn new(dataset: RawDataset) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
            should_fail: Arc::new(RwLock::new(false)),
            delay: Arc::new(RwLock::new(None)),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn failing() -> Self {
        let loader = Self::new(RawDataset::default());
        *loader.should_fail.try_write().unwrap() = true;
        loader
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn set_delay(&self, delay: std::time::Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub async fn set_dataset(&self, dataset: RawDataset) {
        *self.dataset.write().await = dataset;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RawDataLoader for MockRawDataLoader {
    async fn load(&self) -> Result<RawDataset, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.should_fail.read().await {
            return Err(DomainError::DataUnavailable(
                "mock data source offline".to_string(),
            ));
        }
        Ok(self.dataset.read().await.clone())
    }

    fn source_name(&self) -> &str {
        "mock-loader"
    }
}

pub fn assembler(launch: DateTime<Utc>) -> Arc<StatsAssembler> {
    let deriver = AnalyticsDeriver::new(
        Arc::new(WordPluginCountExtractor),
        Arc::new(HeuristicEstimationModel::new()),
    );
    Arc::new(StatsAssembler::new(
        Arc::new(deriver),
        Arc::new(TrendGenerator::new(launch)),
    ))
}

pub struct Harness {
    pub use_case: Arc<GetEcosystemStatsUseCase>,
    pub loader: MockRawDataLoader,
    pub clock: Arc<ManualClock>,
    pub cache: Arc<CacheStore<EcosystemStats>>,
}

pub fn harness(loader: MockRawDataLoader, now: DateTime<Utc>, single_flight: bool) -> Harness {
    let clock = Arc::new(ManualClock::new(now));
    let cache = Arc::new(CacheStore::new(clock.clone() as Arc<dyn Clock>));
    let use_case = GetEcosystemStatsUseCase::new(
        Arc::new(loader.clone()),
        cache.clone(),
        assembler(launch_date()),
        Arc::new(MockDataGenerator::new(launch_date())),
        clock.clone(),
        Arc::new(SeededRandom::new(7)),
    )
    .with_single_flight(single_flight);

    Harness {
        use_case: Arc::new(use_case),
        loader,
        clock,
        cache,
    }
}
