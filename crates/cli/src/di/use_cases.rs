use ecostats_application::ports::{CacheStatsPort, Clock, RandomSource};
use ecostats_application::services::{
    AnalyticsDeriver, CacheStore, HeuristicEstimationModel, MockDataGenerator, StatsAssembler,
    TrendGenerator,
};
use ecostats_application::use_cases::{
    ClearCacheUseCase, GetCacheStatsUseCase, GetEcosystemStatsUseCase,
};
use ecostats_domain::{Config, EcosystemStats};
use ecostats_infrastructure::data::JsonFileDataLoader;
use ecostats_infrastructure::heuristics::RegexPluginCountExtractor;
use ecostats_infrastructure::system::{SeededRandom, SystemClock};
use std::sync::Arc;

pub struct UseCases {
    pub get_stats: Arc<GetEcosystemStatsUseCase>,
    pub get_cache_stats: Arc<GetCacheStatsUseCase>,
    pub clear_cache: Arc<ClearCacheUseCase>,
}

impl UseCases {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let launch_date = config.stats.launch_date_utc()?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomSource> = Arc::new(SeededRandom::from_seed(config.stats.rng_seed));

        let deriver = AnalyticsDeriver::new(
            Arc::new(RegexPluginCountExtractor::new()?),
            Arc::new(HeuristicEstimationModel::new()),
        );
        let assembler = StatsAssembler::new(
            Arc::new(deriver),
            Arc::new(TrendGenerator::new(launch_date)),
        );

        let cache: Arc<CacheStore<EcosystemStats>> = Arc::new(CacheStore::new(clock.clone()));
        let cache_port: Arc<dyn CacheStatsPort> = cache.clone();

        let get_stats = GetEcosystemStatsUseCase::new(
            Arc::new(JsonFileDataLoader::new(&config.stats.data_path)),
            cache,
            Arc::new(assembler),
            Arc::new(MockDataGenerator::new(launch_date)),
            clock,
            random,
        )
        .with_ttl(config.stats.cache_ttl())
        .with_single_flight(config.stats.single_flight);

        Ok(Self {
            get_stats: Arc::new(get_stats),
            get_cache_stats: Arc::new(GetCacheStatsUseCase::new(cache_port.clone())),
            clear_cache: Arc::new(ClearCacheUseCase::new(cache_port)),
        })
    }
}
