pub mod analytics_deriver;
pub mod cache_store;
pub mod estimation;
pub mod mock_data;
pub mod single_flight;
pub mod stats_assembler;
pub mod trend_generator;

pub use analytics_deriver::{AnalyticsDeriver, DerivedAnalytics, TOP_DEVELOPERS};
pub use cache_store::{CacheEntry, CacheLookup, CacheStore, DEFAULT_STATS_TTL};
pub use estimation::HeuristicEstimationModel;
pub use mock_data::MockDataGenerator;
pub use single_flight::{FlightReceiver, FlightRole, LeaderGuard, SingleFlight};
pub use stats_assembler::StatsAssembler;
pub use trend_generator::{TrendGenerator, TrendMode, TrendTotals};
