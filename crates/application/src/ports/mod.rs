mod cache_stats_port;
mod clock;
mod estimation;
mod random_source;
mod raw_data_loader;

pub use cache_stats_port::CacheStatsPort;
pub use clock::Clock;
pub use estimation::{EstimationModel, PluginCountExtractor};
pub use random_source::RandomSource;
pub use raw_data_loader::RawDataLoader;
