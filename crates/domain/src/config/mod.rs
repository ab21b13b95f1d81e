pub mod errors;
pub mod logging;
pub mod root;
pub mod stats;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use stats::StatsConfig;
