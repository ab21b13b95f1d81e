use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::stats::StatsConfig;

const LOCAL_CONFIG_PATH: &str = "ecostats.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ecostats/config.toml";

/// Main configuration structure for Ecostats
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Aggregation and cache configuration
    #[serde(default)]
    pub stats: StatsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ecostats.toml in current directory
    /// 3. /etc/ecostats/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(path) = overrides.data_path {
            self.stats.data_path = path;
        }
        if let Some(ttl) = overrides.cache_ttl_secs {
            self.stats.cache_ttl_secs = ttl;
        }
        if let Some(seed) = overrides.rng_seed {
            self.stats.rng_seed = Some(seed);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.cache_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "cache_ttl_secs cannot be 0".to_string(),
            ));
        }

        if self.stats.refresh_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh_interval_secs cannot be 0".to_string(),
            ));
        }

        self.stats.launch_date_utc()?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub data_path: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub rng_seed: Option<u64>,
    pub log_level: Option<String>,
}
