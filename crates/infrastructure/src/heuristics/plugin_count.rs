use ecostats_application::ports::PluginCountExtractor;
use ecostats_domain::DomainError;
use fancy_regex::Regex;
use tracing::debug;

/// Matches "12 plugins", "1,200 Plugins" or "1 plugin".
pub const DEFAULT_PLUGIN_COUNT_PATTERN: &str = r"(?i)\b(\d[\d,]*)\s+plugins?\b";

pub struct RegexPluginCountExtractor {
    pattern: Regex,
}

impl RegexPluginCountExtractor {
    pub fn new() -> Result<Self, DomainError> {
        Self::with_pattern(DEFAULT_PLUGIN_COUNT_PATTERN)
    }

    /// The first capture group must hold the count.
    pub fn with_pattern(pattern: &str) -> Result<Self, DomainError> {
        let pattern = Regex::new(pattern).map_err(|e| {
            DomainError::ConfigError(format!(
                "Invalid plugin count pattern '{}': {}",
                pattern, e
            ))
        })?;
        Ok(Self { pattern })
    }
}

impl PluginCountExtractor for RegexPluginCountExtractor {
    fn extract(&self, description: &str) -> Option<u64> {
        let captures = match self.pattern.captures(description) {
            Ok(captures) => captures?,
            Err(e) => {
                debug!(error = %e, "Plugin count match aborted");
                return None;
            }
        };
        captures.get(1)?.as_str().replace(',', "").parse().ok()
    }
}
