pub mod plugin_count;

pub use plugin_count::{RegexPluginCountExtractor, DEFAULT_PLUGIN_COUNT_PATTERN};
