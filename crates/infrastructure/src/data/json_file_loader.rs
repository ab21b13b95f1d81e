use async_trait::async_trait;
use ecostats_application::ports::RawDataLoader;
use ecostats_domain::{DomainError, RawDataset};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Reads the scanner's JSON document from disk.
pub struct JsonFileDataLoader {
    path: PathBuf,
    source: String,
}

impl JsonFileDataLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, source }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RawDataLoader for JsonFileDataLoader {
    async fn load(&self) -> Result<RawDataset, DomainError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::DataUnavailable(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let dataset = RawDataset::from_json_str(&content)?;
        debug!(
            path = %self.path.display(),
            marketplaces = dataset.marketplaces.len(),
            plugins = dataset.plugins.len(),
            skipped = dataset.skipped,
            "Raw dataset loaded"
        );
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        &self.source
    }
}
