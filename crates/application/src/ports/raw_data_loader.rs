use async_trait::async_trait;
use ecostats_domain::{DomainError, RawDataset};

/// Port for the scanner's marketplace/plugin dataset.
#[async_trait]
pub trait RawDataLoader: Send + Sync {
    async fn load(&self) -> Result<RawDataset, DomainError>;

    /// Recorded in `metadata.data_sources` when a load succeeds.
    fn source_name(&self) -> &str;
}
