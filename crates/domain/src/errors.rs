use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Raw data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
