use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Dataset '{0}' not found")]
    DatasetNotFound(String),
    #[error("Dataset '{0}' already exists")]
    DatasetAlreadyExists(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
