use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("Invalid knowledge catalog: {0}")]
    InvalidCatalog(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ProtectError>;
