use thiserror::Error;

/// Error type that captures calendar, record and configuration failures.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid expense record {id}: {reason}")]
    InvalidRecord { id: i64, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
