use thiserror::Error;

/// Failures of the plan file and configuration layers. The grid engine itself never fails.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Plan `{0}` not found")]
    NotFound(String),
    #[error("Invalid plan name: {0:?}")]
    InvalidName(String),
}
