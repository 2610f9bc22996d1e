use reflow_chunks::ChunkError;
use thiserror::Error;

/// Result type for cleanup passes
pub type Result<T> = std::result::Result<T, CleanupError>;

/// Errors that stop a cleanup run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CleanupError {
    /// A chunk list mutation was rejected
    #[error(transparent)]
    Chunk(#[from] ChunkError),

    /// Invalid configuration
    #[error("Invalid cleanup configuration: {0}")]
    InvalidConfig(String),
}

impl CleanupError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
