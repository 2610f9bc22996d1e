use thiserror::Error;

use crate::chunk::ChunkId;

/// Result type for chunk list operations
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors reported by chunk list mutations.
///
/// None of these leave the list half-modified: an operation that returns an
/// error has not touched the stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// The id refers to a chunk that has been deleted
    #[error("Stale chunk handle: {0}")]
    StaleChunk(ChunkId),

    /// The id was issued by a different chunk list
    #[error("Chunk {0} belongs to another chunk list")]
    ForeignChunk(ChunkId),

    /// A chunk cannot be positioned relative to itself
    #[error("Chunk {0} cannot be moved relative to itself")]
    SelfReference(ChunkId),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ChunkError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// The chunk id the error is about, if any
    #[must_use]
    pub const fn chunk(&self) -> Option<ChunkId> {
        match self {
            Self::StaleChunk(id) | Self::ForeignChunk(id) | Self::SelfReference(id) => Some(*id),
            Self::InvalidConfig(_) => None,
        }
    }
}
