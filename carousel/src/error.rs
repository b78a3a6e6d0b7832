//! Error types for the carousel engine.
//!
//! None of these reach the viewer: a failed item source falls back to the
//! built-in sequence and an invalid configuration is rejected with a warning.

use thiserror::Error;

/// Errors raised at the carousel's collaborator boundaries
#[derive(Error, Debug)]
pub enum CarouselError {
    /// The item source could not deliver items
    #[error("Item source failed: {0}")]
    Source(String),

    /// Item records could not be decoded
    #[error("Failed to decode item records: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configuration cannot drive the engine
    #[error("Invalid carousel configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for carousel operations
pub type Result<T> = std::result::Result<T, CarouselError>;
