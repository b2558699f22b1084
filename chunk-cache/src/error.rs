//! Error types for chunk cache operations

use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Error from the foyer cache
    #[error("Cache error: {0}")]
    Foyer(#[from] foyer::Error),

    /// I/O error when preparing the cache directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when building the foyer cache
    #[error("Failed to build cache: {0}")]
    Build(String),

    /// Error when flushing and closing the foyer cache
    #[error("Failed to close cache: {0}")]
    Close(String),

    /// Lock poisoning error
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

/// A specialized Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
