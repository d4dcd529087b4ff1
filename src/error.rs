//! Error types for the query cache
//!
//! Provides unified error handling using thiserror.

use std::collections::TryReserveError;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the query cache.
///
/// A lookup miss is not an error: `get` returns `None` for it.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Memory for a new entry could not be reserved
    #[error("Allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// Entry footprint alone exceeds the configured size limit
    #[error("Entry too large to cache: {size} bytes exceeds limit of {max_size} bytes")]
    TooLarge { size: usize, max_size: usize },

    /// Operation on a destroyed context
    #[error("Invalid context: cache context has been destroyed")]
    InvalidContext,

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Shell input could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

// == Result Type Alias ==
/// Convenience Result type for the query cache.
pub type Result<T> = std::result::Result<T, CacheError>;
