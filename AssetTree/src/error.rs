//! Error types for `AssetTree`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `AssetTree` operations.
///
/// Unknown identifiers are not errors: lookups report them as `None`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Record Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A record file could not be decoded as a list of records.
    #[error("invalid records in {path}: {message}")]
    InvalidRecords {
        /// The file that was being read.
        path: PathBuf,
        /// The decoder's error message.
        message: String,
    },

    // ==================== Hierarchy Errors ====================
    /// A parent chain or child edge loops back onto a node already visited.
    #[error("cycle detected at node '{id}'")]
    CycleDetected {
        /// The node that was reached twice.
        id: String,
    },
}

/// A specialized Result type for `AssetTree` operations.
pub type Result<T> = std::result::Result<T, Error>;
