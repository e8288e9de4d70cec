//! Error types for publisher-bridge.
//!
//! Only host failures surface as [`BridgeError`]. Persistence failures are
//! [`StoreError`]s inside the host and reach callers as a `false` result.

use std::path::PathBuf;
use thiserror::Error;

/// Unexpected host failures.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The host has not finished initializing.
    #[error("bridge unavailable: host not initialized")]
    Unavailable,

    /// A bridge was already installed in the slot.
    #[error("bridge already installed")]
    AlreadyInstalled,

    /// Native call failed inside the host.
    #[error("host error: {0}")]
    Host(String),

    /// Operation name not part of the bridge.
    #[error("unknown bridge operation: {0}")]
    UnknownOperation(String),

    /// Arguments do not fit the operation's signature.
    #[error("invalid arguments for {operation}: {reason}")]
    InvalidArguments {
        /// Operation being invoked.
        operation: String,
        /// What was wrong.
        reason: String,
    },
}

/// Settings store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Document could not be encoded.
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
