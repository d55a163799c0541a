//! Error types for tracksearch
//!
//! Only two kinds of failure exist in the core: rebuild input that cannot be
//! decoded, and worker-boundary conditions (full inbox, shutdown, a request
//! that panicked). Searching never fails; malformed or empty queries and
//! searches before the first build yield an empty result instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for tracksearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for tracksearch
///
/// Errors are plain data (no boxed sources) so they can be carried back to
/// the caller as an `ERROR` response on the worker channel.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Error {
    /// Rebuild input could not be decoded into a track collection
    #[error("decode error: {reason}")]
    Decode {
        /// Decoder message
        reason: String,
    },

    /// The worker inbox is at capacity
    #[error("search worker inbox is full (capacity {capacity})")]
    Backpressure {
        /// Configured inbox capacity
        capacity: usize,
    },

    /// The worker has been shut down
    #[error("search worker has shut down")]
    Shutdown,

    /// Invalid configuration value
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong
        reason: String,
    },

    /// I/O error (config file access)
    #[error("I/O error: {reason}")]
    Io {
        /// Underlying message
        reason: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Description
        reason: String,
    },
}

impl Error {
    /// Create a decode error from any displayable cause
    pub fn decode(reason: impl std::fmt::Display) -> Self {
        Error::Decode {
            reason: reason.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// True for errors caused by caller-supplied input
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::InvalidConfig { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::decode(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io {
            reason: e.to_string(),
        }
    }
}
