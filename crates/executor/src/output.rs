//! Output enum for command execution results.
//!
//! Every command produces exactly one output. Search always yields
//! `PerformSearch` (possibly empty); a rebuild yields `UpdateSearchIndex` on
//! success and `Error` on failure, so failures are never silently dropped.

use serde::{Deserialize, Serialize};
use tracksearch_core::{DocumentId, Error, Result};

/// Summary of a published index generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSummary {
    /// Generation number (first successful build is 1)
    pub generation: u64,
    /// Documents in the generation
    pub documents: usize,
}

/// Result of executing a [`Command`](crate::Command).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Output {
    /// Matching ids, best first. Empty when nothing matched or no index exists.
    PerformSearch(Vec<DocumentId>),

    /// A new generation was published
    UpdateSearchIndex(IndexSummary),

    /// The request failed
    Error(Error),
}

impl Output {
    /// True for `Output::Error`
    pub fn is_error(&self) -> bool {
        matches!(self, Output::Error(_))
    }
}

/// One message on the worker's outbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Sequence number returned by `SearchWorker::submit` for the request
    pub request: u64,
    /// Result of the request
    pub output: Output,
}

impl Response {
    /// Encode as a JSON message.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Internal {
            reason: format!("failed to encode response: {}", e),
        })
    }
}
