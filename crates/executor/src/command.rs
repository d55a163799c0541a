//! Command enum defining the requests a caller can send to the search worker.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: `{"action": "...", "data": ...}`, the message shape the
//!   catalog side already speaks
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};
use tracksearch_core::{Result, TrackPayload};

/// A request to the search worker.
///
/// | Action | Payload | Returns |
/// |--------|---------|---------|
/// | `PERFORM_SEARCH` | raw query string | `Output::PerformSearch` |
/// | `UPDATE_SEARCH_INDEX` | track records or their JSON text | `Output::UpdateSearchIndex` or `Output::Error` |
///
/// # Example
///
/// ```
/// use tracksearch_executor::Command;
///
/// let cmd: Command =
///     serde_json::from_str(r#"{"action": "PERFORM_SEARCH", "data": "song *"}"#).unwrap();
/// assert_eq!(cmd, Command::PerformSearch("song *".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Rank tracks for a raw query string.
    /// Returns: `Output::PerformSearch`
    PerformSearch(String),

    /// Replace the searchable collection.
    /// Returns: `Output::UpdateSearchIndex`, or `Output::Error` if the payload
    /// cannot be decoded (the previous index stays current).
    UpdateSearchIndex(TrackPayload),
}

impl Command {
    /// Decode a command from its JSON message form.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` for malformed JSON or an unknown action.
    pub fn from_json(text: &str) -> Result<Command> {
        Ok(serde_json::from_str(text)?)
    }

    /// Wire name of the action
    pub fn action(&self) -> &'static str {
        match self {
            Command::PerformSearch(_) => "PERFORM_SEARCH",
            Command::UpdateSearchIndex(_) => "UPDATE_SEARCH_INDEX",
        }
    }
}
