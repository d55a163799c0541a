//! # tracksearch executor
//!
//! The command boundary of tracksearch. Callers talk to the search engine in
//! two messages:
//!
//! | Action | Payload | Response |
//! |--------|---------|----------|
//! | `PERFORM_SEARCH` | raw query string | ranked track ids |
//! | `UPDATE_SEARCH_INDEX` | track records (or their JSON text) | new generation summary |
//!
//! - [`SearchWorker`] - a dedicated thread with a bounded FIFO inbox
//! - [`Executor`] - the synchronous dispatcher the worker runs
//! - [`Command`]/[`Output`] - the serializable message types
//!
//! ## Quick Start
//!
//! ```
//! use tracksearch_executor::{Command, Executor, Output};
//! use tracksearch_core::TrackRecord;
//!
//! let executor = Executor::default();
//! executor
//!     .execute(Command::UpdateSearchIndex(
//!         vec![TrackRecord::new(1, "Blue", "Joni Mitchell", "River")].into(),
//!     ))
//!     .unwrap();
//!
//! let out = executor.execute(Command::PerformSearch("river *".into())).unwrap();
//! assert_eq!(out, Output::PerformSearch(vec![tracksearch_executor::DocumentId::Int(1)]));
//! ```

#![warn(missing_docs)]

mod command;
mod executor;
mod output;
mod worker;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use executor::Executor;
pub use output::{IndexSummary, Output, Response};
pub use worker::{SearchWorker, WorkerStats};

pub use tracksearch_core::{
    Document, DocumentId, Error, Field, FloatId, TrackPayload, TrackRecord, TrackTags,
};
pub use tracksearch_engine::{IndexState, SearchConfig};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
