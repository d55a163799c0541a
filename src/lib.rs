//! tracksearch - in-process full-text search over media track catalogs
//!
//! Tracks (album, artist, title) are indexed into an immutable inverted index
//! and ranked with BM25. A dedicated worker thread owns index builds and query
//! evaluation, so a large rebuild never stalls the thread that submits
//! searches.
//!
//! # Quick Start
//!
//! ```
//! use tracksearch::{DocumentId, Output, SearchConfig, SearchWorker, TrackRecord};
//!
//! let (worker, responses) = SearchWorker::spawn(SearchConfig::default())?;
//! worker.update_index(vec![
//!     TrackRecord::new(1, "A", "X", "Song One"),
//!     TrackRecord::new(2, "B", "Y", "Song Two"),
//! ])?;
//! worker.search("song")?;
//!
//! let _rebuilt = responses.recv().unwrap();
//! let ranked = responses.recv().unwrap();
//! assert_eq!(
//!     ranked.output,
//!     Output::PerformSearch(vec![DocumentId::Int(1), DocumentId::Int(2)])
//! );
//! # Ok::<(), tracksearch::Error>(())
//! ```
//!
//! # Architecture
//!
//! All requests go through the [`Executor`], which the [`SearchWorker`] runs
//! on its own thread. Tokenizer, index, scorer and index manager live in the
//! internal crates and are not re-exported here.

// Re-export the public API from tracksearch-executor
pub use tracksearch_executor::*;
