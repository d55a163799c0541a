//! Search infrastructure for tracksearch
//!
//! This crate provides:
//! - Basic tokenizer shared by indexing and querying
//! - InvertedIndex with per-field posting lists and corpus statistics
//! - Scorer trait and Bm25Scorer default implementation
//! - QueryProcessor that ranks documents for a raw search string
//!
//! # Usage
//!
//! ```
//! use tracksearch_core::{Document, DocumentId};
//! use tracksearch_search::{InvertedIndex, QueryProcessor};
//!
//! let index = InvertedIndex::build_all(vec![
//!     Document::new(1, "A", "X", "Song One"),
//!     Document::new(2, "B", "Y", "Song Two"),
//! ]);
//! let hits = QueryProcessor::default().search("song", &index);
//! assert_eq!(hits, vec![DocumentId::Int(1), DocumentId::Int(2)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod query;
pub mod scorer;
pub mod tokenizer;

// Re-export commonly used types
pub use index::{IndexStats, InvertedIndex, Posting, PostingList};
pub use query::{parse_query, QueryProcessor, ScoredDocument};
pub use scorer::{Bm25Scorer, Scorer};
pub use tokenizer::{tokenize, tokenize_unique};
