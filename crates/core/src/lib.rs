//! Core types for tracksearch
//!
//! This crate defines the foundational types used throughout the system:
//! - DocumentId: Opaque caller-supplied track identifier
//! - Field: The searchable text fields of a track
//! - Document: One track's searchable projection
//! - TrackRecord / TrackPayload: External record shapes accepted on rebuild
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Document, DocumentId, Field, FloatId, TrackPayload, TrackRecord, TrackTags};
