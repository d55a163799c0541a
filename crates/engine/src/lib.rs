//! Index engine for tracksearch
//!
//! This crate owns index lifecycle and configuration:
//! - IndexManager: builds generations off the hot path and publishes them
//!   with an atomic pointer swap
//! - IndexGeneration: one immutable, fully built index snapshot
//! - SearchConfig: TOML-backed worker and scoring settings

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod manager;

pub use config::{ScoringConfig, SearchConfig, CONFIG_FILE_NAME};
pub use manager::{IndexGeneration, IndexManager, IndexState};
