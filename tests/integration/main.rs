//! End-to-end tests through the public `tracksearch` API.
//!
//! - scenarios: the reference search behaviors
//! - generation_swap: rebuilds racing with readers
//! - worker_protocol: JSON messages in, JSON responses out

mod common;

mod generation_swap;
mod scenarios;
mod worker_protocol;
