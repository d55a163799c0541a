//! Shared test utilities for the integration suites.
//!
//! Imported by the suite's main.rs as `mod common;`.

#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

pub use tracksearch::{
    Command, DocumentId, Error, IndexSummary, Output, Response, SearchConfig, SearchWorker,
    TrackPayload, TrackRecord,
};

/// How long a test waits for a single response before failing
pub const RECV_TIMEOUT: Duration = Duration::from_secs(10);

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output to the test harness (shown for failing tests).
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Config with a small inbox and a recognisable thread name.
pub fn test_config() -> SearchConfig {
    SearchConfig {
        inbox_capacity: 256,
        worker_name: "tracksearch-it".into(),
        ..SearchConfig::default()
    }
}

/// Spawn a worker with `test_config()` and tracing enabled.
pub fn spawn_worker() -> (SearchWorker, crossbeam_channel::Receiver<Response>) {
    init_tracing();
    SearchWorker::spawn(test_config()).expect("worker should start")
}

/// The two-track catalog used throughout the scenarios.
pub fn two_songs() -> Vec<TrackRecord> {
    vec![
        TrackRecord::new(1, "A", "X", "Song One"),
        TrackRecord::new(2, "B", "Y", "Song Two"),
    ]
}

/// A larger synthetic catalog: `n` tracks over a handful of artists.
pub fn synthetic_catalog(n: i64) -> Vec<TrackRecord> {
    const ARTISTS: [&str; 4] = ["Miles Davis", "Nina Simone", "Joni Mitchell", "Prince"];
    (0..n)
        .map(|i| {
            TrackRecord::new(
                i,
                format!("Album {}", i % 17),
                ARTISTS[(i % 4) as usize],
                format!("Track {} take {}", i, i % 5),
            )
        })
        .collect()
}

pub fn ids(values: &[i64]) -> Vec<DocumentId> {
    values.iter().copied().map(DocumentId::Int).collect()
}

/// Receive the next response or fail the test.
pub fn next(responses: &crossbeam_channel::Receiver<Response>) -> Response {
    responses
        .recv_timeout(RECV_TIMEOUT)
        .expect("worker should respond")
}

/// Unwrap a search response.
pub fn hits(response: Response) -> Vec<DocumentId> {
    match response.output {
        Output::PerformSearch(hits) => hits,
        other => panic!("Expected PerformSearch, got {:?}", other),
    }
}
