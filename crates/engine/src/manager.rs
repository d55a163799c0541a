//! Index generations and their publication
//!
//! The manager owns the pointer to the current `IndexGeneration`. A rebuild
//! constructs a complete new generation off to the side and then swaps the
//! pointer in one atomic store, so a reader sees either the old generation or
//! the new one and never a partially built index. Generations are never
//! mutated after publication; a superseded generation is freed when its last
//! reader drops its `Arc`.

use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracksearch_core::{Document, Field, Result, TrackPayload};
use tracksearch_search::InvertedIndex;

// ============================================================================
// IndexGeneration
// ============================================================================

/// One immutable, fully built index snapshot
#[derive(Debug)]
pub struct IndexGeneration {
    number: u64,
    index: InvertedIndex,
}

impl IndexGeneration {
    /// Generation number; the first successful build is 1
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The index itself
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Documents in this generation
    pub fn total_docs(&self) -> usize {
        self.index.total_docs()
    }
}

// ============================================================================
// IndexState
// ============================================================================

/// Lifecycle of the managed index: `Empty → Building → Ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    /// No generation has been published yet
    Empty,
    /// A rebuild is in progress
    Building,
    /// A generation is published and no rebuild is running
    Ready,
}

/// Decrements the in-flight build counter on drop, including on unwind
struct BuildGuard<'a> {
    builds: &'a AtomicUsize,
}

impl<'a> BuildGuard<'a> {
    fn enter(builds: &'a AtomicUsize) -> Self {
        builds.fetch_add(1, Ordering::AcqRel);
        BuildGuard { builds }
    }
}

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        self.builds.fetch_sub(1, Ordering::AcqRel);
    }
}

// ============================================================================
// IndexManager
// ============================================================================

/// Owner of the current index generation.
///
/// # Thread Safety
///
/// `current()` is lock-free and may be called from any thread while a rebuild
/// runs. Rebuilds are expected to be issued one at a time (the search worker
/// serializes them); concurrent rebuilds are safe but the last to finish wins.
pub struct IndexManager {
    current: ArcSwapOption<IndexGeneration>,
    fields: Vec<Field>,
    builds: AtomicUsize,
    generations: AtomicU64,
}

impl Default for IndexManager {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexManager {
    /// Create an empty manager indexing every field
    pub fn new() -> Self {
        Self::with_fields(&Field::ALL)
    }

    /// Create an empty manager indexing only `fields`
    pub fn with_fields(fields: &[Field]) -> Self {
        IndexManager {
            current: ArcSwapOption::empty(),
            fields: fields.to_vec(),
            builds: AtomicUsize::new(0),
            generations: AtomicU64::new(0),
        }
    }

    /// The current generation, if one has been published
    pub fn current(&self) -> Option<Arc<IndexGeneration>> {
        self.current.load_full()
    }

    /// Current lifecycle state
    pub fn state(&self) -> IndexState {
        if self.builds.load(Ordering::Acquire) > 0 {
            IndexState::Building
        } else if self.current.load().is_some() {
            IndexState::Ready
        } else {
            IndexState::Empty
        }
    }

    /// Number of generations published so far
    pub fn generations(&self) -> u64 {
        self.generations.load(Ordering::Acquire)
    }

    /// Build a new generation from `documents` and publish it.
    pub fn rebuild<I>(&self, documents: I) -> Arc<IndexGeneration>
    where
        I: IntoIterator<Item = Document>,
    {
        let _guard = BuildGuard::enter(&self.builds);
        self.build_and_publish(documents)
    }

    /// Decode a track payload, then build and publish a new generation.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if the payload cannot be decoded. The current
    /// generation is left untouched and stays current.
    pub fn rebuild_from(&self, payload: TrackPayload) -> Result<Arc<IndexGeneration>> {
        let _guard = BuildGuard::enter(&self.builds);
        let documents = payload.into_documents().map_err(|e| {
            tracing::warn!(
                target: "tracksearch::engine",
                error = %e,
                generation = self.generations(),
                "Rebuild input rejected, keeping current generation"
            );
            e
        })?;
        Ok(self.build_and_publish(documents))
    }

    fn build_and_publish<I>(&self, documents: I) -> Arc<IndexGeneration>
    where
        I: IntoIterator<Item = Document>,
    {
        let started = Instant::now();
        let index = InvertedIndex::build(documents, &self.fields);

        if index.duplicates() > 0 {
            tracing::warn!(
                target: "tracksearch::engine",
                duplicates = index.duplicates(),
                "Duplicate track ids in rebuild input, last record wins"
            );
        }

        let number = self.generations.fetch_add(1, Ordering::AcqRel) + 1;
        let generation = Arc::new(IndexGeneration { number, index });
        self.current.store(Some(Arc::clone(&generation)));

        let stats = generation.index.stats();
        tracing::info!(
            target: "tracksearch::engine",
            generation = number,
            documents = stats.documents,
            terms = stats.terms,
            postings = stats.postings,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Search index generation published"
        );

        generation
    }
}

// ============================================================================
// Tests
// ============================================================================
