//! The Executor - dispatches commands to the index manager and query processor.
//!
//! The Executor is synchronous. The search worker owns one and calls it from
//! its thread; tests and embedders that manage their own threading can call it
//! directly.

use std::sync::Arc;

use tracksearch_core::TrackPayload;
use tracksearch_engine::{IndexManager, SearchConfig};
use tracksearch_search::{Bm25Scorer, QueryProcessor};

use crate::{Command, IndexSummary, Output, Result};

/// Synchronous command dispatcher.
///
/// # Example
///
/// ```
/// use tracksearch_executor::{Command, Executor, Output};
///
/// let executor = Executor::default();
/// let out = executor.execute(Command::PerformSearch("anything".into())).unwrap();
/// assert_eq!(out, Output::PerformSearch(vec![]));
/// ```
pub struct Executor {
    manager: Arc<IndexManager>,
    processor: QueryProcessor<Bm25Scorer>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl Executor {
    /// Create an executor with its own empty index manager.
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_manager(Arc::new(IndexManager::new()), config)
    }

    /// Create an executor over an existing index manager.
    pub fn with_manager(manager: Arc<IndexManager>, config: &SearchConfig) -> Self {
        Self {
            manager,
            processor: QueryProcessor::new(config.scorer()),
        }
    }

    /// The index manager this executor publishes to
    pub fn manager(&self) -> &Arc<IndexManager> {
        &self.manager
    }

    /// Execute a single command.
    ///
    /// Only a rebuild can fail, and only on undecodable input.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        match cmd {
            Command::PerformSearch(query) => Ok(Output::PerformSearch(self.search(&query))),
            Command::UpdateSearchIndex(payload) => {
                self.update_index(payload).map(Output::UpdateSearchIndex)
            }
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns all results in order; a failed rebuild does not stop the batch.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Execute a command, folding failure into `Output::Error`.
    pub fn execute_to_output(&self, cmd: Command) -> Output {
        self.execute(cmd).unwrap_or_else(Output::Error)
    }

    fn search(&self, query: &str) -> Vec<tracksearch_core::DocumentId> {
        // Read the pointer once; a rebuild published later does not affect us
        match self.manager.current() {
            Some(generation) => self.processor.search(query, generation.index()),
            None => Vec::new(),
        }
    }

    fn update_index(&self, payload: TrackPayload) -> Result<IndexSummary> {
        let generation = self.manager.rebuild_from(payload)?;
        Ok(IndexSummary {
            generation: generation.number(),
            documents: generation.total_docs(),
        })
    }
}
