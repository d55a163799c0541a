//! Search configuration via TOML
//!
//! The embedding application may hand us a `tracksearch.toml` document (or a
//! path to one). Every key is optional; missing keys take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracksearch_core::{Error, Result};
use tracksearch_search::scorer::{Bm25Scorer, DEFAULT_B, DEFAULT_K1};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "tracksearch.toml";

/// Default bound on queued, not yet serviced requests.
pub const DEFAULT_INBOX_CAPACITY: usize = 1024;

/// Default name of the worker thread.
pub const DEFAULT_WORKER_NAME: &str = "tracksearch-worker";

/// BM25 parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Term frequency saturation (default: 1.2)
    #[serde(default = "default_k1")]
    pub k1: f32,
    /// Field length normalization, 0.0 to 1.0 (default: 0.75)
    #[serde(default = "default_b")]
    pub b: f32,
}

fn default_k1() -> f32 {
    DEFAULT_K1
}

fn default_b() -> f32 {
    DEFAULT_B
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
        }
    }
}

/// Search configuration.
///
/// # Example
///
/// ```toml
/// inbox_capacity = 1024
/// worker_name = "tracksearch-worker"
///
/// [scoring]
/// k1 = 1.2
/// b = 0.75
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of requests waiting in the worker inbox.
    #[serde(default = "default_inbox_capacity")]
    pub inbox_capacity: usize,
    /// Name given to the worker thread.
    #[serde(default = "default_worker_name")]
    pub worker_name: String,
    /// Ranking parameters.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_inbox_capacity() -> usize {
    DEFAULT_INBOX_CAPACITY
}

fn default_worker_name() -> String {
    DEFAULT_WORKER_NAME.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: default_inbox_capacity(),
            worker_name: default_worker_name(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for a zero inbox capacity, a negative or
    /// non-finite `k1`, or a `b` outside `0.0..=1.0`.
    pub fn validate(&self) -> Result<()> {
        if self.inbox_capacity == 0 {
            return Err(Error::invalid_config("inbox_capacity must be at least 1"));
        }
        let ScoringConfig { k1, b } = self.scoring;
        if !k1.is_finite() || k1 < 0.0 {
            return Err(Error::invalid_config(format!(
                "scoring.k1 must be a non-negative number, got {}",
                k1
            )));
        }
        if !(0.0..=1.0).contains(&b) {
            return Err(Error::invalid_config(format!(
                "scoring.b must be between 0.0 and 1.0, got {}",
                b
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SearchConfig = toml::from_str(content)
            .map_err(|e| Error::invalid_config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Scorer configured by the `[scoring]` section.
    pub fn scorer(&self) -> Bm25Scorer {
        Bm25Scorer::new(self.scoring.k1, self.scoring.b)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# tracksearch configuration
#
# Maximum number of search / rebuild requests queued for the worker.
# Submitting to a full inbox fails immediately instead of blocking.
inbox_capacity = 1024

# Name of the worker thread (shows up in debuggers and logs).
worker_name = "tracksearch-worker"

# BM25 ranking parameters.
[scoring]
k1 = 1.2   # term frequency saturation
b = 0.75   # field length normalization, 0.0 - 1.0
"#
    }
}
