//! Scoring infrastructure for track search
//!
//! This module provides:
//! - Scorer trait for pluggable scoring algorithms
//! - Bm25Scorer default implementation
//!
//! Scorers work on one (term, field, document) match at a time; the query
//! processor sums their output across every match of a document.

// ============================================================================
// Scorer Trait
// ============================================================================

/// Pluggable scoring interface
///
/// Higher scores indicate more relevant documents. Implementations must
/// return a finite, non-negative number for every input and must never panic:
/// degenerate statistics contribute zero.
///
/// # Thread Safety
///
/// Scorers must be Send + Sync so a generation can be searched from any thread.
pub trait Scorer: Send + Sync {
    /// Score one term match in one field of one document.
    ///
    /// - `tf`: term frequency in this field of this document
    /// - `field_len`: token count of this field in this document
    /// - `total_docs`: documents in the corpus
    /// - `doc_freq`: documents containing the term in any field
    /// - `avg_field_len`: average token count of this field across the corpus
    fn score(
        &self,
        tf: u32,
        field_len: u32,
        total_docs: usize,
        doc_freq: usize,
        avg_field_len: f32,
    ) -> f32;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// Bm25Scorer
// ============================================================================

/// Default k1: term frequency saturation
pub const DEFAULT_K1: f32 = 1.2;

/// Default b: field length normalization
pub const DEFAULT_B: f32 = 0.75;

/// Standard BM25 per-field scorer
///
/// # BM25 Formula
///
/// score = IDF(t) * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * dl/avgdl))
///
/// Where:
/// - tf = term frequency in the field
/// - dl = field length in this document
/// - avgdl = average field length across the corpus
/// - k1 = term saturation parameter (default 1.2)
/// - b = length normalization parameter (default 0.75)
#[derive(Debug, Clone, PartialEq)]
pub struct Bm25Scorer {
    k1: f32,
    b: f32,
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Bm25Scorer {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

impl Bm25Scorer {
    /// Create a new Bm25Scorer with custom parameters
    pub fn new(k1: f32, b: f32) -> Self {
        Bm25Scorer { k1, b }
    }

    /// k1 parameter
    pub fn k1(&self) -> f32 {
        self.k1
    }

    /// b parameter
    pub fn b(&self) -> f32 {
        self.b
    }
}

/// Compute IDF for a term
///
/// Uses standard IDF formula with smoothing:
/// IDF(t) = ln((N - df + 0.5) / (df + 0.5) + 1)
///
/// Always positive for `df >= 1`; returns 0.0 when the term is absent or the
/// corpus is empty.
pub fn idf(total_docs: usize, doc_freq: usize) -> f32 {
    if total_docs == 0 || doc_freq == 0 {
        return 0.0;
    }
    let n = total_docs as f32;
    let df = doc_freq.min(total_docs) as f32;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

impl Scorer for Bm25Scorer {
    fn score(
        &self,
        tf: u32,
        field_len: u32,
        total_docs: usize,
        doc_freq: usize,
        avg_field_len: f32,
    ) -> f32 {
        if tf == 0 || avg_field_len <= 0.0 || !avg_field_len.is_finite() {
            return 0.0;
        }
        let idf = idf(total_docs, doc_freq);
        if idf <= 0.0 {
            return 0.0;
        }

        let tf = tf as f32;
        let dl = field_len as f32;
        let tf_component =
            (tf * (self.k1 + 1.0)) / (tf + self.k1 * (1.0 - self.b + self.b * dl / avg_field_len));

        (idf * tf_component).max(0.0)
    }

    fn name(&self) -> &str {
        "bm25"
    }
}

// ============================================================================
// Tests
// ============================================================================
