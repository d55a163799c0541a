//! Query processing: parse, retrieve, score, rank
//!
//! A raw search string is normalized with the same tokenizer used at index
//! time, so query terms and indexed terms match symmetrically. Matching is
//! exact per term; a trailing `*` (the old "starts-with" marker) is accepted
//! and ignored.

use crate::index::{InvertedIndex, Posting};
use crate::scorer::{Bm25Scorer, Scorer};
use crate::tokenizer::tokenize_unique;
use rustc_hash::FxHashMap;
use tracing::debug;
use tracksearch_core::{DocumentId, Field};

/// Wildcard marker stripped from the end of a raw query
pub const WILDCARD: char = '*';

/// Parse a raw query string into distinct query terms, in order.
///
/// # Example
///
/// ```
/// use tracksearch_search::query::parse_query;
///
/// assert_eq!(parse_query("Purple Rain *"), vec!["purple", "rain"]);
/// assert!(parse_query("  *").is_empty());
/// ```
pub fn parse_query(raw: &str) -> Vec<String> {
    let stripped = raw.trim_end().trim_end_matches(WILDCARD);
    tokenize_unique(stripped)
}

/// A ranked search hit with its accumulated score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    /// Matching document
    pub id: DocumentId,
    /// Sum of scorer output over every matched (term, field) pair
    pub score: f32,
}

/// Evaluates queries against an `InvertedIndex`.
///
/// Searching never fails: an empty or unparseable query, or an index with no
/// documents, produces an empty result.
#[derive(Debug, Clone)]
pub struct QueryProcessor<S = Bm25Scorer> {
    scorer: S,
}

impl Default for QueryProcessor<Bm25Scorer> {
    fn default() -> Self {
        QueryProcessor::new(Bm25Scorer::default())
    }
}

impl<S: Scorer> QueryProcessor<S> {
    /// Create a processor with the given scorer
    pub fn new(scorer: S) -> Self {
        QueryProcessor { scorer }
    }

    /// Scorer in use
    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Search and return matching ids, best first.
    ///
    /// Order is descending by score; equal scores are ordered by ascending
    /// document id.
    pub fn search(&self, raw_query: &str, index: &InvertedIndex) -> Vec<DocumentId> {
        self.search_scored(raw_query, index)
            .into_iter()
            .map(|hit| hit.id)
            .collect()
    }

    /// Search and return ranked hits with their scores.
    ///
    /// Each matched (term, field) pair is scored with the field's length
    /// excluding occurrences of the query's own terms, then summed per
    /// document.
    pub fn search_scored(&self, raw_query: &str, index: &InvertedIndex) -> Vec<ScoredDocument> {
        let terms = parse_query(raw_query);
        if terms.is_empty() || index.is_empty() {
            return Vec::new();
        }

        // Matched (term, field, document) triples with their statistics
        let mut matches: Vec<(Field, usize, &Posting)> = Vec::new();
        // Query-term occurrences per (document, field)
        let mut query_lens: FxHashMap<(u32, usize), u32> = FxHashMap::default();

        for term in &terms {
            let doc_freq = index.doc_freq(term);
            if doc_freq == 0 {
                continue;
            }
            for &field in index.fields() {
                let Some(postings) = index.postings(term, field) else {
                    continue;
                };
                for posting in postings.iter() {
                    *query_lens
                        .entry((posting.doc, field.ordinal()))
                        .or_insert(0) += posting.tf;
                    matches.push((field, doc_freq, posting));
                }
            }
        }

        // Field length for normalization excludes query-term occurrences
        let total_docs = index.total_docs();
        let mut scores: FxHashMap<u32, f32> = FxHashMap::default();
        for (field, doc_freq, posting) in matches {
            let query_len = query_lens
                .get(&(posting.doc, field.ordinal()))
                .copied()
                .unwrap_or(0);
            let other_len = index
                .field_len(posting.doc, field)
                .saturating_sub(query_len);
            let score = self.scorer.score(
                posting.tf,
                other_len,
                total_docs,
                doc_freq,
                index.avg_field_len(field),
            );
            *scores.entry(posting.doc).or_insert(0.0) += score;
        }

        let mut hits: Vec<ScoredDocument> = scores
            .into_iter()
            .filter_map(|(doc, score)| {
                index.document_id(doc).map(|id| ScoredDocument {
                    id: id.clone(),
                    score,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));

        debug!(
            target: "tracksearch::search",
            terms = terms.len(),
            hits = hits.len(),
            scorer = self.scorer.name(),
            "Query evaluated"
        );

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracksearch_core::Document;

    fn doc(id: i64, album: &str, artist: &str, title: &str) -> Document {
        Document::new(id, album, artist, title)
    }

    fn ids(values: &[i64]) -> Vec<DocumentId> {
        values.iter().copied().map(DocumentId::Int).collect()
    }

    #[test]
    fn test_parse_query_strips_wildcard() {
        assert_eq!(parse_query("song *"), vec!["song"]);
        assert_eq!(parse_query("song*"), vec!["song"]);
        assert_eq!(parse_query("song"), vec!["song"]);
    }

    #[test]
    fn test_parse_query_dedupes() {
        assert_eq!(parse_query("Song song SONG two"), vec!["song", "two"]);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let index = InvertedIndex::build_all(vec![doc(1, "A", "X", "Song One")]);
        let processor = QueryProcessor::default();
        assert!(processor.search("", &index).is_empty());
        assert!(processor.search("   ", &index).is_empty());
        assert!(processor.search("!!! *", &index).is_empty());
    }

    #[test]
    fn test_empty_index_returns_nothing() {
        let index = InvertedIndex::empty();
        assert!(QueryProcessor::default().search("song", &index).is_empty());
    }

    #[test]
    fn test_tie_break_by_id() {
        let index = InvertedIndex::build_all(vec![
            doc(2, "B", "Y", "Song Two"),
            doc(1, "A", "X", "Song One"),
        ]);
        assert_eq!(QueryProcessor::default().search("song", &index), ids(&[1, 2]));
    }

    #[test]
    fn test_non_matching_documents_excluded() {
        let index = InvertedIndex::build_all(vec![
            doc(1, "A", "X", "Song One"),
            doc(2, "B", "Y", "Other"),
        ]);
        assert_eq!(QueryProcessor::default().search("song", &index), ids(&[1]));
        assert!(QueryProcessor::default().search("missing", &index).is_empty());
    }

    #[test]
    fn test_more_matched_terms_rank_higher() {
        let index = InvertedIndex::build_all(vec![
            doc(1, "Blue", "Someone", "Moon River"),
            doc(2, "Blue", "Someone", "Blue Moon"),
            doc(3, "Red", "Someone", "Sun"),
        ]);
        let hits = QueryProcessor::default().search("blue moon", &index);
        assert_eq!(hits, ids(&[2, 1]));
    }

    #[test]
    fn test_rare_term_outweighs_common_term() {
        let index = InvertedIndex::build_all(vec![
            doc(1, "", "", "love"),
            doc(2, "", "", "love"),
            doc(3, "", "", "love"),
            doc(4, "", "", "zebra"),
        ]);
        let hits = QueryProcessor::default().search_scored("love zebra", &index);
        assert_eq!(hits[0].id, DocumentId::Int(4));
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_scores_accumulate_across_fields() {
        let index = InvertedIndex::build_all(vec![
            doc(1, "Prince", "Prince", "Purple Rain"),
            doc(2, "Hits", "Prince", "Kiss"),
        ]);
        let hits = QueryProcessor::default().search_scored("prince", &index);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, DocumentId::Int(1));
        assert!(hits.iter().all(|h| h.score > 0.0));
    }

    #[test]
    fn test_string_ids_tie_break() {
        let index = InvertedIndex::build_all(vec![
            Document::new("b", "", "", "song"),
            Document::new("a", "", "", "song"),
        ]);
        assert_eq!(
            QueryProcessor::default().search("song", &index),
            vec![DocumentId::from("a"), DocumentId::from("b")]
        );
    }
}
