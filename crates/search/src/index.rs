//! Inverted index over track documents
//!
//! This module provides:
//! - InvertedIndex built in one pass from a document snapshot
//! - Posting lists keyed by (term, field)
//! - Corpus statistics for scoring (document count, per-field lengths,
//!   per-term document frequency)
//!
//! An index is immutable once built. Rebuilding means building a new one.
//!
//! # Memory Layout
//!
//! Postings hold a compact `u32` document ordinal instead of a cloned
//! `DocumentId`. The ordinal resolves through a single id table, so each id is
//! stored once regardless of how many terms the document contains.

use crate::tokenizer::tokenize;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::hash_map::Entry;
use tracksearch_core::{Document, DocumentId, Field};

// ============================================================================
// Posting
// ============================================================================

/// Entry in a posting list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Document ordinal (resolve via `InvertedIndex::document_id`)
    pub doc: u32,
    /// Term frequency in this field of this document
    pub tf: u32,
}

// ============================================================================
// PostingList
// ============================================================================

/// Documents containing a term in one field, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    /// Document entries
    pub entries: Vec<Posting>,
}

impl PostingList {
    /// Create a new empty posting list
    pub fn new() -> Self {
        PostingList { entries: vec![] }
    }

    /// Add an entry to the posting list
    pub fn add(&mut self, entry: Posting) {
        self.entries.push(entry);
    }

    /// Number of documents containing this term in this field
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if posting list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries
    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.entries.iter()
    }
}

/// Dictionary entry: per-field postings plus document frequency
#[derive(Debug, Clone, Default)]
struct TermEntry {
    /// Distinct documents containing the term in any field
    doc_freq: u32,
    /// Postings indexed by `Field::ordinal`
    fields: [PostingList; Field::COUNT],
}

// ============================================================================
// IndexStats
// ============================================================================

/// Summary counters for logging and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Documents indexed
    pub documents: usize,
    /// Distinct terms in the dictionary
    pub terms: usize,
    /// Total posting entries across all (term, field) lists
    pub postings: usize,
}

// ============================================================================
// InvertedIndex
// ============================================================================

/// Inverted index for keyword search over album, artist and title text.
///
/// # Determinism
///
/// Built single-threaded over one document snapshot: equal input (same
/// documents, same order) yields identical postings and statistics.
///
/// # Duplicate ids
///
/// If a document id appears more than once in the input, the last document
/// wins and takes the position of the first occurrence. Every id in the index
/// therefore corresponds to exactly one input document.
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    /// Fields that were indexed
    fields: Vec<Field>,

    /// Term -> per-field postings and document frequency
    terms: FxHashMap<String, TermEntry>,

    /// Document ordinal -> caller id
    doc_ids: Vec<DocumentId>,

    /// Document ordinal -> token count per field
    field_lens: Vec<[u32; Field::COUNT]>,

    /// Sum of token counts per field (for average length)
    field_totals: [u64; Field::COUNT],

    /// Input documents replaced by a later duplicate id
    duplicates: usize,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl InvertedIndex {
    /// Create an index with no documents over all fields
    pub fn empty() -> Self {
        InvertedIndex {
            fields: Field::ALL.to_vec(),
            terms: FxHashMap::default(),
            doc_ids: Vec::new(),
            field_lens: Vec::new(),
            field_totals: [0; Field::COUNT],
            duplicates: 0,
        }
    }

    /// Build an index over every field
    pub fn build_all<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        Self::build(documents, &Field::ALL)
    }

    /// Build an index over the given fields.
    ///
    /// Tokenizes each named field of each document and accumulates postings
    /// and corpus statistics. An empty document set yields a valid empty index.
    pub fn build<I>(documents: I, fields: &[Field]) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let (documents, duplicates) = dedupe_by_id(documents);

        let mut indexed = [false; Field::COUNT];
        let mut field_list = Vec::with_capacity(Field::COUNT);
        for &field in fields {
            if !indexed[field.ordinal()] {
                indexed[field.ordinal()] = true;
                field_list.push(field);
            }
        }

        let mut index = InvertedIndex {
            fields: field_list,
            terms: FxHashMap::default(),
            doc_ids: Vec::with_capacity(documents.len()),
            field_lens: Vec::with_capacity(documents.len()),
            field_totals: [0; Field::COUNT],
            duplicates,
        };

        let mut tf_map: FxHashMap<String, u32> = FxHashMap::default();
        let mut doc_terms: FxHashSet<String> = FxHashSet::default();

        for (ordinal, doc) in documents.into_iter().enumerate() {
            let ordinal = ordinal as u32;
            let mut lens = [0u32; Field::COUNT];
            doc_terms.clear();

            for &field in &index.fields {
                tf_map.clear();
                let mut len = 0u32;
                for token in tokenize(doc.field(field)) {
                    *tf_map.entry(token).or_insert(0) += 1;
                    len += 1;
                }
                lens[field.ordinal()] = len;
                index.field_totals[field.ordinal()] += u64::from(len);

                for (term, tf) in tf_map.drain() {
                    let first_in_doc = !doc_terms.contains(&term);
                    if first_in_doc {
                        doc_terms.insert(term.clone());
                    }
                    let entry = match index.terms.entry(term) {
                        Entry::Occupied(e) => e.into_mut(),
                        Entry::Vacant(e) => e.insert(TermEntry::default()),
                    };
                    if first_in_doc {
                        entry.doc_freq += 1;
                    }
                    entry.fields[field.ordinal()].add(Posting { doc: ordinal, tf });
                }
            }

            index.doc_ids.push(doc.id);
            index.field_lens.push(lens);
        }

        index
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Get total number of indexed documents
    pub fn total_docs(&self) -> usize {
        self.doc_ids.len()
    }

    /// True if no documents were indexed
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Fields covered by this index, in build order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get document frequency for a term (distinct documents, any field)
    pub fn doc_freq(&self, term: &str) -> usize {
        self.terms.get(term).map(|e| e.doc_freq as usize).unwrap_or(0)
    }

    /// Average token count of a field across all documents
    ///
    /// Returns 0.0 for an empty index or a field that was not indexed.
    pub fn avg_field_len(&self, field: Field) -> f32 {
        let total = self.total_docs();
        if total == 0 {
            return 0.0;
        }
        self.field_totals[field.ordinal()] as f32 / total as f32
    }

    /// Token count of a field in one document
    pub fn field_len(&self, doc: u32, field: Field) -> u32 {
        self.field_lens
            .get(doc as usize)
            .map(|lens| lens[field.ordinal()])
            .unwrap_or(0)
    }

    /// Number of input documents that were replaced by a later duplicate id
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Summary counters
    pub fn stats(&self) -> IndexStats {
        let postings = self
            .terms
            .values()
            .map(|e| e.fields.iter().map(PostingList::len).sum::<usize>())
            .sum();
        IndexStats {
            documents: self.total_docs(),
            terms: self.term_count(),
            postings,
        }
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Lookup documents containing a term in a field
    ///
    /// Returns None if the term does not occur in that field.
    pub fn postings(&self, term: &str, field: Field) -> Option<&PostingList> {
        self.terms
            .get(term)
            .map(|e| &e.fields[field.ordinal()])
            .filter(|list| !list.is_empty())
    }

    /// Resolve a document ordinal back to the caller's id
    pub fn document_id(&self, doc: u32) -> Option<&DocumentId> {
        self.doc_ids.get(doc as usize)
    }

    /// All document ids in ordinal order
    pub fn document_ids(&self) -> &[DocumentId] {
        &self.doc_ids
    }

    /// Iterate over all terms in the dictionary (unordered)
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }
}

/// Collapse repeated ids: the last document wins, at the first position.
fn dedupe_by_id<I>(documents: I) -> (Vec<Document>, usize)
where
    I: IntoIterator<Item = Document>,
{
    let mut positions: FxHashMap<DocumentId, usize> = FxHashMap::default();
    let mut out: Vec<Document> = Vec::new();
    let mut duplicates = 0;

    for doc in documents {
        match positions.entry(doc.id.clone()) {
            Entry::Occupied(e) => {
                out[*e.get()] = doc;
                duplicates += 1;
            }
            Entry::Vacant(e) => {
                e.insert(out.len());
                out.push(doc);
            }
        }
    }

    (out, duplicates)
}

// ============================================================================
// Tests
// ============================================================================
