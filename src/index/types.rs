use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from normalized term to the set of documents containing it.
///
/// Posting lists have set semantics (no duplicates, no meaningful order) and
/// are never empty: a term whose last posting disappears is removed from the
/// mapping entirely. Backed by ordered collections so the serialized form is
/// stable across rebuilds of the same document set.
///
/// Serializes transparently as `{"term": ["doc_id", ...], ...}`, the same
/// shape the persisted `inverted_index.json` has always had.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    terms: BTreeMap<String, BTreeSet<String>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `doc_id` contains `term`. Adding the same pair twice is
    /// a no-op.
    pub fn add_posting(&mut self, term: String, doc_id: String) {
        self.terms.entry(term).or_default().insert(doc_id);
    }

    /// The posting list for a term, if the term is indexed at all.
    pub fn postings(&self, term: &str) -> Option<&BTreeSet<String>> {
        self.terms.get(term)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of distinct documents across all posting lists.
    pub fn document_count(&self) -> usize {
        let mut docs: BTreeSet<&str> = BTreeSet::new();
        for postings in self.terms.values() {
            docs.extend(postings.iter().map(String::as_str));
        }
        docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_terms: self.term_count(),
            total_documents: self.document_count(),
        }
    }
}

/// Summary counters reported over the API and in the pipeline step log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexStats {
    pub total_terms: usize,
    pub total_documents: usize,
}
