use super::tokenizer::Tokenizer;
use crate::index::types::{IndexStats, InvertedIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How `search_multi` combines the posting sets of its terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Documents must contain every surviving term (set intersection).
    And,
    /// Documents containing any surviving term (set union).
    Or,
}

/// Evaluates boolean term queries against a loaded index.
///
/// The engine holds a read-only copy of the index and never mutates it.
/// Query terms go through the same tokenizer the index was built with, so a
/// query matches exactly what indexing produced. Results are plain document
/// ID sets; ordering is up to the caller.
pub struct QueryEngine {
    index: InvertedIndex,
    tokenizer: Tokenizer,
}

impl QueryEngine {
    pub fn new(index: InvertedIndex, tokenizer: Tokenizer) -> Self {
        Self { index, tokenizer }
    }

    /// Swaps in a freshly built index, e.g. after a pipeline indexing step.
    pub fn replace_index(&mut self, index: InvertedIndex) {
        self.index = index;
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Documents containing `term`.
    ///
    /// The raw input is normalized first; a term that is absent from the
    /// index, or that normalizes away entirely (stopword, punctuation-only),
    /// yields an empty set rather than an error. Input that segments into
    /// several words matches documents containing all of them.
    pub fn search(&self, term: &str) -> BTreeSet<String> {
        match self.term_postings(term) {
            Some(postings) => postings,
            None => BTreeSet::new(),
        }
    }

    /// Multi-term boolean query.
    ///
    /// Each term is normalized independently; terms that normalize away are
    /// discarded before combining. If every term is discarded the result is
    /// empty in both modes.
    pub fn search_multi(&self, terms: &[String], mode: QueryMode) -> BTreeSet<String> {
        let mut result_sets: Vec<BTreeSet<String>> = Vec::new();
        for term in terms {
            if let Some(postings) = self.term_postings(term) {
                result_sets.push(postings);
            }
        }

        let Some(first) = result_sets.first().cloned() else {
            return BTreeSet::new();
        };

        result_sets.into_iter().skip(1).fold(first, |acc, set| {
            match mode {
                QueryMode::And => acc.intersection(&set).cloned().collect(),
                QueryMode::Or => acc.union(&set).cloned().collect(),
            }
        })
    }

    /// The posting set for one raw query term, or `None` if the term
    /// normalizes away. A multi-word term contributes the intersection of
    /// its words' posting lists.
    fn term_postings(&self, raw_term: &str) -> Option<BTreeSet<String>> {
        let words = self.tokenizer.tokenize(raw_term);
        if words.is_empty() {
            return None;
        }

        let mut result: Option<BTreeSet<String>> = None;
        for word in &words {
            let postings = match self.index.postings(word) {
                Some(postings) => postings.clone(),
                None => BTreeSet::new(),
            };
            result = Some(match result {
                None => postings,
                Some(acc) => acc.intersection(&postings).cloned().collect(),
            });
        }
        result
    }
}
