use super::types::InvertedIndex;
use crate::error::{GutensearchError, Result};
use crate::search::tokenizer::Tokenizer;
use crate::source::DocumentSource;
use std::collections::BTreeSet;

/// Outcome of one build pass: the documents that made it into the index and
/// the ones the source reported missing, with the reason.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub indexed: Vec<String>,
    pub skipped: Vec<(String, String)>,
}

impl BuildReport {
    pub fn skipped_ids(&self) -> Vec<String> {
        self.skipped.iter().map(|(id, _)| id.clone()).collect()
    }
}

/// Builds an in-memory inverted index from a document source.
///
/// A build is a pure function of the source content, the requested document
/// IDs and the tokenizer configuration: re-running it over unchanged inputs
/// produces an equal index.
pub struct IndexBuilder {
    tokenizer: Tokenizer,
}

impl IndexBuilder {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Fetches and tokenizes every document in `doc_ids`, producing the
    /// term → posting-list mapping.
    ///
    /// A document the source no longer has is skipped and recorded in the
    /// report; the build keeps going. A source that is unreachable aborts
    /// the whole build with `SourceUnavailable`.
    pub async fn build(
        &self,
        source: &dyn DocumentSource,
        doc_ids: &BTreeSet<String>,
    ) -> Result<(InvertedIndex, BuildReport)> {
        let mut index = InvertedIndex::new();
        let mut report = BuildReport::default();

        for doc_id in doc_ids {
            let text = match source.fetch(doc_id).await {
                Ok(text) => text,
                Err(GutensearchError::DocumentNotFound(_)) => {
                    tracing::warn!("Skipping missing document {}", doc_id);
                    report
                        .skipped
                        .push((doc_id.clone(), "not found in source".to_string()));
                    continue;
                }
                Err(e) => return Err(e),
            };

            let tokens = self.tokenize_unique(&text);
            tracing::debug!("Document {} produced {} distinct terms", doc_id, tokens.len());

            for term in tokens {
                index.add_posting(term, doc_id.clone());
            }
            report.indexed.push(doc_id.clone());
        }

        Ok((index, report))
    }

    /// Distinct normalized terms of one document. A posting list only cares
    /// about membership, so duplicates are collapsed here.
    fn tokenize_unique(&self, text: &str) -> BTreeSet<String> {
        self.tokenizer.tokenize(text).into_iter().collect()
    }
}
