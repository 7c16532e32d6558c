use super::DocumentSource;
use crate::error::{GutensearchError, Result};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory document source for tests and local runs.
///
/// Holds documents as plain strings and can be flipped to "unreachable" to
/// exercise the `SourceUnavailable` path.
pub struct MemorySource {
    documents: HashMap<String, String>,
    available: AtomicBool,
}

impl MemorySource {
    pub fn new(documents: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
            available: AtomicBool::new(true),
        }
    }

    pub fn empty() -> Self {
        Self::new([])
    }

    /// Simulates the source going down (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(GutensearchError::SourceUnavailable(
                "memory source marked unavailable".to_string(),
            ))
        }
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn exists(&self, doc_id: &str) -> Result<bool> {
        self.check_available()?;
        Ok(self.documents.contains_key(doc_id))
    }

    async fn fetch(&self, doc_id: &str) -> Result<String> {
        self.check_available()?;
        self.documents
            .get(doc_id)
            .cloned()
            .ok_or_else(|| GutensearchError::DocumentNotFound(doc_id.to_string()))
    }

    fn list_known_ids(&self) -> BTreeSet<String> {
        self.documents.keys().cloned().collect()
    }
}
