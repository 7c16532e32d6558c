use super::types::InvertedIndex;
use crate::error::{GutensearchError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const INDEX_FILE: &str = "inverted_index.json";

/// Owns the durable JSON representation of the inverted index.
///
/// Saves are atomic from a reader's perspective: the index is written to a
/// temp file in the same directory and renamed over the live file, so a
/// concurrent `load` sees either the previous index or the new one, never a
/// partial write.
pub struct IndexStore {
    index_path: PathBuf,
}

impl IndexStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            index_path: data_dir.as_ref().join(INDEX_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.index_path
    }

    pub fn save(&self, index: &InvertedIndex) -> Result<()> {
        if let Some(parent) = self.index_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(index)?;
        let tmp_path = self.index_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.index_path)?;

        tracing::info!(
            "Saved index with {} terms to {}",
            index.term_count(),
            self.index_path.display()
        );
        Ok(())
    }

    /// Loads the persisted index.
    ///
    /// Distinguishes a store that was never written (`IndexNotFound`, which
    /// query callers may treat as an empty index) from one that exists but
    /// cannot be parsed (`IndexCorrupt`, which must never be silently
    /// treated as empty).
    pub fn load(&self) -> Result<InvertedIndex> {
        let json = match fs::read_to_string(&self.index_path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GutensearchError::IndexNotFound(self.index_path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&json).map_err(|e| GutensearchError::IndexCorrupt {
            path: self.index_path.clone(),
            reason: e.to_string(),
        })
    }

    /// `load`, except a never-written store comes back as an empty index.
    /// Corruption still surfaces as an error.
    pub fn load_or_empty(&self) -> Result<InvertedIndex> {
        match self.load() {
            Ok(index) => Ok(index),
            Err(GutensearchError::IndexNotFound(_)) => Ok(InvertedIndex::new()),
            Err(e) => Err(e),
        }
    }
}
