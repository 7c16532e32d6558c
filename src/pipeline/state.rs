use crate::error::{GutensearchError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const FETCHED_FILE: &str = "fetched_books.txt";
const INDEXED_FILE: &str = "indexed_books.txt";

/// Which documents the pipeline has fetched and which of those have made it
/// into a persisted index.
///
/// `indexed ⊆ fetched` holds after every successful pipeline step; the
/// tracker is the only component allowed to mutate either set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    pub fetched: BTreeSet<String>,
    pub indexed: BTreeSet<String>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known IDs that have not been fetched yet.
    pub fn pending_fetch(&self, known_ids: &BTreeSet<String>) -> BTreeSet<String> {
        known_ids.difference(&self.fetched).cloned().collect()
    }

    /// Fetched IDs that have not been indexed yet.
    pub fn pending_index(&self) -> BTreeSet<String> {
        self.fetched.difference(&self.indexed).cloned().collect()
    }

    /// IDs listed as indexed without ever having been fetched. Must be empty
    /// for a well-formed state.
    pub fn invariant_violations(&self) -> Vec<String> {
        self.indexed.difference(&self.fetched).cloned().collect()
    }
}

/// Owns the durable representation of the pipeline state: two line-oriented
/// text files under the data directory, one document ID per line.
///
/// Every mutation is written through immediately (temp file + rename per
/// file), so a crash loses at most the step that was in flight.
pub struct StateStore {
    fetched_path: PathBuf,
    indexed_path: PathBuf,
}

impl StateStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            fetched_path: dir.join(FETCHED_FILE),
            indexed_path: dir.join(INDEXED_FILE),
        }
    }

    /// Loads persisted state; missing files mean an empty set (first run).
    ///
    /// A state claiming documents were indexed but never fetched fails with
    /// `InvariantViolation` and is never repaired silently.
    pub fn load(&self) -> Result<PipelineState> {
        let state = PipelineState {
            fetched: read_id_file(&self.fetched_path)?,
            indexed: read_id_file(&self.indexed_path)?,
        };

        let violations = state.invariant_violations();
        if !violations.is_empty() {
            return Err(GutensearchError::InvariantViolation(violations));
        }

        Ok(state)
    }

    pub fn save(&self, state: &PipelineState) -> Result<()> {
        write_id_file(&self.fetched_path, &state.fetched)?;
        write_id_file(&self.indexed_path, &state.indexed)?;
        Ok(())
    }
}

fn read_id_file(path: &Path) -> Result<BTreeSet<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeSet::new()),
        Err(e) => Err(e.into()),
    }
}

fn write_id_file(path: &Path, ids: &BTreeSet<String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut content = String::new();
    for id in ids {
        content.push_str(id);
        content.push('\n');
    }

    let tmp_path = path.with_extension("txt.tmp");
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
