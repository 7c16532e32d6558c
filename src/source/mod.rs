//! Document Source Module
//!
//! The capability interface through which the pipeline obtains raw document
//! text. The core never touches the network or the filesystem for document
//! content directly; it only talks to a [`DocumentSource`].
//!
//! ## Implementations
//! - **`gutenberg`**: Fetches plain-text books from the Project Gutenberg
//!   mirror over HTTP, with retries, and strips the Gutenberg header/footer.
//! - **`memory`**: In-memory stub used by tests and local experiments.
//!
//! ## Failure classes
//! A source distinguishes a single missing document
//! ([`GutensearchError::DocumentNotFound`], skippable) from the source being
//! unreachable as a whole ([`GutensearchError::SourceUnavailable`], which
//! aborts the current step).

use crate::error::{GutensearchError, Result};
use async_trait::async_trait;
use std::collections::BTreeSet;

pub mod gutenberg;
pub mod memory;


/// Capability interface over an external collection of raw text documents.
///
/// Document identifiers are opaque strings assigned by the source; the
/// pipeline never generates or rewrites them.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Returns true if the source currently has a document with this ID.
    async fn exists(&self, doc_id: &str) -> Result<bool>;

    /// Returns the raw text of the document, ready for tokenization.
    ///
    /// Fails with `DocumentNotFound` if this single document is missing and
    /// `SourceUnavailable` if the source cannot be reached at all.
    async fn fetch(&self, doc_id: &str) -> Result<String>;

    /// The full universe of document IDs this source knows about.
    fn list_known_ids(&self) -> BTreeSet<String>;
}

/// Default `exists` in terms of `fetch`, shared by implementations that have
/// no cheaper membership probe.
pub(crate) async fn exists_via_fetch(
    source: &(dyn DocumentSource),
    doc_id: &str,
) -> Result<bool> {
    match source.fetch(doc_id).await {
        Ok(_) => Ok(true),
        Err(GutensearchError::DocumentNotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
