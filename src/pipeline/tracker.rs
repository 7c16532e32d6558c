use super::state::{PipelineState, StateStore};
use super::types::{PipelineStatusResponse, StepOutcome};
use crate::error::{GutensearchError, Result};
use crate::index::builder::IndexBuilder;
use crate::index::store::IndexStore;
use crate::source::DocumentSource;
use std::sync::Arc;

/// Drives the fetch → index pipeline one idempotent step at a time.
///
/// Per document the lifecycle is `unknown → fetched → indexed`, never
/// backward. The tracker is the single writer of the persisted state; every
/// transition is written through before the step returns, so a restarted
/// process resumes exactly where the previous one stopped and already
/// completed work is never redone.
pub struct PipelineTracker {
    source: Arc<dyn DocumentSource>,
    builder: IndexBuilder,
    index_store: IndexStore,
    state_store: StateStore,
    state: PipelineState,
}

impl PipelineTracker {
    /// Loads persisted state and fails fast on an `indexed ⊄ fetched`
    /// violation.
    pub fn new(
        source: Arc<dyn DocumentSource>,
        builder: IndexBuilder,
        index_store: IndexStore,
        state_store: StateStore,
    ) -> Result<Self> {
        let state = state_store.load()?;
        tracing::info!(
            "Pipeline state loaded: {} fetched, {} indexed",
            state.fetched.len(),
            state.indexed.len()
        );

        Ok(Self {
            source,
            builder,
            index_store,
            state_store,
            state,
        })
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn index_store(&self) -> &IndexStore {
        &self.index_store
    }

    pub fn status(&self) -> PipelineStatusResponse {
        let known = self.source.list_known_ids();
        PipelineStatusResponse {
            known: known.len(),
            fetched: self.state.fetched.len(),
            indexed: self.state.indexed.len(),
            pending_fetch: self.state.pending_fetch(&known).len(),
            pending_index: self.state.pending_index().len(),
        }
    }

    /// Performs the next unit of pending work, if any.
    ///
    /// 1. If the source knows documents that were never fetched, fetch the
    ///    next one, record it, and return `FetchedOne`.
    /// 2. Otherwise, if fetched documents are missing from the index,
    ///    rebuild the index over the full fetched set, persist it, mark the
    ///    newcomers indexed, and return `IndexedBatch`.
    /// 3. Otherwise return `NoWork`.
    ///
    /// Calling this any number of times against an unchanging source
    /// converges on `NoWork` without ever regressing state.
    pub async fn advance_one_step(&mut self) -> Result<StepOutcome> {
        let known_ids = self.source.list_known_ids();
        let pending_fetch = self.state.pending_fetch(&known_ids);

        for doc_id in pending_fetch {
            match self.source.fetch(&doc_id).await {
                Ok(_) => {
                    tracing::info!("Fetched document {}", doc_id);
                    self.state.fetched.insert(doc_id.clone());
                    self.state_store.save(&self.state)?;
                    return Ok(StepOutcome::FetchedOne { doc_id });
                }
                Err(GutensearchError::DocumentNotFound(_)) => {
                    // Stays pending; a later step retries in case the source
                    // gains the document.
                    tracing::warn!("Pending document {} not found in source", doc_id);
                }
                Err(e) => return Err(e),
            }
        }

        let to_index = self.state.pending_index();
        if !to_index.is_empty() {
            return self.index_step(to_index.len()).await;
        }

        tracing::debug!("Pipeline up to date");
        Ok(StepOutcome::NoWork)
    }

    /// Full rebuild over everything fetched so far. The index is persisted
    /// before any document is marked indexed, so the `indexed` set never
    /// gets ahead of a durable index that contains those documents.
    async fn index_step(&mut self, newcomer_count: usize) -> Result<StepOutcome> {
        tracing::info!(
            "Rebuilding index over {} fetched documents ({} new)",
            self.state.fetched.len(),
            newcomer_count
        );

        let (index, report) = self
            .builder
            .build(self.source.as_ref(), &self.state.fetched)
            .await?;
        self.index_store.save(&index)?;

        let skipped = report.skipped_ids();
        if !skipped.is_empty() {
            tracing::warn!("Rebuild skipped missing documents: {:?}", skipped);
        }

        self.state.indexed = self.state.fetched.clone();
        self.state_store.save(&self.state)?;

        Ok(StepOutcome::IndexedBatch {
            count: newcomer_count,
            skipped,
        })
    }
}
