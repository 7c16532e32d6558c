use serde::{Deserialize, Serialize};

/// What a single `advance_one_step` call did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Everything known to the source is fetched and indexed.
    NoWork,
    /// One pending document was fetched and recorded; it still needs an
    /// indexing step.
    FetchedOne { doc_id: String },
    /// The index was rebuilt and this many newly fetched documents were
    /// marked indexed. `skipped` lists documents the source no longer had
    /// during the rebuild.
    IndexedBatch { count: usize, skipped: Vec<String> },
}

/// Response for `GET /pipeline/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineStatusResponse {
    pub known: usize,
    pub fetched: usize,
    pub indexed: usize,
    pub pending_fetch: usize,
    pub pending_index: usize,
}

/// Response for `POST /pipeline/step`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StepResponse {
    #[serde(flatten)]
    pub outcome: StepOutcome,
}
