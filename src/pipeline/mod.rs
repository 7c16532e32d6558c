//! Pipeline Module
//!
//! The incremental coordinator that decides what work remains: which
//! documents still need fetching from the source and which fetched documents
//! still need indexing.
//!
//! ## Submodules
//! - **`state`**: The persisted fetched/indexed ID sets and their durable
//!   line-oriented files.
//! - **`tracker`**: The [`tracker::PipelineTracker`] and its idempotent
//!   `advance_one_step` operation.
//! - **`handlers`**: HTTP endpoints for driving and inspecting the pipeline.
//! - **`types`**: Step outcomes and status DTOs.

pub mod handlers;
pub mod state;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod tests;
