//! Index Module
//!
//! Construction and persistence of the term → document inverted index.
//!
//! ## Submodules
//! - **`types`**: The [`types::InvertedIndex`] data model and its stats.
//! - **`builder`**: Full-pass index construction from a document source.
//! - **`store`**: Durable JSON representation with atomic publish.
//!
//! The builder always rebuilds from scratch over the full document set;
//! there is no incremental merge into an existing index.

pub mod builder;
pub mod store;
pub mod types;
