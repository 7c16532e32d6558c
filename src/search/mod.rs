//! Search Service Module
//!
//! The query side of the engine: everything needed to answer boolean term
//! queries against a loaded inverted index.
//!
//! ## Responsibilities
//! - **Tokenization**: Normalizing document text and query strings into the
//!   same term space, with a configurable stopword set.
//! - **Query evaluation**: Single-term lookups and multi-term AND/OR
//!   combination over posting sets.
//! - **API**: The HTTP search and stats endpoints for the Axum server.
//!
//! ## Submodules
//! - **`tokenizer`**: Text normalization (lowercasing, segmentation,
//!   stopword filtering).
//! - **`engine`**: The [`engine::QueryEngine`] and its boolean set algebra.
//! - **`handlers`**: HTTP request handlers.
//! - **`types`**: Request/response DTOs.

pub mod engine;
pub mod handlers;
pub mod tokenizer;
pub mod types;
