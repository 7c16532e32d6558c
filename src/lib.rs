//! Gutensearch Library
//!
//! This library crate defines the core modules of the indexing pipeline and
//! search engine. It serves as the foundation for the binary executable
//! (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems:
//!
//! - **`source`**: The document intake capability. Yields raw book text by
//!   document ID, either from the Project Gutenberg mirror or from an
//!   in-memory stub.
//! - **`index`**: Inverted-index construction and persistence. Builds the
//!   term → posting-list mapping with a full pass over the fetched
//!   documents and publishes it atomically as JSON.
//! - **`search`**: The query side. Tokenization/normalization shared with
//!   indexing, plus boolean AND/OR evaluation over posting sets.
//! - **`pipeline`**: The incremental coordinator. Tracks which documents
//!   are fetched vs indexed across restarts and advances the remaining work
//!   one idempotent step at a time.

pub mod error;
pub mod index;
pub mod pipeline;
pub mod search;
pub mod source;
