use super::engine::QueryMode;
use serde::{Deserialize, Serialize};

/// Query parameters for `GET /search`.
///
/// `q` is a whitespace-separated list of terms; `mode` defaults to AND.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub mode: Option<QueryMode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: QueryMode,
    pub count: usize,
    /// Matching document IDs, sorted for stable output.
    pub results: Vec<String>,
}
