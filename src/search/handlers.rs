use super::engine::{QueryEngine, QueryMode};
use super::types::{SearchParams, SearchResponse};
use crate::index::types::IndexStats;
use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;

/// `GET /search?q=white+house&mode=or`
///
/// Splits `q` on whitespace and evaluates it as a multi-term boolean query.
/// Queries only read the currently loaded index, so any number of them can
/// run concurrently.
pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(engine): Extension<Arc<RwLock<QueryEngine>>>,
) -> Json<SearchResponse> {
    let mode = params.mode.unwrap_or(QueryMode::And);
    let terms: Vec<String> = params.q.split_whitespace().map(str::to_string).collect();

    let engine = engine.read().await;
    let results: Vec<String> = engine.search_multi(&terms, mode).into_iter().collect();

    tracing::debug!("Query {:?} ({:?}) matched {} documents", params.q, mode, results.len());

    Json(SearchResponse {
        query: params.q,
        mode,
        count: results.len(),
        results,
    })
}

/// `GET /index/stats`
pub async fn handle_index_stats(
    Extension(engine): Extension<Arc<RwLock<QueryEngine>>>,
) -> Json<IndexStats> {
    let engine = engine.read().await;
    Json(engine.stats())
}
