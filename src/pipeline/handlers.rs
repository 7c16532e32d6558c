use super::tracker::PipelineTracker;
use super::types::{PipelineStatusResponse, StepResponse};
use crate::search::engine::QueryEngine;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// `POST /pipeline/step`
///
/// Runs one pipeline step. The tracker lives behind a mutex so state
/// mutations stay single-writer even when the background driver loop and
/// manual requests overlap. After an indexing step the query engine is
/// refreshed from the freshly persisted index.
pub async fn handle_pipeline_step(
    Extension(tracker): Extension<Arc<Mutex<PipelineTracker>>>,
    Extension(engine): Extension<Arc<RwLock<QueryEngine>>>,
) -> (StatusCode, Json<StepResponse>) {
    let mut tracker = tracker.lock().await;

    match tracker.advance_one_step().await {
        Ok(outcome) => {
            if let super::types::StepOutcome::IndexedBatch { .. } = &outcome {
                match tracker.index_store().load() {
                    Ok(index) => engine.write().await.replace_index(index),
                    Err(e) => tracing::error!("Failed to reload index after step: {}", e),
                }
            }
            (StatusCode::OK, Json(StepResponse { outcome }))
        }
        Err(e) => {
            tracing::error!("Pipeline step failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(StepResponse {
                    outcome: super::types::StepOutcome::NoWork,
                }),
            )
        }
    }
}

/// `GET /pipeline/status`
pub async fn handle_pipeline_status(
    Extension(tracker): Extension<Arc<Mutex<PipelineTracker>>>,
) -> Json<PipelineStatusResponse> {
    let tracker = tracker.lock().await;
    Json(tracker.status())
}
