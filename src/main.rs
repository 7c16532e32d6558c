use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use gutensearch::index::builder::IndexBuilder;
use gutensearch::index::store::IndexStore;
use gutensearch::pipeline::handlers::{handle_pipeline_status, handle_pipeline_step};
use gutensearch::pipeline::state::StateStore;
use gutensearch::pipeline::tracker::PipelineTracker;
use gutensearch::pipeline::types::StepOutcome;
use gutensearch::search::engine::QueryEngine;
use gutensearch::search::handlers::{handle_index_stats, handle_search};
use gutensearch::search::tokenizer::Tokenizer;
use gutensearch::source::gutenberg::GutenbergSource;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: Option<SocketAddr> = None;
    let mut data_dir = "data".to_string();
    let mut book_ids: Vec<String> = vec![];
    let mut step_interval_secs = 5u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--data-dir" => {
                data_dir = args[i + 1].clone();
                i += 2;
            }
            "--book-ids" => {
                book_ids = args[i + 1]
                    .split(',')
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .collect();
                i += 2;
            }
            "--step-interval" => {
                step_interval_secs = args[i + 1].parse()?;
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let Some(bind_addr) = bind_addr else {
        eprintln!(
            "Usage: {} --bind <addr:port> --book-ids <id,id,...> [--data-dir <path>] [--step-interval <secs>]",
            args[0]
        );
        eprintln!("Example: {} --bind 127.0.0.1:6000 --book-ids 1342,84,11", args[0]);
        std::process::exit(1);
    };

    tracing::info!("Starting gutensearch on {} (data dir: {})", bind_addr, data_dir);
    tracing::info!("Known book IDs: {:?}", book_ids);

    // 1. Document source + pipeline:
    let source = Arc::new(GutenbergSource::new(book_ids));
    let builder = IndexBuilder::new(Tokenizer::with_default_stopwords());
    let tracker = PipelineTracker::new(
        source,
        builder,
        IndexStore::new(&data_dir),
        StateStore::new(&data_dir),
    )?;
    let tracker = Arc::new(Mutex::new(tracker));

    // 2. Query engine over whatever index is already persisted. A corrupt
    //    index is fatal here; a missing one just means an empty engine.
    let initial_index = IndexStore::new(&data_dir).load_or_empty()?;
    tracing::info!(
        "Loaded index: {} terms, {} documents",
        initial_index.term_count(),
        initial_index.document_count()
    );
    let engine = Arc::new(RwLock::new(QueryEngine::new(
        initial_index,
        Tokenizer::with_default_stopwords(),
    )));

    // 3. HTTP Router:
    let app = Router::new()
        .route("/search", get(handle_search))
        .route("/index/stats", get(handle_index_stats))
        .route("/pipeline/step", post(handle_pipeline_step))
        .route("/pipeline/status", get(handle_pipeline_status))
        .layer(Extension(tracker.clone()))
        .layer(Extension(engine.clone()));

    // 4. Spawn background pipeline driver:
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(step_interval_secs));

        loop {
            interval.tick().await;

            let mut tracker = tracker.lock().await;
            match tracker.advance_one_step().await {
                Ok(StepOutcome::NoWork) => {
                    tracing::debug!("Pipeline driver: nothing to do");
                }
                Ok(StepOutcome::FetchedOne { doc_id }) => {
                    tracing::info!("Pipeline driver: fetched {}", doc_id);
                }
                Ok(StepOutcome::IndexedBatch { count, skipped }) => {
                    tracing::info!(
                        "Pipeline driver: indexed {} new documents ({} skipped)",
                        count,
                        skipped.len()
                    );
                    match tracker.index_store().load() {
                        Ok(index) => engine.write().await.replace_index(index),
                        Err(e) => tracing::error!("Failed to reload index: {}", e),
                    }
                }
                Err(e) => {
                    tracing::error!("Pipeline driver step failed: {}", e);
                }
            }
        }
    });

    // 5. Start HTTP server:
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
