//! Pipeline Module Tests
//!
//! Validates the persisted fetched/indexed state and the idempotent
//! advance-one-step coordinator.
//!
//! ## Test Scopes
//! - **PipelineState / StateStore**: Pending-work diffing, durable
//!   round-trips, and the indexed-subset-of-fetched invariant.
//! - **PipelineTracker**: Step ordering, convergence, restart resumption,
//!   and failure handling against a stub document source.

#[cfg(test)]
mod tests {
    use crate::error::GutensearchError;
    use crate::index::builder::IndexBuilder;
    use crate::index::store::IndexStore;
    use crate::pipeline::state::{PipelineState, StateStore};
    use crate::pipeline::tracker::PipelineTracker;
    use crate::pipeline::types::StepOutcome;
    use crate::search::engine::{QueryEngine, QueryMode};
    use crate::search::tokenizer::Tokenizer;
    use crate::source::memory::MemorySource;
    use std::collections::BTreeSet;
    use std::path::Path;
    use std::sync::Arc;

    fn ids(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_source() -> Arc<MemorySource> {
        Arc::new(MemorySource::new([
            ("1".to_string(), "the house is white".to_string()),
            ("2".to_string(), "white house policy".to_string()),
            ("3".to_string(), "a red barn".to_string()),
        ]))
    }

    fn tracker_at(dir: &Path, source: Arc<MemorySource>) -> PipelineTracker {
        PipelineTracker::new(
            source,
            IndexBuilder::new(Tokenizer::with_default_stopwords()),
            IndexStore::new(dir),
            StateStore::new(dir),
        )
        .unwrap()
    }

    // ============================================================
    // PIPELINE STATE TESTS
    // ============================================================

    #[test]
    fn test_pending_fetch_is_known_minus_fetched() {
        let mut state = PipelineState::new();
        state.fetched.insert("1".to_string());

        let pending = state.pending_fetch(&ids(&["1", "2", "3"]));
        assert_eq!(pending, ids(&["2", "3"]));
    }

    #[test]
    fn test_pending_index_is_fetched_minus_indexed() {
        let mut state = PipelineState::new();
        state.fetched = ids(&["1", "2"]);
        state.indexed = ids(&["1"]);

        assert_eq!(state.pending_index(), ids(&["2"]));
    }

    #[test]
    fn test_state_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());

        let mut state = PipelineState::new();
        state.fetched = ids(&["1", "2"]);
        state.indexed = ids(&["1"]);

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_state_store_fresh_directory_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());

        let state = store.load().unwrap();
        assert!(state.fetched.is_empty());
        assert!(state.indexed.is_empty());
    }

    #[test]
    fn test_state_store_rejects_invariant_violation() {
        let dir = tempfile::tempdir().unwrap();

        // Hand-craft a state claiming "2" was indexed but never fetched.
        std::fs::write(dir.path().join("fetched_books.txt"), "1\n").unwrap();
        std::fs::write(dir.path().join("indexed_books.txt"), "1\n2\n").unwrap();

        let err = StateStore::new(dir.path()).load().unwrap_err();
        match err {
            GutensearchError::InvariantViolation(violations) => {
                assert_eq!(violations, vec!["2".to_string()]);
            }
            other => panic!("expected InvariantViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_state_store_ignores_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fetched_books.txt"), "1\n\n 2 \n").unwrap();

        let state = StateStore::new(dir.path()).load().unwrap();
        assert_eq!(state.fetched, ids(&["1", "2"]));
    }

    // ============================================================
    // TRACKER TESTS - step ordering
    // ============================================================

    #[tokio::test]
    async fn test_steps_fetch_each_document_then_index_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_at(dir.path(), sample_source());

        for _ in 0..3 {
            match tracker.advance_one_step().await.unwrap() {
                StepOutcome::FetchedOne { .. } => {}
                other => panic!("expected FetchedOne, got {:?}", other),
            }
        }

        match tracker.advance_one_step().await.unwrap() {
            StepOutcome::IndexedBatch { count, skipped } => {
                assert_eq!(count, 3);
                assert!(skipped.is_empty());
            }
            other => panic!("expected IndexedBatch, got {:?}", other),
        }

        assert_eq!(tracker.advance_one_step().await.unwrap(), StepOutcome::NoWork);
    }

    #[tokio::test]
    async fn test_invariant_holds_after_every_step() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_at(dir.path(), sample_source());

        for _ in 0..6 {
            tracker.advance_one_step().await.unwrap();
            assert!(
                tracker.state().invariant_violations().is_empty(),
                "indexed must stay a subset of fetched"
            );
        }
    }

    #[tokio::test]
    async fn test_convergence_and_no_regression() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_at(dir.path(), sample_source());

        let mut outcomes = Vec::new();
        for _ in 0..10 {
            outcomes.push(tracker.advance_one_step().await.unwrap());
        }

        // Finite source: after the work is done every further step is NoWork.
        assert!(outcomes[4..].iter().all(|o| *o == StepOutcome::NoWork));
        assert_eq!(tracker.state().fetched.len(), 3);
        assert_eq!(tracker.state().indexed.len(), 3);
    }

    #[tokio::test]
    async fn test_restart_resumes_without_redoing_work() {
        let dir = tempfile::tempdir().unwrap();
        let source = sample_source();

        {
            let mut tracker = tracker_at(dir.path(), source.clone());
            while tracker.advance_one_step().await.unwrap() != StepOutcome::NoWork {}
        }

        // A fresh tracker over the same data dir sees a finished pipeline.
        let mut resumed = tracker_at(dir.path(), source);
        assert_eq!(resumed.advance_one_step().await.unwrap(), StepOutcome::NoWork);
    }

    #[tokio::test]
    async fn test_new_document_after_convergence_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let source = sample_source();

        {
            let mut tracker = tracker_at(dir.path(), source);
            while tracker.advance_one_step().await.unwrap() != StepOutcome::NoWork {}
        }

        let grown = Arc::new(MemorySource::new([
            ("1".to_string(), "the house is white".to_string()),
            ("2".to_string(), "white house policy".to_string()),
            ("3".to_string(), "a red barn".to_string()),
            ("4".to_string(), "green meadow".to_string()),
        ]));
        let mut tracker = tracker_at(dir.path(), grown);

        assert_eq!(
            tracker.advance_one_step().await.unwrap(),
            StepOutcome::FetchedOne { doc_id: "4".to_string() }
        );
        match tracker.advance_one_step().await.unwrap() {
            StepOutcome::IndexedBatch { count, .. } => assert_eq!(count, 1),
            other => panic!("expected IndexedBatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_source_unavailable_aborts_step_and_preserves_state() {
        let dir = tempfile::tempdir().unwrap();
        let source = sample_source();
        let mut tracker = tracker_at(dir.path(), source.clone());

        tracker.advance_one_step().await.unwrap();
        let fetched_before = tracker.state().fetched.clone();

        source.set_available(false);
        let err = tracker.advance_one_step().await.unwrap_err();
        assert!(matches!(err, GutensearchError::SourceUnavailable(_)));
        assert_eq!(tracker.state().fetched, fetched_before);

        // Retryable: the source coming back lets the pipeline continue.
        source.set_available(true);
        assert!(matches!(
            tracker.advance_one_step().await.unwrap(),
            StepOutcome::FetchedOne { .. }
        ));
    }

    #[tokio::test]
    async fn test_status_reports_pending_work() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_at(dir.path(), sample_source());

        let status = tracker.status();
        assert_eq!(status.known, 3);
        assert_eq!(status.pending_fetch, 3);
        assert_eq!(status.pending_index, 0);

        tracker.advance_one_step().await.unwrap();
        let status = tracker.status();
        assert_eq!(status.fetched, 1);
        assert_eq!(status.pending_fetch, 2);
        assert_eq!(status.pending_index, 1);
    }

    // ============================================================
    // END-TO-END SCENARIO
    // ============================================================

    #[tokio::test]
    async fn test_full_pipeline_then_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_at(dir.path(), sample_source());

        while tracker.advance_one_step().await.unwrap() != StepOutcome::NoWork {}

        let index = IndexStore::new(dir.path()).load().unwrap();
        let engine = QueryEngine::new(index, Tokenizer::with_default_stopwords());

        let docs = |items: &[&str]| ids(items);

        assert_eq!(engine.search("white"), docs(&["1", "2"]));
        assert_eq!(engine.search("barn"), docs(&["3"]));
        assert_eq!(engine.search("the"), docs(&[]));
        assert_eq!(
            engine.search_multi(&["white".to_string(), "house".to_string()], QueryMode::And),
            docs(&["1", "2"])
        );
        assert_eq!(
            engine.search_multi(&["red".to_string(), "house".to_string()], QueryMode::Or),
            docs(&["1", "2", "3"])
        );
    }

    #[tokio::test]
    async fn test_rebuild_over_unchanged_source_yields_equal_index() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();

        for dir in [dir_a.path(), dir_b.path()] {
            let mut tracker = tracker_at(dir, sample_source());
            while tracker.advance_one_step().await.unwrap() != StepOutcome::NoWork {}
        }

        let index_a = IndexStore::new(dir_a.path()).load().unwrap();
        let index_b = IndexStore::new(dir_b.path()).load().unwrap();
        assert_eq!(index_a, index_b);
    }
}
