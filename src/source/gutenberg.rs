use super::DocumentSource;
use crate::error::{GutensearchError, Result};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::time::Duration;

const START_MARKER: &str = "*** START OF THE PROJECT GUTENBERG EBOOK";
const END_MARKER: &str = "*** END OF THE PROJECT GUTENBERG EBOOK";

const DEFAULT_BASE_URL: &str = "https://www.gutenberg.org/cache/epub";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const FETCH_ATTEMPTS: usize = 3;

/// Document source backed by the Project Gutenberg plain-text mirror.
///
/// Configured with an explicit list of book IDs; `list_known_ids` returns
/// exactly that list, so the pipeline's pending-work computation stays
/// deterministic. Fetched text has the Gutenberg license header and footer
/// stripped before it is handed to the tokenizer.
pub struct GutenbergSource {
    base_url: String,
    book_ids: BTreeSet<String>,
    http_client: reqwest::Client,
}

impl GutenbergSource {
    pub fn new(book_ids: impl IntoIterator<Item = String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, book_ids)
    }

    /// Mainly for tests pointing at a local mock server.
    pub fn with_base_url(base_url: &str, book_ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            book_ids: book_ids.into_iter().collect(),
            http_client: reqwest::Client::new(),
        }
    }

    fn book_url(&self, book_id: &str) -> String {
        format!("{}/{}/pg{}.txt", self.base_url, book_id, book_id)
    }

    async fn get_with_retry(&self, url: String) -> Result<reqwest::Response> {
        let mut delay_ms = 150u64;

        for attempt in 0..FETCH_ATTEMPTS {
            let response = self
                .http_client
                .get(url.clone())
                .timeout(FETCH_TIMEOUT)
                .send()
                .await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == FETCH_ATTEMPTS {
                        return Err(GutensearchError::SourceUnavailable(e.to_string()));
                    }
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(GutensearchError::SourceUnavailable(
            "retry attempts exhausted".to_string(),
        ))
    }
}

#[async_trait]
impl DocumentSource for GutenbergSource {
    async fn exists(&self, doc_id: &str) -> Result<bool> {
        super::exists_via_fetch(self, doc_id).await
    }

    async fn fetch(&self, doc_id: &str) -> Result<String> {
        let url = self.book_url(doc_id);
        let response = self.get_with_retry(url.clone()).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GutensearchError::DocumentNotFound(doc_id.to_string()));
        }
        if response.status().is_server_error() {
            return Err(GutensearchError::SourceUnavailable(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }
        if !response.status().is_success() {
            return Err(GutensearchError::DocumentNotFound(doc_id.to_string()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| GutensearchError::SourceUnavailable(e.to_string()))?;

        Ok(strip_gutenberg_boilerplate(&text))
    }

    fn list_known_ids(&self) -> BTreeSet<String> {
        self.book_ids.clone()
    }
}

/// Cuts the text down to the part between the Project Gutenberg START/END
/// markers. Books missing the markers are indexed whole.
pub fn strip_gutenberg_boilerplate(text: &str) -> String {
    let Some(start_idx) = text.find(START_MARKER) else {
        return text.trim().to_string();
    };
    let after_marker = &text[start_idx + START_MARKER.len()..];

    // The marker line ends with the book title; skip to the next line.
    let body_start = after_marker.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_marker[body_start..];

    match body.find(END_MARKER) {
        Some(end_idx) => body[..end_idx].trim().to_string(),
        None => body.trim().to_string(),
    }
}
