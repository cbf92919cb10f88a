use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::client::{PageFetcher, SearchProvider};
use super::error::WebSearchError;
use super::types::SearchHit;

/// Scriptable search provider for tests.
#[derive(Default)]
pub struct MockSearchProvider {
    hits: RwLock<Vec<SearchHit>>,
    fail: RwLock<bool>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hits returned for every query.
    pub fn script_hits(&self, hits: Vec<SearchHit>) {
        *self.hits.write() = hits;
    }

    pub fn fail_requests(&self) {
        *self.fail.write() = true;
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, WebSearchError> {
        if *self.fail.read() {
            return Err(WebSearchError::SearchFailed {
                query: query.to_string(),
                message: "mock failure".to_string(),
            });
        }
        Ok(self.hits.read().iter().take(max_results).cloned().collect())
    }
}

/// Scriptable page fetcher for tests. Unscripted URLs fail.
#[derive(Default)]
pub struct MockPageFetcher {
    pages: RwLock<HashMap<String, String>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_page(&self, url: impl Into<String>, content: impl Into<String>) {
        self.pages.write().insert(url.into(), content.into());
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, WebSearchError> {
        self.pages
            .read()
            .get(url)
            .cloned()
            .ok_or_else(|| WebSearchError::FetchFailed {
                url: url.to_string(),
                message: "no scripted page".to_string(),
            })
    }
}
