use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::error::WebSearchError;
use super::types::SearchHit;

/// External web search capability.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs one query, returning at most `max_results` hits.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, WebSearchError>;
}

/// External page fetch capability. Returns extracted visible text; an
/// empty string is a legitimate "nothing usable" outcome.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, WebSearchError>;
}

#[derive(Deserialize)]
struct SearxResponse {
    #[serde(default)]
    results: Vec<SearxResult>,
}

#[derive(Deserialize)]
struct SearxResult {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

/// Search client for a SearxNG-compatible JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSearchProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, WebSearchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WebSearchError::ClientBuildFailed {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, WebSearchError> {
        debug!(query, max_results, "Running web search");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| WebSearchError::SearchFailed {
                query: query.to_string(),
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| WebSearchError::SearchFailed {
                query: query.to_string(),
                message: e.to_string(),
            })?;

        let body: SearxResponse =
            response
                .json()
                .await
                .map_err(|e| WebSearchError::SearchFailed {
                    query: query.to_string(),
                    message: e.to_string(),
                })?;

        Ok(body
            .results
            .into_iter()
            .take(max_results)
            .map(|r| SearchHit {
                url: r.url,
                title: r.title,
                snippet: r.content,
            })
            .collect())
    }
}

/// Render width for HTML-to-text conversion; wide enough that prose is
/// not rewrapped mid-word.
const PAGE_TEXT_WIDTH: usize = 200;

/// Converts an HTML page to its visible text.
pub(crate) fn page_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), PAGE_TEXT_WIDTH)
}

/// Plain HTTP page fetcher. Dynamic-JS-only pages come back mostly empty;
/// the corroborator's snippet fallback covers those.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    http: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, WebSearchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; veriscan/0.1)")
            .build()
            .map_err(|e| WebSearchError::ClientBuildFailed {
                message: e.to_string(),
            })?;

        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, WebSearchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| WebSearchError::FetchFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| WebSearchError::FetchFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let html = response
            .text()
            .await
            .map_err(|e| WebSearchError::FetchFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(page_text(&html))
    }
}
