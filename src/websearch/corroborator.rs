use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use super::client::{PageFetcher, SearchProvider};
use super::containment::containment;
use super::error::WebSearchError;
use super::query::generate_queries;
use super::types::{SearchHit, WebSource};
use crate::constants::{
    DEFAULT_FETCH_TIMEOUT_SECS, DOMINANT_CONTAINMENT, MAX_WEB_SOURCES, MIN_CLASSIFIABLE_CHARS,
    MIN_CONTAINMENT, RESULTS_PER_QUERY, SNIPPET_MAX_CHARS,
};

/// Corroboration tuning.
#[derive(Debug, Clone)]
pub struct CorroboratorConfig {
    /// Results requested per search query.
    pub results_per_query: usize,
    /// Containment floor below which a source is rejected.
    pub min_containment: f64,
    /// A top source above this fraction is treated as the likely original
    /// and returned alone.
    pub dominant_containment: f64,
    /// Max sources returned when none is dominant.
    pub max_sources: usize,
    /// Per-page fetch budget; an expired fetch degrades to empty content.
    pub fetch_timeout: Duration,
}

impl Default for CorroboratorConfig {
    fn default() -> Self {
        Self {
            results_per_query: RESULTS_PER_QUERY,
            min_containment: MIN_CONTAINMENT,
            dominant_containment: DOMINANT_CONTAINMENT,
            max_sources: MAX_WEB_SOURCES,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

/// Searches the web for the document's most distinctive sentences and
/// ranks candidate pages by containment similarity.
pub struct WebCorroborator {
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    config: CorroboratorConfig,
}

impl std::fmt::Debug for WebCorroborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebCorroborator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WebCorroborator {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        config: CorroboratorConfig,
    ) -> Self {
        Self {
            search,
            fetcher,
            config,
        }
    }

    pub fn config(&self) -> &CorroboratorConfig {
        &self.config
    }

    /// Finds corroborating web sources for `text`.
    ///
    /// Page fetches run in parallel, one task per deduplicated URL; the
    /// fan-out is naturally bounded by the discovered URL count (at most
    /// two queries of `results_per_query` each). A failed or timed-out
    /// fetch falls back to scoring against the search snippet.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn corroborate(&self, text: &str) -> Result<Vec<WebSource>, WebSearchError> {
        if text.trim().chars().count() < MIN_CLASSIFIABLE_CHARS {
            return Ok(Vec::new());
        }

        let queries = generate_queries(text);
        debug!(queries = queries.len(), "Generated search queries");

        let mut seen_urls = HashSet::new();
        let mut candidates: Vec<SearchHit> = Vec::new();

        for query in &queries {
            let hits = match self.search.search(query, self.config.results_per_query).await {
                Ok(hits) => hits,
                Err(e) => {
                    // One failed query must not sink the others.
                    warn!(query = query.as_str(), error = %e, "Search query failed");
                    continue;
                }
            };

            for hit in hits {
                if seen_urls.insert(hit.url.clone()) {
                    candidates.push(hit);
                }
            }
        }

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        debug!(urls = candidates.len(), "Fetching candidate pages");

        let fetches = candidates.iter().map(|hit| self.fetch_or_empty(&hit.url));
        let pages = join_all(fetches).await;

        let mut sources: Vec<WebSource> = candidates
            .iter()
            .zip(pages)
            .filter_map(|(hit, page)| self.score_candidate(text, hit, &page))
            .collect();

        sources.sort_by(|a, b| {
            b.similarity_percent
                .partial_cmp(&a.similarity_percent)
                .unwrap_or(Ordering::Equal)
        });

        let keep = match sources.first() {
            Some(top) if top.similarity_percent > self.config.dominant_containment * 100.0 => 1,
            _ => self.config.max_sources,
        };
        sources.truncate(keep);

        Ok(sources)
    }

    /// Fetches one page, degrading every failure mode to empty content.
    async fn fetch_or_empty(&self, url: &str) -> String {
        match timeout(self.config.fetch_timeout, self.fetcher.fetch(url)).await {
            Ok(Ok(content)) => content,
            Ok(Err(e)) => {
                warn!(url, error = %e, "Page fetch failed");
                String::new()
            }
            Err(_) => {
                warn!(url, timeout = ?self.config.fetch_timeout, "Page fetch timed out");
                String::new()
            }
        }
    }

    fn score_candidate(&self, original: &str, hit: &SearchHit, page: &str) -> Option<WebSource> {
        // Snippet stands in for pages that yielded no text.
        let page_text = if page.trim().is_empty() {
            hit.snippet.as_str()
        } else {
            page
        };

        let similarity = containment(original, page_text);
        debug!(url = hit.url.as_str(), similarity, "Scored candidate page");

        if similarity <= self.config.min_containment {
            return None;
        }

        let mut snippet: String = hit.snippet.chars().take(SNIPPET_MAX_CHARS).collect();
        snippet.push_str("...");

        Some(WebSource {
            url: hit.url.clone(),
            title: hit.title.clone(),
            similarity_percent: (similarity * 10_000.0).round() / 100.0,
            snippet,
        })
    }
}
