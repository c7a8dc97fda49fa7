//! End-to-end search pipeline: query, filter, and per-title enrichment.

use crate::catalog::{DetailsClient, SearchClient};
use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::progress::{ProgressCallback, SearchProgress};
use crate::types::EnrichedTitle;
use std::time::Duration;
use tracing::debug;

/// Default cap on enriched results per search.
pub const DEFAULT_MAX_RESULTS: usize = 30;

/// Runs the search-then-enrich pipeline against the storefront.
///
/// Detail fetches are sequential with a fixed delay between them so a
/// burst of results does not trip the storefront's rate limiting. An
/// optional progress callback receives one event per pipeline stage.
pub struct SearchOrchestrator {
    search_client: SearchClient,
    details_client: DetailsClient,
    delay: Duration,
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl SearchOrchestrator {
    /// Create an orchestrator, validating `config` and building one HTTP
    /// client shared by both storefront endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &ScoutConfig) -> Result<Self, ScoutError> {
        config.validate()?;
        let client = http::build_client(config)?;
        Ok(Self::with_client(client, config))
    }

    /// Create an orchestrator around an existing HTTP client.
    pub fn with_client(client: reqwest::Client, config: &ScoutConfig) -> Self {
        Self {
            search_client: SearchClient::with_client(client.clone(), config),
            details_client: DetailsClient::with_client(client, config),
            delay: Duration::from_millis(config.request_delay_ms),
            progress: None,
        }
    }

    /// Attach a progress callback receiving one event per stage.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    fn emit(&self, event: SearchProgress) {
        if let Some(callback) = &self.progress {
            callback(event);
        }
    }

    /// Search the catalog and enrich up to `max_results` candidates.
    ///
    /// Network and parse failures never surface as errors here: a failed
    /// search yields an empty list, and candidates whose details cannot
    /// be fetched are skipped. Result order follows the search response.
    pub async fn search_and_enrich(&self, query: &str, max_results: usize) -> Vec<EnrichedTitle> {
        self.emit(SearchProgress::Started {
            query: query.to_owned(),
        });

        let candidates = self.search_client.search(query).await;
        if candidates.is_empty() {
            self.emit(SearchProgress::NoResults {
                query: query.to_owned(),
            });
            return Vec::new();
        }

        let total = candidates.len().min(max_results);
        let mut titles = Vec::with_capacity(total);
        for (index, candidate) in candidates.into_iter().take(max_results).enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.emit(SearchProgress::Fetching {
                position: index + 1,
                total,
                name: candidate.name.clone(),
            });
            match self.details_client.fetch(&candidate.external_id).await {
                Some(title) => titles.push(title),
                None => debug!(
                    external_id = %candidate.external_id,
                    name = %candidate.name,
                    "skipping candidate without details"
                ),
            }
        }

        if titles.is_empty() {
            self.emit(SearchProgress::NoResults {
                query: query.to_owned(),
            });
        } else {
            self.emit(SearchProgress::Completed {
                found: titles.len(),
            });
        }
        titles
    }
}
