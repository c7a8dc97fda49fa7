//! Free-text title search against the storefront community endpoint.
//!
//! Submits one GET per query and parses the JSON candidate array. All
//! failures (network, HTTP status, malformed body) collapse to an empty
//! candidate list: at this layer "no results" and "search failed" are
//! deliberately indistinguishable, with logs carrying the difference.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::types::{CandidateKind, SearchCandidate};
use serde::Deserialize;

/// Client for the storefront's free-text search endpoint.
pub struct SearchClient {
    client: reqwest::Client,
    config: ScoutConfig,
}

impl SearchClient {
    /// Create a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ScoutConfig) -> Result<Self, ScoutError> {
        Ok(Self {
            client: http::build_client(config)?,
            config: config.clone(),
        })
    }

    /// Create a client reusing an existing HTTP connection pool.
    pub fn with_client(client: reqwest::Client, config: &ScoutConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    /// Search the storefront for titles matching `query`.
    ///
    /// Blank or whitespace-only queries return an empty list without any
    /// network traffic. Search failures also return an empty list; the
    /// cause is logged rather than surfaced. Callers treat "no results"
    /// and "search failed" identically, distinguishing them is a
    /// presentation concern.
    pub async fn search(&self, query: &str) -> Vec<SearchCandidate> {
        if query.trim().is_empty() {
            tracing::debug!("blank query, skipping storefront search");
            return Vec::new();
        }

        match self.try_search(query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(query, error = %e, "storefront search failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<SearchCandidate>, ScoutError> {
        let url = format!(
            "{}/actions/SearchApps/{}",
            self.config.search_base_url.trim_end_matches('/'),
            urlencoding::encode(query.trim())
        );
        tracing::trace!(%url, "storefront search");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("search request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("search HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| ScoutError::Http(format!("search response read failed: {e}")))?;

        tracing::trace!(bytes = body.len(), "search response received");

        parse_candidates(&body, self.config.max_candidates)
    }
}

/// One candidate as the search endpoint serialises it.
///
/// The endpoint has drifted over time: ids arrive as numbers or strings
/// under `id` or `appid`, and the thumbnail field has been named
/// `thumbnail`, `tiny_image`, and `logo` in different revisions.
#[derive(Debug, Deserialize)]
struct RawCandidate {
    #[serde(alias = "appid")]
    id: Option<RawId>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(alias = "tiny_image", alias = "logo")]
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Search response body: a bare candidate array in the current revision,
/// previously an object wrapping the array under `items`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSearchBody {
    List(Vec<RawCandidate>),
    Wrapped { items: Vec<RawCandidate> },
}

/// Parse a search response body into filtered, capped candidates.
///
/// Keeps only playable titles, drops items missing an id or a name, and
/// truncates to `max_candidates` while preserving source order.
///
/// Extracted as a separate function for testability with mock JSON.
pub(crate) fn parse_candidates(
    body: &str,
    max_candidates: usize,
) -> Result<Vec<SearchCandidate>, ScoutError> {
    let raw: RawSearchBody = serde_json::from_str(body)
        .map_err(|e| ScoutError::Parse(format!("search response is not valid JSON: {e}")))?;
    let raw_candidates = match raw {
        RawSearchBody::List(list) => list,
        RawSearchBody::Wrapped { items } => items,
    };

    let mut candidates = Vec::new();

    for raw in raw_candidates {
        let Some(external_id) = raw.id.map(RawId::into_string) else {
            continue;
        };
        if external_id.is_empty() {
            continue;
        }
        let Some(name) = raw.name.filter(|n| !n.trim().is_empty()) else {
            continue;
        };

        let kind = raw
            .kind
            .as_deref()
            .map(CandidateKind::from_type_str)
            .unwrap_or(CandidateKind::Other);
        if !kind.is_game() {
            continue;
        }

        candidates.push(SearchCandidate {
            external_id,
            name,
            kind,
            thumbnail: raw.thumbnail,
        });

        if candidates.len() >= max_candidates {
            break;
        }
    }

    tracing::debug!(count = candidates.len(), "storefront candidates parsed");
    Ok(candidates)
}
