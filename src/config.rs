//! Pipeline configuration with production defaults.
//!
//! [`ScoutConfig`] carries the storefront endpoints, region and locale,
//! result caps, and request pacing. The defaults target the public Steam
//! endpoints; tests override the base URLs to point at a local mock server.

use crate::error::ScoutError;

/// Default community endpoint hosting the title search API.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://steamcommunity.com";

/// Default storefront endpoint hosting the details API and store pages.
pub const DEFAULT_STORE_BASE_URL: &str = "https://store.steampowered.com";

/// Configuration for the search and import pipeline.
///
/// Use [`Default::default()`] for the production endpoints, or construct
/// with field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Base URL of the community search endpoint.
    pub search_base_url: String,
    /// Base URL of the storefront details endpoint and store pages.
    pub store_base_url: String,
    /// Two-letter country code sent to the details endpoint. Affects
    /// pricing and regional availability.
    pub country_code: String,
    /// Language sent to the details endpoint.
    pub language: String,
    /// Maximum number of candidates kept from one search response.
    pub max_candidates: usize,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Fixed delay in milliseconds between consecutive detail fetches.
    /// Keeps the pipeline under the storefront's implicit rate limits.
    pub request_delay_ms: u64,
    /// Custom User-Agent string. If `None`, a crate-identifying default
    /// is used.
    pub user_agent: Option<String>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_owned(),
            store_base_url: DEFAULT_STORE_BASE_URL.to_owned(),
            country_code: "us".to_owned(),
            language: "english".to_owned(),
            max_candidates: 50,
            timeout_seconds: 10,
            request_delay_ms: 100,
            user_agent: None,
        }
    }
}

impl ScoutConfig {
    /// Replace the search base URL. Intended for pointing tests at a mock
    /// server.
    pub fn with_search_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.search_base_url = base_url.into();
        self
    }

    /// Replace the store base URL. Intended for pointing tests at a mock
    /// server.
    pub fn with_store_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.store_base_url = base_url.into();
        self
    }

    /// URL of the public store page for a title.
    pub fn store_page_url(&self, external_id: &str) -> String {
        format!(
            "{}/app/{external_id}",
            self.store_base_url.trim_end_matches('/')
        )
    }

    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - both base URLs must parse as URLs
    /// - `max_candidates` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `country_code` and `language` must not be empty
    pub fn validate(&self) -> Result<(), ScoutError> {
        url::Url::parse(&self.search_base_url)
            .map_err(|e| ScoutError::Config(format!("search_base_url is not a valid URL: {e}")))?;
        url::Url::parse(&self.store_base_url)
            .map_err(|e| ScoutError::Config(format!("store_base_url is not a valid URL: {e}")))?;
        if self.max_candidates == 0 {
            return Err(ScoutError::Config(
                "max_candidates must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ScoutError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.country_code.trim().is_empty() {
            return Err(ScoutError::Config("country_code must not be empty".into()));
        }
        if self.language.trim().is_empty() {
            return Err(ScoutError::Config("language must not be empty".into()));
        }
        Ok(())
    }
}
