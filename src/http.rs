//! Shared HTTP client for storefront requests.
//!
//! Provides the configured [`reqwest::Client`] used by the search, details,
//! and image download paths. One client is built per pipeline and shared.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use std::time::Duration;

/// User-Agent sent when the configuration does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("steam-scout/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for storefront API calls.
///
/// The client has:
/// - Timeout from config
/// - A crate-identifying User-Agent (or custom if configured)
/// - Gzip decompression
///
/// # Errors
///
/// Returns [`ScoutError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ScoutConfig) -> Result<reqwest::Client, ScoutError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => DEFAULT_USER_AGENT.to_owned(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ScoutError::Http(format!("failed to build HTTP client: {e}")))
}
