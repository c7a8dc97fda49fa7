//! # steam-scout
//!
//! Embeddable Steam storefront search, enrichment, and library import
//! pipeline.
//!
//! This crate searches the public storefront for titles by free text,
//! enriches each candidate with store-page details, detects duplicates
//! against a host library, and merges new titles into it — no API keys,
//! no external services, no user setup required. It compiles into the
//! host's binary as a library dependency.
//!
//! ## Design
//!
//! - Free-text search against the community endpoint, filtered to games
//! - Sequential per-title detail fetches with a fixed pacing delay
//! - Store descriptions sanitised from HTML to plain text
//! - Permissive duplicate detection by catalog id or name-under-source
//! - Merges resolve taxonomy by name and attach images best-effort
//! - Graceful degradation: a failed search yields no results, a failed
//!   detail fetch skips one candidate, a failed image leaves an entry
//!   without artwork
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners — this is a library, not a server
//! - Search queries are logged only at trace level
//! - Storefront HTML is sanitised before anything is stored

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod library;
pub mod orchestrator;
pub mod progress;
pub mod sanitise;
pub mod types;

pub use config::ScoutConfig;
pub use error::{Result, ScoutError, StoreError};
pub use library::{
    ImportStatus, Importer, InMemoryLibrary, LibraryMatcher, LibraryMerger, LibraryStore,
};
pub use orchestrator::{SearchOrchestrator, DEFAULT_MAX_RESULTS};
pub use progress::{ProgressCallback, SearchProgress};
pub use types::{CandidateKind, EnrichedTitle, MatchResult, MergeOutcome, SearchCandidate};

/// Search the storefront and enrich up to `max_results` titles.
///
/// Searches the catalog for `query`, keeps game-type candidates in
/// response order, and fetches store-page details for each. Failures
/// degrade rather than propagate: a failed search returns an empty
/// list, and candidates whose details cannot be fetched are skipped.
///
/// # Errors
///
/// Returns [`ScoutError::Config`] if `config` is invalid, or
/// [`ScoutError::Http`] if the HTTP client cannot be constructed.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> steam_scout::Result<()> {
/// let config = steam_scout::ScoutConfig::default();
/// let titles = steam_scout::search_and_enrich("half-life", 10, &config).await?;
/// for title in &titles {
///     println!("{}: {}", title.name, title.store_url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_and_enrich(
    query: &str,
    max_results: usize,
    config: &ScoutConfig,
) -> Result<Vec<EnrichedTitle>> {
    let orchestrator = SearchOrchestrator::new(config)?;
    Ok(orchestrator.search_and_enrich(query, max_results).await)
}

/// Search and enrich with sensible default configuration.
///
/// Convenience wrapper around [`search_and_enrich`] using
/// [`ScoutConfig::default()`] and [`DEFAULT_MAX_RESULTS`].
///
/// # Errors
///
/// Same as [`search_and_enrich`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> steam_scout::Result<()> {
/// let titles = steam_scout::search_and_enrich_default("half-life").await?;
/// for title in &titles {
///     println!("{}", title.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_and_enrich_default(query: &str) -> Result<Vec<EnrichedTitle>> {
    search_and_enrich(query, DEFAULT_MAX_RESULTS, &ScoutConfig::default()).await
}
