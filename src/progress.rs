//! Progress event types for the search pipeline.
//!
//! Provides callback-based progress reporting that decouples the search and
//! enrichment loop from UI presentation (status bars, dialog labels).

use std::fmt;

/// Progress events emitted while searching the storefront and fetching
/// per-title details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchProgress {
    /// The storefront search has started.
    Started {
        /// The free-text query being searched.
        query: String,
    },

    /// Details are being fetched for one candidate.
    Fetching {
        /// 1-based position of this candidate in the fetch sequence.
        position: usize,
        /// Total number of candidates being fetched.
        total: usize,
        /// Display name of the candidate.
        name: String,
    },

    /// The pipeline finished with at least one enriched title.
    Completed {
        /// Number of titles enriched.
        found: usize,
    },

    /// The pipeline finished with nothing to show.
    NoResults {
        /// The query that produced no results.
        query: String,
    },
}

impl fmt::Display for SearchProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { query } => write!(f, "Searching for '{query}'..."),
            Self::Fetching {
                position,
                total,
                name,
            } => {
                write!(f, "Fetching details {position}/{total}: {name}")
            }
            Self::Completed { found } => write!(f, "Found {found} game(s)"),
            Self::NoResults { query } => write!(f, "No results found for '{query}'"),
        }
    }
}

/// Callback type for receiving progress events.
///
/// Hosts install one on the orchestrator to drive status bars or dialog
/// labels while the pipeline runs.
pub type ProgressCallback = Box<dyn Fn(SearchProgress) + Send + Sync>;
