//! Duplicate-gated import of enriched titles.

use crate::library::matcher::LibraryMatcher;
use crate::library::merger::LibraryMerger;
use crate::types::EnrichedTitle;
use tracing::{debug, warn};
use uuid::Uuid;

/// Result of one [`Importer::add`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    /// A new library entry was created.
    Added(Uuid),
    /// The title duplicated an existing entry and was skipped.
    AlreadyPresent {
        /// The entry it duplicated, when the matcher identified one.
        entry_id: Option<Uuid>,
    },
    /// The duplicate check or the merge failed.
    Failed {
        /// Human-readable failure description.
        message: String,
    },
}

/// Imports titles through a duplicate check and a merge.
///
/// The duplicate check and the subsequent insert must not interleave
/// between concurrent imports, otherwise two imports of the same title
/// could both pass the check and both insert. One async mutex makes the
/// check-then-merge sequence atomic per importer.
pub struct Importer {
    matcher: LibraryMatcher,
    merger: LibraryMerger,
    gate: tokio::sync::Mutex<()>,
}

impl Importer {
    /// Create an importer from a matcher and a merger over the same store.
    pub fn new(matcher: LibraryMatcher, merger: LibraryMerger) -> Self {
        Self {
            matcher,
            merger,
            gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Add `title` to the library unless it is already there.
    pub async fn add(&self, title: &EnrichedTitle) -> ImportStatus {
        let _guard = self.gate.lock().await;

        let matched = match self.matcher.find_match(title).await {
            Ok(matched) => matched,
            Err(e) => {
                warn!(external_id = %title.external_id, error = %e, "duplicate check failed");
                return ImportStatus::Failed {
                    message: e.to_string(),
                };
            }
        };
        if matched.is_duplicate {
            debug!(external_id = %title.external_id, "title already in library, skipping");
            return ImportStatus::AlreadyPresent {
                entry_id: matched.matched_entry_id,
            };
        }

        let outcome = self.merger.merge(title).await;
        match (outcome.created, outcome.entry_id) {
            (true, Some(entry_id)) => ImportStatus::Added(entry_id),
            _ => ImportStatus::Failed {
                message: outcome
                    .error
                    .unwrap_or_else(|| "entry was not created".to_owned()),
            },
        }
    }
}
