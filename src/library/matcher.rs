//! Duplicate detection against the host library.

use crate::error::ScoutError;
use crate::library::store::LibraryStore;
use crate::library::SOURCE_NAME;
use crate::types::{EnrichedTitle, MatchResult};
use std::sync::Arc;
use tracing::debug;

/// Decides whether an enriched title is already in the library.
///
/// Matching is deliberately permissive: a case-insensitive catalog-id hit
/// alone, or a case-insensitive name hit under the catalog's source, is
/// enough to declare a duplicate. Over-matching beats showing the user
/// duplicate entries.
pub struct LibraryMatcher {
    store: Arc<dyn LibraryStore>,
}

impl LibraryMatcher {
    /// Create a matcher over the given store.
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// Find the first library entry that duplicates `title`.
    ///
    /// Catalog ids are compared against both the bare id and the
    /// `steam_<id>` form older imports stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the library entries cannot be listed.
    pub async fn find_match(&self, title: &EnrichedTitle) -> Result<MatchResult, ScoutError> {
        let entries = self.store.entries().await?;
        let legacy_id = format!("steam_{}", title.external_id);

        for entry in entries {
            let id_matches = entry.catalog_id.as_deref().is_some_and(|cid| {
                cid.eq_ignore_ascii_case(&title.external_id) || cid.eq_ignore_ascii_case(&legacy_id)
            });
            let name_matches = entry.name.eq_ignore_ascii_case(&title.name)
                && entry.source_name.as_deref() == Some(SOURCE_NAME);

            if id_matches || name_matches {
                debug!(
                    external_id = %title.external_id,
                    entry_id = %entry.id,
                    "title already in library"
                );
                return Ok(MatchResult::duplicate_of(entry.id));
            }
        }
        Ok(MatchResult::no_match())
    }

    /// Whether `title` duplicates an existing entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the library entries cannot be listed.
    pub async fn is_duplicate(&self, title: &EnrichedTitle) -> Result<bool, ScoutError> {
        Ok(self.find_match(title).await?.is_duplicate)
    }
}
