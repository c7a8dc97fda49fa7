//! Core types for storefront search candidates, enriched titles, and
//! library import outcomes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Classification of a storefront search candidate.
///
/// The storefront search endpoint returns games alongside downloadable
/// content, soundtracks, hardware, and videos. Only [`CandidateKind::Game`]
/// entries are enriched and offered for import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateKind {
    /// A playable title.
    Game,
    /// Anything else the storefront lists: DLC, soundtracks, hardware, videos.
    Other,
}

impl CandidateKind {
    /// Classify the raw `type` string from a storefront search response.
    ///
    /// `"app"` and `"game"` map to [`CandidateKind::Game`] regardless of
    /// case; every other value maps to [`CandidateKind::Other`].
    pub fn from_type_str(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("app") || raw.eq_ignore_ascii_case("game") {
            Self::Game
        } else {
            Self::Other
        }
    }

    /// Returns `true` for [`CandidateKind::Game`].
    pub fn is_game(&self) -> bool {
        matches!(self, Self::Game)
    }

    /// Returns the human-readable name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single candidate returned from a storefront search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Storefront identifier of the title. Numeric on the wire, carried as
    /// a string.
    pub external_id: String,
    /// Display name of the title.
    pub name: String,
    /// Classification of this candidate.
    pub kind: CandidateKind,
    /// Thumbnail image URL, if the storefront provided one.
    pub thumbnail: Option<String>,
}

/// A fully enriched title assembled from the storefront details endpoint.
///
/// Every field the storefront may omit or malform is optional or empty;
/// the absence of any one field never fails enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedTitle {
    /// Storefront identifier of the title.
    pub external_id: String,
    /// Display name.
    pub name: String,
    /// Public store page URL for this title.
    pub store_url: String,
    /// Short plain-text description. Empty when the storefront omits it.
    pub short_description: String,
    /// Full plain-text description, sanitised from storefront HTML. Empty
    /// when no description variant is present.
    pub description: String,
    /// Header/cover image URL.
    pub header_image: Option<String>,
    /// Background image URL.
    pub background_image: Option<String>,
    /// Screenshot URLs.
    pub screenshots: Vec<String>,
    /// Developer names.
    pub developers: Vec<String>,
    /// Publisher names.
    pub publishers: Vec<String>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Category names (single-player, achievements, ...).
    pub categories: Vec<String>,
    /// Release date. `None` for unreleased titles or unparseable dates.
    pub release_date: Option<NaiveDate>,
    /// Formatted price string, or `"Free"` for free titles. `None` when the
    /// storefront lists no price.
    pub price_display: Option<String>,
    /// Whether the storefront marks the title free to play.
    pub is_free: bool,
}

/// Result of checking one enriched title against the host library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// `true` when a library entry already covers this title.
    pub is_duplicate: bool,
    /// Identifier of the matching library entry, when one was found.
    pub matched_entry_id: Option<Uuid>,
}

impl MatchResult {
    /// A result indicating no existing entry matches.
    pub fn no_match() -> Self {
        Self {
            is_duplicate: false,
            matched_entry_id: None,
        }
    }

    /// A result naming the library entry that already covers the title.
    pub fn duplicate_of(entry_id: Uuid) -> Self {
        Self {
            is_duplicate: true,
            matched_entry_id: Some(entry_id),
        }
    }
}

/// Outcome of merging one enriched title into the host library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// `true` when a new library entry was persisted.
    pub created: bool,
    /// Identifier of the created entry.
    pub entry_id: Option<Uuid>,
    /// Description of the failure when `created` is `false`.
    pub error: Option<String>,
}

impl MergeOutcome {
    pub(crate) fn success(entry_id: Uuid) -> Self {
        Self {
            created: true,
            entry_id: Some(entry_id),
            error: None,
        }
    }

    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            created: false,
            entry_id: None,
            error: Some(message.into()),
        }
    }
}
