//! Host library store contract.
//!
//! The pipeline consumes a host-owned games database through this trait:
//! read entries for duplicate checks, find-or-create taxonomy entities,
//! persist entries, and register image files. Hosts adapt their storage
//! behind it; [`crate::library::InMemoryLibrary`] is the in-process
//! implementation used in tests.

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::Path;
use uuid::Uuid;

/// A minimal projection of an existing library entry, sufficient for
/// duplicate detection.
#[derive(Debug, Clone)]
pub struct LibraryEntry {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Name of the source the entry was imported from, if any.
    pub source_name: Option<String>,
    /// External catalog identifier recorded at import, if any.
    pub catalog_id: Option<String>,
}

/// A named external link attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// Which image slot on an entry a stored file fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Cover,
    Background,
}

impl ImageSlot {
    /// Returns the slot name used in filenames and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Background => "background",
        }
    }
}

/// Everything needed to create one library entry.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub name: String,
    pub catalog_id: Option<String>,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub source_id: Option<Uuid>,
    pub platform_ids: Vec<Uuid>,
    pub developer_ids: Vec<Uuid>,
    pub publisher_ids: Vec<Uuid>,
    pub genre_ids: Vec<Uuid>,
    pub tag_ids: Vec<Uuid>,
    pub links: Vec<Link>,
}

/// Host library store contract.
///
/// `ensure_*` methods are find-or-create by name and must be idempotent:
/// calling one twice with the same name returns the same identifier.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Snapshot of existing entries, used for duplicate detection.
    async fn entries(&self) -> Result<Vec<LibraryEntry>, StoreError>;

    /// Find or create a source by name.
    async fn ensure_source(&self, name: &str) -> Result<Uuid, StoreError>;

    /// Find or create a platform by name.
    async fn ensure_platform(&self, name: &str) -> Result<Uuid, StoreError>;

    /// Find or create a company (developer or publisher) by name.
    async fn ensure_company(&self, name: &str) -> Result<Uuid, StoreError>;

    /// Find or create a genre by name.
    async fn ensure_genre(&self, name: &str) -> Result<Uuid, StoreError>;

    /// Find or create a tag by name.
    async fn ensure_tag(&self, name: &str) -> Result<Uuid, StoreError>;

    /// Persist a new entry, returning its store-assigned identifier.
    async fn insert_entry(&self, entry: NewEntry) -> Result<Uuid, StoreError>;

    /// Register a local file with the store, owned by `entry_id`. Returns
    /// the store's file identifier.
    async fn add_file(&self, entry_id: Uuid, path: &Path) -> Result<String, StoreError>;

    /// Point an entry's image slot at a previously added file.
    async fn set_entry_image(
        &self,
        entry_id: Uuid,
        slot: ImageSlot,
        file_id: &str,
    ) -> Result<(), StoreError>;
}
