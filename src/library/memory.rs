//! In-memory [`LibraryStore`] for tests and hosts without persistence.

use crate::error::StoreError;
use crate::library::store::{ImageSlot, LibraryEntry, LibraryStore, Link, NewEntry};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// One stored entry together with its image slots.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// The entry as it was inserted.
    pub entry: NewEntry,
    /// File id filling the cover slot, once set.
    pub cover_file: Option<String>,
    /// File id filling the background slot, once set.
    pub background_file: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    entries: Vec<EntryRecord>,
    sources: HashMap<String, Uuid>,
    platforms: HashMap<String, Uuid>,
    companies: HashMap<String, Uuid>,
    genres: HashMap<String, Uuid>,
    tags: HashMap<String, Uuid>,
    files: HashMap<String, Vec<u8>>,
    fail_inserts: bool,
    fail_taxonomy: bool,
}

/// Thread-safe in-memory [`LibraryStore`].
///
/// Backs the crate's tests; also usable by hosts that want the pipeline
/// without persistent storage. The `fail_*` switches simulate a store
/// that rejects specific write classes.
#[derive(Debug, Default)]
pub struct InMemoryLibrary {
    state: Mutex<State>,
}

impl InMemoryLibrary {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent [`LibraryStore::insert_entry`] calls fail.
    pub fn fail_inserts(&self, fail: bool) {
        self.lock().fail_inserts = fail;
    }

    /// Make subsequent `ensure_*` calls fail.
    pub fn fail_taxonomy(&self, fail: bool) {
        self.lock().fail_taxonomy = fail;
    }

    /// Number of stored entries.
    pub fn entry_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Snapshot of one stored entry.
    pub fn entry_record(&self, entry_id: Uuid) -> Option<EntryRecord> {
        self.lock()
            .entries
            .iter()
            .find(|record| record.id == entry_id)
            .cloned()
    }

    /// Raw bytes of a stored file.
    pub fn file_bytes(&self, file_id: &str) -> Option<Vec<u8>> {
        self.lock().files.get(file_id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn ensure(map: &mut HashMap<String, Uuid>, name: &str) -> Uuid {
    *map.entry(name.to_owned()).or_insert_with(Uuid::new_v4)
}

fn source_name_of(state: &State, source_id: Option<Uuid>) -> Option<String> {
    let source_id = source_id?;
    state
        .sources
        .iter()
        .find(|(_, id)| **id == source_id)
        .map(|(name, _)| name.clone())
}

#[async_trait]
impl LibraryStore for InMemoryLibrary {
    async fn entries(&self) -> Result<Vec<LibraryEntry>, StoreError> {
        let state = self.lock();
        Ok(state
            .entries
            .iter()
            .map(|record| LibraryEntry {
                id: record.id,
                name: record.entry.name.clone(),
                source_name: source_name_of(&state, record.entry.source_id),
                catalog_id: record.entry.catalog_id.clone(),
            })
            .collect())
    }

    async fn ensure_source(&self, name: &str) -> Result<Uuid, StoreError> {
        let mut state = self.lock();
        if state.fail_taxonomy {
            return Err(StoreError::new("source writes disabled by test"));
        }
        Ok(ensure(&mut state.sources, name))
    }

    async fn ensure_platform(&self, name: &str) -> Result<Uuid, StoreError> {
        let mut state = self.lock();
        if state.fail_taxonomy {
            return Err(StoreError::new("platform writes disabled by test"));
        }
        Ok(ensure(&mut state.platforms, name))
    }

    async fn ensure_company(&self, name: &str) -> Result<Uuid, StoreError> {
        let mut state = self.lock();
        if state.fail_taxonomy {
            return Err(StoreError::new("company writes disabled by test"));
        }
        Ok(ensure(&mut state.companies, name))
    }

    async fn ensure_genre(&self, name: &str) -> Result<Uuid, StoreError> {
        let mut state = self.lock();
        if state.fail_taxonomy {
            return Err(StoreError::new("genre writes disabled by test"));
        }
        Ok(ensure(&mut state.genres, name))
    }

    async fn ensure_tag(&self, name: &str) -> Result<Uuid, StoreError> {
        let mut state = self.lock();
        if state.fail_taxonomy {
            return Err(StoreError::new("tag writes disabled by test"));
        }
        Ok(ensure(&mut state.tags, name))
    }

    async fn insert_entry(&self, entry: NewEntry) -> Result<Uuid, StoreError> {
        let mut state = self.lock();
        if state.fail_inserts {
            return Err(StoreError::new("insert_entry disabled by test"));
        }
        let id = Uuid::new_v4();
        state.entries.push(EntryRecord {
            id,
            entry,
            cover_file: None,
            background_file: None,
        });
        Ok(id)
    }

    async fn add_file(&self, entry_id: Uuid, path: &Path) -> Result<String, StoreError> {
        // Read before locking: the guard must not be held across an await.
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| StoreError::new(format!("cannot read {}: {e}", path.display())))?;

        let mut state = self.lock();
        if !state.entries.iter().any(|record| record.id == entry_id) {
            return Err(StoreError::new(format!("no entry {entry_id}")));
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_owned());
        let file_id = format!("{entry_id}/{file_name}");
        state.files.insert(file_id.clone(), bytes);
        Ok(file_id)
    }

    async fn set_entry_image(
        &self,
        entry_id: Uuid,
        slot: ImageSlot,
        file_id: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        if !state.files.contains_key(file_id) {
            return Err(StoreError::new(format!("no file {file_id}")));
        }
        let Some(record) = state.entries.iter_mut().find(|record| record.id == entry_id) else {
            return Err(StoreError::new(format!("no entry {entry_id}")));
        };
        match slot {
            ImageSlot::Cover => record.cover_file = Some(file_id.to_owned()),
            ImageSlot::Background => record.background_file = Some(file_id.to_owned()),
        }
        Ok(())
    }
}
