//! Merging enriched titles into the host library.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::library::store::{ImageSlot, LibraryStore, Link, NewEntry};
use crate::library::{PLATFORM_NAME, SOURCE_NAME, STORE_LINK_NAME};
use crate::types::{EnrichedTitle, MergeOutcome};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};
use uuid::Uuid;

/// Writes enriched titles into a [`LibraryStore`].
///
/// Taxonomy resolution (source, platform, companies, genres, tags) is
/// find-or-create and never fails a merge; entry persistence is the only
/// fatal step; image attachment afterwards is best-effort.
pub struct LibraryMerger {
    store: Arc<dyn LibraryStore>,
    client: reqwest::Client,
}

impl LibraryMerger {
    /// Create a merger with an HTTP client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(store: Arc<dyn LibraryStore>, config: &ScoutConfig) -> Result<Self, ScoutError> {
        let client = http::build_client(config)?;
        Ok(Self::with_client(store, client))
    }

    /// Create a merger that downloads images with an existing client.
    pub fn with_client(store: Arc<dyn LibraryStore>, client: reqwest::Client) -> Self {
        Self { store, client }
    }

    /// Merge `title` into the library as a new entry.
    ///
    /// Never returns an error; failures are reported in the outcome so a
    /// batch import can keep going.
    pub async fn merge(&self, title: &EnrichedTitle) -> MergeOutcome {
        match self.try_merge(title).await {
            Ok(entry_id) => {
                debug!(external_id = %title.external_id, %entry_id, "library entry created");
                MergeOutcome::success(entry_id)
            }
            Err(e) => {
                error!(external_id = %title.external_id, error = %e, "merge failed");
                MergeOutcome::failure(e.to_string())
            }
        }
    }

    async fn try_merge(&self, title: &EnrichedTitle) -> Result<Uuid, ScoutError> {
        let entry = self.build_entry(title).await;
        let entry_id = self.store.insert_entry(entry).await?;

        if let Some(url) = title.header_image.as_deref() {
            self.attach_image(entry_id, ImageSlot::Cover, url).await;
        }
        if let Some(url) = title.background_image.as_deref() {
            self.attach_image(entry_id, ImageSlot::Background, url).await;
        }
        Ok(entry_id)
    }

    async fn build_entry(&self, title: &EnrichedTitle) -> NewEntry {
        let source_id = match self.store.ensure_source(SOURCE_NAME).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %e, "source resolution failed, entry keeps no source");
                None
            }
        };
        let platform_ids = match self.store.ensure_platform(PLATFORM_NAME).await {
            Ok(id) => vec![id],
            Err(e) => {
                warn!(error = %e, "platform resolution failed, entry keeps no platform");
                Vec::new()
            }
        };
        let developer_ids = self.resolve_companies(&title.developers).await;
        let publisher_ids = self.resolve_companies(&title.publishers).await;
        let genre_ids = self.resolve_genres(&title.genres).await;
        let tag_ids = self.resolve_tags(&title.categories).await;

        NewEntry {
            name: title.name.clone(),
            catalog_id: Some(title.external_id.clone()),
            description: title.description.clone(),
            release_date: title.release_date,
            source_id,
            platform_ids,
            developer_ids,
            publisher_ids,
            genre_ids,
            tag_ids,
            links: vec![Link {
                name: STORE_LINK_NAME.to_owned(),
                url: title.store_url.clone(),
            }],
        }
    }

    async fn resolve_companies(&self, names: &[String]) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            match self.store.ensure_company(name).await {
                Ok(id) => ids.push(id),
                Err(e) => warn!(%name, error = %e, "company resolution failed"),
            }
        }
        ids
    }

    async fn resolve_genres(&self, names: &[String]) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            match self.store.ensure_genre(name).await {
                Ok(id) => ids.push(id),
                Err(e) => warn!(%name, error = %e, "genre resolution failed"),
            }
        }
        ids
    }

    async fn resolve_tags(&self, names: &[String]) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            match self.store.ensure_tag(name).await {
                Ok(id) => ids.push(id),
                Err(e) => warn!(%name, error = %e, "tag resolution failed"),
            }
        }
        ids
    }

    async fn attach_image(&self, entry_id: Uuid, slot: ImageSlot, url: &str) {
        if let Err(e) = self.try_attach_image(entry_id, slot, url).await {
            warn!(%entry_id, slot = slot.name(), url, error = %e, "image attachment failed");
        }
    }

    async fn try_attach_image(
        &self,
        entry_id: Uuid,
        slot: ImageSlot,
        url: &str,
    ) -> Result<(), ScoutError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("image request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("image HTTP error: {e}")))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScoutError::Http(format!("image read failed: {e}")))?;

        let path = temp_image_path(entry_id, slot, url);
        tokio::fs::write(&path, &bytes).await?;

        let result = async {
            let file_id = self.store.add_file(entry_id, &path).await?;
            self.store.set_entry_image(entry_id, slot, &file_id).await
        }
        .await;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            trace!(path = %path.display(), error = %e, "temp image cleanup failed");
        }
        result.map_err(ScoutError::from)
    }
}

/// Scratch path for a downloaded image before the store takes ownership.
fn temp_image_path(entry_id: Uuid, slot: ImageSlot, url: &str) -> PathBuf {
    let ext = url
        .rsplit('.')
        .next()
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 4 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or("img");
    std::env::temp_dir().join(format!("steam-scout-{entry_id}-{}.{ext}", slot.name()))
}
