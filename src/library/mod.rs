//! Host library integration: duplicate detection, merging, and import.

pub mod importer;
pub mod matcher;
pub mod memory;
pub mod merger;
pub mod store;

pub use importer::{ImportStatus, Importer};
pub use matcher::LibraryMatcher;
pub use memory::InMemoryLibrary;
pub use merger::LibraryMerger;
pub use store::{ImageSlot, LibraryEntry, LibraryStore, Link, NewEntry};

/// Source name recorded on merged entries.
pub const SOURCE_NAME: &str = "Steam";

/// Platform recorded on merged entries.
pub const PLATFORM_NAME: &str = "PC (Windows)";

/// Display name of the store-page link attached to merged entries.
pub const STORE_LINK_NAME: &str = "Steam Store";
