//! Registry of discovered items.
//!
//! Caches the node type of every directory the listing has classified, keyed
//! by `title|path`, so repeat visits skip classification. Also resolves short
//! ids (folder names) back to full paths and builds breadcrumb trails.
//!
//! Every operation re-reads the backing document and every mutation writes the
//! whole document back. There is no in-process cache and no file locking.

pub mod breadcrumbs;
pub mod types;

pub use breadcrumbs::{url_for, Breadcrumb};
pub use types::{RegistryDocument, RegistryEntry, RegistryMetadata, RegistrySection};

use crate::error::LibraryError;
use crate::storage::{load_json, save_json, DocumentStore, FileDocumentStore, MemoryDocumentStore};
use crate::types::NodeType;
use chrono::{DateTime, Duration, Utc};
use std::path::Path;
use std::sync::Arc;
use types::{path_key, registry_key};

pub const DEFAULT_CLEANUP_DAYS: u32 = 30;

pub struct Registry {
    store: Arc<dyn DocumentStore>,
}

impl Registry {
    /// Create a registry backed by the given store.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Registry persisted as a JSON file at `path`.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        Self::with_store(Arc::new(FileDocumentStore::new(path)))
    }

    /// Registry kept in memory, for tests and dry runs.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryDocumentStore::new()))
    }

    /// Where the registry document lives.
    pub fn location(&self) -> String {
        self.store.location()
    }

    /// Current document; missing or corrupt content yields an empty registry.
    pub fn load(&self) -> Result<RegistryDocument, LibraryError> {
        Ok(load_json(self.store.as_ref())?.unwrap_or_default())
    }

    fn save(&self, document: &mut RegistryDocument) -> Result<(), LibraryError> {
        document.metadata.last_updated = Some(Utc::now());
        save_json(self.store.as_ref(), document)
    }

    /// Entry for `title|path` in the section matching `node_type`.
    pub fn get(
        &self,
        title: &str,
        path: &Path,
        node_type: NodeType,
    ) -> Result<Option<RegistryEntry>, LibraryError> {
        let document = self.load()?;
        let key = registry_key(title, &path_key(path));
        Ok(document
            .section(RegistrySection::for_node_type(node_type))
            .get(&key)
            .cloned())
    }

    /// Whether [`Registry::get`] would find an entry.
    pub fn is_registered(
        &self,
        title: &str,
        path: &Path,
        node_type: NodeType,
    ) -> Result<bool, LibraryError> {
        Ok(self.get(title, path, node_type)?.is_some())
    }

    /// Look the key up in both sections, directories first.
    pub fn find(&self, title: &str, path: &Path) -> Result<Option<RegistryEntry>, LibraryError> {
        let document = self.load()?;
        let key = registry_key(title, &path_key(path));
        Ok(document
            .directories
            .get(&key)
            .or_else(|| document.courses.get(&key))
            .cloned())
    }

    /// Record an item with both timestamps set to now and persist immediately.
    ///
    /// Re-registering replaces the entry; a copy of the same key in the other
    /// section (left over from an earlier classification) is dropped.
    pub fn register(
        &self,
        title: &str,
        path: &Path,
        node_type: NodeType,
    ) -> Result<RegistryEntry, LibraryError> {
        let mut document = self.load()?;
        let now = Utc::now();
        let entry = RegistryEntry {
            title: title.to_string(),
            path: path_key(path),
            node_type,
            registered_at: now,
            last_accessed: now,
        };
        let key = entry.key();
        let section = RegistrySection::for_node_type(node_type);

        document.section_mut(section.other()).remove(&key);
        document.section_mut(section).insert(key, entry.clone());
        self.save(&mut document)?;

        tracing::info!("Registered {} as {}", entry.path, node_type);
        Ok(entry)
    }

    /// Refresh `last_accessed`. Returns false, without writing, for unknown items.
    pub fn touch(&self, title: &str, path: &Path, node_type: NodeType) -> Result<bool, LibraryError> {
        let mut document = self.load()?;
        let key = registry_key(title, &path_key(path));
        let section = RegistrySection::for_node_type(node_type);

        let Some(entry) = document.section_mut(section).get_mut(&key) else {
            return Ok(false);
        };
        entry.last_accessed = Utc::now();
        self.save(&mut document)?;
        Ok(true)
    }

    /// Find an entry whose path ends in `id`.
    ///
    /// Linear scan; when two entries share a folder name the first in key order wins.
    pub fn resolve_by_id(
        &self,
        id: &str,
        section: RegistrySection,
    ) -> Result<Option<RegistryEntry>, LibraryError> {
        let document = self.load()?;
        Ok(document
            .section(section)
            .values()
            .find(|entry| entry.id() == id)
            .cloned())
    }

    /// Like [`Registry::resolve_by_id`] but a miss is [`LibraryError::NotFound`].
    pub fn require_by_id(
        &self,
        id: &str,
        section: RegistrySection,
    ) -> Result<RegistryEntry, LibraryError> {
        self.resolve_by_id(id, section)?.ok_or_else(|| {
            LibraryError::NotFound(format!("no {} entry with id '{}'", section.as_str(), id))
        })
    }

    /// Entry registered at exactly `path`, under any title, in either section.
    pub fn entry_for_path(&self, path: &Path) -> Result<Option<RegistryEntry>, LibraryError> {
        let document = self.load()?;
        Ok(document.entry_at(&path_key(path)).cloned())
    }

    /// All entries of one section in key order.
    pub fn entries(&self, section: RegistrySection) -> Result<Vec<RegistryEntry>, LibraryError> {
        let document = self.load()?;
        Ok(document.section(section).values().cloned().collect())
    }

    /// Trail from `Home` to the item at `path`; see [`breadcrumbs::build`].
    pub fn build_breadcrumbs(&self, path: &Path, title: &str) -> Result<Vec<Breadcrumb>, LibraryError> {
        let document = self.load()?;
        Ok(breadcrumbs::build(&document, path, title))
    }

    /// Remove entries not accessed for more than `threshold_days` whole days.
    pub fn cleanup(&self, threshold_days: u32) -> Result<usize, LibraryError> {
        self.cleanup_as_of(threshold_days, Utc::now())
    }

    /// [`Registry::cleanup`] measured against a fixed `now`.
    pub fn cleanup_as_of(
        &self,
        threshold_days: u32,
        now: DateTime<Utc>,
    ) -> Result<usize, LibraryError> {
        let mut document = self.load()?;
        let threshold = i64::from(threshold_days);
        let mut removed = 0;

        for section in [RegistrySection::Directories, RegistrySection::Courses] {
            let entries = document.section_mut(section);
            let before = entries.len();
            entries.retain(|_, entry| age_in_days(entry, now) <= threshold);
            removed += before - entries.len();
        }

        if removed > 0 {
            self.save(&mut document)?;
            tracing::info!(
                "Removed {} registry entries idle for more than {} days",
                removed,
                threshold_days
            );
        }
        Ok(removed)
    }

    /// Replace the registry with an empty one.
    pub fn clear(&self) -> Result<(), LibraryError> {
        let mut document = RegistryDocument::default();
        self.save(&mut document)?;
        tracing::info!("Cleared registry at {}", self.store.location());
        Ok(())
    }

    /// Write an empty registry if none exists yet.
    pub fn ensure_exists(&self) -> Result<(), LibraryError> {
        if self.store.load()?.is_none() {
            self.clear()?;
        }
        Ok(())
    }
}

fn age_in_days(entry: &RegistryEntry, now: DateTime<Utc>) -> i64 {
    let age: Duration = now - entry.last_accessed;
    age.num_days()
}
