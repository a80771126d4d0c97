//! Course metadata kept in a hidden file inside each course directory.

use crate::error::LibraryError;
use crate::storage::{load_json, save_json, DocumentStore, FileDocumentStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const METADATA_FILENAME: &str = ".learn_sphere_metadata.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_modules: usize,
    #[serde(default)]
    pub total_lessons: usize,
    #[serde(default)]
    pub total_media_duration_seconds: u64,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CourseMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            total_modules: 0,
            total_lessons: 0,
            total_media_duration_seconds: 0,
            image_path: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct MetadataFileRef<'a> {
    metadata: &'a CourseMetadata,
}

/// Accepts both `{ "metadata": {...} }` and a bare metadata object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetadataFile {
    Wrapped { metadata: CourseMetadata },
    Bare(CourseMetadata),
}

pub struct CourseMetadataStore {
    store: Arc<dyn DocumentStore>,
}

impl CourseMetadataStore {
    pub fn for_course(course_directory: &Path) -> Self {
        Self::with_store(Arc::new(FileDocumentStore::new(metadata_path(
            course_directory,
        ))))
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn exists(&self) -> Result<bool, LibraryError> {
        Ok(self.store.load()?.is_some())
    }

    /// Stored metadata; absent or unreadable content is `None`.
    pub fn load(&self) -> Result<Option<CourseMetadata>, LibraryError> {
        Ok(load_json::<MetadataFile>(self.store.as_ref())?.map(|file| match file {
            MetadataFile::Wrapped { metadata } => metadata,
            MetadataFile::Bare(metadata) => metadata,
        }))
    }

    /// Persist `metadata`, setting `created_at` on first save and `updated_at` always.
    pub fn save(&self, metadata: &mut CourseMetadata) -> Result<(), LibraryError> {
        let now = Utc::now();
        if metadata.created_at.is_none() {
            metadata.created_at = Some(now);
        }
        metadata.updated_at = Some(now);
        save_json(self.store.as_ref(), &MetadataFileRef { metadata })
    }

    pub fn get_or_create(&self, title: &str) -> Result<CourseMetadata, LibraryError> {
        if let Some(existing) = self.load()? {
            return Ok(existing);
        }
        let mut metadata = CourseMetadata::new(title);
        self.save(&mut metadata)?;
        tracing::info!("Created metadata for course '{}'", title);
        Ok(metadata)
    }
}

pub fn metadata_path(course_directory: &Path) -> PathBuf {
    course_directory.join(METADATA_FILENAME)
}
