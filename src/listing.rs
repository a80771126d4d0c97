//! Browsable listing of a directory, using the registry as a classification cache.

use crate::content::{
    find_representative_image, format_directory_title, list_children, ContentClassifier,
    FailureKind, ScanFailure, Scanned,
};
use crate::progress::{progress_path, ProgressStore};
use crate::registry::{Registry, RegistryEntry};
use crate::types::NodeType;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Whether cached registry entries may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    #[default]
    Cached,
    /// Re-classify and re-register every entry.
    ForceRefresh,
}

/// One card in a listing: a course, module or sub-directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryItem {
    /// Folder name, used in URLs.
    pub id: String,
    pub title: String,
    pub node_type: NodeType,
    pub path: PathBuf,
    pub image_url: Option<String>,
    pub progress_percent: f64,
    /// True when the node type came from the registry instead of classification.
    pub cached: bool,
}

impl LibraryItem {
    /// Up to two uppercase initials of the title, for image-less cards.
    pub fn initials(&self) -> String {
        let words: Vec<&str> = self.title.split_whitespace().collect();
        match words.as_slice() {
            [first, second, ..] => first
                .chars()
                .take(1)
                .chain(second.chars().take(1))
                .collect::<String>()
                .to_uppercase(),
            [only] => only.chars().take(2).collect::<String>().to_uppercase(),
            [] => "CO".to_string(),
        }
    }
}

/// Web path serving `file` from the item `id` of the given kind.
pub fn media_url(node_type: NodeType, id: &str, file: &str) -> String {
    let kind = match node_type {
        NodeType::Directory => "directory",
        NodeType::Course | NodeType::Module | NodeType::Lesson | NodeType::Unknown => "course",
    };
    format!("/media/{}/{}/{}", kind, id, file)
}

pub struct DirectoryListing<'a> {
    registry: &'a Registry,
    classifier: ContentClassifier,
}

impl<'a> DirectoryListing<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            classifier: ContentClassifier::new(),
        }
    }

    /// List the non-hidden subdirectories of `root`, sorted by title ignoring case.
    ///
    /// Registry hits reuse the cached node type and refresh `last_accessed`;
    /// misses are classified and registered. Images and progress are always
    /// read fresh. Registry storage errors propagate; unreadable folders and
    /// progress files are reported as failures next to the listing.
    pub fn scan(
        &self,
        root: &Path,
        mode: ScanMode,
    ) -> Result<Scanned<Vec<LibraryItem>>, crate::error::LibraryError> {
        let mut failures: Vec<ScanFailure> = Vec::new();
        // Registry paths are absolute and canonical so one folder has one key.
        let root = match dunce::canonicalize(root) {
            Ok(canonical) => canonical,
            Err(_) if root.is_relative() => std::env::current_dir()?.join(root),
            Err(_) => root.to_path_buf(),
        };
        let root = root.as_path();
        let listing = match list_children(root) {
            Ok(listing) => listing,
            Err(failure) => {
                tracing::warn!("Cannot list {}: {}", root.display(), failure.message);
                return Ok(Scanned {
                    value: Vec::new(),
                    failures: vec![failure],
                });
            }
        };

        let mut items = Vec::with_capacity(listing.directories.len());
        for name in listing.directories {
            let path = root.join(&name);
            let title = format_directory_title(&name);

            let cached = match mode {
                ScanMode::Cached => self.registry.find(&title, &path)?,
                ScanMode::ForceRefresh => None,
            };

            let (node_type, was_cached) = match cached {
                Some(entry) => {
                    tracing::debug!("Registry hit for {}", path.display());
                    self.registry.touch(&entry.title, &path, entry.node_type)?;
                    (entry.node_type, true)
                }
                None => {
                    tracing::debug!("Classifying {}", path.display());
                    let classified = self.classifier.classify_detailed(&path);
                    failures.extend(classified.failures);
                    let entry: RegistryEntry =
                        self.registry.register(&title, &path, classified.value)?;
                    (entry.node_type, false)
                }
            };

            let image_url = find_representative_image(&path).and_then(|image| {
                image
                    .file_name()
                    .and_then(|f| f.to_str())
                    .map(|file| media_url(node_type, &name, file))
            });

            let progress_percent = match completion_percent(&path) {
                Ok(percent) => percent,
                Err(failure) => {
                    failures.push(failure);
                    0.0
                }
            };

            items.push(LibraryItem {
                progress_percent,
                id: name,
                title,
                node_type,
                path,
                image_url,
                cached: was_cached,
            });
        }

        items.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(Scanned {
            value: items,
            failures,
        })
    }
}

/// An unreadable progress file becomes a failure marker for the item.
fn completion_percent(path: &Path) -> Result<f64, ScanFailure> {
    ProgressStore::for_course(path)
        .completion_stats()
        .map(|stats| stats.percentage)
        .map_err(|e| {
            tracing::warn!("Unreadable progress for {}: {}", path.display(), e);
            ScanFailure {
                path: progress_path(path),
                kind: FailureKind::Unreadable,
                message: e.to_string(),
            }
        })
}
