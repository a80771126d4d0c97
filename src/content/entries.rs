//! One-level directory listing with explicit failure markers.

use crate::types::is_hidden;
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Why a directory listing could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PermissionDenied,
    Unreadable,
}

/// A directory that could not be listed during classification or scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}: {}", self.kind, self.path.display(), self.message)
    }
}

/// A value produced by a traversal together with the listings it had to skip.
#[derive(Debug, Clone)]
pub struct Scanned<T> {
    pub value: T,
    pub failures: Vec<ScanFailure>,
}

impl<T> Scanned<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            failures: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scanned<U> {
        Scanned {
            value: f(self.value),
            failures: self.failures,
        }
    }
}

/// Immediate, non-hidden children of a directory split by kind.
///
/// Both lists hold entry names, not full paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    pub directories: Vec<String>,
    pub files: Vec<String>,
}

impl DirListing {
    pub fn has_lesson_files(&self) -> bool {
        self.files.iter().any(|name| crate::types::is_lesson_file(name))
    }
}

/// List the immediate children of `path`, skipping hidden entries.
///
/// Symlinks are followed when deciding file vs directory. Names that are not
/// valid UTF-8 are skipped with a debug log.
pub fn list_children(path: &Path) -> Result<DirListing, ScanFailure> {
    let mut listing = DirListing::default();
    let walker = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                // A failure on the root itself means nothing can be listed.
                if err.depth() == 0 || err.path() == Some(path) {
                    return Err(to_failure(path, err.io_error().map(|e| e.kind()), &err));
                }
                tracing::debug!("Skipping unreadable entry under {}: {}", path.display(), err);
                continue;
            }
        };

        let name = match entry.file_name().to_str() {
            Some(n) => n.to_string(),
            None => {
                tracing::debug!("Skipping non UTF8 entry: {:?}", entry.path());
                continue;
            }
        };
        if is_hidden(&name) {
            continue;
        }

        if entry.file_type().is_dir() {
            listing.directories.push(name);
        } else {
            listing.files.push(name);
        }
    }

    Ok(listing)
}

fn to_failure(path: &Path, kind: Option<io::ErrorKind>, err: &dyn fmt::Display) -> ScanFailure {
    let kind = match kind {
        Some(io::ErrorKind::PermissionDenied) => FailureKind::PermissionDenied,
        _ => FailureKind::Unreadable,
    };
    ScanFailure {
        path: path.to_path_buf(),
        kind,
        message: err.to_string(),
    }
}
