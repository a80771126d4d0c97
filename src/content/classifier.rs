//! Structural classification of directories into courses, modules and plain directories.

use super::entries::{list_children, DirListing, ScanFailure, Scanned};
use crate::types::NodeType;
use std::path::Path;

/// Outcome of checking one candidate module folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModuleCheck {
    Valid,
    HasSubdirectories,
    NoLessons,
    Unreadable,
}

/// Decides the node type of a directory from its immediate children.
///
/// Rules, applied to non-hidden entries only:
/// - no subdirectories and at least one lesson file: `Module`
/// - at least one subdirectory, each with no subdirectories of its own and at
///   least one lesson file: `Course`
/// - anything else, including empty, missing or unreadable paths: `Directory`
///
/// Classification never fails. Listings that could not be read are reported
/// through [`Scanned::failures`] and treated as disqualifying.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentClassifier;

impl ContentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, path: &Path) -> NodeType {
        self.classify_detailed(path).value
    }

    pub fn classify_detailed(&self, path: &Path) -> Scanned<NodeType> {
        if !path.is_dir() {
            return Scanned::clean(NodeType::Directory);
        }

        let listing = match list_children(path) {
            Ok(listing) => listing,
            Err(failure) => {
                tracing::warn!("Cannot classify {}: {}", path.display(), failure.message);
                return Scanned {
                    value: NodeType::Directory,
                    failures: vec![failure],
                };
            }
        };

        if listing.directories.is_empty() {
            let node_type = if listing.has_lesson_files() {
                NodeType::Module
            } else {
                NodeType::Directory
            };
            return Scanned::clean(node_type);
        }

        let mut failures = Vec::new();
        for name in &listing.directories {
            let subdir = path.join(name);
            match check_module(&subdir, &mut failures) {
                ModuleCheck::Valid => {}
                other => {
                    tracing::debug!(
                        "{} is not a module ({:?}); {} is a directory",
                        subdir.display(),
                        other,
                        path.display()
                    );
                    return Scanned {
                        value: NodeType::Directory,
                        failures,
                    };
                }
            }
        }

        Scanned {
            value: NodeType::Course,
            failures,
        }
    }

    /// Whether `path` on its own satisfies the module rule.
    pub fn is_module(&self, path: &Path) -> bool {
        let mut failures = Vec::new();
        check_module(path, &mut failures) == ModuleCheck::Valid
    }
}

fn check_module(path: &Path, failures: &mut Vec<ScanFailure>) -> ModuleCheck {
    let listing: DirListing = match list_children(path) {
        Ok(listing) => listing,
        Err(failure) => {
            tracing::warn!("Cannot read candidate module {}: {}", path.display(), failure.message);
            failures.push(failure);
            return ModuleCheck::Unreadable;
        }
    };
    if !listing.directories.is_empty() {
        ModuleCheck::HasSubdirectories
    } else if !listing.has_lesson_files() {
        ModuleCheck::NoLessons
    } else {
        ModuleCheck::Valid
    }
}
