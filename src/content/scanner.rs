//! Course tree scanning: modules and lessons in natural order.

use super::entries::{list_children, ScanFailure, Scanned};
use super::naming::{lesson_title, module_title, natural_cmp};
use crate::types::LessonType;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MIN_PLACEHOLDER_SECONDS: u64 = 60;
const MAX_PLACEHOLDER_SECONDS: u64 = 1800;

/// A single lesson file inside a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonNode {
    pub title: String,
    pub lesson_type: LessonType,
    pub duration_seconds: u64,
    pub completed: bool,
    /// Relative to the course root, `/`-separated (`module_dir/file` or `file`).
    pub file_path: String,
}

/// A module folder and its lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleNode {
    pub title: String,
    /// 1-based position after natural sorting.
    pub ordinal: usize,
    pub lessons: Vec<LessonNode>,
    pub total_duration_seconds: u64,
    pub directory_name: String,
}

impl ModuleNode {
    pub fn completed(&self) -> bool {
        !self.lessons.is_empty() && self.lessons.iter().all(|l| l.completed)
    }
}

/// Walks a course one level deep: course root, then each module folder.
///
/// Anything nested below a module folder is not discovered.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeScanner;

impl TreeScanner {
    pub fn new() -> Self {
        Self
    }

    /// Modules of a course, one per non-hidden subdirectory, naturally ordered.
    ///
    /// A module folder that cannot be read yields an empty lesson list and a
    /// failure marker; the rest of the scan continues.
    pub fn scan_modules(&self, course_path: &Path) -> Scanned<Vec<ModuleNode>> {
        let mut listing = match list_children(course_path) {
            Ok(listing) => listing,
            Err(failure) => {
                tracing::warn!("Cannot scan course {}: {}", course_path.display(), failure.message);
                return Scanned {
                    value: Vec::new(),
                    failures: vec![failure],
                };
            }
        };
        listing.directories.sort_by(|a, b| natural_cmp(a, b));

        let mut failures: Vec<ScanFailure> = Vec::new();
        let modules = listing
            .directories
            .into_iter()
            .enumerate()
            .map(|(idx, directory_name)| {
                let lessons = match list_children(&course_path.join(&directory_name)) {
                    Ok(module_listing) => lessons_from(module_listing.files, Some(&directory_name)),
                    Err(failure) => {
                        tracing::warn!(
                            "Cannot read module {}: {}",
                            failure.path.display(),
                            failure.message
                        );
                        failures.push(failure);
                        Vec::new()
                    }
                };
                let total_duration_seconds = lessons.iter().map(|l| l.duration_seconds).sum();
                ModuleNode {
                    title: module_title(&directory_name),
                    ordinal: idx + 1,
                    lessons,
                    total_duration_seconds,
                    directory_name,
                }
            })
            .collect();

        Scanned {
            value: modules,
            failures,
        }
    }

    /// Lesson files sitting directly in the course root.
    pub fn scan_root_lessons(&self, course_path: &Path) -> Scanned<Vec<LessonNode>> {
        match list_children(course_path) {
            Ok(listing) => Scanned::clean(lessons_from(listing.files, None)),
            Err(failure) => {
                tracing::warn!(
                    "Cannot list root lessons of {}: {}",
                    course_path.display(),
                    failure.message
                );
                Scanned {
                    value: Vec::new(),
                    failures: vec![failure],
                }
            }
        }
    }
}

fn lessons_from(mut files: Vec<String>, module_dir: Option<&str>) -> Vec<LessonNode> {
    files.sort_by(|a, b| natural_cmp(a, b));
    files
        .into_iter()
        .filter_map(|name| {
            let lesson_type = LessonType::from_path(Path::new(&name))?;
            let file_path = match module_dir {
                Some(dir) => format!("{}/{}", dir, name),
                None => name.clone(),
            };
            Some(LessonNode {
                title: lesson_title(&name),
                lesson_type,
                duration_seconds: placeholder_duration(&file_path, lesson_type),
                completed: false,
                file_path,
            })
        })
        .collect()
}

/// Stand-in for media duration probing: stable per lesson path, zero for text.
pub fn placeholder_duration(relative_path: &str, lesson_type: LessonType) -> u64 {
    if !lesson_type.is_media() {
        return 0;
    }
    let hash = blake3::hash(relative_path.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    let span = MAX_PLACEHOLDER_SECONDS - MIN_PLACEHOLDER_SECONDS + 1;
    MIN_PLACEHOLDER_SECONDS + u64::from_le_bytes(prefix) % span
}
