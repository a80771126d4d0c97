//! Per-course lesson progress.
//!
//! Each course directory carries a hidden progress file keyed by lesson path
//! relative to the course root (`module_dir/file` or just `file`).

use crate::error::LibraryError;
use crate::storage::{load_json, save_json, DocumentStore, FileDocumentStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const PROGRESS_FILENAME: &str = ".learn_sphere_progress.json";

/// Stored state of one lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonState {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub last_position_seconds: f64,
    #[serde(default)]
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl Default for LessonState {
    fn default() -> Self {
        Self {
            completed: false,
            last_position_seconds: 0.0,
            last_accessed_at: None,
        }
    }
}

/// Progress of one lesson, as handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub lesson_path: String,
    pub completed: bool,
    pub last_position_seconds: f64,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl LessonProgress {
    fn from_state(lesson_path: &str, state: &LessonState) -> Self {
        Self {
            lesson_path: lesson_path.to_string(),
            completed: state.completed,
            last_position_seconds: state.last_position_seconds,
            last_accessed_at: state.last_accessed_at,
        }
    }
}

/// The whole progress file of a course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub lessons: BTreeMap<String, LessonState>,
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    pub fn is_completed(&self, lesson_path: &str) -> bool {
        self.lessons
            .get(lesson_path)
            .map(|state| state.completed)
            .unwrap_or(false)
    }

    pub fn stats(&self) -> CompletionStats {
        let total = self.lessons.len();
        let completed = self.lessons.values().filter(|s| s.completed).count();
        CompletionStats::new(total, completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    /// Completed share in percent, rounded to two decimals; 0 with no lessons.
    pub percentage: f64,
}

impl CompletionStats {
    pub fn new(total: usize, completed: usize) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            round2(completed as f64 / total as f64 * 100.0)
        };
        Self {
            total,
            completed,
            percentage,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct ProgressStore {
    store: Arc<dyn DocumentStore>,
}

impl ProgressStore {
    /// Progress file inside `course_directory`.
    pub fn for_course(course_directory: &Path) -> Self {
        Self::with_store(Arc::new(FileDocumentStore::new(progress_path(
            course_directory,
        ))))
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Current record. An absent or corrupt file reads as empty and is not
    /// written until the first update.
    pub fn get(&self) -> Result<ProgressRecord, LibraryError> {
        Ok(load_json(self.store.as_ref())?.unwrap_or_default())
    }

    pub fn get_lesson(&self, lesson_path: &str) -> Result<Option<LessonProgress>, LibraryError> {
        let record = self.get()?;
        Ok(record
            .lessons
            .get(lesson_path)
            .map(|state| LessonProgress::from_state(lesson_path, state)))
    }

    /// Merge the given fields into the lesson entry, creating it when needed,
    /// stamp the access time and persist the whole record.
    pub fn upsert_lesson(
        &self,
        lesson_path: &str,
        completed: Option<bool>,
        position_seconds: Option<f64>,
    ) -> Result<LessonProgress, LibraryError> {
        if let Some(position) = position_seconds {
            if !position.is_finite() || position < 0.0 {
                return Err(LibraryError::InvalidInput(format!(
                    "invalid playback position {} for {}",
                    position, lesson_path
                )));
            }
        }

        let mut record = self.get()?;
        let now = Utc::now();
        let state = record.lessons.entry(lesson_path.to_string()).or_default();
        if let Some(completed) = completed {
            state.completed = completed;
        }
        if let Some(position) = position_seconds {
            state.last_position_seconds = position;
        }
        state.last_accessed_at = Some(now);
        let progress = LessonProgress::from_state(lesson_path, state);

        record.last_updated_at = Some(now);
        save_json(self.store.as_ref(), &record)?;
        tracing::debug!(
            lesson = lesson_path,
            completed = progress.completed,
            position = progress.last_position_seconds,
            "Lesson progress saved"
        );
        Ok(progress)
    }

    pub fn mark_completed(&self, lesson_path: &str) -> Result<LessonProgress, LibraryError> {
        self.upsert_lesson(lesson_path, Some(true), None)
    }

    pub fn mark_incomplete(&self, lesson_path: &str) -> Result<LessonProgress, LibraryError> {
        self.upsert_lesson(lesson_path, Some(false), None)
    }

    pub fn update_position(
        &self,
        lesson_path: &str,
        position_seconds: f64,
    ) -> Result<LessonProgress, LibraryError> {
        self.upsert_lesson(lesson_path, None, Some(position_seconds))
    }

    pub fn completion_stats(&self) -> Result<CompletionStats, LibraryError> {
        Ok(self.get()?.stats())
    }
}

pub fn progress_path(course_directory: &Path) -> PathBuf {
    course_directory.join(PROGRESS_FILENAME)
}
