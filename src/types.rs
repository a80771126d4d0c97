//! Core types for the course library.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Classification of a filesystem node in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Directory,
    Course,
    Module,
    Lesson,
    Unknown,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Directory => "directory",
            NodeType::Course => "course",
            NodeType::Module => "module",
            NodeType::Lesson => "lesson",
            NodeType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of lesson, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Video,
    Audio,
    Text,
}

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "flac", "ogg", "m4a", "wma"];
const TEXT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "md", "rst", "html", "htm", "epub", "mobi",
];

/// Extensions accepted as a course or directory image.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"];

/// Entries whose name starts with this character are never listed.
pub const HIDDEN_MARKER: char = '.';

impl LessonType {
    /// Map an extension (without the dot, any case) to a lesson type.
    pub fn from_extension(ext: &str) -> Option<LessonType> {
        let ext = ext.to_ascii_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(LessonType::Video)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(LessonType::Audio)
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Some(LessonType::Text)
        } else {
            None
        }
    }

    /// Lesson type for a file path, `None` when the extension is not a lesson format.
    pub fn from_path(path: &Path) -> Option<LessonType> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(LessonType::from_extension)
    }

    /// Whether a playback position and duration are meaningful.
    pub fn is_media(&self) -> bool {
        matches!(self, LessonType::Video | LessonType::Audio)
    }
}

pub fn is_lesson_file(name: &str) -> bool {
    LessonType::from_path(Path::new(name)).is_some()
}

pub fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}
