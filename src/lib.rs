//! LearnSphere: local course-library browser
//!
//! Turns a folder tree on disk into a browsable library. Folders are
//! classified as plain directories or courses, courses are expanded into
//! ordered modules and lessons, and every classification is cached in a
//! JSON registry. Per-course progress and metadata live in hidden files
//! inside each course folder.

pub mod config;
pub mod content;
pub mod error;
pub mod library;
pub mod listing;
pub mod logging;
pub mod metadata;
pub mod path_guard;
pub mod progress;
pub mod registry;
pub mod storage;
pub mod tooling;
pub mod types;

pub use error::LibraryError;
pub use library::Library;
pub use listing::{LibraryItem, ScanMode};
pub use registry::Registry;
pub use types::{LessonType, NodeType};
