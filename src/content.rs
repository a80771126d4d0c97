//! Content discovery
//!
//! Lists course directories one level at a time, classifies them and builds
//! the ordered module/lesson tree. Listing failures never abort a scan; they
//! travel with the result as [`ScanFailure`] markers.

pub mod classifier;
pub mod entries;
pub mod image;
pub mod naming;
pub mod scanner;

pub use classifier::ContentClassifier;
pub use entries::{list_children, DirListing, FailureKind, ScanFailure, Scanned};
pub use image::find_representative_image;
pub use naming::{format_directory_title, lesson_title, natural_cmp, strip_numbering_prefix};
pub use scanner::{LessonNode, ModuleNode, TreeScanner};
