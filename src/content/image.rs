//! Representative image lookup for courses and directories.

use super::entries::list_children;
use super::naming::natural_cmp;
use crate::types::is_image_file;
use std::path::{Path, PathBuf};

/// File stems preferred over any other image, in priority order.
pub const PRIORITY_IMAGE_NAMES: &[&str] = &["cover", "thumbnail", "image", "logo", "icon"];

/// Find the image that best represents `directory`.
///
/// A priority-named image wins; otherwise the first image in natural order.
/// Unreadable directories simply have no image.
pub fn find_representative_image(directory: &Path) -> Option<PathBuf> {
    let mut files = match list_children(directory) {
        Ok(listing) => listing.files,
        Err(failure) => {
            tracing::debug!("No image for {}: {}", directory.display(), failure.message);
            return None;
        }
    };
    files.retain(|name| is_image_file(name));
    files.sort_by(|a, b| natural_cmp(a, b));

    let stem_of = |name: &str| {
        Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_lowercase)
    };

    PRIORITY_IMAGE_NAMES
        .iter()
        .find_map(|priority| {
            files
                .iter()
                .find(|name| stem_of(name.as_str()).as_deref() == Some(*priority))
        })
        .or_else(|| files.first())
        .map(|name| directory.join(name))
}
