//! Safe resolution of user-supplied relative paths under a base directory.

use crate::error::LibraryError;
use std::path::{Component, Path, PathBuf};

/// Resolve `relative` beneath `base`, rejecting anything that would land outside it.
///
/// Traversal is checked lexically before the filesystem is touched. When the
/// joined path exists it is canonicalized again so a symlink pointing outside
/// `base` is rejected as well; when it does not, its deepest existing ancestor
/// is checked instead. The returned path is rooted at the canonical base.
pub fn resolve(relative: &str, base: &Path) -> Result<PathBuf, LibraryError> {
    let cleaned = normalize_relative(relative)?;

    let canonical_base = dunce::canonicalize(base).map_err(|e| {
        LibraryError::NotFound(format!("base directory {}: {}", base.display(), e))
    })?;
    let joined = canonical_base.join(&cleaned);

    if joined.exists() {
        let canonical = dunce::canonicalize(&joined)?;
        ensure_inside(&canonical, &canonical_base, relative)?;
        return Ok(canonical);
    }

    // A dangling symlink cannot be followed, so it cannot be proven inside.
    if joined.symlink_metadata().is_ok() {
        return Err(LibraryError::InvalidPath(format!(
            "{} is a dangling symlink",
            relative
        )));
    }

    // Not there yet: the deepest existing ancestor must still be inside.
    if let Some(ancestor) = joined.ancestors().skip(1).find(|p| p.exists()) {
        let canonical = dunce::canonicalize(ancestor)?;
        ensure_inside(&canonical, &canonical_base, relative)?;
    }

    Ok(joined)
}

fn ensure_inside(canonical: &Path, canonical_base: &Path, relative: &str) -> Result<(), LibraryError> {
    if !canonical.starts_with(canonical_base) {
        return Err(LibraryError::InvalidPath(format!(
            "{} resolves outside {}",
            relative,
            canonical_base.display()
        )));
    }
    Ok(())
}

/// Collapse `.` and `..` without consulting the filesystem.
fn normalize_relative(relative: &str) -> Result<PathBuf, LibraryError> {
    let mut out = PathBuf::new();
    let mut depth = 0usize;
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(LibraryError::InvalidPath(format!(
                        "{} escapes its base directory",
                        relative
                    )));
                }
                out.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(LibraryError::InvalidPath(format!(
                    "{} is not a relative path",
                    relative
                )));
            }
        }
    }
    Ok(out)
}
