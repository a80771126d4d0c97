//! Breadcrumb trails derived from registered paths.

use super::types::{path_key, RegistryDocument};
use crate::types::NodeType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const HOME_TITLE: &str = "Home";
pub const HOME_URL: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub title: String,
    pub url: Option<String>,
}

impl Breadcrumb {
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
        }
    }

    pub fn text(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
        }
    }
}

/// Browse URL for a registered item.
pub fn url_for(node_type: NodeType, id: &str) -> String {
    match node_type {
        NodeType::Directory => format!("/directory/{}", id),
        NodeType::Course | NodeType::Module | NodeType::Lesson | NodeType::Unknown => {
            format!("/course/{}", id)
        }
    }
}

/// Build `Home / ancestors... / current` for `path`.
///
/// Ancestors are taken relative to the deepest directory containing every
/// registered item. An ancestor that is registered links to its page; an
/// unregistered one shows its folder name without a link. The current item
/// never links.
pub fn build(document: &RegistryDocument, path: &Path, title: &str) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb::link(HOME_TITLE, HOME_URL)];

    let Some(root) = common_ancestor(document) else {
        crumbs.push(Breadcrumb::text(title));
        return crumbs;
    };
    let Ok(relative) = path.strip_prefix(&root) else {
        crumbs.push(Breadcrumb::text(title));
        return crumbs;
    };

    let segments: Vec<_> = relative.components().collect();
    let mut current = root.clone();
    for segment in segments.iter().take(segments.len().saturating_sub(1)) {
        current.push(segment);
        let segment_name = segment.as_os_str().to_string_lossy().into_owned();
        match document.entry_at(&path_key(&current)) {
            Some(entry) => crumbs.push(Breadcrumb::link(
                entry.title.clone(),
                url_for(entry.node_type, entry.id()),
            )),
            None => crumbs.push(Breadcrumb::text(segment_name)),
        }
    }

    crumbs.push(Breadcrumb::text(title));
    crumbs
}

/// Deepest common directory of the parents of all registered paths.
fn common_ancestor(document: &RegistryDocument) -> Option<PathBuf> {
    let mut parents = document
        .all_entries()
        .filter_map(|entry| Path::new(&entry.path).parent().map(Path::to_path_buf));

    let first = parents.next()?;
    let mut common: Vec<_> = first.components().map(|c| c.as_os_str().to_owned()).collect();
    for parent in parents {
        let shared = common
            .iter()
            .zip(parent.components())
            .take_while(|(a, b)| a.as_os_str() == b.as_os_str())
            .count();
        common.truncate(shared);
    }
    if common.is_empty() {
        return None;
    }
    Some(common.iter().collect())
}
