//! Persisted registry layout.

use crate::types::NodeType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const REGISTRY_VERSION: &str = "1.0";

/// Registry partition. Directories are kept apart from course content so a
/// directory and a course sharing a folder name never collide on lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrySection {
    Directories,
    Courses,
}

impl RegistrySection {
    pub fn for_node_type(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Directory => RegistrySection::Directories,
            NodeType::Course | NodeType::Module | NodeType::Lesson => RegistrySection::Courses,
            NodeType::Unknown => RegistrySection::Courses,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            RegistrySection::Directories => RegistrySection::Courses,
            RegistrySection::Courses => RegistrySection::Directories,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrySection::Directories => "directories",
            RegistrySection::Courses => "courses",
        }
    }
}

/// One discovered item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub title: String,
    pub path: String,
    pub node_type: NodeType,
    pub registered_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
}

impl RegistryEntry {
    /// External id: the final segment of the registered path.
    pub fn id(&self) -> &str {
        basename(&self.path)
    }

    pub fn key(&self) -> String {
        registry_key(&self.title, &self.path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryMetadata {
    pub version: String,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}

impl Default for RegistryMetadata {
    fn default() -> Self {
        Self {
            version: REGISTRY_VERSION.to_string(),
            last_updated: None,
            description: "Registry of discovered directories and courses with their node types"
                .to_string(),
        }
    }
}

/// The whole registry file: `{ directories, courses, metadata }`.
///
/// Entries are keyed `title|path`; maps are ordered by key so "first match"
/// lookups are deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub directories: BTreeMap<String, RegistryEntry>,
    #[serde(default)]
    pub courses: BTreeMap<String, RegistryEntry>,
    #[serde(default)]
    pub metadata: RegistryMetadata,
}

impl RegistryDocument {
    pub fn section(&self, section: RegistrySection) -> &BTreeMap<String, RegistryEntry> {
        match section {
            RegistrySection::Directories => &self.directories,
            RegistrySection::Courses => &self.courses,
        }
    }

    pub fn section_mut(&mut self, section: RegistrySection) -> &mut BTreeMap<String, RegistryEntry> {
        match section {
            RegistrySection::Directories => &mut self.directories,
            RegistrySection::Courses => &mut self.courses,
        }
    }

    pub fn all_entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.directories.values().chain(self.courses.values())
    }

    pub fn len(&self) -> usize {
        self.directories.len() + self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First entry, in either section, registered at exactly `path`.
    pub fn entry_at(&self, path: &str) -> Option<&RegistryEntry> {
        self.all_entries().find(|entry| entry.path == path)
    }
}

pub fn registry_key(title: &str, path: &str) -> String {
    format!("{}|{}", title, path)
}

pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

pub fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}
