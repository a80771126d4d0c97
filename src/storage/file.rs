use crate::error::LibraryError;
use crate::storage::DocumentStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A document stored as a single file on disk.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    /// Store backed by `path`; nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File holding the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the document has been written.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl DocumentStore for FileDocumentStore {
    fn load(&self) -> Result<Option<String>, LibraryError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LibraryError::storage(
                self.location(),
                format!("Failed to read: {}", e),
            )),
        }
    }

    fn save(&self, contents: &str) -> Result<(), LibraryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LibraryError::storage(
                        self.location(),
                        format!("Failed to create directory {}: {}", parent.display(), e),
                    )
                })?;
            }
        }

        std::fs::write(&self.path, contents).map_err(|e| {
            LibraryError::storage(self.location(), format!("Failed to write: {}", e))
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
