use crate::error::LibraryError;

/// Backing store for one JSON document (registry, progress or metadata file).
///
/// Every call goes to the backend; implementations keep no cached copy.
/// There is no locking: two writers racing on the same document lose one update.
pub trait DocumentStore: Send + Sync {
    /// Raw document contents, `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, LibraryError>;
    /// Replace the whole document.
    fn save(&self, contents: &str) -> Result<(), LibraryError>;
    /// Human-readable location used in logs and errors.
    fn location(&self) -> String;
}
