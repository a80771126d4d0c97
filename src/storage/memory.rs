use crate::error::LibraryError;
use crate::storage::DocumentStore;
use parking_lot::Mutex;

/// In-memory document, used by tests and for throwaway registries.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    contents: Mutex<Option<String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }

    /// Current raw contents.
    pub fn snapshot(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn load(&self) -> Result<Option<String>, LibraryError> {
        Ok(self.contents.lock().clone())
    }

    fn save(&self, contents: &str) -> Result<(), LibraryError> {
        *self.contents.lock() = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
