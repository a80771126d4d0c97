//! Document storage: persist and load whole JSON documents.

pub mod contract;
pub mod file;
pub mod memory;

pub use contract::DocumentStore;
pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;

use crate::error::LibraryError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Load and decode a document.
///
/// A missing document is `None`. A document that fails to decode is also
/// `None`: the caller recreates its default and the next save overwrites the
/// corrupt content.
pub fn load_json<T: DeserializeOwned>(store: &dyn DocumentStore) -> Result<Option<T>, LibraryError> {
    let Some(contents) = store.load()? else {
        return Ok(None);
    };
    match serde_json::from_str(&contents) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(
                "Discarding corrupt document at {}: {}",
                store.location(),
                e
            );
            Ok(None)
        }
    }
}

/// Encode a document as pretty JSON and replace the stored copy.
pub fn save_json<T: Serialize>(store: &dyn DocumentStore, value: &T) -> Result<(), LibraryError> {
    let contents = serde_json::to_string_pretty(value)
        .map_err(|e| LibraryError::storage(store.location(), format!("Failed to serialize: {}", e)))?;
    store.save(&contents)
}
