pub mod file_store;
#[cfg(test)]
pub mod memory_store;
pub mod record_store;

pub use file_store::{FileStore, validate_key};
#[cfg(test)]
pub use memory_store::MemoryStore;
pub use record_store::RecordStore;

use std::io;

/// Minimal string key-value store, the shape of a browser's local storage.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been set or was removed.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Replaces the whole value stored under `key`.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> io::Result<()>;
}
