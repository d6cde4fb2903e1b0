//! Local key-value persistence.
//!
//! The site keeps language preferences and admin content as string values
//! under fixed keys. [`KeyValueStore`] is that surface; [`MemoryStore`] backs
//! tests and [`JsonFileStore`] persists to a JSON object on disk.

/// JSON file backed store
mod file;
/// In-memory store
mod memory;
pub mod preference;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse store file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Store file must contain a JSON object of strings")]
    NotAnObject,
}

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Backend write failure
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    ///
    /// # Errors
    /// Backend write failure
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
