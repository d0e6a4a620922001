//! Persisted client state.
//!
//! The console keeps exactly two values between runs: the session token
//! and the theme preference. Both live in a [`KeyValueStore`]; the file
//! backend writes a flat JSON object, the memory backend is used by tests
//! and embedders that manage persistence themselves.

use std::path::PathBuf;

use thiserror::Error;

mod file;
mod memory;
mod theme;
mod token;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use theme::{ThemePreference, THEME_KEY};
pub use token::{TokenStore, TOKEN_KEY};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
