//! Persistence error model.

use thiserror::Error;

/// Failure reading or writing a persisted snapshot.
///
/// The store never propagates these out of a mutation; they are logged and
/// kept as [`InventoryStore::last_persist_error`](crate::InventoryStore::last_persist_error).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failure for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key: `{0}`")]
    InvalidKey(String),

    #[error("failed to (de)serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }
}
