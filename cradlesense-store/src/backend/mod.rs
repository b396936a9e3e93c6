//! Durable storage collaborators
//!
//! A backend moves opaque blobs. It knows nothing about users, channels,
//! or encryption; the store hands it fully sealed bytes under a logical
//! path like `users/alice/gestures`.
//!
//! Contract:
//! - `append` assigns a per-path monotonic [`EntryId`] and preserves each
//!   writer's own submission order within a path
//! - appended entries are never mutated or removed
//! - `set`/`get` are single-value overwrite semantics on a path
//! - paths are independent: appends to distinct paths never block each
//!   other beyond transient internal locking

mod fs;
mod memory;

pub use fs::FsBackend;
pub use memory::MemoryBackend;

use thiserror::Error;

/// Monotonic per-path entry identifier assigned on append
pub type EntryId = u64;

/// Backend failures
///
/// A missing path is not an error: listing it yields an empty sequence
/// and `get` yields `None`.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Underlying medium failed
    #[error("I/O failure: {0}")]
    Io(String),

    /// Stored entry names or layout are not what this backend wrote
    #[error("storage layout corrupt: {0}")]
    Layout(String),
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::Io(err.to_string())
    }
}

/// Durable blob store: append-only logs plus single-value slots
pub trait Backend: Send + Sync {
    /// Append a blob under `path`, returning its assigned entry id
    fn append(&self, path: &str, blob: &[u8]) -> Result<EntryId, BackendError>;

    /// Overwrite the single value stored at `path`
    fn set(&self, path: &str, blob: &[u8]) -> Result<(), BackendError>;

    /// Read the single value stored at `path`, if any
    fn get(&self, path: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// List all appended entries under `path` in id order
    fn list(&self, path: &str) -> Result<Vec<(EntryId, Vec<u8>)>, BackendError>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn append(&self, path: &str, blob: &[u8]) -> Result<EntryId, BackendError> {
        (**self).append(path, blob)
    }

    fn set(&self, path: &str, blob: &[u8]) -> Result<(), BackendError> {
        (**self).set(path, blob)
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).get(path)
    }

    fn list(&self, path: &str) -> Result<Vec<(EntryId, Vec<u8>)>, BackendError> {
        (**self).list(path)
    }
}

impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    fn append(&self, path: &str, blob: &[u8]) -> Result<EntryId, BackendError> {
        (**self).append(path, blob)
    }

    fn set(&self, path: &str, blob: &[u8]) -> Result<(), BackendError> {
        (**self).set(path, blob)
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).get(path)
    }

    fn list(&self, path: &str) -> Result<Vec<(EntryId, Vec<u8>)>, BackendError> {
        (**self).list(path)
    }
}
