//! Encrypted append-only telemetry storage for CradleSense
//!
//! ## Overview
//!
//! Per-user, per-channel history of classification results, sealed with
//! authenticated encryption before anything touches the durable backend.
//! Channels are append-only: entries are never updated or removed once
//! written. The single exception is the per-user consent flag, which is a
//! one-value overwrite.
//!
//! The read path tolerates partial corruption: an entry that fails to
//! open or deserialize is skipped and counted, never fatal to the batch.
//!
//! ## Layers
//!
//! ```text
//! TelemetryStore        channel naming, serialize + seal, skip accounting
//!   └── sealed          AES-256-GCM envelope, per-record nonce, key ids
//!         └── Backend   append / set / list on some durable medium
//! ```
//!
//! Backends are deliberately dumb: they move opaque blobs and assign
//! monotonic entry ids. Everything they hold is ciphertext.
//!
//! ## Keys
//!
//! Keys are injected through [`KeySource`]; there is no key material in
//! this crate. Records carry the id of the key that sealed them, so a
//! rotated store keeps old entries readable as long as the source can
//! still look the old key up.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod channel;
pub mod keys;
pub mod sealed;
pub mod store;

pub use backend::{Backend, BackendError, EntryId, FsBackend, MemoryBackend};
pub use channel::Channel;
pub use keys::{Key, KeyId, KeySource, StaticKeys};
pub use store::{Consent, ReadOutcome, TelemetryStore};

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer errors
///
/// Write failures surface to the caller: a record must never be silently
/// dropped. Per-entry read failures do not appear here; they are counted
/// in [`ReadOutcome::skipped`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The durable backend failed; the record must not be assumed persisted
    #[error("storage backend failure: {0}")]
    Storage(#[from] BackendError),

    /// Record could not be serialized canonically
    #[error("record serialization failed: {0}")]
    Serialization(String),

    /// Sealing failed (key material rejected by the cipher)
    #[error("record could not be sealed")]
    Sealing,

    /// Envelope malformed, key unknown, or authentication failed
    #[error("record could not be opened: {0}")]
    Unsealable(&'static str),
}
