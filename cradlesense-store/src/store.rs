//! The telemetry store proper
//!
//! Serializes records canonically with serde_json, seals them, and hands
//! the ciphertext to the backend. On read, every entry is opened and
//! decoded independently; a bad entry is skipped and counted so one
//! corrupt record never takes the rest of a user's history with it.

use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    backend::{Backend, EntryId},
    channel::Channel,
    keys::KeySource,
    sealed, StoreError, StoreResult,
};

/// Per-user consent flag - the single overwrite-semantics value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    /// Whether data collection was agreed to
    pub agreed: bool,
    /// When the flag was last set (epoch ms)
    pub timestamp: u64,
}

/// Result of reading a channel
///
/// `records` holds everything that decoded cleanly, in entry order;
/// `skipped` counts entries that failed to open or deserialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome<T> {
    /// Successfully decoded records in submission order
    pub records: Vec<T>,
    /// Entries skipped because they would not open or decode
    pub skipped: usize,
}

/// Encrypted per-user, per-channel telemetry log
pub struct TelemetryStore<B: Backend, K: KeySource> {
    backend: B,
    keys: K,
}

impl<B: Backend, K: KeySource> TelemetryStore<B, K> {
    /// Store over the given backend and key source
    pub fn new(backend: B, keys: K) -> Self {
        Self { backend, keys }
    }

    /// Serialize, seal, and append one record
    ///
    /// On error the record must not be assumed persisted.
    pub fn write<T: Serialize>(
        &self,
        user: &str,
        channel: Channel,
        record: &T,
    ) -> StoreResult<EntryId> {
        let plaintext =
            serde_json::to_vec(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let blob = sealed::seal(&self.keys, &plaintext)?;
        Ok(self.backend.append(&channel.path_for(user), &blob)?)
    }

    /// Read a channel, skipping (and counting) undecodable entries
    ///
    /// Only a failure to list entries at all is an error.
    pub fn read<T: DeserializeOwned>(
        &self,
        user: &str,
        channel: Channel,
    ) -> StoreResult<ReadOutcome<T>> {
        let path = channel.path_for(user);
        let entries = self.backend.list(&path)?;

        let mut outcome = ReadOutcome {
            records: Vec::with_capacity(entries.len()),
            skipped: 0,
        };
        for (id, blob) in entries {
            let decoded = sealed::open(&self.keys, &blob)
                .and_then(|plain| {
                    serde_json::from_slice(&plain)
                        .map_err(|e| StoreError::Serialization(e.to_string()))
                });
            match decoded {
                Ok(record) => outcome.records.push(record),
                Err(err) => {
                    warn!("skipping entry {id} under {path}: {err}");
                    outcome.skipped += 1;
                }
            }
        }
        Ok(outcome)
    }

    /// Overwrite the user's consent flag
    pub fn write_consent(&self, user: &str, consent: Consent) -> StoreResult<()> {
        let plaintext =
            serde_json::to_vec(&consent).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let blob = sealed::seal(&self.keys, &plaintext)?;
        Ok(self.backend.set(&consent_path(user), &blob)?)
    }

    /// Read the user's consent flag, if ever set
    pub fn read_consent(&self, user: &str) -> StoreResult<Option<Consent>> {
        let Some(blob) = self.backend.get(&consent_path(user))? else {
            return Ok(None);
        };
        let plain = sealed::open(&self.keys, &blob)?;
        let consent =
            serde_json::from_slice(&plain).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Some(consent))
    }

    /// Access the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn consent_path(user: &str) -> String {
    format!("users/{user}/consent")
}
