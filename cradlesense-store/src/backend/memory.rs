//! In-memory backend for tests and ephemeral deployments

use std::collections::HashMap;
use std::sync::Mutex;

use super::{Backend, BackendError, EntryId};

/// HashMap-backed store, entries kept per path in append order
#[derive(Default)]
pub struct MemoryBackend {
    logs: Mutex<HashMap<String, Vec<Vec<u8>>>>,
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutate one stored entry in place - corruption injection for tests
    pub fn tamper(&self, path: &str, index: usize, mutate: impl FnOnce(&mut Vec<u8>)) -> bool {
        let mut logs = self.logs.lock().unwrap();
        match logs.get_mut(path).and_then(|entries| entries.get_mut(index)) {
            Some(entry) => {
                mutate(entry);
                true
            }
            None => false,
        }
    }
}

impl Backend for MemoryBackend {
    fn append(&self, path: &str, blob: &[u8]) -> Result<EntryId, BackendError> {
        let mut logs = self.logs.lock().unwrap();
        let entries = logs.entry(path.to_string()).or_default();
        entries.push(blob.to_vec());
        Ok(entries.len() as EntryId - 1)
    }

    fn set(&self, path: &str, blob: &[u8]) -> Result<(), BackendError> {
        self.slots
            .lock()
            .unwrap()
            .insert(path.to_string(), blob.to_vec());
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.slots.lock().unwrap().get(path).cloned())
    }

    fn list(&self, path: &str) -> Result<Vec<(EntryId, Vec<u8>)>, BackendError> {
        let logs = self.logs.lock().unwrap();
        Ok(logs
            .get(path)
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .map(|(i, blob)| (i as EntryId, blob.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
