//! Injected key material with rotation support
//!
//! No key material lives in this crate. Keys are a capability the caller
//! hands in: new records are sealed under the active key, and each record
//! remembers which key sealed it so rotation never orphans history.

/// 256-bit symmetric key
pub type Key = [u8; 32];

/// Identifier a sealed record uses to name its key
pub type KeyId = u32;

/// Secret-resolution capability
///
/// Implementations decide where keys live (config, OS keyring, KMS).
pub trait KeySource: Send + Sync {
    /// Key used to seal new records
    fn active(&self) -> (KeyId, Key);

    /// Resolve a key by id for opening older records
    fn lookup(&self, id: KeyId) -> Option<Key>;
}

/// In-memory key set with a designated active key
#[derive(Clone)]
pub struct StaticKeys {
    active_id: KeyId,
    active_key: Key,
    previous: Vec<(KeyId, Key)>,
}

impl StaticKeys {
    /// Key set with a single key
    pub fn single(id: KeyId, key: Key) -> Self {
        Self {
            active_id: id,
            active_key: key,
            previous: Vec::new(),
        }
    }

    /// Make a new key active; the old active key stays resolvable
    pub fn rotate(&mut self, id: KeyId, key: Key) {
        self.previous.push((self.active_id, self.active_key));
        self.previous.retain(|(existing, _)| *existing != id);
        self.active_id = id;
        self.active_key = key;
    }
}

impl KeySource for StaticKeys {
    fn active(&self) -> (KeyId, Key) {
        (self.active_id, self.active_key)
    }

    fn lookup(&self, id: KeyId) -> Option<Key> {
        if id == self.active_id {
            return Some(self.active_key);
        }
        self.previous
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, key)| *key)
    }
}
