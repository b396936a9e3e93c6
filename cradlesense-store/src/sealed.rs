//! Authenticated record envelope
//!
//! Every record is sealed with AES-256-GCM under the active key and a
//! fresh random 96-bit nonce. The envelope is a small binary header in
//! front of the ciphertext:
//!
//! ```text
//! offset  size  field
//! 0       1     envelope version (currently 1)
//! 1       4     key id, little-endian
//! 5       12    nonce
//! 17      ..    ciphertext + GCM tag
//! ```
//!
//! GCM authenticates the ciphertext, so any bit flipped in storage is
//! caught at open time instead of decoding into garbage. Tampering, a
//! truncated blob, an unknown key id, and an unknown version all surface
//! as `StoreError::Unsealable` with a reason; the store's read path turns
//! those into skip counts.

use aes_gcm::{
    aead::{Aead, AeadCore, OsRng},
    Aes256Gcm, KeyInit, Nonce,
};

use crate::{
    keys::{KeyId, KeySource},
    StoreError, StoreResult,
};

/// Current envelope version byte
pub const ENVELOPE_VERSION: u8 = 1;

const NONCE_LEN: usize = 12;
const HEADER_LEN: usize = 1 + 4 + NONCE_LEN;

/// Seal a plaintext under the source's active key
pub fn seal(keys: &dyn KeySource, plaintext: &[u8]) -> StoreResult<Vec<u8>> {
    let (key_id, key) = keys.active();
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| StoreError::Sealing)?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| StoreError::Sealing)?;

    let mut blob = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    blob.push(ENVELOPE_VERSION);
    blob.extend_from_slice(&key_id.to_le_bytes());
    blob.extend_from_slice(nonce.as_slice());
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Open a sealed blob, resolving its key by id
pub fn open(keys: &dyn KeySource, blob: &[u8]) -> StoreResult<Vec<u8>> {
    if blob.len() < HEADER_LEN {
        return Err(StoreError::Unsealable("envelope truncated"));
    }
    if blob[0] != ENVELOPE_VERSION {
        return Err(StoreError::Unsealable("unknown envelope version"));
    }

    let mut id_bytes = [0u8; 4];
    id_bytes.copy_from_slice(&blob[1..5]);
    let key_id: KeyId = u32::from_le_bytes(id_bytes);

    let key = keys
        .lookup(key_id)
        .ok_or(StoreError::Unsealable("unknown key id"))?;
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|_| StoreError::Unsealable("bad key material"))?;

    let nonce = &blob[5..HEADER_LEN];
    cipher
        .decrypt(Nonce::from_slice(nonce), &blob[HEADER_LEN..])
        .map_err(|_| StoreError::Unsealable("authentication failed"))
}
