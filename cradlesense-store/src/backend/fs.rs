//! Filesystem backend
//!
//! One directory per logical path; appended entries are zero-padded
//! numbered files so lexical order equals id order:
//!
//! ```text
//! <root>/users/alice/gestures/00000000.rec
//! <root>/users/alice/gestures/00000001.rec
//! <root>/users/alice/consent/current.val
//! ```
//!
//! `set` writes through a temp file and renames it over the target, so a
//! crashed overwrite never leaves a half-written value.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;

use super::{Backend, BackendError, EntryId};

const ENTRY_EXT: &str = "rec";
const SLOT_FILE: &str = "current.val";

/// Directory-per-path blob store
pub struct FsBackend {
    root: PathBuf,
    // One lock per logical path serializes id assignment for that path
    // only; appends to distinct paths proceed in parallel. Readers don't
    // take it.
    append_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    // Makes concurrent slot overwrites use distinct temp files
    tmp_seq: AtomicU64,
}

impl FsBackend {
    /// Open (creating if needed) a backend rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, BackendError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            append_locks: Mutex::new(HashMap::new()),
            tmp_seq: AtomicU64::new(0),
        })
    }

    /// Append lock for one logical path; the map lock is held only long
    /// enough to clone the Arc
    fn append_lock(&self, path: &str) -> Arc<Mutex<()>> {
        let mut locks = self.append_locks.lock().unwrap();
        locks.entry(path.to_string()).or_default().clone()
    }

    fn dir_for(&self, path: &str) -> PathBuf {
        let mut dir = self.root.clone();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            dir.push(part);
        }
        dir
    }

    fn entry_file(dir: &Path, id: EntryId) -> PathBuf {
        dir.join(format!("{id:08}.{ENTRY_EXT}"))
    }

    /// Ordered entry ids currently present under `dir`
    fn entry_ids(dir: &Path) -> Result<Vec<EntryId>, BackendError> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let Some(stem) = name.strip_suffix(&format!(".{ENTRY_EXT}")) else {
                continue;
            };
            let id: EntryId = stem
                .parse()
                .map_err(|_| BackendError::Layout(format!("unexpected entry file {name}")))?;
            ids.push(id);
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

impl Backend for FsBackend {
    fn append(&self, path: &str, blob: &[u8]) -> Result<EntryId, BackendError> {
        let dir = self.dir_for(path);
        fs::create_dir_all(&dir)?;

        let lock = self.append_lock(path);
        let _guard = lock.lock().unwrap();
        let next = Self::entry_ids(&dir)?
            .last()
            .map(|last| last + 1)
            .unwrap_or(0);
        fs::write(Self::entry_file(&dir, next), blob)?;
        debug!("appended entry {next} under {path}");
        Ok(next)
    }

    fn set(&self, path: &str, blob: &[u8]) -> Result<(), BackendError> {
        let dir = self.dir_for(path);
        fs::create_dir_all(&dir)?;

        // Unique temp name per call: concurrent overwrites of the same
        // slot each rename their own file and the last rename wins
        let seq = self.tmp_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = dir.join(format!("{SLOT_FILE}.{seq}.tmp"));
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, dir.join(SLOT_FILE))?;
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>, BackendError> {
        let file = self.dir_for(path).join(SLOT_FILE);
        if !file.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(file)?))
    }

    fn list(&self, path: &str) -> Result<Vec<(EntryId, Vec<u8>)>, BackendError> {
        let dir = self.dir_for(path);
        let mut entries = Vec::new();
        for id in Self::entry_ids(&dir)? {
            entries.push((id, fs::read(Self::entry_file(&dir, id))?));
        }
        Ok(entries)
    }
}
