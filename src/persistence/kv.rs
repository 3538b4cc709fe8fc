use anyhow::Result;
use log::warn;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::files::{atomic_write, ensure_data_dir, read_bytes};

/// Process-local key-value storage: opaque bytes under string keys.
/// No transactions, no expiry. `get` answers None for a missing key;
/// read failures are treated as missing and logged.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
}

/// File-backed store: one file per key under a directory, written
/// atomically via temp file + rename.
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Open the store over the default nexus data directory, creating
    /// it when missing
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(ensure_data_dir()?))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(sanitize_key(key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        match read_bytes(self.path_for(key)) {
            Ok(value) => value,
            Err(err) => {
                warn!("Could not read stored value for {key}: {err:#}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        atomic_write(self.path_for(key), value)
    }
}

/// Keys become file names; anything outside a safe character set is
/// mapped to '_' so callers can use dotted keys freely
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// In-memory store for tests and ephemeral use
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    map: HashMap<String, Vec<u8>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.map.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
