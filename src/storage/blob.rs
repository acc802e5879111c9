// Opaque single-blob persistence. The app only ever reads the whole document
// at startup and writes it back in full.

use crate::storage::StorageError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Name of the persisted document.
pub const STORAGE_KEY: &str = "french-learner-data";

pub trait BlobStore: Send {
    /// `None` when nothing has been written yet.
    fn read(&self) -> Result<Option<String>, StorageError>;

    fn write(&mut self, contents: &str) -> Result<(), StorageError>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}

/// Stores the blob in one file, replacing it atomically on write.
pub struct FileBlobStore {
    path: PathBuf,
}

impl FileBlobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// after giving the store away.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    slot: Arc<Mutex<Option<String>>>,
    reject_writes: Arc<Mutex<bool>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        let store = Self::default();
        if let Ok(mut slot) = store.slot.lock() {
            *slot = Some(contents.to_string());
        }
        store
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Makes every later write fail, like a full or read-only disk.
    pub fn reject_writes(&self, reject: bool) {
        if let Ok(mut flag) = self.reject_writes.lock() {
            *flag = reject;
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents())
    }

    fn write(&mut self, contents: &str) -> Result<(), StorageError> {
        let rejected = self.reject_writes.lock().map(|flag| *flag).unwrap_or(false);
        if rejected {
            return Err(StorageError::Rejected("memory store is read-only".to_string()));
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Rejected("memory store poisoned".to_string()))?;
        *slot = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        format!("memory:{}", STORAGE_KEY)
    }
}
