pub mod blob;
pub mod persisted;
pub mod vocabulary;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore, STORAGE_KEY};
pub use persisted::{
    PersistedState, SpeechRate, SpeechSettings, SpeechSettingsUpdate, UserProgress,
};
pub use vocabulary::SavedWords;

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid saved data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store rejected the write: {0}")]
    Rejected(String),
}
