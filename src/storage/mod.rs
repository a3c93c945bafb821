//! Persistence collaborators: document files, output generation, key-value state

pub mod fs;
pub mod generate;
pub mod kv;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::document::{Document, WorkspaceEntry};

/// Errors surfaced by document persistence operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed document: {0}")]
    Format(#[from] serde_json::Error),
    #[error("invalid path: {path}")]
    InvalidPath { path: PathBuf },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Document persistence backend.
///
/// Everything here is synchronous blocking I/O; asynchrony lives in the
/// autosave scheduler, which calls `save_document` from its timer task.
pub trait Storage: Send + Sync {
    /// List workspace entries, best-effort: failures yield an empty list
    fn list_workspace_entries(&self, workspace: &Path) -> Vec<WorkspaceEntry>;

    /// Create an empty document, returning its path
    fn create_document(&self, workspace: &Path, name: &str) -> Result<PathBuf, StorageError>;

    /// Load a document, back-filling any missing collections with defaults
    fn load_document(&self, path: &Path) -> Result<Document, StorageError>;

    fn save_document(&self, path: &Path, document: &Document) -> Result<(), StorageError>;

    /// Rename a document in place, returning the new path
    fn rename_document(&self, old_path: &Path, new_name: &str) -> Result<PathBuf, StorageError>;

    fn delete_document(&self, path: &Path) -> Result<(), StorageError>;

    /// Copy a document next to itself under a new name, returning the new path
    fn copy_document(&self, path: &Path, new_name: &str) -> Result<PathBuf, StorageError>;

    /// Flatten a document into its generated output text
    fn generate_output_text(&self, document: &Document) -> Result<String, StorageError>;

    /// Read an arbitrary file referenced by a file block
    fn read_raw_file(&self, path: &Path) -> Result<String, StorageError>;
}

pub use fs::FsStorage;
pub use kv::{FileKvStore, KvStore, MemoryKvStore};
