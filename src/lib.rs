//! Promptdesk core - document state engine for a block-based prompt workbench
//!
//! Documents are ordered compositions of text and file blocks, each with
//! multiple saved content variants. This crate owns the in-memory session
//! state, linear undo/redo history, the debounced redacting autosave, and
//! the filesystem persistence of `.prompt` files; the UI front end consumes
//! it through [`DocumentStore`] and the [`Storage`] trait.

pub mod core;
pub mod storage;

pub use crate::core::autosave::{redact, AutosaveScheduler, AUTOSAVE_DELAY};
pub use crate::core::document::{
    BlockMode, Document, FileBlock, FileBlockData, FileEntry, Separator, TextBlock, Toast,
    ToastKind, Variant, VariantSet, WorkspaceEntry,
};
pub use crate::core::drag::DragSignal;
pub use crate::core::history::History;
pub use crate::core::recent::RecentWorkspaces;
pub use crate::core::store::{DocumentStore, Tab};
pub use crate::storage::{FileKvStore, FsStorage, KvStore, MemoryKvStore, Storage, StorageError};
