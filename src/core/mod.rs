//! Core state engine: document model, history, store, autosave

pub mod autosave;
pub mod document;
pub mod drag;
pub mod history;
pub mod recent;
pub mod store;
