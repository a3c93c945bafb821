//! Central session state: current document, history, and autosave wiring

use std::path::Path;
use std::sync::Arc;

use crate::core::autosave::AutosaveScheduler;
use crate::core::document::{Document, Toast, ToastKind, WorkspaceEntry};
use crate::core::history::History;
use crate::core::recent::RecentWorkspaces;
use crate::storage::kv::KvStore;
use crate::storage::Storage;

/// Which main panel the UI is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Files,
    Workbench,
}

/// Single mutation point for session state.
///
/// Every edit flows through here: the document is updated, the new snapshot
/// is forwarded to history (unless suppressed), and an autosave is
/// (re)scheduled. Constructed once per process; tests build fresh instances.
/// Mutators that schedule autosave must run inside a tokio runtime.
pub struct DocumentStore {
    workspace_path: String,
    current_document: Option<Document>,
    current_file_name: Option<String>,
    workspace_entries: Vec<WorkspaceEntry>,
    active_tab: Tab,
    generated_text: String,
    show_generated_modal: bool,
    toasts: Vec<Toast>,
    next_toast_id: u64,
    recent: RecentWorkspaces,
    history: History,
    autosave: AutosaveScheduler,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn Storage>, kv: Box<dyn KvStore>) -> Self {
        Self {
            workspace_path: String::new(),
            current_document: None,
            current_file_name: None,
            workspace_entries: Vec::new(),
            active_tab: Tab::default(),
            generated_text: String::new(),
            show_generated_modal: false,
            toasts: Vec::new(),
            next_toast_id: 0,
            recent: RecentWorkspaces::load(kv),
            history: History::new(),
            autosave: AutosaveScheduler::new(backend),
        }
    }

    /// Switch workspaces; a non-empty path is promoted into the recent list
    pub fn set_workspace_path(&mut self, path: impl Into<String>) {
        self.workspace_path = path.into();
        if !self.workspace_path.is_empty() {
            self.recent.add(&self.workspace_path);
        }
    }

    /// Replace the current document, and the file name when one is given.
    ///
    /// With `skip_history` the snapshot becomes the history baseline instead
    /// of an undoable edit (the load path). Passing `None` closes the file
    /// and drops the history. Any non-empty document reschedules autosave.
    pub fn set_current_file(
        &mut self,
        document: Option<Document>,
        file_name: Option<String>,
        skip_history: bool,
    ) {
        if let Some(name) = file_name {
            self.current_file_name = Some(name);
        }
        match document {
            Some(document) => {
                if skip_history {
                    self.history.set_present(document.clone());
                } else {
                    self.history.push(document.clone());
                }
                self.current_document = Some(document);
                self.schedule_autosave();
            }
            None => {
                self.current_document = None;
                self.history.reset();
            }
        }
    }

    pub fn set_current_file_name(&mut self, name: Option<String>) {
        self.current_file_name = name;
    }

    pub fn set_workspace_entries(&mut self, entries: Vec<WorkspaceEntry>) {
        self.workspace_entries = entries;
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn set_generated_text(&mut self, text: impl Into<String>) {
        self.generated_text = text.into();
    }

    pub fn set_show_generated_modal(&mut self, show: bool) {
        self.show_generated_modal = show;
    }

    pub fn remove_recent_workspace(&mut self, path: &str) {
        self.recent.remove(path);
    }

    /// Step the document back one history entry; true if anything changed
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.current_document = Some(snapshot);
                self.schedule_autosave();
                true
            }
            None => false,
        }
    }

    /// Step the document forward one undone entry; true if anything changed
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.current_document = Some(snapshot);
                self.schedule_autosave();
                true
            }
            None => false,
        }
    }

    /// Redact and save the current document right now.
    ///
    /// Returns false when there is nothing to save or the write failed. A
    /// pending debounced autosave is left alone; its later duplicate write
    /// carries the same logical state.
    pub fn save_current_file(&self) -> bool {
        let (Some(document), Some(path)) = (&self.current_document, self.current_file_path())
        else {
            return false;
        };
        match self.autosave.flush_now(&path, document) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to save {}: {}", path.display(), e);
                false
            }
        }
    }

    pub fn push_toast(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Back to defaults, used when closing the workspace. The recent list is
    /// persisted state and survives.
    pub fn reset(&mut self) {
        self.autosave.cancel();
        self.workspace_path.clear();
        self.current_document = None;
        self.current_file_name = None;
        self.workspace_entries.clear();
        self.active_tab = Tab::default();
        self.generated_text.clear();
        self.show_generated_modal = false;
        self.toasts.clear();
        self.history.reset();
    }

    fn current_file_path(&self) -> Option<std::path::PathBuf> {
        if self.workspace_path.is_empty() {
            return None;
        }
        let name = self.current_file_name.as_deref().filter(|n| !n.is_empty())?;
        Some(Path::new(&self.workspace_path).join(name))
    }

    fn schedule_autosave(&mut self) {
        let (Some(document), Some(path)) = (&self.current_document, self.current_file_path())
        else {
            return;
        };
        self.autosave.schedule(path, document.clone());
    }

    pub fn workspace_path(&self) -> &str {
        &self.workspace_path
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.current_document.as_ref()
    }

    pub fn current_file_name(&self) -> Option<&str> {
        self.current_file_name.as_deref()
    }

    pub fn workspace_entries(&self) -> &[WorkspaceEntry] {
        &self.workspace_entries
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn generated_text(&self) -> &str {
        &self.generated_text
    }

    pub fn show_generated_modal(&self) -> bool {
        self.show_generated_modal
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn recent_workspaces(&self) -> &[String] {
        self.recent.entries()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
