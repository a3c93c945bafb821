//! Debounced, redacting autosave of the current document

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::core::document::Document;
use crate::storage::{Storage, StorageError};

/// Quiet period before a scheduled flush fires
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(2000);

/// Variant titles starting with one of these markers are redacted on save
const REDACT_MARKERS: [char; 2] = ['!', '！'];

/// Copy of a document with marked variant contents blanked.
///
/// Redaction only affects what is written to disk; the in-memory document
/// and its history snapshots keep the original content.
pub fn redact(document: &Document) -> Document {
    let mut out = document.clone();
    for set in out.variants.values_mut() {
        for variant in &mut set.variant_list {
            if variant.title.starts_with(REDACT_MARKERS.as_slice()) {
                variant.content.clear();
            }
        }
    }
    out
}

/// Debounces document flushes: each `schedule` call cancels the pending
/// flush and starts the delay over, so a burst of edits produces a single
/// write carrying the last scheduled state.
pub struct AutosaveScheduler {
    backend: Arc<dyn Storage>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl AutosaveScheduler {
    pub fn new(backend: Arc<dyn Storage>) -> Self {
        Self::with_delay(backend, AUTOSAVE_DELAY)
    }

    pub fn with_delay(backend: Arc<dyn Storage>, delay: Duration) -> Self {
        Self {
            backend,
            delay,
            pending: None,
        }
    }

    /// Schedule a flush of `document` to `path` after the quiet period.
    ///
    /// Must be called from within a tokio runtime. Any previously pending
    /// flush is cancelled silently.
    pub fn schedule(&mut self, path: PathBuf, document: Document) {
        self.cancel();
        let backend = Arc::clone(&self.backend);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Blocking fs write goes to the blocking pool. Autosave is
            // best-effort: the next edit reschedules anyway.
            let flush = {
                let path = path.clone();
                tokio::task::spawn_blocking(move || backend.save_document(&path, &redact(&document)))
            };
            match flush.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!("Autosave failed for {}: {}", path.display(), e),
                Err(e) => tracing::warn!("Autosave task failed for {}: {}", path.display(), e),
            }
        }));
    }

    /// Cancel the pending flush, if any
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Redact and save immediately, for explicit user-triggered saves.
    ///
    /// Does not cancel an independently pending debounced flush; a later
    /// duplicate write of the same logical state is harmless.
    pub fn flush_now(&self, path: &Path, document: &Document) -> Result<(), StorageError> {
        self.backend.save_document(path, &redact(document))?;
        tracing::info!("Saved document: {}", path.display());
        Ok(())
    }
}
