//! Bounded linear undo/redo history over document snapshots

use std::collections::VecDeque;

use crate::core::document::Document;

/// Maximum number of predecessors retained; the oldest is evicted first
const MAX_HISTORY: usize = 64;

/// Two-stack undo/redo history.
///
/// `past` holds predecessors of `present`, `future` holds states undone from
/// it. Any accepted push clears `future`, so redo only replays edits that
/// were just undone. Pushing a snapshot structurally equal to `present` is a
/// no-op, which keeps repeated saves of unchanged state from burning slots.
#[derive(Debug, Default)]
pub struct History {
    past: VecDeque<Document>,
    present: Option<Document>,
    future: Vec<Document>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new snapshot as the present state
    pub fn push(&mut self, snapshot: Document) {
        if self.present.as_ref() == Some(&snapshot) {
            return;
        }
        if let Some(previous) = self.present.replace(snapshot) {
            self.past.push_back(previous);
            if self.past.len() > MAX_HISTORY {
                self.past.pop_front();
            }
        }
        self.future.clear();
    }

    /// Step back one snapshot, returning the new present
    pub fn undo(&mut self) -> Option<Document> {
        let restored = self.past.pop_back()?;
        if let Some(current) = self.present.replace(restored.clone()) {
            self.future.push(current);
        }
        Some(restored)
    }

    /// Step forward one undone snapshot, returning the new present
    pub fn redo(&mut self) -> Option<Document> {
        let restored = self.future.pop()?;
        if let Some(current) = self.present.replace(restored.clone()) {
            self.past.push_back(current);
            if self.past.len() > MAX_HISTORY {
                self.past.pop_front();
            }
        }
        Some(restored)
    }

    /// Replace the present without recording an edit.
    ///
    /// Used when opening a document: the loaded state is the new baseline,
    /// not something the user can undo past.
    pub fn set_present(&mut self, snapshot: Document) {
        self.present = Some(snapshot);
        self.past.clear();
        self.future.clear();
    }

    pub fn reset(&mut self) {
        self.past.clear();
        self.present = None;
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn present(&self) -> Option<&Document> {
        self.present.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(n: usize) -> Document {
        Document {
            order: vec![format!("block-{n}")],
            ..Document::default()
        }
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::new();
        history.push(doc(0));
        history.push(doc(1));

        assert_eq!(history.undo(), Some(doc(0)));
        assert_eq!(history.redo(), Some(doc(1)));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_equal_snapshot_is_noop() {
        let mut history = History::new();
        history.push(doc(0));
        history.push(doc(1));
        history.undo();
        assert!(history.can_redo());

        // Re-pushing the present must not touch any of the three fields
        history.push(doc(0));
        assert!(history.can_redo());
        assert!(!history.can_undo());
        assert_eq!(history.present(), Some(&doc(0)));
    }

    #[test]
    fn test_push_clears_future() {
        let mut history = History::new();
        history.push(doc(0));
        history.push(doc(1));
        history.undo();
        assert!(history.can_redo());

        history.push(doc(2));
        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some(doc(0)));
    }

    #[test]
    fn test_past_bounded_with_fifo_eviction() {
        let mut history = History::new();
        for n in 0..=MAX_HISTORY + 5 {
            history.push(doc(n));
        }

        let mut undone = 0;
        while history.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, MAX_HISTORY);
        // Oldest snapshots were evicted; the floor is the first survivor
        assert_eq!(history.present(), Some(&doc(5)));
    }

    #[test]
    fn test_undo_on_empty_past_is_unavailable() {
        let mut history = History::new();
        assert!(history.undo().is_none());

        history.set_present(doc(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.present(), Some(&doc(0)));
    }

    #[test]
    fn test_set_present_clears_both_stacks() {
        let mut history = History::new();
        history.push(doc(0));
        history.push(doc(1));
        history.undo();

        history.set_present(doc(9));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.present(), Some(&doc(9)));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut history = History::new();
        history.push(doc(0));
        history.push(doc(1));
        history.reset();

        assert!(history.present().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
