//! Transient drag-and-drop coordination signal, never persisted

/// Shared flag between drag sources and drop targets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSignal {
    pub is_dragging: bool,
    pub hovered_block: Option<String>,
}

impl DragSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_start(&mut self) {
        self.is_dragging = true;
    }

    pub fn drag_end(&mut self) {
        self.is_dragging = false;
        self.hovered_block = None;
    }

    pub fn set_hovered(&mut self, block: Option<String>) {
        self.hovered_block = block;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_end_clears_hover() {
        let mut signal = DragSignal::new();
        signal.drag_start();
        signal.set_hovered(Some("b1".to_string()));
        assert!(signal.is_dragging);

        signal.drag_end();
        assert!(!signal.is_dragging);
        assert!(signal.hovered_block.is_none());
    }
}
