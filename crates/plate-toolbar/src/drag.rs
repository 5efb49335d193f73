use tracing::debug;

use crate::events::WindowEvent;

/// Hides the toolbar for the duration of a drag-and-drop gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragGate {
    dragging: bool,
}

impl DragGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Folds a window event into the gate. Returns whether the drag state
    /// changed.
    pub fn handle(&mut self, event: &WindowEvent) -> bool {
        let dragging = match event {
            WindowEvent::DragStart => true,
            WindowEvent::DragEnd | WindowEvent::Drop => false,
            WindowEvent::PointerUp(_) => return false,
        };
        let changed = self.dragging != dragging;
        self.dragging = dragging;
        if changed {
            debug!(dragging, "drag state changed");
        }
        changed
    }

    /// Combined visibility input: drags override the classifier.
    pub fn gate(&self, active: bool) -> bool {
        active && !self.dragging
    }
}
