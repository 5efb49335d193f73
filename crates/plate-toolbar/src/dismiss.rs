use kurbo::Rect;
use tracing::{info, trace};

use crate::events::PointerUp;
use crate::selection::{EditorState, Selection};

/// Collapses the selection when the user releases the pointer outside both
/// the toolbar and the editor while the toolbar is active.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutsideDismissal {
    toolbar_bounds: Option<Rect>,
    editor_bounds: Option<Rect>,
}

impl OutsideDismissal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the toolbar is currently drawn; `None` while it is not rendered.
    pub fn set_toolbar_bounds(&mut self, bounds: Option<Rect>) {
        self.toolbar_bounds = bounds;
    }

    pub fn set_editor_bounds(&mut self, bounds: Option<Rect>) {
        self.editor_bounds = bounds;
    }

    pub fn toolbar_bounds(&self) -> Option<Rect> {
        self.toolbar_bounds
    }

    pub fn editor_bounds(&self) -> Option<Rect> {
        self.editor_bounds
    }

    pub fn should_dismiss(&self, event: &PointerUp, toolbar_active: bool) -> bool {
        let inside = |bounds: Option<Rect>| bounds.is_some_and(|rect| rect.contains(event.position));

        if inside(self.toolbar_bounds) {
            trace!("pointer released over toolbar");
            return false;
        }
        if inside(self.editor_bounds) {
            trace!("pointer released over editor");
            return false;
        }
        if !toolbar_active || event.focus_in_input {
            return false;
        }
        // A native selection drag outside the editor is still in progress.
        if !event.native_selection_collapsed {
            return false;
        }
        true
    }

    /// Replaces the selection with a caret at the document start when the
    /// release dismisses the toolbar. Returns whether it did.
    pub fn handle(&self, event: &PointerUp, toolbar_active: bool, state: &mut EditorState) -> bool {
        if !self.should_dismiss(event, toolbar_active) {
            return false;
        }
        info!(x = event.position.x, y = event.position.y, "dismissing toolbar on outside click");
        state.set_selection(Selection::at_start());
        true
    }
}
