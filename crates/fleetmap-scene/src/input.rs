//! Pointer-drag interaction.
//!
//! A two-state machine: Idle and Dragging. The drag anchor is the pointer's
//! canvas position minus the offset at press time; every move recomputes the
//! offset absolutely from that anchor, so intermediate move events can be
//! dropped or duplicated without drift. Release anywhere — including
//! off-canvas — returns to Idle.

use glam::DVec2;

use crate::viewport::Viewport;

/// Drag state. No multi-pointer handling; one drag at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { anchor: DVec2 },
}

/// Translates pointer events into viewport pan updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragController {
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
        }
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer pressed over the canvas: record the anchor and start dragging.
    pub fn pointer_down(&mut self, canvas_pos: DVec2, viewport: &Viewport) {
        self.state = DragState::Dragging {
            anchor: canvas_pos - viewport.offset,
        };
    }

    /// Pointer moved: while dragging, set the offset to the absolute
    /// distance from the anchor. No-op when idle.
    pub fn pointer_move(&mut self, canvas_pos: DVec2, viewport: &mut Viewport) {
        if let DragState::Dragging { anchor } = self.state {
            viewport.offset = canvas_pos - anchor;
        }
    }

    /// Pointer released, over the canvas or not: back to Idle.
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }
}
