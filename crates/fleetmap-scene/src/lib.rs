//! Fleetmap scene layer
//!
//! The data-to-geometry pipeline between the decoded model and a paint
//! backend:
//!
//! - **Viewport**: clamped zoom + unbounded pan, and the single
//!   world-to-screen composition every point goes through.
//! - **Render**: a pure pass producing backend-neutral draw commands in a
//!   fixed layer order (grid, paths, nodes, charge stations, robot).
//! - **Input**: the Idle/Dragging pointer state machine that recomputes the
//!   pan offset absolutely from a drag anchor.
//!
//! Nothing here touches a window or a GPU; the command list is plain data,
//! which is what makes the layer rules testable.

mod draw;
mod input;
mod render;
mod viewport;

pub use draw::{palette, Color, DashPattern, DrawCmd, StrokeStyle};
pub use input::DragController;
pub use render::{
    render, LayerToggles, RobotPose, SceneFrame, FALLBACK_AVOIDANCE_RADIUS,
};
pub use viewport::{Projection, Viewport, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, ZOOM_STEP};
