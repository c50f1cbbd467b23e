//! Viewport state and the world-to-screen transform.
//!
//! The world is a fixed rectangle (100k x 100k by default); the screen is a
//! resizable surface. The transform recenters the world, scales it, recenters
//! onto the screen and then applies the pan offset — in exactly that order,
//! so grid, geometry and text all share one coordinate frame.

use fleetmap_model::{WorldBounds, WorldPoint};
use glam::DVec2;

/// Smallest permitted zoom scale.
pub const MIN_SCALE: f64 = 0.001;

/// Largest permitted zoom scale.
pub const MAX_SCALE: f64 = 0.05;

/// Scale applied on a fresh map load and on reset.
pub const DEFAULT_SCALE: f64 = 0.008;

/// Multiplicative step per zoom tick.
pub const ZOOM_STEP: f64 = 1.2;

/// Pan/zoom state of the canvas.
///
/// `scale` is clamped to `[MIN_SCALE, MAX_SCALE]`; `offset` is an unclamped
/// screen-space translation — the world may be dragged arbitrarily far
/// off-screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset: DVec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: DVec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one zoom tick: multiply the scale for `direction > 0`, divide
    /// otherwise, then clamp.
    ///
    /// Zoom-in followed by zoom-out is not perfectly invertible near the
    /// clamp rails; that is expected.
    pub fn zoom(&mut self, direction: i32) {
        let scale = if direction > 0 {
            self.scale * ZOOM_STEP
        } else {
            self.scale / ZOOM_STEP
        };
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Translate the view by a screen-space delta. Unbounded.
    pub fn pan(&mut self, delta: DVec2) {
        self.offset += delta;
    }

    /// Restore the exact defaults used on a fresh map load, so "reset" and
    /// "load new map" are observably identical for viewport state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A frozen transform for one render pass.
///
/// Captures viewport, world bounds and canvas size; every world-space point,
/// length and font size is converted through this single composition rather
/// than ad hoc per call site.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    scale: f64,
    offset: DVec2,
    bounds: WorldBounds,
    canvas: DVec2,
}

impl Projection {
    pub fn new(viewport: &Viewport, bounds: WorldBounds, canvas: DVec2) -> Self {
        Self {
            scale: viewport.scale,
            offset: viewport.offset,
            bounds,
            canvas,
        }
    }

    /// Map a world-space point to screen space.
    pub fn to_screen(&self, p: WorldPoint) -> DVec2 {
        DVec2::new(
            (p.x - self.bounds.width / 2.0) * self.scale + self.offset.x + self.canvas.x / 2.0,
            (p.y - self.bounds.height / 2.0) * self.scale + self.offset.y + self.canvas.y / 2.0,
        )
    }

    /// Inverse of [`to_screen`](Self::to_screen).
    pub fn to_world(&self, s: DVec2) -> WorldPoint {
        WorldPoint::new(
            (s.x - self.offset.x - self.canvas.x / 2.0) / self.scale + self.bounds.width / 2.0,
            (s.y - self.offset.y - self.canvas.y / 2.0) / self.scale + self.bounds.height / 2.0,
        )
    }

    /// Convert a world-space length (stroke width, radius, font size) to
    /// screen pixels.
    pub fn px(&self, world_len: f64) -> f64 {
        world_len * self.scale
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn projection(scale: f64, offset: DVec2) -> Projection {
        let viewport = Viewport { scale, offset };
        Projection::new(&viewport, WorldBounds::default(), DVec2::new(1000.0, 600.0))
    }

    #[test]
    fn default_matches_fresh_load() {
        let viewport = Viewport::new();
        assert_eq!(viewport.scale, DEFAULT_SCALE);
        assert_eq!(viewport.offset, DVec2::ZERO);
    }

    #[test]
    fn world_center_lands_on_canvas_center_at_zero_offset() {
        let p = projection(DEFAULT_SCALE, DVec2::ZERO);
        let screen = p.to_screen(WorldPoint::new(50_000.0, 50_000.0));
        assert_eq!(screen, DVec2::new(500.0, 300.0));
    }

    #[test]
    fn pan_translates_screen_points() {
        let before = projection(DEFAULT_SCALE, DVec2::ZERO);
        let after = projection(DEFAULT_SCALE, DVec2::new(40.0, -25.0));
        let origin = WorldPoint::new(0.0, 0.0);
        let delta = after.to_screen(origin) - before.to_screen(origin);
        assert_eq!(delta, DVec2::new(40.0, -25.0));
    }

    #[test]
    fn zoom_in_then_out_returns_to_start_off_the_rails() {
        let mut viewport = Viewport::new();
        let original = viewport.scale;
        viewport.zoom(1);
        viewport.zoom(-1);
        assert!((viewport.scale - original).abs() < 1e-12);
    }

    #[test]
    fn zoom_clamps_at_both_rails() {
        let mut viewport = Viewport::new();
        for _ in 0..100 {
            viewport.zoom(1);
        }
        assert_eq!(viewport.scale, MAX_SCALE);

        for _ in 0..100 {
            viewport.zoom(-1);
        }
        assert_eq!(viewport.scale, MIN_SCALE);

        // One more tick in either direction must not escape the range.
        viewport.zoom(-1);
        assert!(viewport.scale >= MIN_SCALE);
    }

    #[test]
    fn reset_restores_defaults_exactly() {
        let mut viewport = Viewport::new();
        viewport.zoom(1);
        viewport.pan(DVec2::new(123.0, -456.0));
        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn pan_is_unclamped() {
        let mut viewport = Viewport::new();
        viewport.pan(DVec2::new(1e9, -1e9));
        assert_eq!(viewport.offset, DVec2::new(1e9, -1e9));
    }

    proptest! {
        #[test]
        fn to_screen_to_world_roundtrip(
            scale in MIN_SCALE..MAX_SCALE,
            off_x in -5_000.0..5_000.0f64,
            off_y in -5_000.0..5_000.0f64,
            x in -200_000.0..200_000.0f64,
            y in -200_000.0..200_000.0f64,
        ) {
            let p = projection(scale, DVec2::new(off_x, off_y));
            let roundtrip = p.to_world(p.to_screen(WorldPoint::new(x, y)));
            prop_assert!((roundtrip.x - x).abs() < 1e-6);
            prop_assert!((roundtrip.y - y).abs() < 1e-6);
        }
    }
}
