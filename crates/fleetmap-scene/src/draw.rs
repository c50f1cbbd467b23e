//! Backend-neutral draw commands.
//!
//! The render pipeline emits a flat command list in screen space; a paint
//! backend (egui in the viewer) translates commands into its own shapes.
//! Keeping the commands inspectable makes the layer rules testable without
//! a window.

use glam::DVec2;

/// An RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// The fixed palette, matching the classic viewer colours.
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GRID: Color = Color::rgb(0xf0, 0xf0, 0xf0);
    pub const PATH: Color = Color::rgb(0x74, 0xb9, 0xff);
    pub const NODE_WAYPOINT: Color = Color::rgb(0x00, 0xb8, 0x94);
    pub const NODE_CHARGE: Color = Color::rgb(0xe1, 0x70, 0x55);
    pub const NODE_OTHER: Color = Color::rgb(0x63, 0x6e, 0x72);
    /// Outlines and labels
    pub const INK: Color = Color::rgb(0x2d, 0x34, 0x36);
    pub const CHARGE_MARKER: Color = Color::rgb(0xff, 0xea, 0xa7);
    pub const CHARGE_GLYPH: Color = Color::rgb(0xfd, 0xcb, 0x6e);
    pub const ROBOT_BODY: Color = Color::rgb(0x09, 0x84, 0xe3);
    pub const ROBOT_ARROW: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const AVOID_FILL: Color = Color::rgba(0xff, 0x6b, 0x6b, 26);
    pub const AVOID_STROKE: Color = Color::rgba(0xff, 0x6b, 0x6b, 77);
    pub const SCENE_LABEL: Color = Color::rgb(0xe1, 0x70, 0x55);
}

/// Stroke width and colour, in screen units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
}

/// Dash/gap lengths for a dashed polyline, in screen units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash: f64,
    pub gap: f64,
}

/// One drawing operation against the 2D surface.
///
/// All geometry is screen-space; the pipeline converts world coordinates
/// through a single [`Projection`](crate::Projection) before emitting.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole surface
    Clear { color: Color },

    /// Stroke an open polyline, optionally dashed
    Polyline {
        points: Vec<DVec2>,
        stroke: StrokeStyle,
        dash: Option<DashPattern>,
    },

    /// Fill (and optionally outline) a circle
    Circle {
        center: DVec2,
        radius: f64,
        fill: Color,
        stroke: Option<StrokeStyle>,
    },

    /// Fill a convex polygon
    Polygon { points: Vec<DVec2>, fill: Color },

    /// Draw text centred on `pos`
    Text {
        pos: DVec2,
        text: String,
        size: f64,
        color: Color,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Color::rgb(1, 2, 3).a, 255);
    }

    #[test]
    fn avoidance_colours_are_translucent() {
        assert!(palette::AVOID_FILL.a < palette::AVOID_STROKE.a);
        assert!(palette::AVOID_STROKE.a < 255);
    }
}
