//! egui paint backend.
//!
//! Translates the scene layer's backend-neutral draw commands into egui
//! shapes. Command geometry is relative to the canvas origin, so everything
//! is offset by the allocated rect before painting.

use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Shape, Stroke};
use fleetmap_scene::{Color, DrawCmd};
use glam::DVec2;

/// Paint a command list into the given canvas rect.
pub fn paint(painter: &Painter, rect: Rect, cmds: &[DrawCmd]) {
    for cmd in cmds {
        match cmd {
            DrawCmd::Clear { color } => {
                painter.rect_filled(rect, CornerRadius::ZERO, color32(*color));
            }

            DrawCmd::Polyline {
                points,
                stroke,
                dash,
            } => {
                let points: Vec<Pos2> = points.iter().map(|&p| pos(rect, p)).collect();
                let stroke = Stroke::new(stroke.width as f32, color32(stroke.color));
                match dash {
                    Some(pattern) => painter.extend(Shape::dashed_line(
                        &points,
                        stroke,
                        pattern.dash as f32,
                        pattern.gap as f32,
                    )),
                    None => {
                        painter.add(Shape::line(points, stroke));
                    }
                }
            }

            DrawCmd::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let center = pos(rect, *center);
                painter.circle_filled(center, *radius as f32, color32(*fill));
                if let Some(stroke) = stroke {
                    painter.circle_stroke(
                        center,
                        *radius as f32,
                        Stroke::new(stroke.width as f32, color32(stroke.color)),
                    );
                }
            }

            DrawCmd::Polygon { points, fill } => {
                let points: Vec<Pos2> = points.iter().map(|&p| pos(rect, p)).collect();
                painter.add(Shape::convex_polygon(points, color32(*fill), Stroke::NONE));
            }

            DrawCmd::Text {
                pos: at,
                text,
                size,
                color,
            } => {
                painter.text(
                    pos(rect, *at),
                    Align2::CENTER_CENTER,
                    text,
                    FontId::proportional(*size as f32),
                    color32(*color),
                );
            }
        }
    }
}

fn color32(c: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn pos(rect: Rect, p: DVec2) -> Pos2 {
    Pos2::new(rect.min.x + p.x as f32, rect.min.y + p.y as f32)
}
