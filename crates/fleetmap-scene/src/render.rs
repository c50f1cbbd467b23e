//! The layered render pass.
//!
//! A pure function of the scene inputs: it reads the map, security config,
//! robot pose, viewport and layer toggles and emits a full draw-command list
//! in a fixed layer order — grid, paths, nodes, charge stations, robot.
//! Nothing is mutated and nothing is cached; every state change repaints
//! everything.

use fleetmap_model::{NodeClass, SecurityConfig, TopologyMap, WorldBounds, WorldPoint};
use glam::DVec2;

use crate::draw::{palette, DashPattern, DrawCmd, StrokeStyle};
use crate::viewport::{Projection, Viewport};

/// Avoidance-circle radius when the selected scene cannot be resolved.
pub const FALLBACK_AVOIDANCE_RADIUS: f64 = 500.0;

/// Grid lines per axis (spacing is 1/10 of each world bound).
const GRID_DIVISIONS: u32 = 10;

// Geometry constants in world units; the projection scales them per pass.
const GRID_STROKE: f64 = 100.0;
const PATH_STROKE: f64 = 300.0;
const PATH_DASH: f64 = 1000.0;
const PATH_GAP: f64 = 500.0;
const NODE_RADIUS: f64 = 800.0;
const NODE_OUTLINE: f64 = 200.0;
const NODE_LABEL_SIZE: f64 = 1000.0;
const NODE_LABEL_LIFT: f64 = 1500.0;
const CHARGE_RADIUS: f64 = 1200.0;
const CHARGE_GLYPH_SIZE: f64 = 2000.0;
const CHARGE_GLYPH_DROP: f64 = 600.0;
const AVOID_STROKE_WIDTH: f64 = 200.0;
const ROBOT_HALF_LENGTH: f64 = 1500.0;
const ROBOT_HALF_WIDTH: f64 = 1000.0;
const ROBOT_ARROW: [WorldPoint; 3] = [
    WorldPoint::new(1200.0, 0.0),
    WorldPoint::new(800.0, -600.0),
    WorldPoint::new(800.0, 600.0),
];
const POSE_LABEL_SIZE: f64 = 1000.0;
const POSE_LABEL_LIFT: f64 = 3000.0;
const SCENE_LABEL_DROP: f64 = 4000.0;

/// The robot's pose as reported by the motion source.
///
/// Deliberately validation-free: coordinates may drift outside the drawn
/// world bounds and the heading is not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RobotPose {
    pub x: f64,
    pub y: f64,
    /// Heading in radians
    pub angle: f64,
}

/// Independent visibility switches for the toggle-gated layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerToggles {
    pub show_paths: bool,
    pub show_nodes: bool,
    pub show_charge_stations: bool,
}

impl Default for LayerToggles {
    fn default() -> Self {
        Self {
            show_paths: true,
            show_nodes: true,
            show_charge_stations: true,
        }
    }
}

/// Everything the render pass reads.
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame<'a> {
    pub map: Option<&'a TopologyMap>,
    pub security: Option<&'a SecurityConfig>,
    /// Currently selected avoidance scene id
    pub selected_scene: i64,
    pub robot: RobotPose,
    pub toggles: LayerToggles,
}

/// Produce the full draw-command list for one frame.
///
/// With no map loaded this is a bare clear — the expected steady state
/// before any file has been imported. Dangling edge endpoints, unknown
/// charge names and unresolved scene ids never fail; they are skipped or
/// defaulted per the model contract.
pub fn render(
    frame: &SceneFrame<'_>,
    viewport: &Viewport,
    bounds: WorldBounds,
    canvas: DVec2,
) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Clear {
        color: palette::BACKGROUND,
    }];

    let Some(map) = frame.map else {
        return cmds;
    };

    let proj = Projection::new(viewport, bounds, canvas);

    draw_grid(&mut cmds, &proj);
    if frame.toggles.show_paths {
        draw_paths(&mut cmds, &proj, map);
    }
    if frame.toggles.show_nodes {
        draw_nodes(&mut cmds, &proj, map);
    }
    if frame.toggles.show_charge_stations {
        draw_charge_stations(&mut cmds, &proj, map);
    }
    draw_robot(&mut cmds, &proj, frame);

    cmds
}

/// Fixed-spacing lattice from 0 to the map bounds inclusive.
fn draw_grid(cmds: &mut Vec<DrawCmd>, proj: &Projection) {
    let bounds = proj.bounds();
    let stroke = StrokeStyle {
        width: proj.px(GRID_STROKE),
        color: palette::GRID,
    };

    for i in 0..=GRID_DIVISIONS {
        let x = bounds.width * f64::from(i) / f64::from(GRID_DIVISIONS);
        cmds.push(DrawCmd::Polyline {
            points: vec![
                proj.to_screen(WorldPoint::new(x, 0.0)),
                proj.to_screen(WorldPoint::new(x, bounds.height)),
            ],
            stroke,
            dash: None,
        });
    }
    for i in 0..=GRID_DIVISIONS {
        let y = bounds.height * f64::from(i) / f64::from(GRID_DIVISIONS);
        cmds.push(DrawCmd::Polyline {
            points: vec![
                proj.to_screen(WorldPoint::new(0.0, y)),
                proj.to_screen(WorldPoint::new(bounds.width, y)),
            ],
            stroke,
            dash: None,
        });
    }
}

/// Dashed edge polylines, in array order (later edges paint over earlier).
fn draw_paths(cmds: &mut Vec<DrawCmd>, proj: &Projection, map: &TopologyMap) {
    let stroke = StrokeStyle {
        width: proj.px(PATH_STROKE),
        color: palette::PATH,
    };
    let dash = DashPattern {
        dash: proj.px(PATH_DASH),
        gap: proj.px(PATH_GAP),
    };

    for edge in map.lines() {
        if !edge.is_drawable() {
            continue;
        }
        cmds.push(DrawCmd::Polyline {
            points: edge.path.iter().map(|&p| proj.to_screen(p)).collect(),
            stroke,
            dash: Some(dash),
        });
    }
}

/// Node markers coloured by class, with a short label above each.
fn draw_nodes(cmds: &mut Vec<DrawCmd>, proj: &Projection, map: &TopologyMap) {
    for node in map.nodes() {
        let fill = match node.class() {
            NodeClass::Waypoint => palette::NODE_WAYPOINT,
            NodeClass::Charge => palette::NODE_CHARGE,
            NodeClass::Other => palette::NODE_OTHER,
        };

        cmds.push(DrawCmd::Circle {
            center: proj.to_screen(WorldPoint::new(node.x, node.y)),
            radius: proj.px(NODE_RADIUS),
            fill,
            stroke: Some(StrokeStyle {
                width: proj.px(NODE_OUTLINE),
                color: palette::INK,
            }),
        });
        cmds.push(DrawCmd::Text {
            pos: proj.to_screen(WorldPoint::new(node.x, node.y - NODE_LABEL_LIFT)),
            text: short_label(&node.name),
            size: proj.px(NODE_LABEL_SIZE),
            color: palette::INK,
        });
    }
}

/// Charge markers for bindings whose node name resolves. Dangling bindings
/// produce nothing.
fn draw_charge_stations(cmds: &mut Vec<DrawCmd>, proj: &Projection, map: &TopologyMap) {
    for binding in map.charge_bindings() {
        let Some(node) = map.node_by_name(&binding.node_name) else {
            continue;
        };

        cmds.push(DrawCmd::Circle {
            center: proj.to_screen(WorldPoint::new(node.x, node.y)),
            radius: proj.px(CHARGE_RADIUS),
            fill: palette::CHARGE_MARKER,
            stroke: None,
        });
        cmds.push(DrawCmd::Text {
            pos: proj.to_screen(WorldPoint::new(node.x, node.y + CHARGE_GLYPH_DROP)),
            text: "⚡".to_owned(),
            size: proj.px(CHARGE_GLYPH_SIZE),
            color: palette::CHARGE_GLYPH,
        });
    }
}

/// The robot, always on top: avoidance disc, oriented body, heading arrow,
/// then screen-stable pose and scene labels.
fn draw_robot(cmds: &mut Vec<DrawCmd>, proj: &Projection, frame: &SceneFrame<'_>) {
    let robot = frame.robot;
    let scene = frame
        .security
        .and_then(|security| security.scene_by_id(frame.selected_scene));
    let radius = scene
        .map(|s| s.forward())
        .unwrap_or(FALLBACK_AVOIDANCE_RADIUS);
    let center = proj.to_screen(WorldPoint::new(robot.x, robot.y));

    cmds.push(DrawCmd::Circle {
        center,
        radius: proj.px(radius),
        fill: palette::AVOID_FILL,
        stroke: Some(StrokeStyle {
            width: proj.px(AVOID_STROKE_WIDTH),
            color: palette::AVOID_STROKE,
        }),
    });

    let body = [
        WorldPoint::new(-ROBOT_HALF_LENGTH, -ROBOT_HALF_WIDTH),
        WorldPoint::new(ROBOT_HALF_LENGTH, -ROBOT_HALF_WIDTH),
        WorldPoint::new(ROBOT_HALF_LENGTH, ROBOT_HALF_WIDTH),
        WorldPoint::new(-ROBOT_HALF_LENGTH, ROBOT_HALF_WIDTH),
    ];
    cmds.push(DrawCmd::Polygon {
        points: pose_polygon(&body, robot, proj),
        fill: palette::ROBOT_BODY,
    });
    cmds.push(DrawCmd::Polygon {
        points: pose_polygon(&ROBOT_ARROW, robot, proj),
        fill: palette::ROBOT_ARROW,
    });

    // Labels stay unrotated regardless of heading.
    cmds.push(DrawCmd::Text {
        pos: proj.to_screen(WorldPoint::new(robot.x, robot.y - POSE_LABEL_LIFT)),
        text: format!(
            "({}k, {}k)",
            (robot.x / 1000.0).round() as i64,
            (robot.y / 1000.0).round() as i64
        ),
        size: proj.px(POSE_LABEL_SIZE),
        color: palette::INK,
    });
    if let Some(scene) = scene {
        cmds.push(DrawCmd::Text {
            pos: proj.to_screen(WorldPoint::new(robot.x, robot.y + SCENE_LABEL_DROP)),
            text: scene.name.clone(),
            size: proj.px(POSE_LABEL_SIZE),
            color: palette::SCENE_LABEL,
        });
    }
}

/// Rotate body-local points by the robot's heading, translate to its
/// position and project to screen space.
fn pose_polygon(local: &[WorldPoint], robot: RobotPose, proj: &Projection) -> Vec<DVec2> {
    let (sin, cos) = robot.angle.sin_cos();
    local
        .iter()
        .map(|p| {
            proj.to_screen(WorldPoint::new(
                robot.x + p.x * cos - p.y * sin,
                robot.y + p.x * sin + p.y * cos,
            ))
        })
        .collect()
}

/// Display label for a node: the last three characters of its name.
fn short_label(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let start = chars.len().saturating_sub(3);
    chars[start..].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::DEFAULT_SCALE;

    const MAP: &str = r#"{
        "nodeKeys": ["x", "y", "type", "content", "name", "isTurn", "shelfIsTurn", "extraTypes"],
        "lineKeys": ["from", "to", "leftWidth", "rightWidth", "startExpandDistance", "endExpandDistance", "path"],
        "nodeArr": [
            [10000, 20000, 0, "10000001", "10000001", 0, 1, []],
            [30000, 40000, 6, "10000002", "10000002", 0, 1, [0]]
        ],
        "lineArr": [
            ["10000001", "10000002", -1, -1, -1, -1, [[10000, 20000], [30000, 40000]]]
        ],
        "chargeCoor": [["10000002", {"x": 0, "y": 0}]],
        "type": "topo",
        "width": 100000,
        "height": 100000
    }"#;

    const SECURITY: &str =
        r#"{"AvoidSceneSet": [{"id": 1, "name": "Std", "config": {"noload": {"forward": 500}}}]}"#;

    fn canvas() -> DVec2 {
        DVec2::new(1000.0, 600.0)
    }

    fn frame<'a>(
        map: Option<&'a TopologyMap>,
        security: Option<&'a SecurityConfig>,
    ) -> SceneFrame<'a> {
        SceneFrame {
            map,
            security,
            selected_scene: 1,
            robot: RobotPose {
                x: 50_000.0,
                y: 50_000.0,
                angle: 0.0,
            },
            toggles: LayerToggles::default(),
        }
    }

    fn render_default(frame: &SceneFrame<'_>) -> Vec<DrawCmd> {
        render(frame, &Viewport::default(), WorldBounds::default(), canvas())
    }

    fn dashed_polylines(cmds: &[DrawCmd]) -> usize {
        cmds.iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Polyline { dash: Some(_), .. }))
            .count()
    }

    fn texts(cmds: &[DrawCmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn no_map_renders_bare_clear() {
        let cmds = render_default(&frame(None, None));
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], DrawCmd::Clear { .. }));
    }

    #[test]
    fn clear_is_first_and_grid_always_present() {
        let map = TopologyMap::decode(MAP).unwrap();
        let mut scene = frame(Some(&map), None);
        scene.toggles = LayerToggles {
            show_paths: false,
            show_nodes: false,
            show_charge_stations: false,
        };
        let cmds = render_default(&scene);

        assert!(matches!(cmds[0], DrawCmd::Clear { .. }));
        let grid_lines = cmds
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Polyline { dash: None, .. }))
            .count();
        assert_eq!(grid_lines, 22); // 11 vertical + 11 horizontal
        // Toggled-off layers emit nothing.
        assert_eq!(dashed_polylines(&cmds), 0);
    }

    #[test]
    fn full_scenario_composites_every_layer() {
        let map = TopologyMap::decode(MAP).unwrap();
        let security = SecurityConfig::decode(SECURITY).unwrap();
        let cmds = render_default(&frame(Some(&map), Some(&security)));

        // One dashed path for the single 2-point edge.
        assert_eq!(dashed_polylines(&cmds), 1);

        // Two node discs with differing fills, plus charge marker and
        // avoidance disc.
        let node_fills: Vec<_> = cmds
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Circle { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(node_fills.len(), 4);
        assert_eq!(node_fills[0], palette::NODE_WAYPOINT);
        assert_eq!(node_fills[1], palette::NODE_CHARGE);
        assert_ne!(node_fills[0], node_fills[1]);

        // Avoidance disc uses the selected scene's forward distance.
        let avoid = cmds.iter().rev().find_map(|cmd| match cmd {
            DrawCmd::Circle { radius, fill, .. } if *fill == palette::AVOID_FILL => Some(*radius),
            _ => None,
        });
        assert_eq!(avoid, Some(500.0 * DEFAULT_SCALE));

        // Scene label present and robot drawn last (after all map layers).
        assert!(texts(&cmds).contains(&"Std"));
        let last_polygon = cmds
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCmd::Polygon { .. }))
            .unwrap();
        let last_map_circle = cmds
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCmd::Circle { fill, .. } if *fill == palette::CHARGE_MARKER))
            .unwrap();
        assert!(last_polygon > last_map_circle);
    }

    #[test]
    fn short_edges_emit_no_stroke() {
        let raw = r#"{
            "nodeKeys": ["x", "y", "name"],
            "lineKeys": ["from", "to", "path"],
            "nodeArr": [[1, 1, "a"]],
            "lineArr": [
                ["a", "b", []],
                ["a", "b", [[1, 1]]]
            ]
        }"#;
        let map = TopologyMap::decode(raw).unwrap();
        let cmds = render_default(&frame(Some(&map), None));
        assert_eq!(dashed_polylines(&cmds), 0);
    }

    #[test]
    fn dangling_charge_binding_is_silently_skipped() {
        let raw = r#"{
            "nodeKeys": ["x", "y", "name"],
            "lineKeys": [],
            "nodeArr": [[1, 1, "a"]],
            "chargeCoor": [["ghost", {"x": 0, "y": 0}]]
        }"#;
        let map = TopologyMap::decode(raw).unwrap();
        let cmds = render_default(&frame(Some(&map), None));

        let charge_markers = cmds
            .iter()
            .filter(|cmd| {
                matches!(cmd, DrawCmd::Circle { fill, .. } if *fill == palette::CHARGE_MARKER)
            })
            .count();
        assert_eq!(charge_markers, 0);
    }

    #[test]
    fn unresolved_scene_falls_back_to_default_radius() {
        let map = TopologyMap::decode(MAP).unwrap();
        let security = SecurityConfig::decode(SECURITY).unwrap();
        let mut scene = frame(Some(&map), Some(&security));
        scene.selected_scene = 99;
        let cmds = render_default(&scene);

        let avoid = cmds.iter().find_map(|cmd| match cmd {
            DrawCmd::Circle { radius, fill, .. } if *fill == palette::AVOID_FILL => Some(*radius),
            _ => None,
        });
        assert_eq!(avoid, Some(FALLBACK_AVOIDANCE_RADIUS * DEFAULT_SCALE));
        // No scene resolved, so no scene label either.
        assert!(!texts(&cmds).contains(&"Std"));
    }

    #[test]
    fn node_labels_use_last_three_characters() {
        assert_eq!(short_label("10000007"), "007");
        assert_eq!(short_label("ab"), "ab");
        assert_eq!(short_label(""), "");
    }

    #[test]
    fn pose_label_rounds_to_thousands() {
        let map = TopologyMap::decode(MAP).unwrap();
        let mut scene = frame(Some(&map), None);
        scene.robot = RobotPose {
            x: 49_043.0,
            y: 74_172.0,
            angle: 1.3,
        };
        let cmds = render_default(&scene);
        assert!(texts(&cmds).contains(&"(49k, 74k)"));
    }

    #[test]
    fn heading_rotates_the_body_polygon() {
        let robot = RobotPose {
            x: 0.0,
            y: 0.0,
            angle: std::f64::consts::FRAC_PI_2,
        };
        let proj = Projection::new(
            &Viewport::default(),
            WorldBounds::default(),
            DVec2::new(1000.0, 600.0),
        );
        let square = [WorldPoint::new(100.0, 0.0)];
        let rotated = pose_polygon(&square, robot, &proj);
        let unrotated = proj.to_screen(WorldPoint::new(0.0, 100.0));
        assert!((rotated[0] - unrotated).length() < 1e-9);
    }
}
