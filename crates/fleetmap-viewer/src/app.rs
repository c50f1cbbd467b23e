//! The viewer application.
//!
//! Single-threaded and event-driven: import completions are polled each
//! frame, the robot walk ticks on a fixed interval, and every frame repaints
//! the whole scene from the current state — there is no dirty tracking.

use std::path::PathBuf;
use std::time::Instant;

use egui::{Color32, RichText};
use fleetmap_model::{SecurityConfig, TopologyMap, WorldBounds};
use fleetmap_scene::{render, DragController, LayerToggles, SceneFrame, Viewport};
use glam::DVec2;

use crate::import::{ImportKind, ImportMessage, ImportPayload, Importer};
use crate::motion::{RobotWalk, START_POSE, TICK_INTERVAL};
use crate::paint;
use crate::sample;

/// Startup options, mapped from the CLI.
#[derive(Debug, Clone, Default)]
pub struct ViewerOptions {
    pub map_path: Option<PathBuf>,
    pub security_path: Option<PathBuf>,
    pub seed: u64,
}

pub struct ViewerApp {
    map: Option<TopologyMap>,
    security: Option<SecurityConfig>,
    /// Last known world bounds; kept when a map omits its own
    bounds: WorldBounds,
    selected_scene: i64,
    viewport: Viewport,
    drag: DragController,
    toggles: LayerToggles,
    robot: RobotWalk,
    last_tick: Instant,
    importer: Importer,
    error: Option<String>,
    map_file: String,
    security_file: String,
    map_path_input: String,
    security_path_input: String,
}

impl ViewerApp {
    pub fn new(options: ViewerOptions) -> Self {
        let mut app = Self {
            map: None,
            security: None,
            bounds: WorldBounds::default(),
            selected_scene: 0,
            viewport: Viewport::new(),
            drag: DragController::new(),
            toggles: LayerToggles::default(),
            robot: RobotWalk::new(START_POSE, options.seed),
            last_tick: Instant::now(),
            importer: Importer::new(),
            error: None,
            map_file: String::new(),
            security_file: String::new(),
            map_path_input: options
                .map_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            security_path_input: options
                .security_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        };

        app.load_samples();
        if let Some(path) = options.map_path {
            app.request_import(ImportKind::Map, path);
        }
        if let Some(path) = options.security_path {
            app.request_import(ImportKind::Security, path);
        }
        app
    }

    /// Restore the embedded sample models and clear any error banner.
    fn load_samples(&mut self) {
        let map = sample::sample_map();
        if let Some(bounds) = map.bounds() {
            self.bounds = bounds;
        }
        self.map = Some(map);
        self.map_file = sample::SAMPLE_MAP_NAME.to_owned();

        let security = sample::sample_security();
        if let Some(id) = security.first_id() {
            self.selected_scene = id;
        }
        self.security = Some(security);
        self.security_file = sample::SAMPLE_SECURITY_NAME.to_owned();

        self.viewport.reset();
        self.error = None;
    }

    fn request_import(&mut self, kind: ImportKind, path: PathBuf) {
        self.error = None;
        self.importer.request(kind, path);
    }

    /// Apply one completed import. Failure leaves the prior model untouched
    /// and surfaces a single user-visible message.
    fn apply_message(&mut self, message: ImportMessage) {
        match message.result {
            Ok(ImportPayload::Map(map)) => {
                tracing::info!(
                    file = %message.file_name,
                    nodes = map.node_count(),
                    lines = map.line_count(),
                    "map imported"
                );
                if let Some(bounds) = map.bounds() {
                    self.bounds = bounds;
                }
                self.map = Some(map);
                self.map_file = message.file_name;
                // Auto-fit: a fresh map gets the exact reset viewport.
                self.viewport.reset();
                self.error = None;
            }
            Ok(ImportPayload::Security(security)) => {
                tracing::info!(
                    file = %message.file_name,
                    scenes = security.len(),
                    "security config imported"
                );
                if let Some(id) = security.first_id() {
                    self.selected_scene = id;
                }
                self.security = Some(security);
                self.security_file = message.file_name;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(kind = %message.kind, file = %message.file_name, error = %err, "import failed");
                self.error = Some(err.to_string());
            }
        }
    }

    fn tick_robot(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if now.duration_since(self.last_tick) >= TICK_INTERVAL {
            self.robot.step();
            self.last_tick = now;
        }
        // Wake up for the next tick even with no user input.
        ctx.request_repaint_after(TICK_INTERVAL.saturating_sub(now.duration_since(self.last_tick)));
    }

    fn controls_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("AMR Warehouse Map");

            ui.horizontal(|ui| {
                if ui.button("Zoom In").clicked() {
                    self.viewport.zoom(1);
                    tracing::debug!(scale = self.viewport.scale, "zoom in");
                }
                if ui.button("Zoom Out").clicked() {
                    self.viewport.zoom(-1);
                    tracing::debug!(scale = self.viewport.scale, "zoom out");
                }
                if ui.button("Reset").clicked() {
                    self.viewport.reset();
                    tracing::debug!("viewport reset");
                }
            });

            ui.separator();
            ui.checkbox(&mut self.toggles.show_nodes, "Show waypoints");
            ui.checkbox(&mut self.toggles.show_paths, "Show paths");
            ui.checkbox(&mut self.toggles.show_charge_stations, "Show charge stations");

            let scene_choices: Vec<(i64, String)> = self
                .security
                .as_ref()
                .map(|security| {
                    security
                        .scenes()
                        .iter()
                        .map(|scene| (scene.id, scene.name.clone()))
                        .collect()
                })
                .unwrap_or_default();
            if !scene_choices.is_empty() {
                let current = scene_choices
                    .iter()
                    .find(|(id, _)| *id == self.selected_scene)
                    .map(|(_, name)| name.clone())
                    .unwrap_or_else(|| self.selected_scene.to_string());
                egui::ComboBox::from_label("Avoidance mode")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for (id, name) in &scene_choices {
                            ui.selectable_value(&mut self.selected_scene, *id, name);
                        }
                    });
            }

            ui.separator();
            ui.label("Map file (compress.json)");
            ui.text_edit_singleline(&mut self.map_path_input);
            if ui.button("Load map").clicked() {
                self.request_import(ImportKind::Map, PathBuf::from(self.map_path_input.clone()));
            }
            ui.label("Security file (security.json)");
            ui.text_edit_singleline(&mut self.security_path_input);
            if ui.button("Load security").clicked() {
                self.request_import(
                    ImportKind::Security,
                    PathBuf::from(self.security_path_input.clone()),
                );
            }
            if ui.button("Reset to sample data").clicked() {
                self.load_samples();
            }
            if let Some(error) = &self.error {
                ui.label(RichText::new(error).color(Color32::RED));
            }

            ui.separator();
            let pose = self.robot.pose();
            ui.label(format!(
                "Position: ({}k, {}k)",
                (pose.x / 1000.0).round() as i64,
                (pose.y / 1000.0).round() as i64
            ));
            ui.label(format!("Orientation: {:.1}°", pose.angle.to_degrees()));
            ui.label(format!("Scale: {:.2}‰", self.viewport.scale * 1000.0));
            ui.label(format!("Map: {}", self.map_file));
            ui.label(format!("Security: {}", self.security_file));
        });
    }

    fn canvas_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;

            self.handle_pointer(ctx, &response, rect);

            let canvas = DVec2::new(f64::from(rect.width()), f64::from(rect.height()));
            let frame = SceneFrame {
                map: self.map.as_ref(),
                security: self.security.as_ref(),
                selected_scene: self.selected_scene,
                robot: self.robot.pose(),
                toggles: self.toggles,
            };
            let cmds = render(&frame, &self.viewport, self.bounds, canvas);
            paint::paint(&painter, rect, &cmds);
        });
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response, rect: egui::Rect) {
        let canvas_pos =
            |p: egui::Pos2| DVec2::new(f64::from(p.x - rect.min.x), f64::from(p.y - rect.min.y));

        if response.drag_started() {
            if let Some(p) = response.interact_pointer_pos() {
                self.drag.pointer_down(canvas_pos(p), &self.viewport);
            }
        }

        if self.drag.is_dragging() {
            // Track the pointer at context scope so a release off-canvas
            // still ends the drag.
            let (pointer_pos, any_down) =
                ctx.input(|i| (i.pointer.latest_pos(), i.pointer.any_down()));
            if any_down {
                if let Some(p) = pointer_pos {
                    self.drag.pointer_move(canvas_pos(p), &mut self.viewport);
                }
            } else {
                self.drag.pointer_up();
            }
        }

        if response.hovered() {
            let scroll = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll > 0.0 {
                self.viewport.zoom(1);
            } else if scroll < 0.0 {
                self.viewport.zoom(-1);
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Some(message) = self.importer.poll() {
            self.apply_message(message);
        }
        self.tick_robot(ctx);
        self.controls_panel(ctx);
        self.canvas_panel(ctx);
    }
}
