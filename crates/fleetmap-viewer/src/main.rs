use std::path::PathBuf;

use clap::Parser;
use fleetmap_viewer::{ViewerApp, ViewerOptions};
use tracing_subscriber::EnvFilter;

/// AMR warehouse map viewer.
#[derive(Debug, Parser)]
#[command(name = "fleetmap-viewer", version, about)]
struct Args {
    /// Map file (compress.json) to load on startup
    #[arg(long)]
    map: Option<PathBuf>,

    /// Security config file (security.json) to load on startup
    #[arg(long)]
    security: Option<PathBuf>,

    /// Seed for the robot walk
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let options = ViewerOptions {
        map_path: args.map,
        security_path: args.security,
        seed: args.seed,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Fleetmap Viewer"),
        ..Default::default()
    };
    eframe::run_native(
        "fleetmap-viewer",
        native_options,
        Box::new(|_cc| Ok(Box::new(ViewerApp::new(options)))),
    )
}
