//! Fleetmap viewer
//!
//! The desktop application around the model and scene crates: an eframe
//! shell with a control panel and a canvas, background file imports, a toy
//! robot-motion source and embedded sample data.

pub mod app;
pub mod import;
pub mod motion;
pub mod paint;
pub mod sample;

pub use app::{ViewerApp, ViewerOptions};
