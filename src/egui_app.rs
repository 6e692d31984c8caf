//! egui front end: controller, UI state and renderer.

/// Intent dispatch and session ownership.
pub mod controller;
/// Plain data the renderer draws from.
pub mod state;
/// eframe application and widgets.
pub mod ui;
