//! Library exports for the binary and integration tests.
/// Application directory resolution.
pub mod app_dirs;
/// Persisted user settings.
pub mod config;
/// egui front end.
pub mod egui_app;
/// Tracing subscriber setup.
pub mod logging;
/// Review session state machine.
pub mod review;
