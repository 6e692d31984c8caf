#![deny(missing_docs)]

//! Entry point for the change-detection review tool.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::path::PathBuf;

use cdreview::config;
use cdreview::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use cdreview::logging;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Using default settings: {err}");
        config::AppSettings::default()
    });
    let initial_path = dataset_arg(std::env::args_os().skip(1));

    let viewport = egui::ViewportBuilder::default()
        .with_title("Change Detection Review")
        .with_inner_size([settings.window.width, settings.window.height])
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "cdreview",
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(settings, initial_path)))),
    )?;
    Ok(())
}

/// First non-flag argument, taken as the dataset base path.
fn dataset_arg(args: impl Iterator<Item = std::ffi::OsString>) -> Option<PathBuf> {
    args.map(PathBuf::from)
        .find(|arg| !arg.to_string_lossy().starts_with('-'))
}
