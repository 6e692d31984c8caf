//! Shared state types for the egui UI.

use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub launcher: LauncherState,
    /// Present once a dataset is open.
    pub review: Option<ReviewView>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            launcher: LauncherState::default(),
            review: None,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
    pub tone: StatusTone,
}

impl StatusBarState {
    /// Default status shown before a dataset is opened.
    pub fn idle() -> Self {
        Self::new("Choose a dataset folder to start reviewing", StatusTone::Idle)
    }

    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            badge_label: tone.label().into(),
            badge_color: style::status_badge_color(tone),
            tone,
        }
    }
}

/// Path entry shown before a session exists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LauncherState {
    pub path_input: String,
    /// Why the last open attempt failed.
    pub error: Option<String>,
}

/// Everything the renderer needs to draw the current sample.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewView {
    pub identifier: String,
    /// `index+1/total`.
    pub progress_label: String,
    pub flagged: bool,
    pub flagged_count: usize,
    pub panels: Vec<PanelSlot>,
}

/// One image panel for the current sample.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSlot {
    pub role: crate::review::PanelRole,
    pub path: std::path::PathBuf,
}
