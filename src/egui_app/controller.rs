//! Bridges the review session to the egui UI.
//!
//! The controller owns the [`Session`] and turns [`ReviewIntent`]s into session
//! calls plus status updates. Anything that needs the platform (dialogs,
//! clipboard, screen capture) goes through [`ReviewHost`], so the controller
//! runs headless in tests.

use std::path::PathBuf;

use crate::config::{self, AppSettings};
use crate::egui_app::state::{PanelSlot, ReviewView, StatusBarState, UiState};
use crate::egui_app::ui::style::StatusTone;
use crate::review::{DatasetLayout, PanelRole, ReviewError, Session};

mod dispatch;
mod panels;

pub use panels::{color_image_to_rgba, decode_panel};

/// Platform services the controller calls while handling intents.
pub trait ReviewHost {
    /// Ask the reviewer to confirm flagging `identifier`.
    fn confirm_flag(&mut self, identifier: &str) -> bool;
    /// Place `text` on the system clipboard.
    fn copy_text(&mut self, text: &str);
    /// Ask the renderer for a capture of the display area.
    ///
    /// The image comes back later through [`ReviewController::finish_capture`].
    fn request_screenshot(&mut self);
    /// Show a modal notification.
    fn notify(&mut self, tone: StatusTone, title: &str, message: &str);
}

/// Maintains app state and bridges the review session to the egui UI.
pub struct ReviewController {
    pub ui: UiState,
    settings: AppSettings,
    session: Option<Session>,
    capture_pending: bool,
}

impl ReviewController {
    pub fn new(settings: AppSettings) -> Self {
        let mut ui = UiState::default();
        if let Some(path) = settings.last_base_path.as_ref() {
            ui.launcher.path_input = path.display().to_string();
        }
        Self {
            ui,
            settings,
            session: None,
            capture_pending: false,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Open the dataset at `base`, resuming its saved position.
    ///
    /// An already open session has its progress saved first. On failure the
    /// previous session stays active.
    pub fn open_dataset(&mut self, base: impl Into<PathBuf>) -> Result<(), ReviewError> {
        let base = base.into();
        let layout = DatasetLayout::open(&base)?;
        let mut session = Session::open(layout)?;
        let position = session.restore_progress();
        if self.settings.review.reload_flags_from_log {
            match session.replay_error_log() {
                Ok(count) if count > 0 => tracing::info!("Restored {count} flagged samples"),
                Ok(_) => {}
                Err(err) => tracing::warn!("Could not replay error log: {err}"),
            }
        }
        tracing::info!(
            "Opened {} with {} samples at position {}",
            base.display(),
            session.len(),
            position + 1
        );

        if let Err(err) = self.shutdown() {
            tracing::error!("Failed to save progress of previous dataset: {err}");
        }
        self.session = Some(session);
        self.capture_pending = false;
        self.remember_base_path(base);
        self.ui.launcher.error = None;
        self.refresh_view();
        let label = self
            .ui
            .review
            .as_ref()
            .map(|view| view.progress_label.clone())
            .unwrap_or_default();
        self.set_status(format!("Resumed at {label}"), StatusTone::Info);
        Ok(())
    }

    /// Open whatever path the launcher field holds, reporting failures inline.
    pub fn open_from_launcher(&mut self) {
        let input = self.ui.launcher.path_input.trim().to_string();
        if input.is_empty() {
            self.ui.launcher.error = Some("Enter a dataset path".into());
            return;
        }
        if let Err(err) = self.open_dataset(PathBuf::from(&input)) {
            tracing::warn!("Failed to open {input}: {err}");
            self.ui.launcher.error = Some(err.to_string());
            self.set_status(err.to_string(), StatusTone::Error);
        }
    }

    /// Save progress of the open session, if any.
    pub fn shutdown(&mut self) -> Result<(), ReviewError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        session.persist_progress()?;
        tracing::info!(
            "Saved progress {} for {}",
            session.cursor(),
            session.layout().base().display()
        );
        Ok(())
    }

    /// Roles with a panel on screen for the open dataset.
    pub fn visible_roles(&self) -> Vec<PanelRole> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let show_inference =
            self.settings.review.show_inference && session.layout().has_inference();
        PanelRole::ALL
            .into_iter()
            .filter(|role| role.is_required() || show_inference)
            .collect()
    }

    fn refresh_view(&mut self) {
        let roles = self.visible_roles();
        self.ui.review = self.session.as_ref().map(|session| {
            let identifier = session.current_identifier().to_string();
            let panels = roles
                .into_iter()
                .map(|role| PanelSlot {
                    role,
                    path: session.layout().artifact_path(role, &identifier),
                })
                .collect();
            ReviewView {
                progress_label: session.progress_label(),
                flagged: session.is_current_flagged(),
                flagged_count: session.flagged_count(),
                identifier,
                panels,
            }
        });
    }

    fn remember_base_path(&mut self, base: PathBuf) {
        self.ui.launcher.path_input = base.display().to_string();
        if self.settings.last_base_path.as_ref() == Some(&base) {
            return;
        }
        self.settings.last_base_path = Some(base);
        if let Err(err) = config::save(&self.settings) {
            tracing::warn!("Failed to save settings: {err}");
        }
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::new(text, tone);
    }
}

#[cfg(test)]
mod test_support;
