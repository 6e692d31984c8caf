use image::RgbaImage;

use super::{ReviewController, ReviewHost};
use crate::egui_app::ui::style::StatusTone;
use crate::review::{FlagOutcome, ReviewIntent};

impl ReviewController {
    /// Apply one reviewer action to the open session.
    pub fn handle_intent(&mut self, intent: ReviewIntent, host: &mut dyn ReviewHost) {
        if self.session.is_none() {
            return;
        }
        match intent {
            ReviewIntent::Next => self.step(true),
            ReviewIntent::Prev => self.step(false),
            ReviewIntent::Flag => self.flag_current(host),
            ReviewIntent::CopyIdentifier => self.copy_identifier(host),
            ReviewIntent::CaptureScreenshot => self.request_capture(host),
        }
    }

    /// True while a screenshot was requested and has not arrived yet.
    pub fn capture_pending(&self) -> bool {
        self.capture_pending
    }

    /// Store the screenshot requested by [`ReviewIntent::CaptureScreenshot`].
    pub fn finish_capture(&mut self, rendered: &RgbaImage, host: &mut dyn ReviewHost) {
        if !self.capture_pending {
            return;
        }
        self.capture_pending = false;
        let Some(session) = self.session.as_ref() else {
            return;
        };
        match session.capture_display_artifact(rendered) {
            Ok(path) => {
                tracing::info!("Saved screenshot {}", path.display());
                host.notify(
                    StatusTone::Info,
                    "Screenshot saved",
                    &path.display().to_string(),
                );
                self.set_status(
                    format!("Screenshot saved to {}", path.display()),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::error!("Screenshot failed: {err}");
                host.notify(StatusTone::Error, "Screenshot failed", &err.to_string());
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    fn step(&mut self, forward: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let before = session.cursor();
        if forward {
            session.next();
        } else {
            session.prev();
        }
        if session.cursor() == before {
            let edge = if forward { "last" } else { "first" };
            self.set_status(format!("Already at the {edge} sample"), StatusTone::Idle);
            return;
        }
        self.refresh_view();
        if let Some(view) = self.ui.review.as_ref() {
            let text = format!("{} {}", view.progress_label, view.identifier);
            self.set_status(text, StatusTone::Idle);
        }
    }

    fn flag_current(&mut self, host: &mut dyn ReviewHost) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let identifier = session.current_identifier().to_string();
        let confirm = !session.is_current_flagged() && host.confirm_flag(&identifier);
        let result = session.flag_current_as_error(confirm);
        match result {
            Ok(FlagOutcome::Recorded) => {
                host.notify(StatusTone::Info, "Error recorded", &identifier);
                self.set_status(format!("Flagged {identifier}"), StatusTone::Info);
            }
            Ok(FlagOutcome::AlreadyFlagged) => {
                host.notify(
                    StatusTone::Warning,
                    "Already flagged",
                    &format!("{identifier} is already in the error log"),
                );
                self.set_status(format!("{identifier} already flagged"), StatusTone::Warning);
            }
            Ok(FlagOutcome::Cancelled) => {
                host.notify(StatusTone::Info, "Cancelled", "Flag cancelled");
                self.set_status("Flag cancelled", StatusTone::Idle);
            }
            Err(err) => {
                tracing::error!("Failed to flag {identifier}: {err}");
                host.notify(StatusTone::Error, "Could not record error", &err.to_string());
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
        self.refresh_view();
    }

    fn copy_identifier(&mut self, host: &mut dyn ReviewHost) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let identifier = session.copy_current_identifier();
        host.copy_text(&identifier);
        self.set_status(
            format!("Copied {identifier} to clipboard"),
            StatusTone::Info,
        );
    }

    fn request_capture(&mut self, host: &mut dyn ReviewHost) {
        if self.capture_pending {
            return;
        }
        self.capture_pending = true;
        host.request_screenshot();
    }
}
