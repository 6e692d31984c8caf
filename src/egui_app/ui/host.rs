use eframe::egui;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use super::style::StatusTone;
use crate::egui_app::controller::ReviewHost;

/// [`ReviewHost`] backed by native dialogs and the egui context.
pub struct EguiHost<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiHost<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl ReviewHost for EguiHost<'_> {
    fn confirm_flag(&mut self, identifier: &str) -> bool {
        matches!(
            MessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title("Confirm error")
                .set_description(format!("Record {identifier} as an erroneous sample?"))
                .set_buttons(MessageButtons::YesNo)
                .show(),
            MessageDialogResult::Yes
        )
    }

    fn copy_text(&mut self, text: &str) {
        self.ctx.copy_text(text.to_string());
    }

    fn request_screenshot(&mut self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    fn notify(&mut self, tone: StatusTone, title: &str, message: &str) {
        let level = match tone {
            StatusTone::Idle | StatusTone::Info => MessageLevel::Info,
            StatusTone::Warning => MessageLevel::Warning,
            StatusTone::Error => MessageLevel::Error,
        };
        let _ = MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
