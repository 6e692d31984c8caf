//! egui renderer for the review tool.
use std::path::PathBuf;

use eframe::egui::{self, Color32, Frame, RichText, Ui, Vec2};

use crate::config::AppSettings;
use crate::egui_app::controller::{ReviewController, color_image_to_rgba};
use crate::review::ReviewIntent;

mod host;
mod input;
mod panels;
pub mod style;

pub use host::EguiHost;

/// Smallest window that still fits three panels and the toolbar.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(640.0, 320.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: ReviewController,
    visuals_set: bool,
    textures: panels::PanelTextures,
}

impl EguiApp {
    /// Create the app, opening `initial_path` straight away when given.
    pub fn new(settings: AppSettings, initial_path: Option<PathBuf>) -> Self {
        let mut controller = ReviewController::new(settings);
        if let Some(path) = initial_path {
            controller.ui.launcher.path_input = path.display().to_string();
            controller.open_from_launcher();
        }
        Self {
            controller,
            visuals_set: false,
            textures: panels::PanelTextures::default(),
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn dispatch(&mut self, ctx: &egui::Context, intent: ReviewIntent) {
        let mut host = EguiHost::new(ctx);
        self.controller.handle_intent(intent, &mut host);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let events = ctx.input(|i| i.events.clone());
        for intent in input::shortcut_intents(&events) {
            self.dispatch(ctx, intent);
        }
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if !self.controller.capture_pending() {
            return;
        }
        let Some(captured) = input::captured_screenshot(ctx) else {
            return;
        };
        let Some(rendered) = color_image_to_rgba(&captured) else {
            tracing::warn!("Screenshot had an unexpected pixel buffer size");
            return;
        };
        let mut host = EguiHost::new(ctx);
        self.controller.finish_capture(&rendered, &mut host);
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(style::palette().bg_primary))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(&status.text);
                });
            });
    }

    fn render_launcher(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Open a change-detection dataset");
            ui.label(
                RichText::new("The folder must contain A, B and Label; Infer is optional.")
                    .color(style::palette().text_muted),
            );
            ui.add_space(12.0);
            let mut submit = false;
            ui.horizontal(|ui| {
                let field = ui.add(
                    egui::TextEdit::singleline(&mut self.controller.ui.launcher.path_input)
                        .hint_text("Dataset path")
                        .desired_width(420.0),
                );
                submit |= field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Browse…").clicked()
                    && let Some(path) = rfd::FileDialog::new().pick_folder()
                {
                    self.controller.ui.launcher.path_input = path.display().to_string();
                }
                submit |= ui.button("Open").clicked();
            });
            if submit {
                self.controller.open_from_launcher();
            }
            if let Some(err) = self.controller.ui.launcher.error.as_ref() {
                ui.add_space(8.0);
                ui.label(RichText::new(err).color(style::palette().warning));
            }
        });
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        let Some(view) = self.controller.ui.review.as_ref() else {
            return;
        };
        let progress = view.progress_label.clone();
        let identifier = view.identifier.clone();
        let flagged = view.flagged;
        let flagged_count = view.flagged_count;
        let palette = style::palette();
        let mut clicked = None;
        egui::TopBottomPanel::bottom("review_toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("Progress: {progress}")).strong());
                    ui.separator();
                    ui.label(&identifier);
                    if flagged {
                        ui.label(RichText::new("● flagged").color(palette.flagged));
                    }
                    ui.separator();
                    ui.label(
                        RichText::new(format!("{flagged_count} flagged"))
                            .color(palette.text_muted),
                    );
                });
                ui.horizontal(|ui| {
                    for intent in ReviewIntent::ALL {
                        if ui
                            .button(intent.label())
                            .on_hover_text(intent.shortcut_hint())
                            .clicked()
                        {
                            clicked = Some(intent);
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });
        if let Some(intent) = clicked {
            self.dispatch(ctx, intent);
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.handle_screenshot(ctx);
        if self.controller.session().is_some() {
            self.handle_shortcuts(ctx);
        }
        self.render_status(ctx);
        self.render_toolbar(ctx);
        match self.controller.ui.review.as_ref() {
            Some(view) => self.textures.sync(ctx, view),
            None => self.textures.clear(),
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.session().is_some() {
                self.textures.render(ui);
            } else {
                self.render_launcher(ui);
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.controller.shutdown() {
            tracing::error!("Failed to save progress on exit: {err}");
        }
    }
}
