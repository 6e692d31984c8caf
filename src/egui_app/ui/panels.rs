use eframe::egui::{self, RichText, TextureHandle, TextureOptions, Ui};

use super::style;
use crate::egui_app::controller::decode_panel;
use crate::egui_app::state::ReviewView;
use crate::review::PanelRole;

/// Textures for the sample on screen; reloaded from disk whenever it changes.
#[derive(Default)]
pub(super) struct PanelTextures {
    identifier: Option<String>,
    loaded: Vec<LoadedPanel>,
}

struct LoadedPanel {
    role: PanelRole,
    texture: Result<TextureHandle, String>,
}

impl PanelTextures {
    pub fn sync(&mut self, ctx: &egui::Context, view: &ReviewView) {
        let same_panels = self.loaded.len() == view.panels.len()
            && self.loaded.iter().zip(&view.panels).all(|(a, b)| a.role == b.role);
        if same_panels && self.identifier.as_deref() == Some(view.identifier.as_str()) {
            return;
        }
        self.loaded = view
            .panels
            .iter()
            .map(|slot| {
                let texture = decode_panel(&slot.path)
                    .map(|image| {
                        ctx.load_texture(
                            format!("panel_{}", slot.role.folder_name()),
                            image,
                            TextureOptions::LINEAR,
                        )
                    })
                    .inspect_err(|err| tracing::warn!("Panel {:?}: {err}", slot.role));
                LoadedPanel {
                    role: slot.role,
                    texture,
                }
            })
            .collect();
        self.identifier = Some(view.identifier.clone());
    }

    pub fn clear(&mut self) {
        self.identifier = None;
        self.loaded.clear();
    }

    pub fn render(&self, ui: &mut Ui) {
        if self.loaded.is_empty() {
            return;
        }
        let palette = style::palette();
        ui.columns(self.loaded.len(), |columns| {
            for (column, panel) in columns.iter_mut().zip(&self.loaded) {
                egui::Frame::new()
                    .stroke(style::panel_border())
                    .inner_margin(egui::Margin::same(4))
                    .show(column, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(panel.role.title()).color(palette.text_muted));
                            match &panel.texture {
                                Ok(texture) => {
                                    ui.add(egui::Image::new(texture).shrink_to_fit());
                                }
                                Err(err) => {
                                    ui.add_space(12.0);
                                    ui.label(RichText::new(err).color(palette.warning));
                                }
                            }
                        });
                    });
            }
        });
    }
}
