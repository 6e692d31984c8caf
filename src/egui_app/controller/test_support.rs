use super::{ReviewController, ReviewHost};
use crate::app_dirs::ConfigBaseGuard;
use crate::config::AppSettings;
use crate::egui_app::ui::style::StatusTone;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Records every platform call and answers confirmations with `confirm`.
#[derive(Default)]
pub(super) struct RecordingHost {
    pub confirm: bool,
    pub confirmations: Vec<String>,
    pub copied: Vec<String>,
    pub screenshot_requests: usize,
    pub notices: Vec<(StatusTone, String)>,
}

impl RecordingHost {
    pub fn confirming() -> Self {
        Self {
            confirm: true,
            ..Self::default()
        }
    }
}

impl ReviewHost for RecordingHost {
    fn confirm_flag(&mut self, identifier: &str) -> bool {
        self.confirmations.push(identifier.to_string());
        self.confirm
    }

    fn copy_text(&mut self, text: &str) {
        self.copied.push(text.to_string());
    }

    fn request_screenshot(&mut self) {
        self.screenshot_requests += 1;
    }

    fn notify(&mut self, tone: StatusTone, title: &str, _message: &str) {
        self.notices.push((tone, title.to_string()));
    }
}

/// Temp dataset with a 2x2 PNG per identifier under A, B and Label.
pub(super) struct Fixture {
    pub _config: ConfigBaseGuard,
    pub temp: TempDir,
}

impl Fixture {
    pub fn new(names: &[&str]) -> Self {
        let temp = tempdir().unwrap();
        let config = ConfigBaseGuard::set(temp.path().join("config"));
        let fixture = Self {
            _config: config,
            temp,
        };
        for folder in ["A", "B", "Label"] {
            fixture.write_images(folder, names);
        }
        fixture
    }

    pub fn base(&self) -> PathBuf {
        self.temp.path().join("dataset")
    }

    pub fn write_images(&self, folder: &str, names: &[&str]) {
        let dir = self.base().join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        for name in names {
            write_png(&dir.join(name));
        }
    }

    pub fn controller(&self) -> ReviewController {
        let mut controller = ReviewController::new(AppSettings::default());
        controller.open_dataset(self.base()).unwrap();
        controller
    }
}

pub(super) fn write_png(path: &Path) {
    RgbaImage::from_pixel(2, 2, image::Rgba([0, 128, 255, 255]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}
