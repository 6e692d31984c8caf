use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

/// Write a dataset with one small PNG per identifier in A, B and Label.
pub fn write_dataset(root: &Path, identifiers: &[&str]) -> PathBuf {
    let base = root.join("dataset");
    for folder in ["A", "B", "Label"] {
        let dir = base.join(folder);
        std::fs::create_dir_all(&dir).expect("create dataset folder");
        for identifier in identifiers {
            RgbaImage::from_pixel(3, 3, Rgba([200, 10, 10, 255]))
                .save_with_format(dir.join(identifier), ImageFormat::Png)
                .expect("write sample image");
        }
    }
    base
}
