use std::path::Path;

use egui::ColorImage;
use image::RgbaImage;

/// Decode an artifact into an egui image.
pub fn decode_panel(path: &Path) -> Result<ColorImage, String> {
    if !path.is_file() {
        return Err(format!("Missing {}", path.display()));
    }
    let decoded = image::open(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_flat_samples().as_slice(),
    ))
}

/// Convert a captured frame into an image the encoder accepts.
pub fn color_image_to_rgba(captured: &ColorImage) -> Option<RgbaImage> {
    let [width, height] = captured.size;
    let bytes = captured
        .pixels
        .iter()
        .flat_map(|pixel| pixel.to_srgba_unmultiplied())
        .collect();
    RgbaImage::from_raw(width as u32, height as u32, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn decodes_png_into_color_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.png");
        RgbaImage::from_pixel(5, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();
        let decoded = decode_panel(&path).unwrap();
        assert_eq!(decoded.size, [5, 2]);
        assert_eq!(decoded.pixels[0], egui::Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn missing_artifact_is_reported() {
        let dir = tempdir().unwrap();
        let err = decode_panel(&dir.path().join("gone.png")).unwrap_err();
        assert!(err.starts_with("Missing"));
    }

    #[test]
    fn captured_frame_converts_to_rgba() {
        let frame = ColorImage::from_rgba_unmultiplied([3, 2], &[1u8, 2, 3, 255].repeat(6));
        let rgba = color_image_to_rgba(&frame).unwrap();
        assert_eq!(rgba.dimensions(), (3, 2));
        assert_eq!(rgba.get_pixel(2, 1).0, [1, 2, 3, 255]);
    }
}
