//! I/O helpers for RGB images, masks and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG into an owned `RgbImageF32` in `[0, 1]`.
//! - `save_rgb_image`: write an `RgbImageF32` as 8-bit RGB.
//! - `save_mask`: write a binary mask as a black/white PNG.
//! - `save_alpha`: write a float alpha mask as grayscale.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageView, Mask, RgbImageF32};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to float RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImageF32, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(RgbImageF32::from_rgb8(width, height, img.as_raw()))
}

/// Save a float RGB image, clamping values into [0, 255].
pub fn save_rgb_image(image: &RgbImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(image.w as u32, image.h as u32, image.to_rgb8())
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    DynamicImage::ImageRgb8(buffer)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a binary mask as 0/255 grayscale.
pub fn save_mask(mask: &Mask, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for (y, row) in mask.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = if px != 0 { 255 } else { 0 };
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a float alpha mask to a grayscale PNG, clamping values in [0, 255].
pub fn save_alpha(alpha: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(alpha.w as u32, alpha.h as u32);
    for y in 0..alpha.h {
        let row = alpha.row(y);
        for (x, &px) in row.iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
