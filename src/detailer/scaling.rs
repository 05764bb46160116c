//! Upscale planning and Lanczos resampling for segment crops.
use crate::image::{ImageView, RgbImageF32};
use crate::region::CROP_GRID;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};
use serde::Serialize;

/// Why a segment is composited without re-rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Both box sides already reach the guide size.
    LargeEnough,
    /// Box has a zero or non-finite side, so no upscale factor exists.
    DegenerateBox,
    /// Upscaled crop rounds down to zero grid cells.
    EmptyTarget,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpscalePlan {
    Skip(SkipReason),
    Render {
        upscale: f32,
        width: usize,
        height: usize,
    },
}

/// Decide how far to blow up a crop so its box reaches `guide_size`.
///
/// The factor comes from the box's short side; the target is the crop size
/// scaled by it and snapped down to the crop grid.
pub fn plan_upscale(crop: (usize, usize), bbox_size: (f32, f32), guide_size: f32) -> UpscalePlan {
    let (bw, bh) = bbox_size;
    if bw >= guide_size && bh >= guide_size {
        return UpscalePlan::Skip(SkipReason::LargeEnough);
    }
    let short = bw.min(bh);
    if !short.is_finite() || short <= 0.0 {
        return UpscalePlan::Skip(SkipReason::DegenerateBox);
    }
    let upscale = guide_size / short;
    let width = snap_down(crop.0 as f32 * upscale);
    let height = snap_down(crop.1 as f32 * upscale);
    if width == 0 || height == 0 {
        return UpscalePlan::Skip(SkipReason::EmptyTarget);
    }
    UpscalePlan::Render {
        upscale,
        width,
        height,
    }
}

fn snap_down(v: f32) -> usize {
    (v / CROP_GRID as f32).floor().max(0.0) as usize * CROP_GRID
}

/// Lanczos3 resize; output values clamped into `[0, 1]`.
pub fn resize_lanczos(src: &RgbImageF32, width: usize, height: usize) -> RgbImageF32 {
    if src.dims() == (width, height) {
        return src.clone();
    }
    if src.w == 0 || src.h == 0 || width == 0 || height == 0 {
        return RgbImageF32::new(width, height);
    }
    let Some(buffer) = ImageBuffer::<Rgb<f32>, Vec<f32>>::from_raw(
        src.w as u32,
        src.h as u32,
        src.to_interleaved(),
    ) else {
        return RgbImageF32::new(width, height);
    };
    let resized = imageops::resize(&buffer, width as u32, height as u32, FilterType::Lanczos3);
    let mut out = RgbImageF32::from_interleaved(width, height, resized.as_raw());
    for px in &mut out.data {
        for c in px.iter_mut() {
            *c = c.clamp(0.0, 1.0);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_boxes_skip_rendering() {
        assert_eq!(
            plan_upscale((512, 512), (300.0, 256.0), 256.0),
            UpscalePlan::Skip(SkipReason::LargeEnough)
        );
    }

    #[test]
    fn upscale_follows_short_box_side() {
        let plan = plan_upscale((128, 128), (50.0, 64.0), 256.0);
        // 128 * 5.12 = 655.36 -> 640
        assert_eq!(
            plan,
            UpscalePlan::Render {
                upscale: 5.12,
                width: 640,
                height: 640
            }
        );
    }

    #[test]
    fn degenerate_boxes_are_skipped() {
        assert_eq!(
            plan_upscale((64, 64), (0.0, 20.0), 256.0),
            UpscalePlan::Skip(SkipReason::DegenerateBox)
        );
    }

    #[test]
    fn narrow_crops_can_round_to_nothing() {
        // shrunk-to-fit crop: 10 * 1.28 = 12.8 -> 0
        assert_eq!(
            plan_upscale((10, 128), (200.0, 250.0), 256.0),
            UpscalePlan::Skip(SkipReason::EmptyTarget)
        );
    }

    #[test]
    fn resize_preserves_flat_colour() {
        let img = RgbImageF32::filled(64, 64, [0.2, 0.4, 0.6]);
        let up = resize_lanczos(&img, 128, 192);
        assert_eq!(up.dims(), (128, 192));
        for px in &up.data {
            assert!((px[0] - 0.2).abs() < 1e-3);
            assert!((px[2] - 0.6).abs() < 1e-3);
        }
        let back = resize_lanczos(&up, 64, 64);
        assert_eq!(back.dims(), (64, 64));
    }
}
