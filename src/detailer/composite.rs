use crate::error::{DetailerError, GeometryError, ShapeMismatch};
use crate::image::{ImageF32, ImageView, ImageViewMut, RgbImageF32};
use crate::region::CropRegion;

/// Blend `patch` over `canvas` at `region` with per-pixel `alpha`:
/// `out = alpha · patch + (1 − alpha) · canvas`.
pub fn alpha_composite(
    canvas: &mut RgbImageF32,
    region: &CropRegion,
    patch: &RgbImageF32,
    alpha: &ImageF32,
) -> Result<(), DetailerError> {
    ShapeMismatch::check("composite patch", region.dims(), patch.dims())?;
    ShapeMismatch::check("composite alpha", patch.dims(), alpha.dims())?;
    if !region.is_within(canvas.w, canvas.h) {
        return Err(GeometryError::RegionOutOfBounds {
            region: *region,
            width: canvas.w,
            height: canvas.h,
        }
        .into());
    }
    for (py, y) in (region.y0..region.y1).enumerate() {
        let src = patch.row(py);
        let a_row = alpha.row(py);
        let dst = &mut canvas.row_mut(y)[region.x0..region.x1];
        for ((d, s), &a) in dst.iter_mut().zip(src).zip(a_row) {
            let a = a.clamp(0.0, 1.0);
            for c in 0..3 {
                d[c] = a * s[c] + (1.0 - a) * d[c];
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_alpha_replaces_and_zero_alpha_keeps() {
        let mut canvas = RgbImageF32::filled(8, 8, [0.0; 3]);
        let patch = RgbImageF32::filled(4, 4, [1.0; 3]);
        let mut alpha = ImageF32::new(4, 4);
        for y in 0..4 {
            for x in 0..2 {
                alpha.set(x, y, 1.0);
            }
        }
        alpha.set(2, 0, 0.25);
        let region = CropRegion::new(2, 3, 6, 7);
        alpha_composite(&mut canvas, &region, &patch, &alpha).unwrap();
        assert_eq!(canvas.get(2, 3), [1.0; 3]);
        assert_eq!(canvas.get(5, 3), [0.0; 3]);
        assert!((canvas.get(4, 3)[1] - 0.25).abs() < 1e-6);
        assert_eq!(canvas.get(0, 0), [0.0; 3]);
    }

    #[test]
    fn mismatched_patch_is_rejected() {
        let mut canvas = RgbImageF32::new(8, 8);
        let patch = RgbImageF32::new(3, 4);
        let alpha = ImageF32::new(3, 4);
        let err = alpha_composite(&mut canvas, &CropRegion::new(0, 0, 4, 4), &patch, &alpha)
            .unwrap_err();
        assert!(matches!(err, DetailerError::Shape(_)));
    }
}
