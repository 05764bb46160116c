use super::filters::{convolve_separable, GaussianFilter};
use crate::image::{ImageF32, Mask};

/// Soft alpha mask from a binary mask, Gaussian-blurred with σ = `thickness`.
///
/// `thickness == 0` yields the mask itself as a hard 0/1 alpha.
pub fn feather(mask: &Mask, thickness: f32) -> ImageF32 {
    let alpha = ImageF32::from_mask(mask);
    if !thickness.is_finite() || thickness <= 0.0 {
        return alpha;
    }
    let mut out = convolve_separable(&alpha, &GaussianFilter::new(thickness));
    out.clamp_unit();
    out
}
