//! Single-channel float plane.
//!
//! Holds feathered alpha in `[0, 1]` and, in the demo renderer, single colour
//! channels split out of an [`RgbImageF32`].
use super::traits::{ImageView, ImageViewMut};
use super::{Mask, RgbImageF32};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Zero plane of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Hard alpha: 1.0 where the mask is set, 0.0 elsewhere.
    pub fn from_mask(mask: &Mask) -> Self {
        Self {
            w: mask.w,
            h: mask.h,
            data: mask.data.iter().map(|&v| if v != 0 { 1.0 } else { 0.0 }).collect(),
        }
    }

    /// Channel `c` (0 = R, 1 = G, 2 = B) of an RGB image.
    pub fn from_channel(image: &RgbImageF32, c: usize) -> Self {
        Self {
            w: image.w,
            h: image.h,
            data: image.data.iter().map(|px| px[c]).collect(),
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Clamp every value into `[0, 1]`.
    pub fn clamp_unit(&mut self) {
        for v in &mut self.data {
            *v = v.clamp(0.0, 1.0);
        }
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        Some(&self.data)
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [f32]> {
        Some(&mut self.data)
    }
}
