//! Owned three-channel float image, values in `[0, 1]`.
use super::traits::{ImageView, ImageViewMut};
use crate::error::GeometryError;
use crate::region::CropRegion;

pub type Rgb = [f32; 3];

#[derive(Clone, Debug, PartialEq)]
pub struct RgbImageF32 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<Rgb>,
}

impl RgbImageF32 {
    /// Black image of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, [0.0; 3])
    }

    pub fn filled(w: usize, h: usize, px: Rgb) -> Self {
        Self {
            w,
            h,
            data: vec![px; w * h],
        }
    }

    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { w, h, data }
    }

    /// Interpret interleaved 8-bit RGB bytes.
    pub fn from_rgb8(w: usize, h: usize, bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), w * h * 3);
        let data = bytes
            .chunks_exact(3)
            .map(|c| {
                [
                    c[0] as f32 / 255.0,
                    c[1] as f32 / 255.0,
                    c[2] as f32 / 255.0,
                ]
            })
            .collect();
        Self { w, h, data }
    }

    /// Interleaved 8-bit RGB bytes, values clamped into `[0, 255]`.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 3);
        for px in &self.data {
            for &c in px {
                out.push((c * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }
        out
    }

    /// Interleaved float samples, the layout `image::Rgb32FImage` expects.
    pub fn to_interleaved(&self) -> Vec<f32> {
        self.data.iter().flat_map(|px| px.iter().copied()).collect()
    }

    pub fn from_interleaved(w: usize, h: usize, samples: &[f32]) -> Self {
        debug_assert_eq!(samples.len(), w * h * 3);
        let data = samples
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self { w, h, data }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: Rgb) {
        let i = self.idx(x, y);
        self.data[i] = px;
    }

    /// Copy out the pixels covered by `region`.
    pub fn crop(&self, region: &CropRegion) -> Result<RgbImageF32, GeometryError> {
        if !region.is_within(self.w, self.h) {
            return Err(GeometryError::RegionOutOfBounds {
                region: *region,
                width: self.w,
                height: self.h,
            });
        }
        let (cw, ch) = region.dims();
        let mut data = Vec::with_capacity(cw * ch);
        for y in region.y0..region.y1 {
            data.extend_from_slice(&self.row(y)[region.x0..region.x1]);
        }
        Ok(RgbImageF32 { w: cw, h: ch, data })
    }
}

impl ImageView for RgbImageF32 {
    type Pixel = Rgb;

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
    fn row(&self, y: usize) -> &[Rgb] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[Rgb]> {
        Some(&self.data)
    }
}

impl ImageViewMut for RgbImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Rgb] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [Rgb]> {
        Some(&mut self.data)
    }
}
