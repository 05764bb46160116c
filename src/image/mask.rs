//! Binary mask buffer (`u8`, values in `{0, 1}`).
use super::traits::{ImageView, ImageViewMut};
use crate::error::GeometryError;
use crate::region::CropRegion;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl Mask {
    /// All-zero mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// All-one mask of size `w × h`.
    pub fn filled(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![1; w * h],
        }
    }

    /// Build from a predicate over pixel coordinates.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y) as u8);
            }
        }
        Self { w, h, data }
    }

    /// Binarize float values (e.g. detector soft masks) at `threshold`.
    pub fn from_f32(w: usize, h: usize, values: &[f32], threshold: f32) -> Self {
        debug_assert_eq!(values.len(), w * h);
        Self {
            w,
            h,
            data: values.iter().map(|&v| (v > threshold) as u8).collect(),
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        let i = self.idx(x, y);
        self.data[i] = on as u8;
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Copy out the pixels covered by `region`.
    pub fn crop(&self, region: &CropRegion) -> Result<Mask, GeometryError> {
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
        Ok(Mask { w: cw, h: ch, data })
    }

    /// Place this mask into a zeroed `width × height` frame at `region`.
    pub fn place_into(
        &self,
        region: &CropRegion,
        width: usize,
        height: usize,
    ) -> Result<Mask, GeometryError> {
        let mut frame = Mask::new(width, height);
        frame.or_at(region, self)?;
        Ok(frame)
    }

    /// OR `src` into `self` with `src`'s origin at `region`'s top-left.
    pub(crate) fn or_at(&mut self, region: &CropRegion, src: &Mask) -> Result<(), GeometryError> {
        if !region.is_within(self.w, self.h) || region.dims() != src.dims() {
            return Err(GeometryError::RegionOutOfBounds {
                region: *region,
                width: self.w,
                height: self.h,
            });
        }
        for (sy, y) in (region.y0..region.y1).enumerate() {
            let dst = &mut self.row_mut(y)[region.x0..region.x1];
            for (d, &s) in dst.iter_mut().zip(src.row(sy)) {
                *d |= s;
            }
        }
        Ok(())
    }
}

impl ImageView for Mask {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

impl ImageViewMut for Mask {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        Some(&mut self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_then_place_restores_frame_content() {
        let mask = Mask::from_fn(10, 8, |x, y| x >= 3 && x < 6 && y >= 2 && y < 5);
        let region = CropRegion::new(2, 1, 8, 7);
        let cropped = mask.crop(&region).unwrap();
        assert_eq!(cropped.dims(), (6, 6));
        assert_eq!(cropped.count(), 9);
        let placed = cropped.place_into(&region, 10, 8).unwrap();
        assert_eq!(placed, mask);
    }

    #[test]
    fn crop_outside_bounds_fails() {
        let mask = Mask::new(4, 4);
        assert!(mask.crop(&CropRegion::new(0, 0, 5, 4)).is_err());
    }

    #[test]
    fn soft_values_are_binarized() {
        let mask = Mask::from_f32(3, 1, &[0.2, 0.5, 0.9], 0.5);
        assert_eq!(mask.data, vec![0, 0, 1]);
    }
}
