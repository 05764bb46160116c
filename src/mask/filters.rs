use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters used for mask feathering.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Sampled, normalised Gaussian kernel with radius `ceil(3σ)`.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianFilter {
    taps: Vec<f32>,
}

impl GaussianFilter {
    pub fn new(sigma: f32) -> Self {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Self { taps: vec![1.0] };
        }
        let radius = (3.0 * sigma).ceil() as isize;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (-radius..=radius)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps }
    }

    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }
}

impl SeparableFilter for GaussianFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve `src` with `filter` along rows then columns, clamping at borders.
pub fn convolve_separable<F: SeparableFilter>(src: &ImageF32, filter: &F) -> ImageF32 {
    let taps = filter.taps();
    if taps.len() <= 1 || src.w == 0 || src.h == 0 {
        return src.clone();
    }
    let radius = taps.len() / 2;

    let mut horiz = ImageF32::new(src.w, src.h);
    for y in 0..src.h {
        filter_row(src.row(y), horiz.row_mut(y), taps, radius);
    }

    let mut out = ImageF32::new(src.w, src.h);
    let mut column = vec![0.0f32; src.h];
    let mut filtered = vec![0.0f32; src.h];
    for x in 0..src.w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = horiz.get(x, y);
        }
        filter_row(&column, &mut filtered, taps, radius);
        for (y, &v) in filtered.iter().enumerate() {
            out.set(x, y, v);
        }
    }
    out
}

fn filter_row(row: &[f32], out: &mut [f32], taps: &[f32], radius: usize) {
    let len = row.len();
    for (x, dst_px) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &tap) in taps.iter().enumerate() {
            let offset = k as isize - radius as isize;
            let idx = clamp_index(x as isize + offset, len);
            acc += tap * row[idx];
        }
        *dst_px = acc;
    }
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_taps_are_normalised_and_symmetric() {
        let g = GaussianFilter::new(2.0);
        assert_eq!(g.radius(), 6);
        let sum: f32 = g.taps().iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        let taps = g.taps();
        for i in 0..taps.len() / 2 {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-7);
        }
    }

    #[test]
    fn constant_image_is_preserved() {
        let mut img = ImageF32::new(9, 7);
        img.data.iter_mut().for_each(|v| *v = 0.75);
        let out = convolve_separable(&img, &GaussianFilter::new(1.5));
        assert!(out.data.iter().all(|v| (v - 0.75).abs() < 1e-5));
    }

    #[test]
    fn zero_sigma_is_identity() {
        let mut img = ImageF32::new(4, 4);
        img.set(1, 2, 1.0);
        let out = convolve_separable(&img, &GaussianFilter::new(0.0));
        assert_eq!(out, img);
    }
}
