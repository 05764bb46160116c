//! Binary dilation with a square structuring element.
//!
//! The square element is separable, so one pass is a horizontal window-OR
//! followed by a vertical window-OR. Window membership is answered from a
//! running prefix count, which keeps each pass linear in the pixel count.
//! Pixels outside the image never contribute.
use crate::image::{ImageView, ImageViewMut, Mask};

/// Dilate `mask` with a `factor × factor` square, `iterations` times.
///
/// The element is anchored at `factor / 2`, so even sizes grow one pixel more
/// towards the bottom-right than towards the top-left.
pub fn dilate_mask(mask: &Mask, factor: usize, iterations: usize) -> Mask {
    if factor == 0 || iterations == 0 {
        return mask.clone();
    }
    let before = factor / 2;
    let after = factor - 1 - before;
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = dilate_once(&out, before, after);
    }
    out
}

fn dilate_once(src: &Mask, before: usize, after: usize) -> Mask {
    let (w, h) = src.dims();
    let mut horiz = Mask::new(w, h);
    let mut prefix = Vec::with_capacity(w.max(h) + 1);
    for y in 0..h {
        window_or(src.row(y), horiz.row_mut(y), before, after, &mut prefix);
    }

    let mut out = Mask::new(w, h);
    let mut column = vec![0u8; h];
    let mut dilated = vec![0u8; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = horiz.data[y * w + x];
        }
        window_or(&column, &mut dilated, before, after, &mut prefix);
        for (y, &v) in dilated.iter().enumerate() {
            out.data[y * w + x] = v;
        }
    }
    out
}

/// `out[i] = OR(line[i - before ..= i + after])`, clipped to the line.
fn window_or(line: &[u8], out: &mut [u8], before: usize, after: usize, prefix: &mut Vec<usize>) {
    let len = line.len();
    prefix.clear();
    prefix.push(0);
    let mut acc = 0usize;
    for &v in line {
        acc += (v != 0) as usize;
        prefix.push(acc);
    }
    for (i, dst) in out.iter_mut().enumerate() {
        let lo = i.saturating_sub(before);
        let hi = (i + after + 1).min(len);
        *dst = (prefix[hi] > prefix[lo]) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pixel(w: usize, h: usize, x: usize, y: usize) -> Mask {
        let mut m = Mask::new(w, h);
        m.set(x, y, true);
        m
    }

    #[test]
    fn zero_factor_is_identity() {
        let m = single_pixel(8, 8, 3, 4);
        assert_eq!(dilate_mask(&m, 0, 3), m);
    }

    #[test]
    fn odd_square_grows_symmetrically() {
        let m = single_pixel(9, 9, 4, 4);
        let d = dilate_mask(&m, 3, 1);
        assert_eq!(d.count(), 9);
        for y in 3..=5 {
            for x in 3..=5 {
                assert!(d.get(x, y));
            }
        }
    }

    #[test]
    fn even_square_anchors_at_half_size() {
        let m = single_pixel(10, 10, 5, 5);
        let d = dilate_mask(&m, 4, 1);
        assert_eq!(d.count(), 16);
        // out[x] is set when the source pixel lies in [x - 2, x + 1]
        assert!(d.get(4, 4) && d.get(7, 7));
        assert!(!d.get(3, 5) && !d.get(8, 5));
    }

    #[test]
    fn iterations_accumulate_and_clip_at_border() {
        let m = single_pixel(6, 6, 0, 0);
        let d = dilate_mask(&m, 3, 2);
        assert_eq!(d.count(), 9);
        assert!(d.get(2, 2));
        assert!(!d.get(3, 0));
    }
}
