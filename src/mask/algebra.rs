//! Whole-buffer boolean algebra over equally shaped masks.
use crate::error::ShapeMismatch;
use crate::image::{ImageView, Mask};

fn zip_with(
    context: &'static str,
    a: &Mask,
    b: &Mask,
    op: impl Fn(u8, u8) -> u8,
) -> Result<Mask, ShapeMismatch> {
    ShapeMismatch::check(context, a.dims(), b.dims())?;
    let data = a.data.iter().zip(&b.data).map(|(&x, &y)| op(x, y)).collect();
    Ok(Mask {
        w: a.w,
        h: a.h,
        data,
    })
}

/// Pixel-wise AND.
pub fn bitwise_and(a: &Mask, b: &Mask) -> Result<Mask, ShapeMismatch> {
    zip_with("bitwise_and", a, b, |x, y| ((x != 0) & (y != 0)) as u8)
}

/// `a AND NOT b`, values in `{0, 1}`.
pub fn subtract_mask(a: &Mask, b: &Mask) -> Result<Mask, ShapeMismatch> {
    zip_with("subtract_mask", a, b, |x, y| ((x != 0) & (y == 0)) as u8)
}

/// Pixel-wise OR.
pub fn bitwise_or(a: &Mask, b: &Mask) -> Result<Mask, ShapeMismatch> {
    zip_with("bitwise_or", a, b, |x, y| ((x != 0) | (y != 0)) as u8)
}

/// Union of full-frame masks. `Ok(None)` for an empty input.
pub fn combine_masks<'a, I>(masks: I) -> Result<Option<Mask>, ShapeMismatch>
where
    I: IntoIterator<Item = &'a Mask>,
{
    let mut iter = masks.into_iter();
    let Some(first) = iter.next() else {
        return Ok(None);
    };
    let mut acc = first.clone();
    for mask in iter {
        ShapeMismatch::check("combine_masks", acc.dims(), mask.dims())?;
        for (d, &s) in acc.data.iter_mut().zip(&mask.data) {
            *d = ((*d != 0) | (s != 0)) as u8;
        }
    }
    Ok(Some(acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_half(w: usize, h: usize) -> Mask {
        Mask::from_fn(w, h, |x, _| x < w / 2)
    }

    fn top_half(w: usize, h: usize) -> Mask {
        Mask::from_fn(w, h, |_, y| y < h / 2)
    }

    #[test]
    fn and_keeps_only_common_pixels() {
        let m = bitwise_and(&left_half(8, 8), &top_half(8, 8)).unwrap();
        assert_eq!(m.count(), 16);
        assert!(m.get(0, 0) && !m.get(5, 0) && !m.get(0, 5));
    }

    #[test]
    fn subtract_clears_overlap() {
        let m = subtract_mask(&left_half(8, 8), &top_half(8, 8)).unwrap();
        assert_eq!(m.count(), 16);
        assert!(m.get(0, 7) && !m.get(0, 0));
        assert!(m.data.iter().all(|&v| v <= 1));
    }

    #[test]
    fn combine_of_nothing_is_none() {
        let empty: Vec<Mask> = Vec::new();
        assert_eq!(combine_masks(&empty).unwrap(), None);
    }

    #[test]
    fn combine_is_order_independent() {
        let a = left_half(8, 6);
        let b = top_half(8, 6);
        let c = Mask::from_fn(8, 6, |x, y| x == 7 && y == 5);
        let abc = combine_masks([&a, &b, &c]).unwrap().unwrap();
        let cba = combine_masks([&c, &b, &a]).unwrap().unwrap();
        let bac = combine_masks([&b, &a, &c]).unwrap().unwrap();
        assert_eq!(abc, cba);
        assert_eq!(abc, bac);
        assert_eq!(abc, bitwise_or(&bitwise_or(&a, &b).unwrap(), &c).unwrap());
    }

    #[test]
    fn mismatched_shapes_fail_fast() {
        let err = bitwise_and(&Mask::new(4, 4), &Mask::new(4, 5)).unwrap_err();
        assert_eq!(err.expected, (4, 4));
        assert_eq!(err.found, (4, 5));
        assert!(combine_masks([&Mask::new(2, 2), &Mask::new(3, 2)]).is_err());
    }
}
