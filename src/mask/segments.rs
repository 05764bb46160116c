//! Mask algebra lifted to segment collections.
//!
//! Segments live in their own crop frames, so every pairwise operation works
//! on the intersection of the two crop regions, translated into each
//! segment's local coordinates.
use super::morphology::dilate_mask;
use crate::error::DetailerError;
use crate::image::{ImageView, ImageViewMut, Mask};
use crate::region::CropRegion;
use crate::segs::{Segment, SegmentCollection};
use log::debug;
use serde::{Deserialize, Serialize};

/// Pairwise operation applied by [`intersect_segments`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentOp {
    /// Keep base pixels that the overlay also covers.
    And,
    /// Clear base pixels that the overlay covers.
    Subtract,
}

/// Dilate every segment's cropped mask; everything else is carried over.
pub fn dilate_segments(
    segments: &SegmentCollection,
    factor: usize,
    iterations: usize,
) -> SegmentCollection {
    if factor == 0 {
        return segments.clone();
    }
    segments
        .iter()
        .map(|seg| seg.replace_mask(dilate_mask(seg.cropped_mask(), factor, iterations)))
        .collect()
}

/// Union of all segment masks placed back into a `width × height` frame.
///
/// Returns `Ok(None)` for an empty collection.
pub fn combine_segments(
    segments: &SegmentCollection,
    width: usize,
    height: usize,
) -> Result<Option<Mask>, DetailerError> {
    if segments.is_empty() {
        return Ok(None);
    }
    let mut frame = Mask::new(width, height);
    for seg in segments {
        frame.or_at(&seg.crop_region(), seg.cropped_mask())?;
    }
    Ok(Some(frame))
}

/// Apply `op` between every `(base, overlay)` pair, base-major.
///
/// - `And`: emits, per overlapping pair, `base` with only the pixels that are
///   set in both masks inside the crop intersection. Pairs with no common pixel
///   emit nothing.
/// - `Subtract`: emits, per pair, `base` with the common pixels cleared, or
///   `base` unchanged when nothing was subtracted.
///
/// Each pair starts from the untouched base mask. `And` also clears base
/// pixels outside the crop intersection rather than leaving them as they were.
pub fn intersect_segments(
    base: &SegmentCollection,
    overlay: &SegmentCollection,
    op: SegmentOp,
) -> SegmentCollection {
    let mut out = Vec::new();
    for (bi, b) in base.iter().enumerate() {
        for (oi, o) in overlay.iter().enumerate() {
            match op {
                SegmentOp::And => {
                    if let Some(seg) = and_pair(b, o) {
                        out.push(seg);
                    } else {
                        debug!("intersect_segments and: base {bi} / overlay {oi} no overlap");
                    }
                }
                SegmentOp::Subtract => match subtract_pair(b, o) {
                    Some(seg) => out.push(seg),
                    None => out.push(b.clone()),
                },
            }
        }
    }
    SegmentCollection::from(out)
}

/// Local rectangles of the crop intersection inside `a` and `b`.
fn local_overlap(a: &CropRegion, b: &CropRegion) -> Option<(CropRegion, CropRegion)> {
    let shared = a.intersect(b)?;
    Some((a.to_local(&shared), b.to_local(&shared)))
}

fn and_pair(base: &Segment, overlay: &Segment) -> Option<Segment> {
    let (la, lb) = local_overlap(&base.crop_region(), &overlay.crop_region())?;
    let src = base.cropped_mask();
    let other = overlay.cropped_mask();
    let mut mask = Mask::new(src.w, src.h);
    let mut overlapped = false;
    for dy in 0..la.height() {
        let a_row = &src.row(la.y0 + dy)[la.x0..la.x1];
        let b_row = &other.row(lb.y0 + dy)[lb.x0..lb.x1];
        let dst = &mut mask.row_mut(la.y0 + dy)[la.x0..la.x1];
        for ((d, &a), &b) in dst.iter_mut().zip(a_row).zip(b_row) {
            let keep = a != 0 && b != 0;
            overlapped |= keep;
            *d = keep as u8;
        }
    }
    if !overlapped {
        return None;
    }
    Some(base.replace_mask(mask))
}

fn subtract_pair(base: &Segment, overlay: &Segment) -> Option<Segment> {
    let (la, lb) = local_overlap(&base.crop_region(), &overlay.crop_region())?;
    let other = overlay.cropped_mask();
    let mut mask = base.cropped_mask().clone();
    let mut changed = false;
    for dy in 0..la.height() {
        let b_row = &other.row(lb.y0 + dy)[lb.x0..lb.x1];
        let dst = &mut mask.row_mut(la.y0 + dy)[la.x0..la.x1];
        for (d, &b) in dst.iter_mut().zip(b_row) {
            if *d != 0 && b != 0 {
                *d = 0;
                changed = true;
            }
        }
    }
    if !changed {
        return None;
    }
    Some(base.replace_mask(mask))
}
