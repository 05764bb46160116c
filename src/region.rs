//! Crop-window geometry around detections.
//!
//! Crop windows are sized in multiples of [`CROP_GRID`], the spatial
//! downsampling granularity of the re-render step, so a crop never gets
//! truncated or padded on its way through it.
//!
//! - [`clamp_window`] fits a 1-D window of fixed length into `[0, limit)`.
//! - [`compute_crop_region`] expands a box by a context factor, snaps the size
//!   to the grid and centres it on the box.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// Grid every crop side is snapped to (and the minimum crop side).
pub const CROP_GRID: usize = 64;

/// Detector box in full-image pixel coordinates, as reported by the detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    #[inline]
    pub fn center(&self) -> [f32; 2] {
        [
            self.x0 + self.width() * 0.5,
            self.y0 + self.height() * 0.5,
        ]
    }

    /// `(width, height)` of the box, as stored in a segment's `bbox_size`.
    pub fn size(&self) -> (f32, f32) {
        (self.width(), self.height())
    }

    pub fn as_array(&self) -> [f32; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }

    fn is_valid(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite()) && self.x1 >= self.x0 && self.y1 >= self.y0
    }
}

/// Half-open integer rectangle `[x0, x1) × [y0, y1)` in full-image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRegion {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl CropRegion {
    pub fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Region covering a whole `width × height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True when the region lies inside a `width × height` image.
    #[inline]
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        self.x0 <= self.x1 && self.y0 <= self.y1 && self.x1 <= width && self.y1 <= height
    }

    /// Axis-aligned intersection; `None` when the overlap has no area.
    pub fn intersect(&self, other: &CropRegion) -> Option<CropRegion> {
        let out = CropRegion {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (out.x0 < out.x1 && out.y0 < out.y1).then_some(out)
    }

    /// Translate a full-image rectangle contained in `self` into local
    /// coordinates of a buffer cropped to `self`.
    pub fn to_local(&self, inner: &CropRegion) -> CropRegion {
        CropRegion {
            x0: inner.x0 - self.x0,
            y0: inner.y0 - self.y0,
            x1: inner.x1 - self.x0,
            y1: inner.y1 - self.y0,
        }
    }
}

/// What to do when a crop window is longer than the image axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizePolicy {
    /// Shrink the window to the largest grid multiple the axis holds, or to
    /// the whole axis when it is shorter than one grid cell.
    #[default]
    ShrinkToFit,
    /// Fail with [`GeometryError::WindowExceedsAxis`].
    Reject,
}

/// Fit a window `[start, start + size)` into `[0, limit)` keeping its length.
///
/// Returns `(new_start, new_end)`. Windows starting before zero snap to the
/// origin, windows running past the end snap to `limit`. A window longer than
/// the axis is rejected or, under [`OversizePolicy::ShrinkToFit`], shrunk about
/// its centre to the largest grid multiple that fits (the whole axis when the
/// axis is shorter than one grid cell).
pub fn clamp_window(
    limit: usize,
    start: i64,
    size: usize,
    policy: OversizePolicy,
) -> Result<(usize, usize), GeometryError> {
    if size > limit {
        return match policy {
            OversizePolicy::ShrinkToFit if limit < CROP_GRID => Ok((0, limit)),
            OversizePolicy::ShrinkToFit => {
                let shrunk = limit / CROP_GRID * CROP_GRID;
                let start = start.saturating_add(((size - shrunk) / 2) as i64);
                clamp_window(limit, start, shrunk, policy)
            }
            OversizePolicy::Reject => Err(GeometryError::WindowExceedsAxis { limit, size }),
        };
    }
    if start < 0 {
        Ok((0, size))
    } else if start as usize + size > limit {
        Ok((limit - size, limit))
    } else {
        let start = start as usize;
        Ok((start, start + size))
    }
}

/// Grid-snapped crop side for a box side scaled by the context factor.
///
/// `None` when the side does not fit in `usize`.
#[inline]
pub fn crop_side(box_side: f32, context_factor: f32) -> Option<usize> {
    let cells = ((box_side * context_factor) / CROP_GRID as f32).floor().max(0.0);
    (cells as usize)
        .checked_mul(CROP_GRID)
        .map(|side| side.max(CROP_GRID))
}

/// Context-expanded, grid-aligned crop window centred on `bbox`.
pub fn compute_crop_region(
    width: usize,
    height: usize,
    bbox: &BBox,
    context_factor: f32,
    policy: OversizePolicy,
) -> Result<CropRegion, GeometryError> {
    if !context_factor.is_finite() || context_factor < 1.0 {
        return Err(GeometryError::InvalidContextFactor {
            factor: context_factor,
        });
    }
    if !bbox.is_valid() {
        return Err(GeometryError::DegenerateBox {
            bbox: bbox.as_array(),
        });
    }

    let (Some(crop_w), Some(crop_h)) = (
        crop_side(bbox.width(), context_factor),
        crop_side(bbox.height(), context_factor),
    ) else {
        return Err(GeometryError::DegenerateBox {
            bbox: bbox.as_array(),
        });
    };
    let [cx, cy] = bbox.center();

    let start_x = (cx - crop_w as f32 / 2.0).trunc() as i64;
    let start_y = (cy - crop_h as f32 / 2.0).trunc() as i64;

    let (x0, x1) = clamp_window(width, start_x, crop_w, policy)?;
    let (y0, y1) = clamp_window(height, start_y, crop_h, policy)?;
    Ok(CropRegion { x0, y0, x1, y1 })
}
