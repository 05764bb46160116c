//! Segments: croppable, combinable units derived from detections.
//!
//! A [`Segment`] carries its crop of the source image, the matching crop of
//! its mask and the crop rectangle in full-image coordinates, which is what
//! lets the compositor put it back. [`SegmentCollection`] keeps detector
//! output order; filtering operations never reorder.

pub mod builder;
pub mod detection;

pub use builder::{BuildOptions, SegmentBuilder};
pub use detection::{filter_by_confidence, Detection, Detector, DetectorHandle, DetectorKind};

use crate::error::ShapeMismatch;
use crate::image::{ImageView, Mask, RgbImageF32};
use crate::region::CropRegion;

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    cropped_image: RgbImageF32,
    cropped_mask: Mask,
    confidence: f32,
    crop_region: CropRegion,
    bbox_size: (f32, f32),
    label: String,
}

impl Segment {
    /// Assemble a segment; image, mask and crop region must share a shape.
    pub fn new(
        cropped_image: RgbImageF32,
        cropped_mask: Mask,
        confidence: f32,
        crop_region: CropRegion,
        bbox_size: (f32, f32),
    ) -> Result<Self, ShapeMismatch> {
        ShapeMismatch::check("segment mask", cropped_image.dims(), cropped_mask.dims())?;
        ShapeMismatch::check("segment crop region", crop_region.dims(), cropped_image.dims())?;
        Ok(Self {
            cropped_image,
            cropped_mask,
            confidence,
            crop_region,
            bbox_size,
            label: String::new(),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replacement mask produced by a shape-preserving operation.
    pub(crate) fn replace_mask(&self, mask: Mask) -> Self {
        debug_assert_eq!(self.cropped_mask.dims(), mask.dims());
        Self {
            cropped_mask: mask,
            ..self.clone()
        }
    }

    pub fn cropped_image(&self) -> &RgbImageF32 {
        &self.cropped_image
    }

    pub fn cropped_mask(&self) -> &Mask {
        &self.cropped_mask
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn crop_region(&self) -> CropRegion {
        self.crop_region
    }

    /// Size of the original detection box, before context expansion.
    pub fn bbox_size(&self) -> (f32, f32) {
        self.bbox_size
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered, immutable sequence of segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentCollection {
    segments: Vec<Segment>,
}

impl SegmentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_vec(self) -> Vec<Segment> {
        self.segments
    }
}

impl From<Vec<Segment>> for SegmentCollection {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for SegmentCollection {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SegmentCollection {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a SegmentCollection {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
