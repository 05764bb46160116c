//! Detector-side contract: raw detections and the adapter traits.
use crate::error::AdapterError;
use crate::image::{Mask, RgbImageF32};
use crate::region::BBox;

/// One raw detector output, full-frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub label: String,
    pub bbox: BBox,
    /// Image-sized binary mask aligned with `bbox`.
    pub mask: Mask,
    pub confidence: f32,
}

impl Detection {
    pub fn new(label: impl Into<String>, bbox: BBox, mask: Mask, confidence: f32) -> Self {
        Self {
            label: label.into(),
            bbox,
            mask,
            confidence,
        }
    }

    /// Detection from a box-only detector: the mask is the filled box.
    ///
    /// Covers the pixel span `[⌊x0⌋, ⌊x1⌋] × [⌊y0⌋, ⌊y1⌋]` (both ends
    /// inclusive), clipped to the `width × height` frame.
    pub fn from_box(
        label: impl Into<String>,
        bbox: BBox,
        confidence: f32,
        width: usize,
        height: usize,
    ) -> Self {
        let mut mask = Mask::new(width, height);
        if let (Some((x0, x1)), Some((y0, y1))) = (
            inclusive_span(bbox.x0, bbox.x1, width),
            inclusive_span(bbox.y0, bbox.y1, height),
        ) {
            for y in y0..=y1 {
                mask.data[y * width + x0..=y * width + x1].fill(1);
            }
        }
        Self::new(label, bbox, mask, confidence)
    }
}

fn inclusive_span(lo: f32, hi: f32, limit: usize) -> Option<(usize, usize)> {
    if limit == 0 || !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let lo = lo.floor().max(0.0);
    let hi = hi.floor().min((limit - 1) as f32);
    (lo <= hi).then_some((lo as usize, hi as usize))
}

/// Keep detections whose confidence is strictly above `threshold`.
pub fn filter_by_confidence(detections: Vec<Detection>, threshold: f32) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|d| d.confidence > threshold)
        .collect()
}

/// External detector adapter.
///
/// Implementations must return image-sized masks and an empty list (not an
/// error) when nothing clears `threshold`.
pub trait Detector {
    fn infer(&self, image: &RgbImageF32, threshold: f32) -> Result<Vec<Detection>, AdapterError>;
}

impl<F> Detector for F
where
    F: Fn(&RgbImageF32, f32) -> Result<Vec<Detection>, AdapterError>,
{
    fn infer(&self, image: &RgbImageF32, threshold: f32) -> Result<Vec<Detection>, AdapterError> {
        self(image, threshold)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorKind {
    /// Box-only model; masks are filled rectangles.
    Bbox,
    /// Instance segmentation model with per-instance masks.
    Segm,
}

/// A loaded detector tagged with what it produces.
///
/// "No model loaded" is `Option<DetectorHandle>::None`.
pub enum DetectorHandle {
    Bbox(Box<dyn Detector>),
    Segm(Box<dyn Detector>),
}

impl DetectorHandle {
    pub fn kind(&self) -> DetectorKind {
        match self {
            DetectorHandle::Bbox(_) => DetectorKind::Bbox,
            DetectorHandle::Segm(_) => DetectorKind::Segm,
        }
    }

    pub fn detector(&self) -> &dyn Detector {
        match self {
            DetectorHandle::Bbox(d) | DetectorHandle::Segm(d) => d.as_ref(),
        }
    }

    pub fn bbox(&self) -> Option<&dyn Detector> {
        match self {
            DetectorHandle::Bbox(d) => Some(d.as_ref()),
            DetectorHandle::Segm(_) => None,
        }
    }

    pub fn segm(&self) -> Option<&dyn Detector> {
        match self {
            DetectorHandle::Segm(d) => Some(d.as_ref()),
            DetectorHandle::Bbox(_) => None,
        }
    }
}

impl std::fmt::Debug for DetectorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DetectorHandle").field(&self.kind()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_mask_covers_inclusive_span() {
        let d = Detection::from_box("face", BBox::new(2.6, 1.0, 5.2, 3.9), 0.9, 8, 6);
        assert_eq!(d.mask.count(), 4 * 3);
        assert!(d.mask.get(2, 1) && d.mask.get(5, 3));
        assert!(!d.mask.get(6, 3) && !d.mask.get(2, 4));
    }

    #[test]
    fn box_mask_is_clipped_to_frame() {
        let d = Detection::from_box("a", BBox::new(-4.0, -4.0, 100.0, 1.0), 0.9, 8, 6);
        assert_eq!(d.mask.count(), 8 * 2);
    }

    #[test]
    fn confidence_filter_is_strict() {
        let dets = vec![
            Detection::from_box("a", BBox::new(0.0, 0.0, 1.0, 1.0), 0.5, 4, 4),
            Detection::from_box("b", BBox::new(0.0, 0.0, 1.0, 1.0), 0.51, 4, 4),
        ];
        let kept = filter_by_confidence(dets, 0.5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].label, "b");
    }

    #[test]
    fn handle_exposes_only_its_kind() {
        let detector = |_: &RgbImageF32, _: f32| -> Result<Vec<Detection>, AdapterError> {
            Ok(Vec::new())
        };
        let handle = DetectorHandle::Bbox(Box::new(detector));
        assert_eq!(handle.kind(), DetectorKind::Bbox);
        assert!(handle.bbox().is_some());
        assert!(handle.segm().is_none());
        let image = RgbImageF32::new(4, 4);
        assert!(handle.detector().infer(&image, 0.5).unwrap().is_empty());
    }
}
