//! Detector adapter glue.
//!
//! `detect_segments` runs a detector and turns the surviving detections into a
//! segment collection; `detect_combined_mask` collapses them into a single
//! full-frame mask instead.

use crate::error::{DetailerError, ShapeMismatch};
use crate::image::{ImageView, Mask, RgbImageF32};
use crate::mask::{combine_masks, dilate_mask};
use crate::segs::{
    filter_by_confidence, BuildOptions, Detection, Detector, SegmentBuilder, SegmentCollection,
};
use log::debug;
use std::time::Instant;

fn infer_filtered(
    detector: &dyn Detector,
    image: &RgbImageF32,
    threshold: f32,
) -> Result<Vec<Detection>, DetailerError> {
    let start = Instant::now();
    let raw = detector.infer(image, threshold)?;
    let total = raw.len();
    let kept = filter_by_confidence(raw, threshold);
    debug!(
        "detector: {} of {} detections above {:.2} in {:.3} ms",
        kept.len(),
        total,
        threshold,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(kept)
}

/// Detect, keep detections strictly above `threshold`, build segments.
pub fn detect_segments(
    detector: &dyn Detector,
    image: &RgbImageF32,
    threshold: f32,
    options: &BuildOptions,
) -> Result<SegmentCollection, DetailerError> {
    let detections = infer_filtered(detector, image, threshold)?;
    SegmentBuilder::new(*options).build(image, &detections)
}

/// Union of all dilated detection masks, or `None` when nothing was detected.
pub fn detect_combined_mask(
    detector: &dyn Detector,
    image: &RgbImageF32,
    threshold: f32,
    dilation: usize,
) -> Result<Option<Mask>, DetailerError> {
    let detections = infer_filtered(detector, image, threshold)?;
    let dims = image.dims();
    let masks = detections
        .into_iter()
        .map(|det| {
            ShapeMismatch::check("detection mask", dims, det.mask.dims())?;
            Ok(dilate_mask(&det.mask, dilation, 1))
        })
        .collect::<Result<Vec<_>, DetailerError>>()?;
    Ok(combine_masks(&masks)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use crate::region::BBox;

    fn two_boxes(image: &RgbImageF32, _threshold: f32) -> Result<Vec<Detection>, AdapterError> {
        let (w, h) = image.dims();
        Ok(vec![
            Detection::from_box("a", BBox::new(10.0, 10.0, 19.0, 19.0), 0.9, w, h),
            Detection::from_box("b", BBox::new(40.0, 40.0, 49.0, 49.0), 0.5, w, h),
        ])
    }

    #[test]
    fn threshold_is_strict() {
        let image = RgbImageF32::new(128, 128);
        let segs = detect_segments(&two_boxes, &image, 0.5, &BuildOptions::default()).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs.get(0).unwrap().label(), "a");
    }

    #[test]
    fn combined_mask_unions_dilated_boxes() {
        let image = RgbImageF32::new(64, 64);
        let mask = detect_combined_mask(&two_boxes, &image, 0.1, 0)
            .unwrap()
            .unwrap();
        assert_eq!(mask.count(), 2 * 10 * 10);
        let dilated = detect_combined_mask(&two_boxes, &image, 0.1, 3)
            .unwrap()
            .unwrap();
        assert_eq!(dilated.count(), 2 * 12 * 12);
    }

    #[test]
    fn nothing_detected_is_not_an_error() {
        let image = RgbImageF32::new(32, 32);
        let none = |_: &RgbImageF32, _: f32| -> Result<Vec<Detection>, AdapterError> { Ok(Vec::new()) };
        assert!(detect_combined_mask(&none, &image, 0.5, 10).unwrap().is_none());
        assert!(detect_segments(&none, &image, 0.5, &BuildOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn detector_failure_propagates() {
        let image = RgbImageF32::new(32, 32);
        let broken = |_: &RgbImageF32, _: f32| -> Result<Vec<Detection>, AdapterError> {
            Err(AdapterError::new("model not loaded"))
        };
        let err = detect_segments(&broken, &image, 0.5, &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, DetailerError::Adapter(_)));
    }
}
