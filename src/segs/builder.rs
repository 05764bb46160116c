//! Detections → segment collection.
//!
//! For each detection, in detector order:
//! 1. Optionally dilate the full-frame mask.
//! 2. Compute the context-expanded, grid-aligned crop region.
//! 3. Crop image and mask to it.
//! 4. Record the size of the original (undilated) box.

use super::{Detection, Segment, SegmentCollection};
use crate::error::{DetailerError, ShapeMismatch};
use crate::image::{ImageView, RgbImageF32};
use crate::mask::dilate_mask;
use crate::region::{compute_crop_region, OversizePolicy};
use log::debug;
use serde::{Deserialize, Serialize};

/// Parameters controlling segment construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Multiplier expanding each box into its crop window (>= 1).
    pub context_factor: f32,
    /// Side of the square dilation element in pixels; 0 disables dilation.
    pub dilation: usize,
    /// Dilation passes applied when `dilation > 0`.
    pub dilation_iterations: usize,
    /// Handling of crop windows longer than the image axis.
    pub oversize_policy: OversizePolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            context_factor: 3.0,
            dilation: 10,
            dilation_iterations: 1,
            oversize_policy: OversizePolicy::ShrinkToFit,
        }
    }
}

impl BuildOptions {
    pub fn with_context_factor(mut self, context_factor: f32) -> Self {
        self.context_factor = context_factor;
        self
    }

    pub fn with_dilation(mut self, dilation: usize) -> Self {
        self.dilation = dilation;
        self
    }

    pub fn with_oversize_policy(mut self, policy: OversizePolicy) -> Self {
        self.oversize_policy = policy;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct SegmentBuilder {
    options: BuildOptions,
}

impl SegmentBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build one segment per detection. No detections → empty collection.
    pub fn build(
        &self,
        image: &RgbImageF32,
        detections: &[Detection],
    ) -> Result<SegmentCollection, DetailerError> {
        let (width, height) = image.dims();
        for det in detections {
            ShapeMismatch::check("detection mask", (width, height), det.mask.dims())?;
        }

        let mut segments = Vec::with_capacity(detections.len());
        for det in detections {
            let region = compute_crop_region(
                width,
                height,
                &det.bbox,
                self.options.context_factor,
                self.options.oversize_policy,
            )?;
            let cropped_image = image.crop(&region)?;
            let cropped_mask = if self.options.dilation > 0 {
                dilate_mask(
                    &det.mask,
                    self.options.dilation,
                    self.options.dilation_iterations,
                )
                .crop(&region)?
            } else {
                det.mask.crop(&region)?
            };
            debug!(
                "SegmentBuilder::build label={} conf={:.3} bbox={:?} crop={:?}",
                det.label, det.confidence, det.bbox, region
            );
            let segment = Segment::new(
                cropped_image,
                cropped_mask,
                det.confidence,
                region,
                det.bbox.size(),
            )?
            .with_label(det.label.clone());
            segments.push(segment);
        }
        Ok(SegmentCollection::from(segments))
    }
}
