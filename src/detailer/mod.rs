//! Detail compositor: re-render small segments at higher resolution and blend
//! them back into the full image.
//!
//! Per segment, in collection order:
//! 1. Plan the upscale from the detection box's short side and `guide_size`;
//!    boxes already at guide size skip re-rendering.
//! 2. Lanczos-upscale the crop to a grid-aligned target.
//! 3. Hand it to the [`ReRender`] adapter.
//! 4. Lanczos-downscale the result back to the crop size.
//! 5. Feather the segment mask into an alpha channel.
//! 6. Alpha-composite onto the running canvas at the crop origin.
//!
//! Steps 1–5 are independent per segment and run on rayon when enabled.
//! Step 6 always runs serially in collection order, so later segments land on
//! top of earlier ones and the output does not depend on scheduling.

pub mod composite;
pub mod options;
pub mod render;
pub mod scaling;

pub use composite::alpha_composite;
pub use options::DetailerOptions;
pub use render::{PassThrough, ReRender, RenderContext};
pub use scaling::{plan_upscale, resize_lanczos, SkipReason, UpscalePlan};

use crate::diagnostics::{DetailReport, SegmentOutcome, SegmentReport, SegmentSummary};
use crate::error::{DetailerError, GeometryError, ShapeMismatch};
use crate::image::{ImageF32, ImageView, RgbImageF32};
use crate::mask::feather;
use crate::segs::{Segment, SegmentCollection};
use log::{debug, warn};
use std::time::Instant;

#[derive(Clone, Debug, Default)]
pub struct DetailCompositor {
    options: DetailerOptions,
}

/// Refined crop and its alpha, ready to be composited.
struct PreparedPatch {
    image: RgbImageF32,
    alpha: ImageF32,
    outcome: SegmentOutcome,
    elapsed_ms: f64,
}

impl DetailCompositor {
    pub fn new(options: DetailerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DetailerOptions {
        &self.options
    }

    /// Composite every segment of `segments` back into a copy of `image`.
    ///
    /// An empty collection returns the image unchanged. A renderer failure
    /// aborts the call.
    pub fn refine<R>(
        &self,
        image: &RgbImageF32,
        segments: &SegmentCollection,
        renderer: &R,
    ) -> Result<RgbImageF32, DetailerError>
    where
        R: ReRender + Sync + ?Sized,
    {
        self.refine_with_report(image, segments, renderer)
            .map(|(out, _)| out)
    }

    /// Like [`refine`](Self::refine), also returning per-segment diagnostics.
    pub fn refine_with_report<R>(
        &self,
        image: &RgbImageF32,
        segments: &SegmentCollection,
        renderer: &R,
    ) -> Result<(RgbImageF32, DetailReport), DetailerError>
    where
        R: ReRender + Sync + ?Sized,
    {
        self.options.validate()?;
        let total_start = Instant::now();
        let (width, height) = image.dims();
        for seg in segments {
            let region = seg.crop_region();
            if !region.is_within(width, height) {
                return Err(GeometryError::RegionOutOfBounds {
                    region,
                    width,
                    height,
                }
                .into());
            }
        }

        let mut report = DetailReport {
            image_width: width,
            image_height: height,
            ..Default::default()
        };
        let mut canvas = image.clone();
        if segments.is_empty() {
            return Ok((canvas, report));
        }

        let render_start = Instant::now();
        let patches = self.prepare_all(segments, renderer)?;
        let render_ms = render_start.elapsed().as_secs_f64() * 1000.0;

        let composite_start = Instant::now();
        for (index, (seg, patch)) in segments.iter().zip(patches).enumerate() {
            alpha_composite(&mut canvas, &seg.crop_region(), &patch.image, &patch.alpha)?;
            report.segments.push(SegmentReport {
                index,
                segment: SegmentSummary::from(seg),
                outcome: patch.outcome,
                elapsed_ms: patch.elapsed_ms,
            });
        }
        let composite_ms = composite_start.elapsed().as_secs_f64() * 1000.0;

        report.timing.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        report.timing.push("render", render_ms);
        report.timing.push("composite", composite_ms);
        debug!(
            "DetailCompositor::refine segments={} rendered={} total_ms={:.3}",
            segments.len(),
            report.rendered_count(),
            report.timing.total_ms
        );
        Ok((canvas, report))
    }

    fn prepare_all<R>(
        &self,
        segments: &SegmentCollection,
        renderer: &R,
    ) -> Result<Vec<PreparedPatch>, DetailerError>
    where
        R: ReRender + Sync + ?Sized,
    {
        let options = &self.options;
        #[cfg(feature = "parallel")]
        {
            if options.parallel {
                use rayon::prelude::*;
                return segments
                    .as_slice()
                    .par_iter()
                    .enumerate()
                    .map(|(index, seg)| prepare_segment(index, seg, renderer, options))
                    .collect();
            }
        }
        segments
            .iter()
            .enumerate()
            .map(|(index, seg)| prepare_segment(index, seg, renderer, options))
            .collect()
    }
}

fn prepare_segment<R>(
    index: usize,
    seg: &Segment,
    renderer: &R,
    options: &DetailerOptions,
) -> Result<PreparedPatch, DetailerError>
where
    R: ReRender + ?Sized,
{
    let start = Instant::now();
    let crop = seg.cropped_image();
    let (image, outcome) = match plan_upscale(crop.dims(), seg.bbox_size(), options.guide_size) {
        UpscalePlan::Skip(reason) => {
            match reason {
                SkipReason::DegenerateBox => warn!(
                    "DetailCompositor segment {index}: skip, degenerate bbox {:?}",
                    seg.bbox_size()
                ),
                SkipReason::LargeEnough | SkipReason::EmptyTarget => debug!(
                    "DetailCompositor segment {index}: skip ({reason:?}), bbox {:?} crop {:?}",
                    seg.bbox_size(),
                    crop.dims()
                ),
            }
            (crop.clone(), SegmentOutcome::Skipped { reason })
        }
        UpscalePlan::Render {
            upscale,
            width,
            height,
        } => {
            debug!(
                "DetailCompositor segment {index}: bbox {:?} crop {:?} x{upscale:.3} -> {width}x{height}",
                seg.bbox_size(),
                crop.dims()
            );
            let upscaled = resize_lanczos(crop, width, height);
            let ctx = RenderContext {
                index,
                crop_region: seg.crop_region(),
                bbox_size: seg.bbox_size(),
                upscale,
                target: (width, height),
            };
            let refined = renderer.render(&upscaled, &ctx)?;
            ShapeMismatch::check("re-render output", (width, height), refined.dims())?;
            (
                resize_lanczos(&refined, crop.w, crop.h),
                SegmentOutcome::Rendered {
                    upscale,
                    width,
                    height,
                },
            )
        }
    };
    let alpha = feather(seg.cropped_mask(), options.feather);
    Ok(PreparedPatch {
        image,
        alpha,
        outcome,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}
