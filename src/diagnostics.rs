//! Serializable run reports for the builder and compositor.
use crate::detailer::SkipReason;
use crate::region::CropRegion;
use crate::segs::{Segment, SegmentCollection};
use serde::{Deserialize, Serialize};

/// Timing entry describing a single stage of the pipeline or one of the helper
/// routines executed by the demo.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Geometry and provenance of one segment, without pixel data.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSummary {
    pub label: String,
    pub confidence: f32,
    pub crop_region: CropRegion,
    pub bbox_size: (f32, f32),
    pub mask_pixels: usize,
}

impl From<&Segment> for SegmentSummary {
    fn from(seg: &Segment) -> Self {
        Self {
            label: seg.label().to_string(),
            confidence: seg.confidence(),
            crop_region: seg.crop_region(),
            bbox_size: seg.bbox_size(),
            mask_pixels: seg.cropped_mask().count(),
        }
    }
}

pub fn summarize(segments: &SegmentCollection) -> Vec<SegmentSummary> {
    segments.iter().map(SegmentSummary::from).collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentOutcome {
    Rendered {
        upscale: f32,
        width: usize,
        height: usize,
    },
    Skipped {
        reason: SkipReason,
    },
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentReport {
    pub index: usize,
    pub segment: SegmentSummary,
    pub outcome: SegmentOutcome,
    pub elapsed_ms: f64,
}

/// Per-run report returned by `DetailCompositor::refine_with_report`.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailReport {
    pub image_width: usize,
    pub image_height: usize,
    pub segments: Vec<SegmentReport>,
    pub timing: TimingBreakdown,
}

impl DetailReport {
    pub fn rendered_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s.outcome, SegmentOutcome::Rendered { .. }))
            .count()
    }
}
