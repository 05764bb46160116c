#![doc = include_str!("../README.md")]

// Core pipeline modules.
pub mod detailer;
pub mod error;
pub mod image;
pub mod mask;
pub mod region;
pub mod segs;

// Glue, reporting and tool support.
pub mod config;
pub mod diagnostics;
pub mod pipeline;

// --- High-level re-exports -------------------------------------------------

pub use crate::detailer::{DetailCompositor, DetailerOptions, PassThrough, ReRender, RenderContext};
pub use crate::error::{AdapterError, DetailerError, GeometryError, ShapeMismatch};
pub use crate::region::{compute_crop_region, BBox, CropRegion, OversizePolicy};
pub use crate::segs::{
    BuildOptions, Detection, Detector, DetectorHandle, Segment, SegmentBuilder, SegmentCollection,
};

pub use crate::diagnostics::DetailReport;
pub use crate::pipeline::{detect_combined_mask, detect_segments};

// --- Prelude ---------------------------------------------------------------

/// Everything needed to go from detections to a refined image.
pub mod prelude {
    pub use crate::image::{ImageView, Mask, RgbImageF32};
    pub use crate::mask::{combine_segments, intersect_segments, SegmentOp};
    pub use crate::{
        BBox, BuildOptions, DetailCompositor, DetailerOptions, Detection, Detector, PassThrough,
        ReRender, SegmentBuilder, SegmentCollection,
    };
}
