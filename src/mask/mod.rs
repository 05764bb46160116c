//! Mask algebra.
//!
//! Masks are binary (`{0, 1}`) everywhere except the feathered alpha produced
//! for compositing. Operations come in two flavours:
//!
//! - full-frame buffers: [`bitwise_and`], [`subtract_mask`], [`combine_masks`];
//! - segment collections, which are crop-region aware: [`dilate_segments`],
//!   [`combine_segments`], [`intersect_segments`].
//!
//! Every operation returns new buffers; inputs are never mutated.

pub mod algebra;
pub mod feather;
pub mod filters;
pub mod morphology;
pub mod segments;

pub use algebra::{bitwise_and, bitwise_or, combine_masks, subtract_mask};
pub use feather::feather;
pub use filters::{convolve_separable, GaussianFilter, SeparableFilter};
pub use morphology::dilate_mask;
pub use segments::{combine_segments, dilate_segments, intersect_segments, SegmentOp};
