//! Error taxonomy for the segment pipeline.
//!
//! Empty inputs (no detections, no segments) are never errors. Everything
//! below is either a precondition violation or a collaborator fault.

use crate::region::CropRegion;

/// Geometry preconditions that the crop-window math cannot satisfy.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// Requested window is longer than the axis it has to fit in.
    WindowExceedsAxis { limit: usize, size: usize },
    /// Detection box is inverted, empty or not finite.
    DegenerateBox { bbox: [f32; 4] },
    /// Context factor must be finite and at least 1.
    InvalidContextFactor { factor: f32 },
    /// Crop region does not lie inside the image it is applied to.
    RegionOutOfBounds {
        region: CropRegion,
        width: usize,
        height: usize,
    },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::WindowExceedsAxis { limit, size } => {
                write!(f, "window of {size}px does not fit an axis of {limit}px")
            }
            GeometryError::DegenerateBox { bbox } => write!(
                f,
                "degenerate box ({:.1}, {:.1}, {:.1}, {:.1})",
                bbox[0], bbox[1], bbox[2], bbox[3]
            ),
            GeometryError::InvalidContextFactor { factor } => {
                write!(f, "context factor must be >= 1.0, got {factor}")
            }
            GeometryError::RegionOutOfBounds {
                region,
                width,
                height,
            } => write!(
                f,
                "crop region ({}, {}, {}, {}) outside {width}x{height} image",
                region.x0, region.y0, region.x1, region.y1
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Two buffers that must share a spatial extent do not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub context: &'static str,
    pub expected: (usize, usize),
    pub found: (usize, usize),
}

impl ShapeMismatch {
    /// Returns `Ok(())` when both shapes agree.
    pub fn check(
        context: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Result<(), ShapeMismatch> {
        if expected == found {
            Ok(())
        } else {
            Err(ShapeMismatch {
                context,
                expected,
                found,
            })
        }
    }
}

impl std::fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {}x{}, found {}x{}",
            self.context, self.expected.0, self.expected.1, self.found.0, self.found.1
        )
    }
}

impl std::error::Error for ShapeMismatch {}

/// Failure reported by an external detector or re-render adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterError {
    pub message: String,
}

impl AdapterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "adapter failure: {}", self.message)
    }
}

impl std::error::Error for AdapterError {}

/// Top-level error returned by builder, algebra and compositor entry points.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailerError {
    Geometry(GeometryError),
    Shape(ShapeMismatch),
    Adapter(AdapterError),
    InvalidOption { name: &'static str, reason: String },
}

impl std::fmt::Display for DetailerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailerError::Geometry(err) => write!(f, "geometry error: {err}"),
            DetailerError::Shape(err) => write!(f, "shape mismatch: {err}"),
            DetailerError::Adapter(err) => err.fmt(f),
            DetailerError::InvalidOption { name, reason } => {
                write!(f, "invalid option `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for DetailerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DetailerError::Geometry(err) => Some(err),
            DetailerError::Shape(err) => Some(err),
            DetailerError::Adapter(err) => Some(err),
            DetailerError::InvalidOption { .. } => None,
        }
    }
}

impl From<GeometryError> for DetailerError {
    fn from(err: GeometryError) -> Self {
        DetailerError::Geometry(err)
    }
}

impl From<ShapeMismatch> for DetailerError {
    fn from(err: ShapeMismatch) -> Self {
        DetailerError::Shape(err)
    }
}

impl From<AdapterError> for DetailerError {
    fn from(err: AdapterError) -> Self {
        DetailerError::Adapter(err)
    }
}
