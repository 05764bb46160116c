//! Re-render adapter contract.
use crate::error::AdapterError;
use crate::image::RgbImageF32;
use crate::region::CropRegion;
use serde::Serialize;

/// What the compositor knows about the crop it hands to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    /// Position of the segment in its collection.
    pub index: usize,
    pub crop_region: CropRegion,
    pub bbox_size: (f32, f32),
    pub upscale: f32,
    /// Dimensions of the upscaled crop (and of the expected output).
    pub target: (usize, usize),
}

/// External generative refine step.
///
/// Receives the upscaled crop and must return an image of identical size.
/// Calls are expected to be slow and blocking.
pub trait ReRender {
    fn render(&self, crop: &RgbImageF32, ctx: &RenderContext)
        -> Result<RgbImageF32, AdapterError>;
}

impl<F> ReRender for F
where
    F: Fn(&RgbImageF32, &RenderContext) -> Result<RgbImageF32, AdapterError>,
{
    fn render(
        &self,
        crop: &RgbImageF32,
        ctx: &RenderContext,
    ) -> Result<RgbImageF32, AdapterError> {
        self(crop, ctx)
    }
}

/// Renderer that returns its input unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl ReRender for PassThrough {
    fn render(
        &self,
        crop: &RgbImageF32,
        _ctx: &RenderContext,
    ) -> Result<RgbImageF32, AdapterError> {
        Ok(crop.clone())
    }
}
