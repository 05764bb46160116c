use crate::error::DetailerError;
use serde::{Deserialize, Serialize};

/// Parameters controlling detail re-rendering and compositing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailerOptions {
    /// Target short-side resolution (px) of the detection box when re-rendered.
    pub guide_size: f32,
    /// Gaussian σ (px) used to feather segment masks before compositing.
    pub feather: f32,
    /// Re-render segments concurrently (needs the `parallel` feature).
    /// Compositing stays in collection order either way.
    pub parallel: bool,
}

impl Default for DetailerOptions {
    fn default() -> Self {
        Self {
            guide_size: 256.0,
            feather: 5.0,
            parallel: true,
        }
    }
}

impl DetailerOptions {
    pub fn with_guide_size(mut self, guide_size: f32) -> Self {
        self.guide_size = guide_size;
        self
    }

    pub fn with_feather(mut self, feather: f32) -> Self {
        self.feather = feather;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), DetailerError> {
        if !self.guide_size.is_finite() || self.guide_size <= 0.0 {
            return Err(DetailerError::InvalidOption {
                name: "guide_size",
                reason: format!("must be a positive number, got {}", self.guide_size),
            });
        }
        if !self.feather.is_finite() || self.feather < 0.0 {
            return Err(DetailerError::InvalidOption {
                name: "feather",
                reason: format!("must be >= 0, got {}", self.feather),
            });
        }
        Ok(())
    }
}
