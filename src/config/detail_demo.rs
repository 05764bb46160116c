use crate::detailer::DetailerOptions;
use crate::region::BBox;
use crate::segs::{BuildOptions, Detection};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DetailDemoConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    /// Boxes standing in for a detector run on `input`.
    #[serde(default)]
    pub detections: Vec<DetectionConfig>,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default)]
    pub build: BuildOptions,
    #[serde(default)]
    pub detailer: DetailerOptions,
    #[serde(default)]
    pub renderer: SharpenConfig,
    pub output: DetailDemoOutputConfig,
}

fn default_threshold() -> f32 {
    0.5
}

#[derive(Clone, Debug, Deserialize)]
pub struct DetectionConfig {
    #[serde(default = "default_label")]
    pub label: String,
    /// `[x0, y0, x1, y1]` in pixels.
    pub bbox: [f32; 4],
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_label() -> String {
    "object".to_string()
}

fn default_confidence() -> f32 {
    1.0
}

impl DetectionConfig {
    /// Filled-box detection on a `width × height` frame.
    pub fn to_detection(&self, width: usize, height: usize) -> Detection {
        let [x0, y0, x1, y1] = self.bbox;
        Detection::from_box(
            self.label.clone(),
            BBox::new(x0, y0, x1, y1),
            self.confidence,
            width,
            height,
        )
    }
}

/// Unsharp-mask parameters for the demo's stand-in re-render step.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SharpenConfig {
    pub sigma: f32,
    pub amount: f32,
}

impl Default for SharpenConfig {
    fn default() -> Self {
        Self {
            sigma: 1.5,
            amount: 0.6,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailDemoOutputConfig {
    #[serde(rename = "dir")]
    pub dir: PathBuf,
}

pub fn load_config(path: &Path) -> Result<DetailDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::OversizePolicy;

    #[test]
    fn minimal_config_uses_node_defaults() {
        let cfg: DetailDemoConfig = serde_json::from_str(
            r#"{ "input": "in.png", "output": { "dir": "out" } }"#,
        )
        .unwrap();
        assert!(cfg.detections.is_empty());
        assert_eq!(cfg.threshold, 0.5);
        assert_eq!(cfg.build, BuildOptions::default());
        assert_eq!(cfg.detailer, DetailerOptions::default());
        assert_eq!(cfg.output.dir, PathBuf::from("out"));
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let cfg: DetailDemoConfig = serde_json::from_str(
            r#"{
                "input": "in.png",
                "detections": [{ "bbox": [96, 96, 160, 160], "confidence": 0.8 }],
                "build": { "dilation": 0, "oversize_policy": "reject" },
                "detailer": { "feather": 2.5 },
                "output": { "dir": "out" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.build.dilation, 0);
        assert_eq!(cfg.build.context_factor, 3.0);
        assert_eq!(cfg.build.oversize_policy, OversizePolicy::Reject);
        assert_eq!(cfg.detailer.feather, 2.5);
        assert_eq!(cfg.detailer.guide_size, 256.0);
        let det = cfg.detections[0].to_detection(256, 256);
        assert_eq!(det.label, "object");
        assert_eq!(det.mask.count(), 65 * 65);
    }
}
