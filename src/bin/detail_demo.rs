//! Demonstration binary for the segment detailer.
//!
//! 1. Load the input image and the configured boxes (a stand-in detector).
//! 2. Build segments around the boxes that clear the threshold.
//! 3. Re-render each small segment with an unsharp mask in place of a
//!    generative model and composite the results back.
//! 4. Write the refined image, the combined dilated mask (hard and feathered)
//!    and a JSON report.

use log::info;
use segment_detailer::config::detail_demo::{self as demo_cfg, SharpenConfig};
use segment_detailer::detailer::{DetailCompositor, ReRender, RenderContext};
use segment_detailer::diagnostics::{summarize, DetailReport, SegmentSummary};
use segment_detailer::error::AdapterError;
use segment_detailer::image::io::{
    load_rgb_image, save_alpha, save_mask, save_rgb_image, write_json_file,
};
use segment_detailer::image::{ImageF32, ImageView, RgbImageF32};
use segment_detailer::mask::{convolve_separable, feather, GaussianFilter};
use segment_detailer::pipeline::{detect_combined_mask, detect_segments};
use segment_detailer::segs::Detection;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = demo_cfg::load_config(Path::new(&config_path))?;

    let image = load_rgb_image(&config.input)?;
    let boxes = config.detections.clone();
    let detector = move |img: &RgbImageF32, _threshold: f32| -> Result<Vec<Detection>, AdapterError> {
        let (w, h) = img.dims();
        Ok(boxes.iter().map(|d| d.to_detection(w, h)).collect())
    };

    let segments = detect_segments(&detector, &image, config.threshold, &config.build)
        .map_err(|e| format!("Segment construction failed: {e}"))?;
    info!("built {} segments from {}", segments.len(), config.input.display());

    let combined = detect_combined_mask(&detector, &image, config.threshold, config.build.dilation)
        .map_err(|e| format!("Mask combination failed: {e}"))?;

    let renderer = UnsharpRenderer::new(config.renderer);
    let compositor = DetailCompositor::new(config.detailer);
    let (refined, report) = compositor
        .refine_with_report(&image, &segments, &renderer)
        .map_err(|e| format!("Detail pass failed: {e}"))?;

    let out_dir = &config.output.dir;
    let image_path = out_dir.join("refined.png");
    let mask_path = out_dir.join("combined_mask.png");
    let alpha_path = out_dir.join("combined_alpha.png");
    let report_path = out_dir.join("report.json");

    save_rgb_image(&refined, &image_path)?;
    if let Some(mask) = &combined {
        save_mask(mask, &mask_path)?;
        save_alpha(&feather(mask, config.detailer.feather), &alpha_path)?;
    }
    write_json_file(
        &report_path,
        &DemoReport {
            input: config.input.display().to_string(),
            threshold: config.threshold,
            combined_mask_pixels: combined.as_ref().map(|m| m.count()),
            segments: summarize(&segments),
            detail: report,
        },
    )?;

    println!("Saved refined image to {}", image_path.display());
    match &combined {
        Some(mask) => println!(
            "Saved combined mask ({} px) to {}",
            mask.count(),
            mask_path.display()
        ),
        None => println!("No detections above {:.2}; no mask written", config.threshold),
    }
    println!("Saved report to {}", report_path.display());
    Ok(())
}

fn usage() -> String {
    "Usage: detail_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DemoReport {
    input: String,
    threshold: f32,
    combined_mask_pixels: Option<usize>,
    segments: Vec<SegmentSummary>,
    detail: DetailReport,
}

/// Sharpens the upscaled crop: `out = crop + amount · (crop − blur(crop))`.
struct UnsharpRenderer {
    filter: GaussianFilter,
    amount: f32,
}

impl UnsharpRenderer {
    fn new(cfg: SharpenConfig) -> Self {
        Self {
            filter: GaussianFilter::new(cfg.sigma),
            amount: cfg.amount,
        }
    }
}

impl ReRender for UnsharpRenderer {
    fn render(&self, crop: &RgbImageF32, _ctx: &RenderContext) -> Result<RgbImageF32, AdapterError> {
        let mut out = crop.clone();
        for c in 0..3 {
            let plane = ImageF32::from_channel(crop, c);
            let blurred = convolve_separable(&plane, &self.filter);
            for ((px, &orig), &blur) in out.data.iter_mut().zip(&plane.data).zip(&blurred.data) {
                px[c] = (orig + self.amount * (orig - blur)).clamp(0.0, 1.0);
            }
        }
        Ok(out)
    }
}
