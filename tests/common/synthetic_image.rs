use segment_detailer::image::{Mask, RgbImageF32};
use segment_detailer::region::BBox;
use segment_detailer::segs::Detection;

/// Smooth horizontal/vertical ramp, distinct at every pixel of a 256×256 frame.
pub fn gradient_rgb(width: usize, height: usize) -> RgbImageF32 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbImageF32::from_fn(width, height, |x, y| {
        [
            x as f32 / width as f32,
            y as f32 / height as f32,
            ((x + y) % 17) as f32 / 16.0,
        ]
    })
}

/// High-contrast checkerboard in RGB.
pub fn checkerboard_rgb(width: usize, height: usize, cell: usize) -> RgbImageF32 {
    assert!(cell > 0, "cell size must be positive");
    RgbImageF32::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) & 1 == 0 {
            [0.125; 3]
        } else {
            [0.86; 3]
        }
    })
}

/// Filled-disc mask centred at `(cx, cy)`.
pub fn disc_mask(width: usize, height: usize, cx: f32, cy: f32, r: f32) -> Mask {
    Mask::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        dx * dx + dy * dy <= r * r
    })
}

/// Detection with a disc-shaped mask inscribed in its box.
pub fn disc_detection(
    label: &str,
    width: usize,
    height: usize,
    cx: f32,
    cy: f32,
    r: f32,
    confidence: f32,
) -> Detection {
    Detection::new(
        label,
        BBox::new(cx - r, cy - r, cx + r, cy + r),
        disc_mask(width, height, cx, cy, r),
        confidence,
    )
}
