mod common;

use common::init_logger;
use common::synthetic_image::{disc_detection, gradient_rgb};
use segment_detailer::image::{ImageView, Mask, RgbImageF32};
use segment_detailer::mask::{combine_segments, dilate_segments, intersect_segments, SegmentOp};
use segment_detailer::region::{compute_crop_region, BBox, CropRegion, OversizePolicy};
use segment_detailer::segs::{BuildOptions, Detection, Segment, SegmentBuilder, SegmentCollection};

fn three_discs() -> (RgbImageF32, SegmentCollection) {
    let image = gradient_rgb(320, 240);
    let detections = vec![
        disc_detection("a", 320, 240, 60.0, 60.0, 20.0, 0.9),
        disc_detection("b", 320, 240, 90.0, 70.0, 25.0, 0.8),
        disc_detection("c", 320, 240, 250.0, 180.0, 30.0, 0.7),
    ];
    let segs = SegmentBuilder::new(BuildOptions::default())
        .build(&image, &detections)
        .expect("build");
    (image, segs)
}

#[test]
fn crop_regions_stay_inside_and_on_grid() {
    init_logger();
    for &(w, h) in &[(48usize, 200usize), (64, 64), (100, 100), (200, 130), (640, 480), (1024, 97)] {
        for step in 0..12 {
            let t = step as f32 / 11.0;
            let x0 = t * (w as f32 - 8.0);
            let y0 = (1.0 - t) * (h as f32 - 8.0);
            let bw = 4.0 + t * 0.5 * w as f32;
            let bh = 4.0 + (1.0 - t) * 0.5 * h as f32;
            let bbox = BBox::new(x0, y0, (x0 + bw).min(w as f32), (y0 + bh).min(h as f32));
            let r = compute_crop_region(w, h, &bbox, 3.0, OversizePolicy::ShrinkToFit)
                .expect("crop region");
            assert!(r.is_within(w, h), "{r:?} outside {w}x{h}");
            for (side, limit) in [(r.width(), w), (r.height(), h)] {
                if limit >= 64 {
                    assert!(side >= 64 && side % 64 == 0, "side {side} for axis {limit}");
                } else {
                    assert_eq!(side, limit);
                }
            }
        }
    }
}

#[test]
fn reference_box_maps_to_centred_128_crop() {
    init_logger();
    let image = gradient_rgb(256, 256);
    let det = Detection::from_box("face", BBox::new(100.0, 100.0, 150.0, 150.0), 0.9, 256, 256);
    let segs = SegmentBuilder::new(BuildOptions::default())
        .build(&image, &[det])
        .unwrap();
    let seg = segs.get(0).unwrap();
    assert_eq!(seg.crop_region(), CropRegion::new(61, 61, 189, 189));
    assert_eq!(seg.bbox_size(), (50.0, 50.0));
    assert_eq!(seg.cropped_image().dims(), (128, 128));
}

#[test]
fn dilate_by_zero_is_identity() {
    let (_, segs) = three_discs();
    assert_eq!(dilate_segments(&segs, 0, 1), segs);
}

#[test]
fn combine_of_nothing_is_none() {
    assert!(combine_segments(&SegmentCollection::new(), 320, 240)
        .unwrap()
        .is_none());
}

#[test]
fn combine_is_order_independent() {
    let (_, segs) = three_discs();
    let v = segs.clone().into_vec();
    let reference = combine_segments(&segs, 320, 240).unwrap().unwrap();
    for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
        let permuted: SegmentCollection = order.iter().map(|&i| v[i].clone()).collect();
        let combined = combine_segments(&permuted, 320, 240).unwrap().unwrap();
        assert_eq!(combined, reference, "order {order:?}");
    }
}

#[test]
fn second_subtract_with_same_overlay_changes_nothing() {
    init_logger();
    let (image, base) = three_discs();
    let overlay = SegmentBuilder::new(BuildOptions::default().with_dilation(0))
        .build(
            &image,
            &[disc_detection("hand", 320, 240, 75.0, 65.0, 18.0, 0.9)],
        )
        .unwrap();
    let once = intersect_segments(&base, &overlay, SegmentOp::Subtract);
    assert_eq!(once.len(), base.len());
    assert!(once.get(0).unwrap().cropped_mask().count() < base.get(0).unwrap().cropped_mask().count());
    let twice = intersect_segments(&once, &overlay, SegmentOp::Subtract);
    assert_eq!(twice, once);
}

fn full_segment(region: CropRegion) -> Segment {
    let image = gradient_rgb(256, 256).crop(&region).unwrap();
    let (w, h) = region.dims();
    Segment::new(image, Mask::filled(w, h), 0.9, region, (32.0, 32.0)).unwrap()
}

#[test]
fn and_of_identical_full_masks_keeps_everything() {
    let region = CropRegion::new(64, 64, 192, 192);
    let base = SegmentCollection::from(vec![full_segment(region)]);
    let overlay = SegmentCollection::from(vec![full_segment(region)]);
    let out = intersect_segments(&base, &overlay, SegmentOp::And);
    assert_eq!(out.len(), 1);
    let mask = out.get(0).unwrap().cropped_mask();
    assert_eq!(mask.count(), 128 * 128);
}

#[test]
fn subtract_without_overlap_keeps_base_segment() {
    let base = SegmentCollection::from(vec![full_segment(CropRegion::new(0, 0, 64, 64))]);
    let overlay = SegmentCollection::from(vec![full_segment(CropRegion::new(128, 128, 192, 192))]);
    let out = intersect_segments(&base, &overlay, SegmentOp::Subtract);
    assert_eq!(out, base);
}
