//! Turns raw regression/score tensors into image-space detections.

use ndarray::ArrayView1;

use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::{NUM_LANDMARKS, VARIANCES};

use super::anchor::Anchor;
use super::config_error::ConfigError;
use super::face_detection::{Detection, FaceLandmarks};
use super::raw_frame_output::RawFrameOutput;

/// Decodes every anchor whose face score is strictly above
/// `confidence_threshold`.
///
/// Boxes are scaled to `image_width × image_height` and clamped per
/// coordinate; boxes that collapse to zero width or height are dropped.
/// Output follows anchor order.
pub fn decode(
    raw: &RawFrameOutput,
    anchors: &[Anchor],
    confidence_threshold: f32,
    image_width: u32,
    image_height: u32,
) -> Result<Vec<Detection>, ConfigError> {
    if raw.num_anchors() != anchors.len() {
        return Err(ConfigError::AnchorCountMismatch {
            expected: anchors.len(),
            actual: raw.num_anchors(),
        });
    }

    let w = image_width as f32;
    let h = image_height as f32;
    let mut detections = Vec::new();

    for (i, anchor) in anchors.iter().enumerate() {
        let confidence = raw.face_score(i);
        if confidence.is_nan() || confidence <= confidence_threshold {
            continue;
        }

        let normalized = decode_box(raw.boxes().row(i), anchor);
        let bounding_box = BoundingBox::new(
            (normalized.left * w).clamp(0.0, w),
            (normalized.top * h).clamp(0.0, h),
            (normalized.right * w).clamp(0.0, w),
            (normalized.bottom * h).clamp(0.0, h),
        );
        if bounding_box.is_degenerate() {
            continue;
        }

        let landmarks = raw
            .landmarks()
            .map(|lm| decode_landmarks(lm.row(i), anchor, w, h));

        detections.push(Detection {
            bounding_box,
            confidence,
            landmarks,
        });
    }

    Ok(detections)
}

/// Center-size regression against `anchor`, returned in normalized
/// `(left, top, right, bottom)` form.
fn decode_box(reg: ArrayView1<'_, f32>, anchor: &Anchor) -> BoundingBox {
    let cx = anchor.cx + reg[0] * VARIANCES[0] * anchor.sx;
    let cy = anchor.cy + reg[1] * VARIANCES[1] * anchor.sy;
    let bw = anchor.sx * (reg[2] * VARIANCES[2]).exp();
    let bh = anchor.sy * (reg[3] * VARIANCES[3]).exp();
    BoundingBox::new(cx - bw / 2.0, cy - bh / 2.0, cx + bw / 2.0, cy + bh / 2.0)
}

fn decode_landmarks(reg: ArrayView1<'_, f32>, anchor: &Anchor, w: f32, h: f32) -> FaceLandmarks {
    let mut points = [(0.0, 0.0); NUM_LANDMARKS];
    for (k, point) in points.iter_mut().enumerate() {
        let x = anchor.cx + reg[2 * k] * VARIANCES[0] * anchor.sx;
        let y = anchor.cy + reg[2 * k + 1] * VARIANCES[1] * anchor.sy;
        *point = ((x * w).clamp(0.0, w), (y * h).clamp(0.0, h));
    }
    FaceLandmarks::new(points)
}
