use super::face_detection::Detection;

/// Greedy non-maximum suppression.
///
/// Detections are visited by descending confidence (stable: equal scores
/// keep their input order). A detection survives only if its IoU with every
/// already-kept detection is below `iou_threshold`; boxes that do not
/// overlap at all always survive.
pub fn suppress(detections: &[Detection], iou_threshold: f32) -> Vec<Detection> {
    if detections.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Detection> = detections.iter().collect();
    sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<Detection> = Vec::with_capacity(sorted.len());
    for det in sorted {
        let dominated = kept.iter().any(|k| {
            let iou = det.bounding_box.iou(&k.bounding_box);
            iou > 0.0 && iou >= iou_threshold
        });
        if !dominated {
            kept.push(det.clone());
        }
    }

    log::trace!("NMS kept {} of {} detections", kept.len(), detections.len());
    kept
}
