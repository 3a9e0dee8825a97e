use crate::detection::domain::face_detection::Detection;
use crate::shared::bounding_box::BoundingBox;

/// Pairs tracks with detections for one frame.
///
/// `predictions[t]` is the expected box of track `t` in tracker order.
/// Returns, for each track, the index into `detections` it is matched to.
/// No detection may be assigned to more than one track.
pub trait AssociationStrategy: Send {
    fn associate(
        &self,
        predictions: &[BoundingBox],
        detections: &[Detection],
        max_distance: f32,
    ) -> Vec<Option<usize>>;
}

/// Order-dependent nearest-neighbour matching.
///
/// Tracks are served in order; each takes the closest still-unassigned
/// detection whose center lies strictly within `max_distance` of its
/// prediction. An earlier track always wins a contested detection, even
/// when a later track is closer to it.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyNearestNeighbor;

impl AssociationStrategy for GreedyNearestNeighbor {
    fn associate(
        &self,
        predictions: &[BoundingBox],
        detections: &[Detection],
        max_distance: f32,
    ) -> Vec<Option<usize>> {
        let mut taken = vec![false; detections.len()];

        predictions
            .iter()
            .map(|predicted| {
                let mut best: Option<(usize, f32)> = None;
                for (di, det) in detections.iter().enumerate() {
                    if taken[di] {
                        continue;
                    }
                    let distance = predicted.center_distance(&det.bounding_box);
                    let closer = best.map_or(true, |(_, d)| distance < d);
                    if closer && distance < max_distance {
                        best = Some((di, distance));
                    }
                }
                let (di, _) = best?;
                taken[di] = true;
                Some(di)
            })
            .collect()
    }
}
