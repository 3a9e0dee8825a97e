/// Nearest-neighbour multi-face tracker.
///
/// Each update runs in three steps: existing tracks are matched against the
/// frame's detections in their current order, unmatched tracks age and are
/// dropped once past the missed-frame tolerance, and confident leftover
/// detections seed new tracks appended after the survivors.
use crate::detection::domain::face_detection::Detection;
use crate::shared::bounding_box::BoundingBox;

use super::association::{AssociationStrategy, GreedyNearestNeighbor};
use super::track::{Track, TrackState};
use super::tracker_config::TrackerConfig;

pub struct FaceTracker {
    tracks: Vec<Track>,
    next_id: u32,
    config: TrackerConfig,
    strategy: Box<dyn AssociationStrategy>,
}

impl FaceTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_strategy(config, Box::new(GreedyNearestNeighbor))
    }

    pub fn with_strategy(config: TrackerConfig, strategy: Box<dyn AssociationStrategy>) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 0,
            config,
            strategy,
        }
    }

    /// Advances all tracks by one frame and returns a snapshot of the live set.
    pub fn update(&mut self, detections: &[Detection]) -> Vec<Track> {
        let predictions: Vec<BoundingBox> = self.tracks.iter().map(Track::predicted_box).collect();
        let assignments =
            self.strategy
                .associate(&predictions, detections, self.config.max_tracking_distance);

        let mut claimed = vec![false; detections.len()];
        let mut live = Vec::with_capacity(self.tracks.len() + detections.len());
        let mut dropped = 0usize;

        for (ti, mut track) in std::mem::take(&mut self.tracks).into_iter().enumerate() {
            let assigned = assignments
                .get(ti)
                .copied()
                .flatten()
                .filter(|&di| di < detections.len() && !claimed[di]);

            match assigned {
                Some(di) => {
                    claimed[di] = true;
                    log::trace!("Track {} matched detection {di}", track.id());
                    track.matched(detections[di].clone());
                    live.push(track);
                }
                None => match track.missed(self.config.max_missed_frames) {
                    TrackState::Active => live.push(track),
                    TrackState::Lost => {
                        log::trace!("Track {} lost", track.id());
                        dropped += 1;
                    }
                },
            }
        }

        let mut born = 0usize;
        for (di, det) in detections.iter().enumerate() {
            if claimed[di] {
                continue;
            }
            if det.confidence >= self.config.min_confidence_for_new_track {
                live.push(Track::new(self.next_id, det.clone()));
                self.next_id += 1;
                born += 1;
            }
        }

        if born > 0 || dropped > 0 {
            log::debug!(
                "Tracker: {} live, {born} new, {dropped} dropped",
                live.len()
            );
        }

        self.tracks = live;
        self.tracks.clone()
    }

    /// Read-only view of the live tracks.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn live_track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Drops every track. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

impl Default for FaceTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
