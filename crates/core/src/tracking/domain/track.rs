use crate::detection::domain::face_detection::Detection;
use crate::shared::bounding_box::BoundingBox;

use super::position_history::PositionHistory;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackState {
    /// Matched recently enough to stay in the live set (possibly stale).
    Active,
    /// Missed-frame tolerance exceeded; removed on this update.
    Lost,
}

/// A persistent face identity.
///
/// Only the tracker mutates tracks; callers receive clones.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    id: u32,
    detection: Detection,
    history: PositionHistory,
    missed_frames: u32,
    state: TrackState,
}

impl Track {
    /// New track seeded with `detection` as its first history entry.
    pub(crate) fn new(id: u32, detection: Detection) -> Self {
        let mut history = PositionHistory::new();
        history.push(detection.bounding_box);
        Self {
            id,
            detection,
            history,
            missed_frames: 0,
            state: TrackState::Active,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.detection.bounding_box
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    pub fn missed_frames(&self) -> u32 {
        self.missed_frames
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    /// True when the track was not matched on the latest update.
    pub fn is_stale(&self) -> bool {
        self.missed_frames > 0
    }

    /// Where the face is expected next: the latest box shifted by the
    /// center delta of the last two history entries, or the current box
    /// when there is not enough history.
    pub fn predicted_box(&self) -> BoundingBox {
        match self.history.last_two() {
            Some((previous, latest)) => {
                let (px, py) = previous.center();
                let (lx, ly) = latest.center();
                latest.translated(lx - px, ly - py)
            }
            None => self.detection.bounding_box,
        }
    }

    pub(crate) fn matched(&mut self, detection: Detection) {
        self.history.push(detection.bounding_box);
        self.detection = detection;
        self.missed_frames = 0;
        self.state = TrackState::Active;
    }

    /// Records a frame without a match and returns the resulting state.
    pub(crate) fn missed(&mut self, max_missed_frames: u32) -> TrackState {
        self.missed_frames += 1;
        if self.missed_frames > max_missed_frames {
            self.state = TrackState::Lost;
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn det(left: f32, top: f32, right: f32, bottom: f32) -> Detection {
        Detection::new(BoundingBox::new(left, top, right, bottom), 0.9)
    }

    #[test]
    fn test_new_track_seeds_history() {
        let track = Track::new(3, det(10.0, 10.0, 20.0, 20.0));
        assert_eq!(track.id(), 3);
        assert_eq!(track.history().len(), 1);
        assert_eq!(track.missed_frames(), 0);
        assert_eq!(track.state(), TrackState::Active);
    }

    #[test]
    fn test_prediction_without_motion_history() {
        let track = Track::new(0, det(10.0, 10.0, 20.0, 20.0));
        assert_eq!(track.predicted_box(), BoundingBox::new(10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn test_prediction_extrapolates_linearly() {
        let mut track = Track::new(0, det(10.0, 10.0, 20.0, 20.0));
        track.matched(det(12.0, 10.0, 22.0, 20.0));

        let predicted = track.predicted_box();
        let (lx, ly) = track.bounding_box().center();
        let (px, py) = predicted.center();
        assert_relative_eq!(px - lx, 2.0);
        assert_relative_eq!(py - ly, 0.0);
        assert_eq!(predicted, BoundingBox::new(14.0, 10.0, 24.0, 20.0));
    }

    #[test]
    fn test_match_resets_missed_frames() {
        let mut track = Track::new(0, det(10.0, 10.0, 20.0, 20.0));
        track.missed(10);
        track.missed(10);
        assert_eq!(track.missed_frames(), 2);
        assert!(track.is_stale());

        track.matched(det(11.0, 10.0, 21.0, 20.0));
        assert_eq!(track.missed_frames(), 0);
        assert!(!track.is_stale());
        assert_eq!(track.history().len(), 2);
    }

    #[test]
    fn test_lost_after_tolerance_exceeded() {
        let mut track = Track::new(0, det(10.0, 10.0, 20.0, 20.0));
        for _ in 0..2 {
            assert_eq!(track.missed(2), TrackState::Active);
        }
        assert_eq!(track.missed(2), TrackState::Lost);
    }
}
