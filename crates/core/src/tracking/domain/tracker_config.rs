use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DEFAULT_MAX_MISSED_FRAMES, DEFAULT_MAX_TRACKING_DISTANCE, DEFAULT_MIN_CONFIDENCE_FOR_NEW_TRACK,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Pixels between predicted and detected centers beyond which no match
    /// is made.
    pub max_tracking_distance: f32,
    /// Missed frames tolerated before a track is dropped.
    pub max_missed_frames: u32,
    pub min_confidence_for_new_track: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_tracking_distance: DEFAULT_MAX_TRACKING_DISTANCE,
            max_missed_frames: DEFAULT_MAX_MISSED_FRAMES,
            min_confidence_for_new_track: DEFAULT_MIN_CONFIDENCE_FOR_NEW_TRACK,
        }
    }
}
