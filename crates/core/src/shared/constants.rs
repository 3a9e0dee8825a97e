/// Square network input resolution in pixels.
pub const DEFAULT_INPUT_SIZE: u32 = 640;

/// Feature-map strides, coarsest last.
pub const DEFAULT_STRIDES: [u32; 3] = [8, 16, 32];

/// Anchor sizes (pixels) emitted per grid cell, one list per stride.
pub const DEFAULT_ANCHOR_SIZES: [[u32; 2]; 3] = [[16, 32], [64, 128], [256, 512]];

/// Anchor count for the default configuration: 80²·2 + 40²·2 + 20²·2.
pub const DEFAULT_NUM_ANCHORS: usize = 16_800;

/// Box regression scaling `[cx, cy, w, h]` used at training time.
pub const VARIANCES: [f32; 4] = [0.1, 0.1, 0.2, 0.2];

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;
pub const MIN_CONFIDENCE_THRESHOLD: f32 = 0.1;
pub const MAX_CONFIDENCE_THRESHOLD: f32 = 0.9;

pub const DEFAULT_IOU_THRESHOLD: f32 = 0.4;

/// Tracks further than this (pixels, center to center) never match.
pub const DEFAULT_MAX_TRACKING_DISTANCE: f32 = 150.0;

/// Consecutive missed frames a track survives before removal.
pub const DEFAULT_MAX_MISSED_FRAMES: u32 = 10;

/// Unmatched detections below this confidence never seed a track.
pub const DEFAULT_MIN_CONFIDENCE_FOR_NEW_TRACK: f32 = 0.6;

/// Boxes retained per track for motion prediction.
pub const POSITION_HISTORY_CAPACITY: usize = 10;

pub const NUM_LANDMARKS: usize = 5;
