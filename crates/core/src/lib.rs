//! Face detection post-processing and multi-face tracking.
//!
//! Raw per-anchor network output is decoded against a fixed anchor list,
//! filtered by non-maximum suppression and associated into persistent
//! tracks across frames.

pub mod detection;
pub mod pipeline;
pub mod shared;
pub mod tracking;
