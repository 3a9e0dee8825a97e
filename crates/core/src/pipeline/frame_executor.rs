use std::sync::Arc;

use thiserror::Error;

use crate::detection::domain::config_error::ConfigError;
use crate::detection::domain::face_detection::Detection;
use crate::detection::domain::post_processor::PostProcessor;
use crate::detection::domain::raw_frame_output::RawFrameOutput;
use crate::tracking::domain::face_tracker::FaceTracker;
use crate::tracking::domain::track::Track;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("frame {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: ConfigError,
    },
    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),
}

/// One frame of captured network output plus the source image size.
#[derive(Clone, Debug)]
pub struct RawFrame {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub output: RawFrameOutput,
}

/// Per-frame result handed to the caller, in input order.
#[derive(Clone, Debug)]
pub struct FrameResult {
    pub index: usize,
    pub detections: Vec<Detection>,
    pub tracks: Vec<Track>,
}

pub type FrameSource = Box<dyn Iterator<Item = RawFrame> + Send>;

/// Callback receiving each frame's result. Returning `false` stops the run.
pub type FrameCallback<'a> = &'a mut dyn FnMut(FrameResult) -> bool;

/// Drives decode → suppress → track over a stream of frames.
///
/// Decoding may be spread over threads, but the tracker always sees frames
/// one at a time and in source order.
pub trait FrameExecutor {
    /// Returns the number of frames delivered to `on_frame`.
    fn execute(
        &self,
        frames: FrameSource,
        post_processor: Arc<PostProcessor>,
        tracker: &mut FaceTracker,
        on_frame: FrameCallback<'_>,
    ) -> Result<usize, PipelineError>;
}

/// Runs every stage on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialFrameExecutor;

impl FrameExecutor for SequentialFrameExecutor {
    fn execute(
        &self,
        frames: FrameSource,
        post_processor: Arc<PostProcessor>,
        tracker: &mut FaceTracker,
        on_frame: FrameCallback<'_>,
    ) -> Result<usize, PipelineError> {
        let mut delivered = 0;
        for frame in frames {
            let detections = post_processor
                .process(&frame.output, frame.width, frame.height)
                .map_err(|source| PipelineError::Decode {
                    index: frame.index,
                    source,
                })?;
            let tracks = tracker.update(&detections);
            delivered += 1;
            if !on_frame(FrameResult {
                index: frame.index,
                detections,
                tracks,
            }) {
                break;
            }
        }
        Ok(delivered)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_sequential_tracks_stationary_face() {
        let frames: Vec<RawFrame> = (0..5).map(|i| frame_with_face(i * 4, 4)).collect();
        let mut tracker = FaceTracker::default();
        let mut results = Vec::new();

        let delivered = SequentialFrameExecutor
            .execute(
                Box::new(frames.into_iter()),
                tiny_post_processor(),
                &mut tracker,
                &mut |r| {
                    results.push(r);
                    true
                },
            )
            .unwrap();

        assert_eq!(delivered, 5);
        for r in &results {
            assert_eq!(r.detections.len(), 1);
            assert_eq!(r.tracks.len(), 1);
            assert_eq!(r.tracks[0].id(), 0);
        }
    }

    #[test]
    fn test_sequential_stops_when_callback_declines() {
        let frames: Vec<RawFrame> = (0..5).map(|i| frame_with_face(i, 4)).collect();
        let mut tracker = FaceTracker::default();
        let delivered = SequentialFrameExecutor
            .execute(
                Box::new(frames.into_iter()),
                tiny_post_processor(),
                &mut tracker,
                &mut |r| r.index < 1,
            )
            .unwrap();
        assert_eq!(delivered, 2);
    }

    #[test]
    fn test_sequential_reports_bad_frame() {
        let frames = vec![frame_with_face(0, 4), frame_with_face(7, 3)];
        let mut tracker = FaceTracker::default();
        let err = SequentialFrameExecutor
            .execute(
                Box::new(frames.into_iter()),
                tiny_post_processor(),
                &mut tracker,
                &mut |_| true,
            )
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode { index: 7, .. }));
    }
}
