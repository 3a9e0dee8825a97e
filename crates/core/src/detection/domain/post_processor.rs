use std::sync::Arc;

use super::anchor::{generate_anchors, Anchor};
use super::confidence_threshold::ConfidenceThreshold;
use super::config_error::ConfigError;
use super::detection_decoder::decode;
use super::detector_config::DetectorConfig;
use super::face_detection::Detection;
use super::non_max_suppression::suppress;
use super::raw_frame_output::RawFrameOutput;

/// Decode + suppression stage for one detector configuration.
///
/// Anchors are generated once at construction and never regenerated.
/// `&self` methods are safe to call from many threads at once; the
/// confidence threshold may be changed while frames are in flight.
#[derive(Debug)]
pub struct PostProcessor {
    anchors: Arc<[Anchor]>,
    confidence: ConfidenceThreshold,
    iou_threshold: f32,
    input_size: u32,
}

impl PostProcessor {
    pub fn new(config: &DetectorConfig) -> Result<Self, ConfigError> {
        let anchors: Arc<[Anchor]> = generate_anchors(config)?.into();
        Ok(Self {
            anchors,
            confidence: ConfidenceThreshold::new(config.confidence_threshold),
            iou_threshold: config.iou_threshold,
            input_size: config.input_size,
        })
    }

    /// Filtered, suppressed detections for one frame of raw output.
    pub fn process(
        &self,
        raw: &RawFrameOutput,
        image_width: u32,
        image_height: u32,
    ) -> Result<Vec<Detection>, ConfigError> {
        let threshold = self.confidence.get();
        let candidates = decode(raw, &self.anchors, threshold, image_width, image_height)?;
        let detections = suppress(&candidates, self.iou_threshold);
        log::debug!(
            "Decoded {} candidates above {threshold:.2}, {} after NMS",
            candidates.len(),
            detections.len()
        );
        Ok(detections)
    }

    pub fn set_confidence_threshold(&self, threshold: f32) {
        self.confidence.set(threshold);
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence.get()
    }

    pub fn iou_threshold(&self) -> f32 {
        self.iou_threshold
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn num_anchors(&self) -> usize {
        self.anchors.len()
    }
}
