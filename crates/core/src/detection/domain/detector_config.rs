use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DEFAULT_ANCHOR_SIZES, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_INPUT_SIZE, DEFAULT_IOU_THRESHOLD,
    DEFAULT_STRIDES,
};

use super::config_error::ConfigError;
use super::confidence_threshold::clamp_confidence;

/// Network geometry plus the decode/suppression thresholds.
///
/// `strides[k]` pairs with `anchor_sizes[k]`; the order of both lists is
/// the order the network emits its anchors in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub input_size: u32,
    pub strides: Vec<u32>,
    pub anchor_sizes: Vec<Vec<u32>>,
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            strides: DEFAULT_STRIDES.to_vec(),
            anchor_sizes: DEFAULT_ANCHOR_SIZES.iter().map(|s| s.to_vec()).collect(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
        }
    }
}

impl DetectorConfig {
    /// Sets the confidence threshold from a whole-number percentage, the way
    /// settings screens store it (`50` → `0.5`). Clamped like any threshold.
    pub fn with_confidence_percent(mut self, percent: u32) -> Self {
        self.confidence_threshold = clamp_confidence(percent as f32 / 100.0);
        self
    }

    /// Rejects geometry that cannot produce a well-defined anchor list, and
    /// an IoU threshold outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_size == 0 {
            return Err(ConfigError::ZeroInputSize);
        }
        if self.strides.is_empty() {
            return Err(ConfigError::NoStrides);
        }
        if self.strides.len() != self.anchor_sizes.len() {
            return Err(ConfigError::StrideCountMismatch {
                strides: self.strides.len(),
                anchor_sizes: self.anchor_sizes.len(),
            });
        }
        for (index, (&stride, sizes)) in self.strides.iter().zip(&self.anchor_sizes).enumerate() {
            if stride == 0 {
                return Err(ConfigError::ZeroStride { index });
            }
            if stride > self.input_size {
                return Err(ConfigError::StrideExceedsInput {
                    stride,
                    input_size: self.input_size,
                });
            }
            if sizes.is_empty() {
                return Err(ConfigError::EmptyAnchorSizes { index });
            }
            if sizes.contains(&0) {
                return Err(ConfigError::ZeroAnchorSize { index });
            }
        }
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(ConfigError::IouThresholdOutOfRange);
        }
        Ok(())
    }

    /// Number of anchors this configuration generates.
    pub fn num_anchors(&self) -> usize {
        self.strides
            .iter()
            .zip(&self.anchor_sizes)
            .map(|(&stride, sizes)| {
                let grid = (self.input_size / stride.max(1)) as usize;
                grid * grid * sizes.len()
            })
            .sum()
    }
}
