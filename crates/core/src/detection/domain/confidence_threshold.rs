use std::sync::atomic::{AtomicU32, Ordering};

use crate::shared::constants::{
    DEFAULT_CONFIDENCE_THRESHOLD, MAX_CONFIDENCE_THRESHOLD, MIN_CONFIDENCE_THRESHOLD,
};

/// Clamps a threshold into `[0.1, 0.9]`.
pub fn clamp_confidence(threshold: f32) -> f32 {
    threshold.clamp(MIN_CONFIDENCE_THRESHOLD, MAX_CONFIDENCE_THRESHOLD)
}

/// Face-confidence cutoff shared between a settings writer and any number
/// of concurrent decode calls.
///
/// Stored as raw `f32` bits. Readers use relaxed loads: a decode call sees
/// a new value only if it starts after the store was observed.
#[derive(Debug)]
pub struct ConfidenceThreshold {
    bits: AtomicU32,
}

impl ConfidenceThreshold {
    pub fn new(threshold: f32) -> Self {
        let initial = if threshold.is_nan() {
            log::warn!(
                "Ignoring NaN confidence threshold, using default {DEFAULT_CONFIDENCE_THRESHOLD}"
            );
            DEFAULT_CONFIDENCE_THRESHOLD
        } else {
            clamp_confidence(threshold)
        };
        Self {
            bits: AtomicU32::new(initial.to_bits()),
        }
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Stores the clamped threshold. NaN is ignored.
    pub fn set(&self, threshold: f32) {
        if threshold.is_nan() {
            log::warn!("Ignoring NaN confidence threshold, keeping {}", self.get());
            return;
        }
        self.bits
            .store(clamp_confidence(threshold).to_bits(), Ordering::Relaxed);
    }
}

impl Default for ConfidenceThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}
