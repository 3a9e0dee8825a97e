use thiserror::Error;

use crate::shared::frame::Frame;

use super::config_error::ConfigError;
use super::face_detection::Detection;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load model: {0}")]
    ModelLoad(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("model produced {actual} outputs, expected {expected}")]
    OutputCount { expected: usize, actual: usize },
    #[error("unexpected {name} output shape {shape:?}")]
    OutputShape { name: &'static str, shape: Vec<usize> },
    #[error("frame has {0} channels, expected 3 or 4")]
    UnsupportedChannels(u8),
}

/// Domain interface for per-frame face detection.
///
/// Implementations may own an inference session, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, DetectionError>;
}
