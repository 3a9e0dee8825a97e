/// RetinaFace-style face detector using ONNX Runtime via `ort`.
///
/// The model takes a square BGR mean-subtracted NCHW image and returns three
/// per-anchor tensors (boxes, scores, landmarks). Decoding and suppression
/// are delegated to the domain `PostProcessor`.
use std::path::Path;
use std::sync::Arc;

use crate::detection::domain::detector_config::DetectorConfig;
use crate::detection::domain::face_detection::Detection;
use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::detection::domain::post_processor::PostProcessor;
use crate::detection::domain::raw_frame_output::{
    RawFrameOutput, BOX_COLUMNS, LANDMARK_COLUMNS, SCORE_COLUMNS,
};
use crate::shared::frame::Frame;

/// Per-channel means subtracted in B, G, R order.
const BGR_MEAN: [f32; 3] = [104.0, 117.0, 123.0];

/// Output tensor positions.
const BOX_OUTPUT: usize = 0;
const SCORE_OUTPUT: usize = 1;
const LANDMARK_OUTPUT: usize = 2;

pub struct OnnxRetinafaceDetector {
    session: ort::session::Session,
    post_processor: Arc<PostProcessor>,
}

impl OnnxRetinafaceDetector {
    /// Load the ONNX model and generate anchors for `config`.
    pub fn new(model_path: &Path, config: &DetectorConfig) -> Result<Self, DetectionError> {
        let post_processor = Arc::new(PostProcessor::new(config)?);
        Self::with_post_processor(model_path, post_processor)
    }

    /// Share an existing post-processor, e.g. one whose threshold is driven
    /// by a settings screen.
    pub fn with_post_processor(
        model_path: &Path,
        post_processor: Arc<PostProcessor>,
    ) -> Result<Self, DetectionError> {
        let session =
            load_session(model_path).map_err(|e| DetectionError::ModelLoad(e.to_string()))?;
        log::info!(
            "Loaded face model {} ({} anchors)",
            model_path.display(),
            post_processor.num_anchors()
        );
        Ok(Self {
            session,
            post_processor,
        })
    }

    pub fn post_processor(&self) -> &Arc<PostProcessor> {
        &self.post_processor
    }

    fn run(&mut self, input: ndarray::Array4<f32>) -> Result<RawFrameOutput, DetectionError> {
        let input_value = ort::value::Tensor::from_array(input).map_err(inference_error)?;
        let outputs = self
            .session
            .run(ort::inputs![input_value])
            .map_err(inference_error)?;

        if outputs.len() < 3 {
            return Err(DetectionError::OutputCount {
                expected: 3,
                actual: outputs.len(),
            });
        }

        let boxes = flatten(
            outputs[BOX_OUTPUT].try_extract_array::<f32>().map_err(inference_error)?,
            "box",
            BOX_COLUMNS,
        )?;
        let scores = flatten(
            outputs[SCORE_OUTPUT].try_extract_array::<f32>().map_err(inference_error)?,
            "score",
            SCORE_COLUMNS,
        )?;
        let landmarks = flatten(
            outputs[LANDMARK_OUTPUT]
                .try_extract_array::<f32>()
                .map_err(inference_error)?,
            "landmark",
            LANDMARK_COLUMNS,
        )?;

        let num_anchors = boxes.len() / BOX_COLUMNS;
        Ok(RawFrameOutput::from_flat(
            num_anchors,
            boxes,
            scores,
            Some(landmarks),
        )?)
    }
}

impl FaceDetector for OnnxRetinafaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, DetectionError> {
        let input = preprocess(frame, self.post_processor.input_size())?;
        let raw = self.run(input)?;
        let detections = self
            .post_processor
            .process(&raw, frame.width(), frame.height())?;
        log::debug!("Frame {}: {} faces", frame.index(), detections.len());
        Ok(detections)
    }
}

fn inference_error<E: std::fmt::Display>(e: E) -> DetectionError {
    DetectionError::Inference(e.to_string())
}

fn load_session(model_path: &Path) -> Result<ort::session::Session, Box<dyn std::error::Error>> {
    Ok(ort::session::Session::builder()?.commit_from_file(model_path)?)
}

/// Copies one `[1, n, columns]` (or `[n, columns]`) output into a flat buffer.
fn flatten<D: ndarray::Dimension>(
    array: ndarray::ArrayView<'_, f32, D>,
    name: &'static str,
    columns: usize,
) -> Result<Vec<f32>, DetectionError> {
    let shape = array.shape().to_vec();
    if shape.last() != Some(&columns) {
        return Err(DetectionError::OutputShape { name, shape });
    }
    Ok(array.iter().copied().collect())
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Nearest-neighbour resize to `size × size`, reorder to planar BGR and
/// subtract the channel means. Output is NCHW float32.
fn preprocess(frame: &Frame, size: u32) -> Result<ndarray::Array4<f32>, DetectionError> {
    let channels = frame.channels();
    if channels != 3 && channels != 4 {
        return Err(DetectionError::UnsupportedChannels(channels));
    }

    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;
    let s = size as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));
    if src_h == 0 || src_w == 0 {
        return Ok(tensor);
    }

    for y in 0..s {
        let src_y = (y * src_h / s).min(src_h - 1);
        for x in 0..s {
            let src_x = (x * src_w / s).min(src_w - 1);
            for (c, mean) in BGR_MEAN.iter().enumerate() {
                // Frame is RGB; plane 0 is blue
                tensor[[0, c, y, x]] = src[[src_y, src_x, 2 - c]] as f32 - mean;
            }
        }
    }

    Ok(tensor)
}
