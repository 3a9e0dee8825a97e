use ndarray::Array2;

use super::config_error::ConfigError;

pub const BOX_COLUMNS: usize = 4;
pub const SCORE_COLUMNS: usize = 2;
pub const LANDMARK_COLUMNS: usize = 10;

/// Column of the class-score tensor holding the face probability.
pub const FACE_SCORE_INDEX: usize = 1;

/// One invocation's worth of network output, row-aligned with the anchor
/// list: box regression `[n, 4]`, class scores `[n, 2]` (background, face)
/// and, when the model emits them, landmark regression `[n, 10]`.
///
/// The tensors are owned so a frame is fully captured before decoding.
#[derive(Clone, Debug)]
pub struct RawFrameOutput {
    boxes: Array2<f32>,
    scores: Array2<f32>,
    landmarks: Option<Array2<f32>>,
}

impl RawFrameOutput {
    pub fn new(
        boxes: Array2<f32>,
        scores: Array2<f32>,
        landmarks: Option<Array2<f32>>,
    ) -> Result<Self, ConfigError> {
        let rows = boxes.nrows();
        check_columns("box", &boxes, BOX_COLUMNS)?;
        check_columns("score", &scores, SCORE_COLUMNS)?;
        check_rows("score", &scores, rows)?;
        if let Some(lm) = &landmarks {
            check_columns("landmark", lm, LANDMARK_COLUMNS)?;
            check_rows("landmark", lm, rows)?;
        }
        Ok(Self {
            boxes,
            scores,
            landmarks,
        })
    }

    /// Builds the tensors from flat row-major buffers of `num_anchors` rows.
    pub fn from_flat(
        num_anchors: usize,
        boxes: Vec<f32>,
        scores: Vec<f32>,
        landmarks: Option<Vec<f32>>,
    ) -> Result<Self, ConfigError> {
        let boxes = reshape("box", num_anchors, BOX_COLUMNS, boxes)?;
        let scores = reshape("score", num_anchors, SCORE_COLUMNS, scores)?;
        let landmarks = landmarks
            .map(|lm| reshape("landmark", num_anchors, LANDMARK_COLUMNS, lm))
            .transpose()?;
        Self::new(boxes, scores, landmarks)
    }

    pub fn num_anchors(&self) -> usize {
        self.boxes.nrows()
    }

    pub fn boxes(&self) -> &Array2<f32> {
        &self.boxes
    }

    pub fn scores(&self) -> &Array2<f32> {
        &self.scores
    }

    pub fn landmarks(&self) -> Option<&Array2<f32>> {
        self.landmarks.as_ref()
    }

    pub fn face_score(&self, index: usize) -> f32 {
        self.scores[[index, FACE_SCORE_INDEX]]
    }
}

fn check_columns(
    tensor: &'static str,
    array: &Array2<f32>,
    expected: usize,
) -> Result<(), ConfigError> {
    if array.ncols() != expected {
        return Err(ConfigError::TensorColumns {
            tensor,
            expected,
            actual: array.ncols(),
        });
    }
    Ok(())
}

fn check_rows(tensor: &'static str, array: &Array2<f32>, expected: usize) -> Result<(), ConfigError> {
    if array.nrows() != expected {
        return Err(ConfigError::TensorRows {
            tensor,
            expected,
            actual: array.nrows(),
        });
    }
    Ok(())
}

fn reshape(
    tensor: &'static str,
    rows: usize,
    columns: usize,
    data: Vec<f32>,
) -> Result<Array2<f32>, ConfigError> {
    let len = data.len();
    Array2::from_shape_vec((rows, columns), data).map_err(|_| ConfigError::TensorRows {
        tensor,
        expected: rows,
        actual: if columns == 0 { 0 } else { len / columns },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_shapes() {
        let raw = RawFrameOutput::from_flat(
            2,
            vec![0.0; 8],
            vec![0.1, 0.9, 0.8, 0.2],
            Some(vec![0.0; 20]),
        )
        .unwrap();
        assert_eq!(raw.num_anchors(), 2);
        assert_eq!(raw.face_score(0), 0.9);
        assert_eq!(raw.face_score(1), 0.2);
        assert!(raw.landmarks().is_some());
    }

    #[test]
    fn test_landmarks_optional() {
        let raw = RawFrameOutput::from_flat(1, vec![0.0; 4], vec![0.0; 2], None).unwrap();
        assert!(raw.landmarks().is_none());
    }

    #[test]
    fn test_wrong_column_count_rejected() {
        let err = RawFrameOutput::new(
            Array2::zeros((3, 4)),
            Array2::zeros((3, 3)),
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::TensorColumns {
                tensor: "score",
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_row_mismatch_rejected() {
        let err = RawFrameOutput::new(
            Array2::zeros((3, 4)),
            Array2::zeros((3, 2)),
            Some(Array2::zeros((2, 10))),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::TensorRows {
                tensor: "landmark",
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_flat_buffer_too_short_rejected() {
        let err = RawFrameOutput::from_flat(2, vec![0.0; 4], vec![0.0; 4], None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TensorRows {
                tensor: "box",
                expected: 2,
                actual: 1
            }
        );
    }
}
