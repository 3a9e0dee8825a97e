use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::NUM_LANDMARKS;

/// Five facial keypoints in absolute pixels:
/// `[left_eye, right_eye, nose, left_mouth, right_mouth]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceLandmarks {
    points: [(f32, f32); NUM_LANDMARKS],
}

impl FaceLandmarks {
    pub fn new(points: [(f32, f32); NUM_LANDMARKS]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f32, f32); NUM_LANDMARKS] {
        &self.points
    }
}

/// One decoded face. Equality is structural over box, confidence and
/// landmarks.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub bounding_box: BoundingBox,
    pub confidence: f32,
    pub landmarks: Option<FaceLandmarks>,
}

impl Detection {
    pub fn new(bounding_box: BoundingBox, confidence: f32) -> Self {
        Self {
            bounding_box,
            confidence,
            landmarks: None,
        }
    }

    pub fn with_landmarks(mut self, landmarks: FaceLandmarks) -> Self {
        self.landmarks = Some(landmarks);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_includes_landmarks() {
        let base = Detection::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0.9);
        let with = base
            .clone()
            .with_landmarks(FaceLandmarks::new([(1.0, 1.0); NUM_LANDMARKS]));
        assert_ne!(base, with);
        assert_eq!(with, with.clone());
    }
}
