use std::collections::VecDeque;

use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::POSITION_HISTORY_CAPACITY;

/// Most recent boxes of a track, oldest first, bounded to
/// `POSITION_HISTORY_CAPACITY` entries. Pushing onto a full history
/// evicts the oldest box.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionHistory {
    boxes: VecDeque<BoundingBox>,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self {
            boxes: VecDeque::with_capacity(POSITION_HISTORY_CAPACITY),
        }
    }

    pub fn push(&mut self, bounding_box: BoundingBox) {
        if self.boxes.len() == POSITION_HISTORY_CAPACITY {
            self.boxes.pop_front();
        }
        self.boxes.push_back(bounding_box);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn latest(&self) -> Option<&BoundingBox> {
        self.boxes.back()
    }

    /// The two most recent boxes as `(previous, latest)`.
    pub fn last_two(&self) -> Option<(&BoundingBox, &BoundingBox)> {
        let n = self.boxes.len();
        if n < 2 {
            return None;
        }
        Some((&self.boxes[n - 2], &self.boxes[n - 1]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundingBox> {
        self.boxes.iter()
    }
}
