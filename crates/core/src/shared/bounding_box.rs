/// Axis-aligned box in absolute image pixels: `(left, top, right, bottom)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True unless the box has positive extent along both axes.
    /// NaN coordinates count as degenerate.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Euclidean distance between the two box centers.
    pub fn center_distance(&self, other: &BoundingBox) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        ((ax - bx) * (ax - bx) + (ay - by) * (ay - by)).sqrt()
    }

    /// Intersection-over-union.
    ///
    /// Exactly 0.0 when the boxes do not overlap (touching edges included)
    /// and when the union area is not positive.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let ix1 = self.left.max(other.left);
        let iy1 = self.top.max(other.top);
        let ix2 = self.right.min(other.right);
        let iy2 = self.bottom.min(other.bottom);

        if ix1 >= ix2 || iy1 >= iy2 {
            return 0.0;
        }

        let inter = (ix2 - ix1) * (iy2 - iy1);
        let union = self.area() + other.area() - inter;
        if union > 0.0 {
            inter / union
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_dimensions() {
        let b = BoundingBox::new(10.0, 20.0, 50.0, 80.0);
        assert_relative_eq!(b.width(), 40.0);
        assert_relative_eq!(b.height(), 60.0);
        assert_relative_eq!(b.area(), 2400.0);
        assert_eq!(b.center(), (30.0, 50.0));
    }

    #[test]
    fn test_translated_keeps_size() {
        let b = BoundingBox::new(10.0, 10.0, 20.0, 20.0).translated(2.0, -1.0);
        assert_eq!(b, BoundingBox::new(12.0, 9.0, 22.0, 19.0));
    }

    #[test]
    fn test_center_distance() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(3.0, 4.0, 13.0, 14.0);
        assert_relative_eq!(a.center_distance(&b), 5.0);
    }

    // ── IoU ──────────────────────────────────────────────────────────

    #[test]
    fn test_iou_identical() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_relative_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        assert_relative_eq!(a.iou(&b), 25.0 / 175.0);
    }

    #[test]
    fn test_iou_contained() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BoundingBox::new(25.0, 25.0, 75.0, 75.0);
        assert_relative_eq!(a.iou(&b), 0.25);
    }

    #[rstest]
    #[case::disjoint(BoundingBox::new(20.0, 20.0, 30.0, 30.0))]
    #[case::touching_edge(BoundingBox::new(10.0, 0.0, 20.0, 10.0))]
    #[case::touching_corner(BoundingBox::new(10.0, 10.0, 20.0, 20.0))]
    fn test_iou_no_overlap_is_zero(#[case] other: BoundingBox) {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.iou(&other), 0.0);
        assert_eq!(other.iou(&a), 0.0);
    }

    #[rstest]
    #[case::zero_width(BoundingBox::new(5.0, 0.0, 5.0, 10.0))]
    #[case::zero_height(BoundingBox::new(0.0, 5.0, 10.0, 5.0))]
    fn test_iou_degenerate_is_zero(#[case] other: BoundingBox) {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.iou(&other), 0.0);
        assert!(other.is_degenerate());
    }

    #[rstest]
    #[case::nan_left(BoundingBox::new(f32::NAN, 0.0, 10.0, 10.0))]
    #[case::nan_bottom(BoundingBox::new(0.0, 0.0, 10.0, f32::NAN))]
    fn test_nan_box_is_degenerate(#[case] b: BoundingBox) {
        assert!(b.is_degenerate());
    }
}
