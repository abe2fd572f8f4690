//! Rectangle shape.

use super::{Outline, ShapeKind, ShapeTrait};
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle spanned from an anchor corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Corner the gesture started from.
    pub anchor: Point,
    /// Offset to the opposite corner. Negative components keep the drag direction.
    pub offset: Vec2,
}

impl Rectangle {
    /// Create a rectangle from an anchor and the raw pointer delta.
    pub fn new(anchor: Point, offset: Vec2) -> Self {
        Self { anchor, offset }
    }

    /// Corners in drawing order, starting and ending at the anchor.
    pub fn corners(&self) -> [Point; 5] {
        let a = self.anchor;
        [
            a,
            a + Vec2::new(self.offset.x, 0.0),
            a + self.offset,
            a + Vec2::new(0.0, self.offset.y),
            a,
        ]
    }
}

impl ShapeTrait for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn anchor(&self) -> Point {
        self.anchor
    }

    fn to_path(&self) -> BezPath {
        let corners = self.corners();
        let mut path = BezPath::new();
        path.move_to(corners[0]);
        for corner in &corners[1..4] {
            path.line_to(*corner);
        }
        path.close_path();
        path
    }

    fn outline(&self) -> Outline {
        Outline::Points(self.corners().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_corners() {
        let rect = Rectangle::new(Point::new(10.0, 10.0), Vec2::new(50.0, 30.0));
        assert_eq!(
            rect.outline(),
            Outline::Points(vec![
                Point::new(10.0, 10.0),
                Point::new(60.0, 10.0),
                Point::new(60.0, 40.0),
                Point::new(10.0, 40.0),
                Point::new(10.0, 10.0),
            ])
        );
    }

    #[test]
    fn test_negative_offset_keeps_direction() {
        let rect = Rectangle::new(Point::new(100.0, 100.0), Vec2::new(-20.0, -10.0));
        let corners = rect.corners();
        assert_eq!(corners[1], Point::new(80.0, 100.0));
        assert_eq!(corners[2], Point::new(80.0, 90.0));
        assert_eq!(corners[3], Point::new(100.0, 90.0));
    }

    #[test]
    fn test_path_is_closed_quad() {
        let rect = Rectangle::new(Point::ZERO, Vec2::new(5.0, 5.0));
        // move + 3 lines + close
        assert_eq!(rect.to_path().elements().len(), 5);
    }
}
