//! Line shape.

use super::{Outline, ShapeKind, ShapeTrait};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// A single open line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

impl ShapeTrait for Line {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn anchor(&self) -> Point {
        self.start
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn outline(&self) -> Outline {
        Outline::Points(vec![self.start, self.end])
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_open() {
        let line = Line::new(Point::new(1.0, 1.0), Point::new(4.0, 5.0));
        assert!(!line.is_closed());
        assert_eq!(line.to_path().elements().len(), 2);
        assert_eq!(
            line.outline(),
            Outline::Points(vec![Point::new(1.0, 1.0), Point::new(4.0, 5.0)])
        );
    }
}
