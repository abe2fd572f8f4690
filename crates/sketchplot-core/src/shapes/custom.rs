//! Multi-click custom polygon.

use super::{Outline, ShapeKind, ShapeTrait};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// A closed polygon collected one click at a time.
///
/// While the shape is being collected the last entry of `points` is the live point that
/// follows the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Custom {
    /// First clicked point.
    pub anchor: Point,
    points: Vec<Point>,
}

impl Custom {
    /// Start a new shape; the live point begins on the anchor.
    pub fn new(start: Point) -> Self {
        Self {
            anchor: start,
            points: vec![start],
        }
    }

    /// Create from an anchor and already collected points.
    pub fn from_points(anchor: Point, points: Vec<Point>) -> Self {
        Self { anchor, points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point; it becomes the new live point.
    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Move the live point.
    pub fn set_live_point(&mut self, point: Point) {
        match self.points.last_mut() {
            Some(last) => *last = point,
            None => self.points.push(point),
        }
    }

    /// Remove the live point.
    pub fn drop_live_point(&mut self) -> Option<Point> {
        self.points.pop()
    }
}

impl ShapeTrait for Custom {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Custom
    }

    fn anchor(&self) -> Point {
        self.anchor
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.anchor);
        for point in &self.points {
            path.line_to(*point);
        }
        path.close_path();
        path
    }

    fn outline(&self) -> Outline {
        let mut points = Vec::with_capacity(self.points.len() + 2);
        points.push(self.anchor);
        points.extend_from_slice(&self.points);
        points.push(self.anchor);
        Outline::Points(points)
    }
}
