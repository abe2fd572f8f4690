//! Regular polygon shape.

use super::{Outline, ShapeKind, ShapeTrait};
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A regular polygon inscribed in an axis-aligned ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub center: Point,
    pub radii: Vec2,
    /// Vertex count. Callers keep this at 3 or more.
    pub sides: u32,
}

impl Polygon {
    pub fn new(center: Point, radii: Vec2, sides: u32) -> Self {
        Self { center, radii, sides }
    }

    /// Vertices at angles `i * 2pi / sides`, counter-clockwise on screen.
    ///
    /// Canvas Y grows downward, so the sine term is negated.
    pub fn vertices(&self) -> Vec<Point> {
        if self.sides == 0 {
            return Vec::new();
        }
        let step = TAU / self.sides as f64;
        (0..self.sides)
            .map(|i| {
                let angle = step * i as f64;
                Point::new(
                    self.center.x + self.radii.x * angle.cos(),
                    self.center.y - self.radii.y * angle.sin(),
                )
            })
            .collect()
    }
}

impl ShapeTrait for Polygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut vertices = self.vertices().into_iter();
        if let Some(first) = vertices.next() {
            path.move_to(first);
            for vertex in vertices {
                path.line_to(vertex);
            }
            path.close_path();
        }
        path
    }

    fn outline(&self) -> Outline {
        Outline::Parametric {
            center: self.center,
            radii: self.radii,
            divisions: self.sides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_square_vertex_order() {
        let square = Polygon::new(Point::ZERO, Vec2::new(10.0, 10.0), 4);
        let vertices = square.vertices();
        assert_eq!(vertices.len(), 4);
        assert_close(vertices[0], Point::new(10.0, 0.0));
        assert_close(vertices[1], Point::new(0.0, -10.0));
        assert_close(vertices[2], Point::new(-10.0, 0.0));
        assert_close(vertices[3], Point::new(0.0, 10.0));
    }

    #[test]
    fn test_vertices_are_relative_to_center() {
        let tri = Polygon::new(Point::new(50.0, 50.0), Vec2::new(20.0, 10.0), 3);
        assert_close(tri.vertices()[0], Point::new(70.0, 50.0));
    }

    #[test]
    fn test_zero_sides_is_empty() {
        let degenerate = Polygon::new(Point::ZERO, Vec2::new(1.0, 1.0), 0);
        assert!(degenerate.vertices().is_empty());
        assert!(degenerate.to_path().elements().is_empty());
    }

    #[test]
    fn test_outline_divisions_match_sides() {
        let hex = Polygon::new(Point::ZERO, Vec2::new(1.0, 1.0), 6);
        assert!(matches!(hex.outline(), Outline::Parametric { divisions: 6, .. }));
    }
}
