//! Circle and ellipse shape.

use super::{Outline, ShapeKind, ShapeTrait};
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// Number of angular samples used when exporting a circle.
pub const CIRCLE_DIVISIONS: u32 = 360;

/// An axis-aligned ellipse; a perfect circle when both radii match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radii: Vec2,
}

impl Circle {
    /// Create an ellipse with independent X/Y radii.
    pub fn ellipse(center: Point, radii: Vec2) -> Self {
        Self { center, radii }
    }

    /// Create a circle with equal radii.
    pub fn perfect(center: Point, radius: f64) -> Self {
        Self::ellipse(center, Vec2::new(radius, radius))
    }

    pub fn is_perfect(&self) -> bool {
        self.radii.x == self.radii.y
    }

    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center, self.radii, 0.0)
    }
}

/// Radius of a perfect circle spanned between two reference points.
///
/// When `from_center` is false the points are opposite ends of a diameter and the
/// distance is halved.
pub fn perfect_radius(a: Point, b: Point, from_center: bool) -> f64 {
    let distance = (a - b).hypot();
    if from_center { distance } else { distance / 2.0 }
}

impl ShapeTrait for Circle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn outline(&self) -> Outline {
        Outline::Parametric {
            center: self.center,
            radii: self.radii,
            divisions: CIRCLE_DIVISIONS,
        }
    }
}
