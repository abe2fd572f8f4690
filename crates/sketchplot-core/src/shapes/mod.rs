//! Shape descriptors for the drawing history.

mod circle;
mod custom;
mod line;
mod polygon;
mod rectangle;

pub use circle::{Circle, perfect_radius};
pub use custom::Custom;
pub use line::Line;
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use crate::color::Rgb;
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for history entries.
pub type ShapeId = Uuid;

/// Kind of shape, also used as the drawing tool selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Polygon,
    Custom,
    Line,
}

impl ShapeKind {
    /// Lowercase name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Custom => "custom",
            ShapeKind::Line => "line",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outline of a shape as consumed by the code exporter.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Literal polyline in canvas coordinates.
    Points(Vec<Point>),
    /// Closed-form outline swept over a full turn in `divisions` steps.
    Parametric {
        center: Point,
        radii: Vec2,
        divisions: u32,
    },
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    fn kind(&self) -> ShapeKind;

    /// Fixed reference point set at gesture start.
    fn anchor(&self) -> Point;

    /// Path used for painting, in canvas coordinates.
    fn to_path(&self) -> BezPath;

    /// Outline used for code export.
    fn outline(&self) -> Outline;

    /// Whether the outline is closed. Open shapes are never filled.
    fn is_closed(&self) -> bool {
        true
    }
}

/// Shape geometry, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Polygon(Polygon),
    Custom(Custom),
    Line(Line),
}

impl Shape {
    fn inner(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
            Shape::Polygon(s) => s,
            Shape::Custom(s) => s,
            Shape::Line(s) => s,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.inner().kind()
    }

    pub fn anchor(&self) -> Point {
        self.inner().anchor()
    }

    pub fn to_path(&self) -> BezPath {
        self.inner().to_path()
    }

    pub fn outline(&self) -> Outline {
        self.inner().outline()
    }

    pub fn is_closed(&self) -> bool {
        self.inner().is_closed()
    }

    pub fn as_custom(&self) -> Option<&Custom> {
        match self {
            Shape::Custom(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_custom_mut(&mut self) -> Option<&mut Custom> {
        match self {
            Shape::Custom(c) => Some(c),
            _ => None,
        }
    }
}

/// Paint properties of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub filled: bool,
    pub color: Rgb,
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            filled: false,
            color: Rgb::BLACK,
            stroke_width: 5.0,
        }
    }
}

/// One entry of the drawing history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub(crate) id: ShapeId,
    pub shape: Shape,
    pub style: ShapeStyle,
    /// Set while the matching history row is pointed at. Never exported.
    #[serde(skip)]
    pub hovered: bool,
}

impl ShapeDescriptor {
    /// Create a descriptor with a fresh id. Open shapes drop the fill flag.
    pub fn new(shape: Shape, style: ShapeStyle) -> Self {
        let mut style = style;
        style.stroke_width = style.stroke_width.max(0.0);
        style.filled &= shape.is_closed();
        Self {
            id: Uuid::new_v4(),
            shape,
            style,
            hovered: false,
        }
    }

    /// Filled dot previewing the brush under an idle pointer.
    pub fn cursor(position: Point, stroke_width: f64, color: Rgb) -> Self {
        let style = ShapeStyle {
            filled: true,
            color,
            stroke_width: 0.0,
        };
        Self::new(
            Shape::Circle(Circle::perfect(position, stroke_width / 2.0)),
            style,
        )
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Toggle fill. Returns false when the shape cannot be filled.
    pub fn set_filled(&mut self, filled: bool) -> bool {
        if filled && !self.shape.is_closed() {
            return false;
        }
        self.style.filled = filled;
        true
    }

    /// Color used for painting, taking hover highlighting into account.
    pub fn display_color(&self) -> Rgb {
        if self.hovered {
            self.style.color.darkened()
        } else {
            self.style.color
        }
    }
}

impl fmt::Display for ShapeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), PointFmt(self.shape.anchor()))?;
        match self.shape.outline() {
            Outline::Points(points) => {
                for p in points.iter().skip(1) {
                    write!(f, " {}", PointFmt(*p))?;
                }
                Ok(())
            }
            Outline::Parametric { radii, divisions, .. } => {
                write!(f, " r={} n={}", PointFmt(radii.to_point()), divisions)
            }
        }
    }
}

/// Formats a point as `(x,y)` rounded to two decimals.
#[derive(Debug, Clone, Copy)]
pub struct PointFmt(pub Point);

impl fmt::Display for PointFmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let round2 = |v: f64| (v * 100.0).round() / 100.0;
        write!(f, "({},{})", round2(self.0.x), round2(self.0.y))
    }
}
