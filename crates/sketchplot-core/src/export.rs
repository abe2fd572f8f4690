//! Octave/MATLAB code generation for the drawing history.
//!
//! Canvas y grows downward, plot y grows upward, so every y value is emitted as
//! `canvas_height - y`.

use crate::shapes::{Outline, ShapeDescriptor};
use std::fmt::Write;

/// Lines emitted before the first shape.
pub const PREAMBLE: &str = "hold on\naxis equal\n";

/// Generate a script that plots every descriptor in order.
pub fn export_octave<'a>(
    descriptors: impl IntoIterator<Item = &'a ShapeDescriptor>,
    canvas_height: f64,
) -> String {
    let mut out = String::from(PREAMBLE);
    for descriptor in descriptors {
        write_shape(&mut out, descriptor, canvas_height);
    }
    out
}

/// Append the `x`/`y`/plot block of one descriptor.
pub fn write_shape(out: &mut String, descriptor: &ShapeDescriptor, canvas_height: f64) {
    let (x, y) = match descriptor.shape.outline() {
        Outline::Points(points) => (
            vector(points.iter().map(|p| p.x)),
            vector(points.iter().map(|p| canvas_height - p.y)),
        ),
        Outline::Parametric {
            center,
            radii,
            divisions,
        } => (
            format!("{} + {} * cosd(0:360/{divisions}:360)", center.x, radii.x.round()),
            format!(
                "{} + {} * sind(0:360/{divisions}:360)",
                canvas_height - center.y,
                radii.y.round()
            ),
        ),
    };
    let command = if descriptor.style.filled && descriptor.shape.is_closed() {
        "fill"
    } else {
        "plot"
    };
    let code = descriptor.style.color.palette_code();
    // Writing into a String cannot fail.
    let _ = write!(out, "x = {x};\ny = {y};\n{command}(x, y, '{code}');\n\n");
}

fn vector(values: impl Iterator<Item = f64>) -> String {
    let mut s = String::from("[ ");
    for v in values {
        let _ = write!(s, "{v} ");
    }
    s.push(']');
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::history::History;
    use crate::shapes::{Circle, Custom, Line, Polygon, Rectangle, Shape, ShapeStyle};
    use kurbo::{Point, Vec2};

    fn style(filled: bool, color: Rgb) -> ShapeStyle {
        ShapeStyle {
            filled,
            color,
            stroke_width: 2.0,
        }
    }

    fn history_of(shapes: Vec<(Shape, ShapeStyle)>) -> History {
        let mut history = History::new();
        for (shape, style) in shapes {
            history.append(ShapeDescriptor::new(shape, style));
        }
        history
    }

    #[test]
    fn test_empty_history_is_preamble() {
        assert_eq!(export_octave(&History::new(), 500.0), "hold on\naxis equal\n");
    }

    #[test]
    fn test_rectangle_flips_y() {
        let rect = Rectangle::new(Point::new(10.0, 10.0), Vec2::new(50.0, 30.0));
        let history = history_of(vec![(Shape::Rectangle(rect), style(false, Rgb::BLACK))]);
        assert_eq!(
            export_octave(&history, 500.0),
            "hold on\naxis equal\n\
             x = [ 10 60 60 10 10 ];\n\
             y = [ 490 490 460 460 490 ];\n\
             plot(x, y, 'k');\n\n"
        );
    }

    #[test]
    fn test_filled_circle_is_parametric() {
        let circle = Circle::ellipse(Point::new(100.0, 100.0), Vec2::new(14.14, 7.5));
        let history = history_of(vec![(
            Shape::Circle(circle),
            style(true, Rgb::new(200, 10, 10)),
        )]);
        let code = export_octave(&history, 400.0);
        assert!(code.contains("x = 100 + 14 * cosd(0:360/360:360);\n"));
        assert!(code.contains("y = 300 + 8 * sind(0:360/360:360);\n"));
        assert!(code.ends_with("fill(x, y, 'r');\n\n"));
    }

    #[test]
    fn test_polygon_uses_side_count() {
        let polygon = Polygon::new(Point::new(50.0, 50.0), Vec2::new(20.0, 20.0), 6);
        let history = history_of(vec![(Shape::Polygon(polygon), style(false, Rgb::BLACK))]);
        let code = export_octave(&history, 100.0);
        assert!(code.contains("x = 50 + 20 * cosd(0:360/6:360);\n"));
        assert!(code.contains("y = 50 + 20 * sind(0:360/6:360);\n"));
    }

    #[test]
    fn test_line_and_custom_in_order() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        let custom = Custom::from_points(
            Point::new(1.0, 1.0),
            vec![Point::new(5.0, 1.0), Point::new(5.0, 5.0)],
        );
        let history = history_of(vec![
            (Shape::Line(line), style(true, Rgb::new(0, 0, 212))),
            (Shape::Custom(custom), style(false, Rgb::new(0, 180, 0))),
        ]);
        let code = export_octave(&history, 100.0);
        let expected_line = "x = [ 0 10 ];\ny = [ 100 80 ];\nplot(x, y, 'b');\n\n";
        let expected_custom = "x = [ 1 5 5 1 ];\ny = [ 99 99 95 99 ];\nplot(x, y, 'g');\n\n";
        let line_at = code.find(expected_line).unwrap();
        let custom_at = code.find(expected_custom).unwrap();
        assert!(line_at < custom_at);
    }

    #[test]
    fn test_open_shape_never_exports_fill() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        let mut history = history_of(vec![(Shape::Line(line), style(false, Rgb::BLACK))]);
        if let Some(last) = history.last_mut() {
            last.style.filled = true;
        }
        let code = export_octave(&history, 100.0);
        assert!(code.ends_with("plot(x, y, 'k');\n\n"));
        assert!(!code.contains("fill("));
    }

    #[test]
    fn test_hover_does_not_change_export() {
        let rect = Rectangle::new(Point::ZERO, Vec2::new(1.0, 1.0));
        let mut history = history_of(vec![(Shape::Rectangle(rect), style(false, Rgb::BLACK))]);
        let before = export_octave(&history, 10.0);
        if let Some(last) = history.last_mut() {
            last.hovered = true;
        }
        assert_eq!(export_octave(&history, 10.0), before);
    }
}
