//! Tool system: turns gestures into shape descriptors.

use crate::history::History;
use crate::options::ToolOptions;
use crate::shapes::{
    Circle, Custom, Line, Polygon, Rectangle, Shape, ShapeDescriptor, ShapeId, ShapeKind,
    perfect_radius,
};
use kurbo::{Point, Vec2};
use std::f64::consts::SQRT_2;

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Single-drag shape in progress.
    Dragging {
        /// Pointer position at gesture start.
        anchor: Point,
        /// Whether a provisional entry has been pushed to the history.
        pushed: bool,
    },
    /// Custom shape being collected; its provisional entry is the last history entry.
    Collecting,
}

/// What a tool transition did to the history.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// History untouched.
    None,
    /// The provisional entry changed; paint it over the pre-gesture raster.
    Preview(ShapeDescriptor),
    /// Provisional entry was pushed or extended without changing its appearance.
    Provisional,
    /// The provisional entry became permanent.
    Committed(ShapeId),
    /// The gesture ended without keeping anything.
    Discarded,
}

/// Build the shape a drag from `anchor` to `current` describes.
///
/// Always recomputed from the gesture anchor, so calling it twice with the same inputs
/// yields the same shape. Custom shapes are not drag-built and return `None`.
pub fn build_shape(
    tool: ShapeKind,
    anchor: Point,
    current: Point,
    options: &ToolOptions,
) -> Option<Shape> {
    // Mirror of the pointer through the anchor, for center-relative drawing.
    let mirrored = anchor + (anchor - current);

    let shape = match tool {
        ShapeKind::Rectangle => {
            let start = if options.middle_draw { mirrored } else { anchor };
            Shape::Rectangle(Rectangle::new(start, current - start))
        }
        ShapeKind::Line => {
            let start = if options.middle_draw { mirrored } else { anchor };
            Shape::Line(Line::new(start, current))
        }
        ShapeKind::Circle => {
            let (center, radii) = radial_extent(anchor, current, options);
            Shape::Circle(Circle::ellipse(center, radii))
        }
        ShapeKind::Polygon => {
            let (center, radii) = radial_extent(anchor, current, options);
            Shape::Polygon(Polygon::new(center, radii, options.sides()))
        }
        ShapeKind::Custom => return None,
    };
    Some(shape)
}

/// Center and radii for circles and polygons.
fn radial_extent(anchor: Point, current: Point, options: &ToolOptions) -> (Point, Vec2) {
    let center = if options.middle_draw {
        anchor
    } else {
        anchor.midpoint(current)
    };

    let radii = if options.perfect_circle {
        let radius = perfect_radius(anchor, current, options.middle_draw);
        Vec2::new(radius, radius)
    } else {
        Vec2::new(
            ((center.x - current.x) * SQRT_2).abs(),
            ((center.y - current.y) * SQRT_2).abs(),
        )
    };
    (center, radii)
}

/// Drives the gesture state machine against the history.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    state: ToolState,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.state != ToolState::Idle
    }

    /// Whether the last history entry is provisional.
    pub fn has_provisional(&self) -> bool {
        match self.state {
            ToolState::Idle => false,
            ToolState::Dragging { pushed, .. } => pushed,
            ToolState::Collecting => true,
        }
    }

    /// Pointer pressed at an already snapped position.
    pub fn begin(
        &mut self,
        point: Point,
        options: &ToolOptions,
        history: &mut History,
    ) -> ToolOutcome {
        let abandoned = self.abandon_drag(history);
        if options.tool != ShapeKind::Custom {
            self.state = ToolState::Dragging {
                anchor: point,
                pushed: false,
            };
            return abandoned;
        }

        if self.state == ToolState::Collecting {
            match history.last_mut().and_then(|d| d.shape.as_custom_mut()) {
                Some(custom) => {
                    // The live point lands on the click, then a new live point starts there.
                    custom.set_live_point(point);
                    custom.push_point(point);
                    return ToolOutcome::Provisional;
                }
                None => log::warn!("custom shape vanished from history, starting a new one"),
            }
        }

        history.append(ShapeDescriptor::new(
            Shape::Custom(Custom::new(point)),
            options.style(),
        ));
        self.state = ToolState::Collecting;
        match abandoned {
            ToolOutcome::Discarded => abandoned,
            _ => ToolOutcome::Provisional,
        }
    }

    /// Drop a drag whose release never arrived, e.g. because it happened off the canvas.
    fn abandon_drag(&mut self, history: &mut History) -> ToolOutcome {
        let ToolState::Dragging { pushed, .. } = self.state else {
            return ToolOutcome::None;
        };
        self.state = ToolState::Idle;
        if !pushed {
            return ToolOutcome::None;
        }
        log::debug!("press while dragging, dropping the open shape");
        history.pop();
        ToolOutcome::Discarded
    }

    /// Pointer moved to an already snapped position while a button is held or a custom
    /// shape is being collected.
    pub fn update(
        &mut self,
        point: Point,
        options: &ToolOptions,
        history: &mut History,
    ) -> ToolOutcome {
        match self.state {
            ToolState::Idle => ToolOutcome::None,
            ToolState::Collecting => {
                let Some(last) = history.last_mut() else {
                    self.state = ToolState::Idle;
                    return ToolOutcome::None;
                };
                match last.shape.as_custom_mut() {
                    Some(custom) => {
                        custom.set_live_point(point);
                        ToolOutcome::Preview(last.clone())
                    }
                    None => {
                        self.state = ToolState::Idle;
                        ToolOutcome::None
                    }
                }
            }
            ToolState::Dragging { anchor, pushed } => {
                // The tool may have changed to Custom mid-drag without going through
                // `set_tool`; there is nothing to drag-build then.
                let Some(shape) = build_shape(options.tool, anchor, point, options) else {
                    return ToolOutcome::None;
                };
                let mut descriptor = ShapeDescriptor::new(shape, options.style());

                if pushed {
                    if let Some(last) = history.last() {
                        descriptor.id = last.id();
                    }
                    history.replace_last(descriptor.clone());
                } else {
                    history.append(descriptor.clone());
                    self.state = ToolState::Dragging {
                        anchor,
                        pushed: true,
                    };
                }
                ToolOutcome::Preview(descriptor)
            }
        }
    }

    /// Pointer released. Custom shapes ignore releases.
    pub fn end(&mut self, history: &History) -> ToolOutcome {
        match self.state {
            ToolState::Dragging { pushed, .. } => {
                self.state = ToolState::Idle;
                if pushed {
                    match history.last() {
                        Some(last) => ToolOutcome::Committed(last.id()),
                        None => ToolOutcome::Discarded,
                    }
                } else {
                    ToolOutcome::Discarded
                }
            }
            ToolState::Idle | ToolState::Collecting => ToolOutcome::None,
        }
    }

    /// Finish a custom shape: drop the live point and commit what remains.
    pub fn finish(&mut self, history: &mut History) -> ToolOutcome {
        if self.state != ToolState::Collecting {
            return ToolOutcome::None;
        }
        self.state = ToolState::Idle;

        let remaining = history
            .last_mut()
            .and_then(|d| d.shape.as_custom_mut())
            .map(|custom| {
                custom.drop_live_point();
                custom.len()
            });

        match remaining {
            Some(n) if n > 0 => match history.last() {
                Some(last) => ToolOutcome::Committed(last.id()),
                None => ToolOutcome::Discarded,
            },
            Some(_) => {
                history.pop();
                ToolOutcome::Discarded
            }
            None => ToolOutcome::Discarded,
        }
    }

    /// Abort the gesture, removing any provisional entry.
    pub fn cancel(&mut self, history: &mut History) -> ToolOutcome {
        let had_provisional = self.has_provisional();
        let was_active = self.is_active();
        self.state = ToolState::Idle;
        if had_provisional {
            history.pop();
        }
        if was_active {
            ToolOutcome::Discarded
        } else {
            ToolOutcome::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(tool: ShapeKind) -> ToolOptions {
        ToolOptions {
            tool,
            ..Default::default()
        }
    }

    fn radii(shape: &Shape) -> Vec2 {
        match shape {
            Shape::Circle(c) => c.radii,
            Shape::Polygon(p) => p.radii,
            other => panic!("no radii on {other:?}"),
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        for tool in [
            ShapeKind::Rectangle,
            ShapeKind::Circle,
            ShapeKind::Polygon,
            ShapeKind::Line,
        ] {
            for middle_draw in [false, true] {
                let opts = ToolOptions {
                    tool,
                    middle_draw,
                    ..Default::default()
                };
                let a = build_shape(tool, Point::new(3.0, 4.0), Point::new(40.0, -7.0), &opts);
                let b = build_shape(tool, Point::new(3.0, 4.0), Point::new(40.0, -7.0), &opts);
                assert!(a.is_some());
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_rectangle_corner_mode() {
        let shape = build_shape(
            ShapeKind::Rectangle,
            Point::new(10.0, 10.0),
            Point::new(60.0, 40.0),
            &options(ShapeKind::Rectangle),
        );
        assert_eq!(
            shape,
            Some(Shape::Rectangle(Rectangle::new(
                Point::new(10.0, 10.0),
                Vec2::new(50.0, 30.0)
            )))
        );
    }

    #[test]
    fn test_rectangle_middle_mode_mirrors() {
        let opts = ToolOptions {
            middle_draw: true,
            ..options(ShapeKind::Rectangle)
        };
        let shape = build_shape(
            ShapeKind::Rectangle,
            Point::new(50.0, 50.0),
            Point::new(60.0, 70.0),
            &opts,
        );
        assert_eq!(
            shape,
            Some(Shape::Rectangle(Rectangle::new(
                Point::new(40.0, 30.0),
                Vec2::new(20.0, 40.0)
            )))
        );
    }

    #[test]
    fn test_line_modes() {
        let corner = build_shape(
            ShapeKind::Line,
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            &options(ShapeKind::Line),
        );
        assert_eq!(
            corner,
            Some(Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0))))
        );

        let opts = ToolOptions {
            middle_draw: true,
            ..options(ShapeKind::Line)
        };
        let middle = build_shape(ShapeKind::Line, Point::new(0.0, 0.0), Point::new(5.0, 5.0), &opts);
        assert_eq!(
            middle,
            Some(Shape::Line(Line::new(Point::new(-5.0, -5.0), Point::new(5.0, 5.0))))
        );
    }

    #[test]
    fn test_perfect_circle_radius_halved_in_corner_mode() {
        let opts = ToolOptions {
            perfect_circle: true,
            ..options(ShapeKind::Circle)
        };
        let shape =
            build_shape(ShapeKind::Circle, Point::ZERO, Point::new(60.0, 80.0), &opts).unwrap();
        assert_eq!(radii(&shape), Vec2::new(50.0, 50.0));
        assert_eq!(shape.anchor(), Point::new(30.0, 40.0));
    }

    #[test]
    fn test_perfect_circle_radius_full_in_middle_mode() {
        let opts = ToolOptions {
            perfect_circle: true,
            middle_draw: true,
            ..options(ShapeKind::Circle)
        };
        let shape =
            build_shape(ShapeKind::Circle, Point::ZERO, Point::new(60.0, 80.0), &opts).unwrap();
        assert_eq!(radii(&shape), Vec2::new(100.0, 100.0));
        assert_eq!(shape.anchor(), Point::ZERO);
    }

    #[test]
    fn test_ellipse_radii() {
        let shape = build_shape(
            ShapeKind::Circle,
            Point::ZERO,
            Point::new(20.0, 10.0),
            &options(ShapeKind::Circle),
        )
        .unwrap();
        let r = radii(&shape);
        assert!((r.x - 10.0 * SQRT_2).abs() < 1e-9);
        assert!((r.y - 5.0 * SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_reads_sides() {
        let opts = ToolOptions {
            polygon_sides: 7,
            ..options(ShapeKind::Polygon)
        };
        let shape =
            build_shape(ShapeKind::Polygon, Point::ZERO, Point::new(10.0, 10.0), &opts).unwrap();
        match shape {
            Shape::Polygon(p) => assert_eq!(p.sides, 7),
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_is_not_drag_built() {
        assert!(
            build_shape(
                ShapeKind::Custom,
                Point::ZERO,
                Point::new(1.0, 1.0),
                &options(ShapeKind::Custom)
            )
            .is_none()
        );
    }

    #[test]
    fn test_drag_pushes_once_then_replaces() {
        let opts = options(ShapeKind::Rectangle);
        let mut history = History::new();
        let mut tm = ToolManager::new();

        assert_eq!(tm.begin(Point::ZERO, &opts, &mut history), ToolOutcome::None);
        assert!(history.is_empty());

        tm.update(Point::new(5.0, 5.0), &opts, &mut history);
        let id = history.last().unwrap().id();
        tm.update(Point::new(9.0, 9.0), &opts, &mut history);
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().id(), id);

        assert_eq!(tm.end(&history), ToolOutcome::Committed(id));
        assert!(!tm.is_active());
    }

    #[test]
    fn test_click_without_drag_is_discarded() {
        let opts = options(ShapeKind::Circle);
        let mut history = History::new();
        let mut tm = ToolManager::new();

        tm.begin(Point::new(3.0, 3.0), &opts, &mut history);
        assert_eq!(tm.end(&history), ToolOutcome::Discarded);
        assert!(history.is_empty());
    }

    #[test]
    fn test_custom_collect_and_finish() {
        let opts = options(ShapeKind::Custom);
        let mut history = History::new();
        let mut tm = ToolManager::new();
        let (p0, p1, p2) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0));

        tm.begin(p0, &opts, &mut history);
        tm.update(p1, &opts, &mut history);
        tm.begin(p1, &opts, &mut history);
        tm.update(p2, &opts, &mut history);
        tm.begin(p2, &opts, &mut history);
        tm.update(Point::new(3.0, 8.0), &opts, &mut history);
        // releases do not end a custom shape
        assert_eq!(tm.end(&history), ToolOutcome::None);

        let id = history.last().unwrap().id();
        assert_eq!(tm.finish(&mut history), ToolOutcome::Committed(id));

        let custom = history.last().unwrap().shape.as_custom().unwrap();
        assert_eq!(custom.anchor, p0);
        assert_eq!(custom.points(), &[p1, p2]);
    }

    #[test]
    fn test_custom_clicks_without_moves() {
        let opts = options(ShapeKind::Custom);
        let mut history = History::new();
        let mut tm = ToolManager::new();
        let (p0, p1, p2) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0));

        tm.begin(p0, &opts, &mut history);
        tm.begin(p1, &opts, &mut history);
        tm.begin(p2, &opts, &mut history);
        tm.finish(&mut history);

        let custom = history.last().unwrap().shape.as_custom().unwrap();
        assert_eq!(custom.points(), &[p1, p2]);
    }

    #[test]
    fn test_custom_finish_without_points_discards() {
        let opts = options(ShapeKind::Custom);
        let mut history = History::new();
        let mut tm = ToolManager::new();

        tm.begin(Point::ZERO, &opts, &mut history);
        assert_eq!(history.len(), 1);
        assert_eq!(tm.finish(&mut history), ToolOutcome::Discarded);
        assert!(history.is_empty());
    }

    #[test]
    fn test_cancel_pops_provisional() {
        let opts = options(ShapeKind::Line);
        let mut history = History::new();
        let mut tm = ToolManager::new();

        tm.begin(Point::ZERO, &opts, &mut history);
        tm.update(Point::new(4.0, 4.0), &opts, &mut history);
        assert_eq!(history.len(), 1);
        assert_eq!(tm.cancel(&mut history), ToolOutcome::Discarded);
        assert!(history.is_empty());
        assert!(!tm.is_active());
    }

    #[test]
    fn test_cancel_before_move_keeps_history() {
        let opts = options(ShapeKind::Line);
        let mut history = History::new();
        let mut tm = ToolManager::new();
        tm.begin(Point::ZERO, &opts, &mut history);
        tm.update(Point::new(4.0, 4.0), &opts, &mut history);
        tm.end(&history);

        tm.begin(Point::ZERO, &opts, &mut history);
        tm.cancel(&mut history);
        assert_eq!(history.len(), 1);
        assert_eq!(tm.cancel(&mut history), ToolOutcome::None);
    }

    #[test]
    fn test_press_while_dragging_drops_open_shape() {
        let opts = options(ShapeKind::Rectangle);
        let mut history = History::new();
        let mut tm = ToolManager::new();

        tm.begin(Point::new(10.0, 10.0), &opts, &mut history);
        tm.update(Point::new(20.0, 20.0), &opts, &mut history);
        assert_eq!(
            tm.begin(Point::new(50.0, 50.0), &opts, &mut history),
            ToolOutcome::Discarded
        );
        assert!(history.is_empty());

        tm.update(Point::new(60.0, 60.0), &opts, &mut history);
        let id = history.last().unwrap().id();
        assert_eq!(tm.end(&history), ToolOutcome::Committed(id));
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().shape.anchor(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_press_before_first_move_keeps_history() {
        let opts = options(ShapeKind::Line);
        let mut history = History::new();
        let mut tm = ToolManager::new();

        tm.begin(Point::ZERO, &opts, &mut history);
        assert_eq!(tm.begin(Point::new(5.0, 5.0), &opts, &mut history), ToolOutcome::None);
        assert!(history.is_empty());
        assert!(tm.is_active());
    }

    #[test]
    fn test_custom_press_while_dragging_replaces_open_shape() {
        let mut history = History::new();
        let mut tm = ToolManager::new();

        let drag = options(ShapeKind::Circle);
        tm.begin(Point::ZERO, &drag, &mut history);
        tm.update(Point::new(8.0, 8.0), &drag, &mut history);

        let custom = options(ShapeKind::Custom);
        assert_eq!(
            tm.begin(Point::new(3.0, 3.0), &custom, &mut history),
            ToolOutcome::Discarded
        );
        assert_eq!(history.len(), 1);
        assert!(history.last().unwrap().shape.as_custom().is_some());
        assert_eq!(tm.state(), ToolState::Collecting);
    }

    #[test]
    fn test_toggles_read_per_move() {
        let mut opts = options(ShapeKind::Circle);
        let mut history = History::new();
        let mut tm = ToolManager::new();

        tm.begin(Point::ZERO, &opts, &mut history);
        tm.update(Point::new(60.0, 80.0), &opts, &mut history);
        opts.perfect_circle = true;
        tm.update(Point::new(60.0, 80.0), &opts, &mut history);

        assert_eq!(radii(&history.last().unwrap().shape), Vec2::new(50.0, 50.0));
    }
}
