//! Grid snapping for pointer positions.

use crate::input::Modifiers;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default number of grid lines across each canvas axis.
pub const DEFAULT_GRID_CELLS: u32 = 11;

/// Grid snapping configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub enabled: bool,
    /// Number of grid lines per axis, borders included. The canvas is split into
    /// `cells - 1` intervals.
    pub cells: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            cells: DEFAULT_GRID_CELLS,
        }
    }
}

impl GridSettings {
    /// Spacing between grid lines on a canvas of the given size.
    ///
    /// Returns `None` when fewer than two lines are configured.
    pub fn spacing(&self, canvas: Size) -> Option<Vec2> {
        let intervals = self.cells.checked_sub(1).filter(|&n| n > 0)? as f64;
        Some(Vec2::new(
            (canvas.width / intervals).round(),
            (canvas.height / intervals).round(),
        ))
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the point was moved onto the grid.
    pub snapped: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped: false,
        }
    }
}

/// Round a point to the nearest grid intersection.
///
/// Axes with a zero spacing are left untouched.
pub fn snap_to_grid(point: Point, spacing: Vec2) -> Point {
    let snap_axis = |v: f64, step: f64| {
        if step > 0.0 { (v / step).round() * step } else { v }
    };
    Point::new(snap_axis(point.x, spacing.x), snap_axis(point.y, spacing.y))
}

/// Snap a raw pointer position according to the grid settings.
///
/// Holding shift bypasses the grid.
pub fn snap_pointer(
    point: Point,
    canvas: Size,
    grid: &GridSettings,
    modifiers: Modifiers,
) -> SnapResult {
    if !grid.enabled || modifiers.shift {
        return SnapResult::none(point);
    }
    match grid.spacing(canvas) {
        Some(spacing) => SnapResult {
            point: snap_to_grid(point, spacing),
            snapped: true,
        },
        None => SnapResult::none(point),
    }
}
