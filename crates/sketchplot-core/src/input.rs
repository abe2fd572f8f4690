//! Pointer and keyboard events delivered by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Key that finishes a custom shape.
pub const FINISH_KEY: &str = "Enter";

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

/// Pointer event in surface-local pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => *position,
        }
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

impl KeyEvent {
    /// Whether this event finishes an in-progress custom shape.
    pub fn is_finish(&self) -> bool {
        matches!(self, KeyEvent::Pressed(key) if key == FINISH_KEY)
    }
}
