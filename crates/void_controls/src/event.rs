//! Input events consumed by the controller.
//!
//! Hosts translate their windowing events into [`InputEvent`] and hand them to
//! [`InteractionController::handle_event`](crate::InteractionController::handle_event).
//! Positions are in the same client pixel space as the viewport offset.
//!
//! # Example
//!
//! ```ignore
//! use void_controls::{InputEvent, PointerButton};
//!
//! let press = InputEvent::PointerDown { button: PointerButton::Primary, x: 400.0, y: 300.0 };
//! ```

use serde::{Deserialize, Serialize};

/// Wheel ticks arrive as multiples of this in the primary delta unit
pub const WHEEL_DELTA_UNIT: f32 = 40.0;

/// Wheel ticks arrive as multiples of this in the line-based detail unit
pub const WHEEL_DETAIL_UNIT: f32 = 3.0;

/// Raw key code as reported by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const A: Self = Self(65);
    pub const S: Self = Self(83);
    pub const D: Self = Self(68);
}

/// Pointer button, numbered the way browsers number them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum PointerButton {
    /// Left mouse button (index 0)
    Primary,
    /// Middle mouse button (index 1)
    Middle,
    /// Right mouse button (index 2)
    Secondary,
    /// Any further button
    Other(u16),
}

impl PointerButton {
    /// Map a button index to a button
    pub fn from_index(index: u16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            n => Self::Other(n),
        }
    }

    /// Button index
    pub fn index(self) -> u16 {
        match self {
            Self::Primary => 0,
            Self::Middle => 1,
            Self::Secondary => 2,
            Self::Other(n) => n,
        }
    }
}

impl Default for PointerButton {
    fn default() -> Self {
        Self::Primary
    }
}

impl From<u16> for PointerButton {
    fn from(index: u16) -> Self {
        Self::from_index(index)
    }
}

impl From<PointerButton> for u16 {
    fn from(button: PointerButton) -> Self {
        button.index()
    }
}

/// A single input event
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    /// Key pressed
    KeyDown {
        code: KeyCode,
    },
    /// Key released
    KeyUp {
        code: KeyCode,
    },
    /// Pointer button pressed
    PointerDown {
        #[serde(default)]
        button: PointerButton,
        x: f32,
        y: f32,
    },
    /// Pointer button released
    PointerUp {
        #[serde(default)]
        button: PointerButton,
        x: f32,
        y: f32,
    },
    /// Pointer moved
    PointerMove {
        x: f32,
        y: f32,
    },
    /// Scroll wheel.
    ///
    /// `delta` is the primary wheel delta (120 per notch, positive away from
    /// the user); `detail` is the line-based fallback (3 per notch, positive
    /// toward the user), only consulted when `delta` is zero.
    Wheel {
        #[serde(default)]
        delta: f32,
        #[serde(default)]
        detail: f32,
    },
}

/// Fold the two wheel units into notches, positive away from the user
pub fn normalize_wheel(delta: f32, detail: f32) -> f32 {
    if delta != 0.0 {
        delta / WHEEL_DELTA_UNIT
    } else if detail != 0.0 {
        -detail / WHEEL_DETAIL_UNIT
    } else {
        0.0
    }
}
