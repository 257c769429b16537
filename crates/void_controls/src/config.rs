//! Controller configuration.
//!
//! Everything here is plain data that the owning application may change at
//! any time; the controller reads it afresh on every event and every frame.
//!
//! # Config Format
//!
//! ```toml
//! enabled = true
//! rotate_speed = 1.0
//! zoom_speed = 1.2
//! pan_speed = 0.3
//! static_moving = false
//! damping = 0.2
//!
//! [keys]
//! rotate = 65  # A
//! zoom = 83    # S
//! pan = 68     # D
//! ```
//!
//! Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ControlsError, Result};
use crate::event::KeyCode;

/// Keys that arm a mode from the keyboard.
///
/// When two modes share a code, the first of rotate, zoom, pan wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub rotate: KeyCode,
    pub zoom: KeyCode,
    pub pan: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            rotate: KeyCode::A,
            zoom: KeyCode::S,
            pan: KeyCode::D,
        }
    }
}

impl KeyBindings {
    fn has_overlap(&self) -> bool {
        self.rotate == self.zoom || self.rotate == self.pan || self.zoom == self.pan
    }
}

/// How `start` samples catch up with `end` samples after each application
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Snap `start` to `end` immediately
    Static,
    /// Blend `start` toward `end` by the given factor every frame
    Damped(f32),
}

/// Tunable controller settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Master switch; when false every input handler is a no-op
    pub enabled: bool,

    /// Allow rotate gestures
    pub rotate_enabled: bool,
    /// Allow zoom gestures (drag and wheel)
    pub zoom_enabled: bool,
    /// Allow pan gestures
    pub pan_enabled: bool,

    /// Multiplier on the arcball angle
    pub rotate_speed: f32,
    /// Multiplier on the vertical zoom drag
    pub zoom_speed: f32,
    /// Multiplier on the pan drag
    pub pan_speed: f32,

    /// Snap instead of damping
    pub static_moving: bool,
    /// Fraction of the remaining delta consumed per frame, in (0, 1]
    pub damping: f32,

    /// Not used by the controller math; carried for hosts that clamp distance
    pub min_distance: f32,
    /// Not used by the controller math; carried for hosts that clamp distance
    pub max_distance: f32,

    /// Keyboard mode bindings
    pub keys: KeyBindings,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_enabled: true,
            zoom_enabled: true,
            pan_enabled: true,
            rotate_speed: 1.0,
            zoom_speed: 1.2,
            pan_speed: 0.3,
            static_moving: false,
            damping: 0.2,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            keys: KeyBindings::default(),
        }
    }
}

impl ControllerConfig {
    /// Configuration that snaps instead of damping
    pub fn static_moving() -> Self {
        Self {
            static_moving: true,
            ..Default::default()
        }
    }

    /// Parse a TOML document and validate the result
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ControlsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading controller config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Serialize to a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check ranges the controller relies on.
    ///
    /// Overlapping key bindings are allowed and resolved by priority.
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ControlsError::InvalidDamping(self.damping));
        }

        for (name, value) in [
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("pan_speed", self.pan_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ControlsError::InvalidSpeed { name, value });
            }
        }

        // NaN fails both comparisons, so test for the valid shape
        if !(self.min_distance >= 0.0 && self.min_distance <= self.max_distance) {
            return Err(ControlsError::InvalidDistanceRange {
                min: self.min_distance,
                max: self.max_distance,
            });
        }

        if self.keys.has_overlap() {
            log::debug!(
                "Overlapping key bindings {:?}; rotate > zoom > pan priority applies",
                self.keys
            );
        }

        Ok(())
    }

    /// Settle policy derived from `static_moving` and `damping`
    #[inline]
    pub fn motion(&self) -> Motion {
        if self.static_moving {
            Motion::Static
        } else {
            Motion::Damped(self.damping)
        }
    }
}
