//! Capability interface for the object being manipulated.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Accessors the controller needs on the object it drives.
///
/// How the implementor stores its transform (quaternion or Euler angles,
/// uniform or per-axis scale) stays behind this trait. `eye` and `up` must be
/// kept current by the owner, typically from the viewing camera.
pub trait ControlTarget {
    fn orientation(&self) -> Quat;
    fn set_orientation(&mut self, orientation: Quat);

    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);

    fn scale(&self) -> Vec3;
    fn set_scale(&mut self, scale: Vec3);

    /// Direction from the object toward the observer
    fn eye(&self) -> Vec3;

    /// Vertical reference direction
    fn up(&self) -> Vec3;

    /// Multiply every scale axis by `factor`
    fn scale_uniformly(&mut self, factor: f32) {
        let scale = self.scale();
        self.set_scale(scale * factor);
    }
}

/// Plain object transform with fixed reference vectors.
///
/// Serves hosts that keep their own scene graph elsewhere and only need the
/// resulting transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlledObject {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
    pub eye: Vec3,
    pub up: Vec3,
}

impl Default for ControlledObject {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
            eye: Vec3::Z,
            up: Vec3::Y,
        }
    }
}

impl ControlledObject {
    /// Create an identity object viewed from +Z with +Y up
    pub fn new() -> Self {
        Self::default()
    }

    /// Set position (builder pattern)
    #[inline]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set reference vectors (builder pattern)
    #[inline]
    pub fn with_view(mut self, eye: Vec3, up: Vec3) -> Self {
        self.eye = eye;
        self.up = up;
        self
    }
}

impl ControlTarget for ControlledObject {
    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    fn eye(&self) -> Vec3 {
        self.eye
    }

    fn up(&self) -> Vec3 {
        self.up
    }
}
