//! Viewport metrics and screen-space projections.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Smallest radius used for normalization; guards zero-size surfaces
pub const MIN_RADIUS: f32 = 1.0;

/// Host surface that can report its size and client offset.
///
/// The controller never subscribes to resizes; the owner pushes new values
/// through [`ViewportMetrics::sync`] when its surface changes.
pub trait ViewportSource {
    /// `(width, height)` in client pixels
    fn size(&self) -> (f32, f32);
    /// `(left, top)` of the surface in client pixels
    fn offset(&self) -> (f32, f32);
}

/// Size and placement of the interactive surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportMetrics {
    pub width: f32,
    pub height: f32,
    pub offset_left: f32,
    pub offset_top: f32,
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            offset_left: 0.0,
            offset_top: 0.0,
        }
    }
}

impl ViewportMetrics {
    /// Metrics for a surface placed at the client origin
    pub fn new(width: f32, height: f32) -> Self {
        let mut metrics = Self {
            width: 0.0,
            height: 0.0,
            offset_left: 0.0,
            offset_top: 0.0,
        };
        metrics.resize(width, height);
        metrics
    }

    /// Builder: set the client offset
    pub fn with_offset(mut self, left: f32, top: f32) -> Self {
        self.set_offset(left, top);
        self
    }

    /// Update viewport size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        if (width + height) / 4.0 < MIN_RADIUS {
            log::warn!(
                "Degenerate viewport {}x{}; normalizing with radius {}",
                width, height, MIN_RADIUS
            );
        }
    }

    /// Update client offset
    pub fn set_offset(&mut self, left: f32, top: f32) {
        self.offset_left = left;
        self.offset_top = top;
    }

    /// Pull size and offset from the host surface
    pub fn sync(&mut self, source: &impl ViewportSource) {
        let (width, height) = source.size();
        let (left, top) = source.offset();
        self.resize(width, height);
        self.set_offset(left, top);
    }

    /// Normalization radius, `(width + height) / 4`, never below [`MIN_RADIUS`]
    #[inline]
    pub fn radius(&self) -> f32 {
        let radius = (self.width + self.height) / 4.0;
        if radius >= MIN_RADIUS { radius } else { MIN_RADIUS }
    }

    /// Pointer position scaled to half-radius units from the surface corner.
    ///
    /// Used for zoom and pan sampling.
    pub fn mouse_on_screen(&self, x: f32, y: f32) -> Vec2 {
        let radius = self.radius();
        Vec2::new(
            (x - self.offset_left) / radius * 0.5,
            (y - self.offset_top) / radius * 0.5,
        )
    }

    /// Project a pointer position onto the arcball and express it in world space.
    ///
    /// Points within `radius` of the surface center land on the front
    /// hemisphere; points outside are pulled onto its rim (`z = 0`). The
    /// screen axes are then mapped onto `up`, `up × eye` and `eye`.
    pub fn projection_on_ball(&self, x: f32, y: f32, eye: Vec3, up: Vec3) -> Vec3 {
        let local = self.ball_local(x, y);

        let up_axis = up.normalize_or_zero();
        let side_axis = up.cross(eye).normalize_or_zero();
        let eye_axis = eye.normalize_or_zero();

        up_axis * local.y + side_axis * local.x + eye_axis * local.z
    }

    /// Arcball point in screen-local axes (x right, y up, z toward the viewer)
    pub fn ball_local(&self, x: f32, y: f32) -> Vec3 {
        let radius = self.radius();
        let planar = Vec2::new(
            (x - self.width * 0.5 - self.offset_left) / radius,
            // screen y grows downward
            (self.height * 0.5 + self.offset_top - y) / radius,
        );

        let length = planar.length();
        if length > 1.0 {
            (planar / length).extend(0.0)
        } else {
            planar.extend((1.0 - length * length).sqrt())
        }
    }
}
