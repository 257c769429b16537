//! Gesture mode and per-mode sample tracking.

use glam::{Vec2, Vec3};

use crate::config::Motion;

/// Active interaction type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    None,
    Rotate,
    Zoom,
    Pan,
}

impl Mode {
    /// Whether a gesture is in progress
    #[inline]
    pub fn is_active(self) -> bool {
        self != Self::None
    }
}

/// Values that can be blended toward a target sample
pub trait Blend: Copy {
    /// `self * (1 - t) + other * t`
    fn blend(self, other: Self, t: f32) -> Self;
}

impl Blend for f32 {
    #[inline]
    fn blend(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl Blend for Vec2 {
    #[inline]
    fn blend(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl Blend for Vec3 {
    #[inline]
    fn blend(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

/// Advance `start` toward `end` under the given policy
#[inline]
pub fn settle<T: Blend>(start: T, end: T, motion: Motion) -> T {
    match motion {
        Motion::Static => end,
        Motion::Damped(factor) => start.blend(end, factor),
    }
}

/// Previous and latest sample for one mode.
///
/// Both are stored by value; seeding copies one value into both slots.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample<T> {
    pub start: T,
    pub end: T,
}

impl<T: Blend> Sample<T> {
    /// Sample with `start == end`
    #[inline]
    pub fn seeded(value: T) -> Self {
        Self { start: value, end: value }
    }

    /// Reset both slots to `value`
    #[inline]
    pub fn seed(&mut self, value: T) {
        *self = Self::seeded(value);
    }

    /// Move `start` toward `end`
    #[inline]
    pub fn settle(&mut self, motion: Motion) {
        self.start = settle(self.start, self.end, motion);
    }
}

/// Samples for every mode
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleState {
    /// Arcball points in world space
    pub rotate: Sample<Vec3>,
    /// Normalized screen points; only `y` drives zoom
    pub zoom: Sample<Vec2>,
    /// Normalized screen points
    pub pan: Sample<Vec2>,
}

impl SampleState {
    /// Whether no mode has an outstanding delta
    pub fn is_settled(&self) -> bool {
        self.rotate.start == self.rotate.end
            && self.zoom.start.y == self.zoom.end.y
            && self.pan.start == self.pan.end
    }
}

/// Current mode plus the keyboard resync flag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeState {
    pub mode: Mode,
    /// A key armed the mode and the samples have not been seeded from the
    /// pointer yet
    pub key_gesture_pending: bool,
}
