//! Interaction controller: gesture classification and damped transform updates.

use glam::{Quat, Vec2, Vec3};

use crate::config::ControllerConfig;
use crate::event::{normalize_wheel, InputEvent, KeyCode, PointerButton};
use crate::state::{settle, Mode, ModeState, SampleState};
use crate::target::ControlTarget;
use crate::viewport::ViewportMetrics;

/// Zoom sample offset per wheel notch
pub const WHEEL_ZOOM_STEP: f32 = 0.01;

/// Maps pointer and keyboard gestures onto a target's orientation, scale and
/// position.
///
/// Input handlers only record samples; [`update`](Self::update) turns the
/// difference between the previous and latest sample into a transform change
/// once per frame. The wheel is the exception and zooms immediately.
///
/// The controller never owns its target. Every call that needs it borrows it.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    /// Settings read on every event and frame
    pub config: ControllerConfig,
    /// Interactive surface; refreshed by the owner on resize
    pub viewport: ViewportMetrics,
    state: ModeState,
    samples: SampleState,
}

impl InteractionController {
    /// Create a controller for the given surface
    pub fn new(config: ControllerConfig, viewport: ViewportMetrics) -> Self {
        Self {
            config,
            viewport,
            state: ModeState::default(),
            samples: SampleState::default(),
        }
    }

    /// Current gesture mode
    #[inline]
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Whether a keyboard-armed mode still waits for its first pointer sample
    #[inline]
    pub fn is_key_gesture_pending(&self) -> bool {
        self.state.key_gesture_pending
    }

    /// Current samples for every mode
    #[inline]
    pub fn samples(&self) -> &SampleState {
        &self.samples
    }

    /// Drop the current gesture and any residual damped motion
    pub fn reset(&mut self) {
        self.state = ModeState::default();
        self.samples = SampleState::default();
        log::debug!("Interaction state reset");
    }

    /// Dispatch one input event.
    ///
    /// Returns `true` when the event was consumed and the host should stop
    /// propagating it (pointer presses, releases and wheel ticks while
    /// enabled).
    pub fn handle_event<T: ControlTarget + ?Sized>(
        &mut self,
        event: &InputEvent,
        target: &mut T,
    ) -> bool {
        if !self.config.enabled {
            return false;
        }

        match *event {
            InputEvent::KeyDown { code } => {
                self.key_down(code);
                false
            }
            InputEvent::KeyUp { .. } => {
                self.key_up();
                false
            }
            InputEvent::PointerDown { button, x, y } => {
                self.pointer_down(button, x, y, target);
                true
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer_move(x, y, target);
                false
            }
            InputEvent::PointerUp { .. } => {
                self.enter(Mode::None);
                true
            }
            InputEvent::Wheel { delta, detail } => self.wheel(delta, detail, target),
        }
    }

    /// Apply rotate, zoom and pan, in that order, for enabled modes.
    ///
    /// Runs regardless of `config.enabled` so motion already sampled keeps
    /// settling after the controller is switched off.
    pub fn update<T: ControlTarget + ?Sized>(&mut self, target: &mut T) {
        if self.config.rotate_enabled {
            self.apply_rotate(target);
        }
        if self.config.zoom_enabled {
            self.apply_zoom(target);
        }
        if self.config.pan_enabled {
            self.apply_pan(target);
        }
    }

    /// Rotate the target by the arcball angle between the rotate samples
    pub fn apply_rotate<T: ControlTarget + ?Sized>(&mut self, target: &mut T) {
        let sample = self.samples.rotate;
        let lengths = sample.start.length() * sample.end.length();

        if lengths > 0.0 {
            // Drift can push the ratio just past 1
            let cos = (sample.start.dot(sample.end) / lengths).clamp(-1.0, 1.0);
            let angle = cos.acos();
            let axis = sample.start.cross(sample.end).normalize_or_zero();

            if angle > 0.0 && axis != Vec3::ZERO {
                let angle = angle * self.config.rotate_speed;
                // Ball samples are in world space; post-multiplying needs the
                // axis in the target's local frame
                let orientation = target.orientation();
                let local_axis = (orientation.inverse() * axis).normalize_or_zero();
                let rotation = Quat::from_axis_angle(local_axis, angle);
                target.set_orientation((orientation * rotation).normalize());
                log::trace!("Rotate {:.5} rad about {:?}", angle, axis);
            }
        }

        self.samples.rotate.settle(self.config.motion());
    }

    /// Scale the target by the vertical zoom drag
    pub fn apply_zoom<T: ControlTarget + ?Sized>(&mut self, target: &mut T) {
        let sample = self.samples.zoom;
        let factor = 1.0 + (sample.end.y - sample.start.y) * self.config.zoom_speed;

        if factor != 1.0 && factor > 0.0 {
            target.scale_uniformly(factor);
            log::trace!("Zoom by {:.5}", factor);
        }

        self.samples.zoom.start.y = settle(sample.start.y, sample.end.y, self.config.motion());
    }

    /// Translate the target by the pan drag in the eye/up plane.
    ///
    /// Sensitivity scales with `|position.y|`, so a target at height zero
    /// does not pan.
    pub fn apply_pan<T: ControlTarget + ?Sized>(&mut self, target: &mut T) {
        let sample = self.samples.pan;
        let delta = sample.end - sample.start;

        if delta != Vec2::ZERO {
            let position = target.position();
            let change = delta * position.y.abs() * self.config.pan_speed;

            let eye = target.eye();
            let up = target.up();
            let offset = eye.cross(up).normalize_or_zero() * change.x
                + up.normalize_or_zero() * change.y;

            target.set_position(position - offset);
            log::trace!("Pan by {:?}", offset);
        }

        self.samples.pan.settle(self.config.motion());
    }

    fn key_down(&mut self, code: KeyCode) {
        if self.state.mode.is_active() {
            return;
        }

        let keys = self.config.keys;
        let mode = if code == keys.rotate && self.config.rotate_enabled {
            Mode::Rotate
        } else if code == keys.zoom && self.config.zoom_enabled {
            Mode::Zoom
        } else if code == keys.pan && self.config.pan_enabled {
            Mode::Pan
        } else {
            Mode::None
        };

        if mode.is_active() {
            self.enter(mode);
            self.state.key_gesture_pending = true;
        }
    }

    fn key_up(&mut self) {
        if self.state.mode.is_active() {
            self.enter(Mode::None);
        }
    }

    fn pointer_down<T: ControlTarget + ?Sized>(
        &mut self,
        button: PointerButton,
        x: f32,
        y: f32,
        target: &T,
    ) {
        if self.state.mode.is_active() {
            return;
        }

        let mode = self.mode_for_button(button);
        match mode {
            Mode::Rotate => {
                let on_ball = self.ball(x, y, target);
                self.samples.rotate.seed(on_ball);
            }
            Mode::Zoom => {
                let on_screen = self.viewport.mouse_on_screen(x, y);
                self.samples.zoom.seed(on_screen);
            }
            Mode::Pan => {
                let on_screen = self.viewport.mouse_on_screen(x, y);
                self.samples.pan.seed(on_screen);
            }
            Mode::None => {}
        }
        self.enter(mode);
    }

    fn pointer_move<T: ControlTarget + ?Sized>(&mut self, x: f32, y: f32, target: &T) {
        if self.state.key_gesture_pending {
            let on_ball = self.ball(x, y, target);
            let on_screen = self.viewport.mouse_on_screen(x, y);
            self.samples.rotate.seed(on_ball);
            self.samples.zoom.seed(on_screen);
            self.samples.pan.seed(on_screen);
            self.state.key_gesture_pending = false;
        }

        match self.state.mode {
            Mode::Rotate if self.config.rotate_enabled => {
                self.samples.rotate.end = self.ball(x, y, target);
            }
            Mode::Zoom if self.config.zoom_enabled => {
                self.samples.zoom.end = self.viewport.mouse_on_screen(x, y);
            }
            Mode::Pan if self.config.pan_enabled => {
                self.samples.pan.end = self.viewport.mouse_on_screen(x, y);
            }
            _ => {}
        }
    }

    fn wheel<T: ControlTarget + ?Sized>(&mut self, delta: f32, detail: f32, target: &mut T) -> bool {
        if !self.config.zoom_enabled {
            return false;
        }

        let notches = normalize_wheel(delta, detail);
        self.samples.zoom.start.y += notches * WHEEL_ZOOM_STEP;
        self.apply_zoom(target);
        true
    }

    fn mode_for_button(&self, button: PointerButton) -> Mode {
        match button {
            PointerButton::Primary if self.config.rotate_enabled => Mode::Rotate,
            PointerButton::Middle if self.config.zoom_enabled => Mode::Zoom,
            _ if self.config.pan_enabled => Mode::Pan,
            _ => Mode::None,
        }
    }

    fn ball<T: ControlTarget + ?Sized>(&self, x: f32, y: f32, target: &T) -> Vec3 {
        self.viewport.projection_on_ball(x, y, target.eye(), target.up())
    }

    fn enter(&mut self, mode: Mode) {
        if self.state.mode != mode {
            log::debug!("Interaction mode {:?} -> {:?}", self.state.mode, mode);
        }
        self.state.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::ControlledObject;

    fn controller() -> InteractionController {
        InteractionController::new(ControllerConfig::default(), ViewportMetrics::new(800.0, 600.0))
    }

    fn down(button: u16, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown { button: PointerButton::from_index(button), x, y }
    }

    #[test]
    fn test_button_selects_mode() {
        let mut object = ControlledObject::new();
        for (button, mode) in [(0, Mode::Rotate), (1, Mode::Zoom), (2, Mode::Pan), (3, Mode::Pan)] {
            let mut controls = controller();
            assert!(controls.handle_event(&down(button, 10.0, 10.0), &mut object));
            assert_eq!(controls.mode(), mode);
        }
    }

    #[test]
    fn test_disabled_button_falls_through_to_pan() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.config.rotate_enabled = false;
        controls.handle_event(&down(0, 10.0, 10.0), &mut object);
        assert_eq!(controls.mode(), Mode::Pan);

        let mut controls = controller();
        controls.config.pan_enabled = false;
        controls.handle_event(&down(2, 10.0, 10.0), &mut object);
        assert_eq!(controls.mode(), Mode::None);
    }

    #[test]
    fn test_press_seeds_without_delta() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.handle_event(&down(0, 200.0, 120.0), &mut object);
        let rotate = controls.samples().rotate;
        assert_eq!(rotate.start, rotate.end);
        assert_ne!(rotate.start, Vec3::ZERO);
    }

    #[test]
    fn test_second_press_is_ignored() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.handle_event(&down(0, 400.0, 300.0), &mut object);
        let seeded = controls.samples().rotate;
        controls.handle_event(&down(2, 100.0, 100.0), &mut object);
        assert_eq!(controls.mode(), Mode::Rotate);
        assert_eq!(controls.samples().rotate, seeded);
        assert_eq!(controls.samples().pan.start, Vec2::ZERO);
    }

    #[test]
    fn test_move_updates_only_active_end() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.handle_event(&down(2, 100.0, 100.0), &mut object);
        controls.handle_event(&InputEvent::PointerMove { x: 170.0, y: 100.0 }, &mut object);

        let pan = controls.samples().pan;
        assert!((pan.end.x - pan.start.x - 0.1).abs() < 1e-5);
        assert_eq!(controls.samples().zoom, Default::default());
        assert_eq!(controls.samples().rotate, Default::default());
    }

    #[test]
    fn test_key_priority_on_overlap() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.config.keys.zoom = KeyCode::A;
        controls.handle_event(&InputEvent::KeyDown { code: KeyCode::A }, &mut object);
        assert_eq!(controls.mode(), Mode::Rotate);

        let mut controls = controller();
        controls.config.keys.zoom = KeyCode::A;
        controls.config.rotate_enabled = false;
        controls.handle_event(&InputEvent::KeyDown { code: KeyCode::A }, &mut object);
        assert_eq!(controls.mode(), Mode::Zoom);
    }

    #[test]
    fn test_key_gesture_resyncs_on_first_move() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        assert!(!controls.handle_event(&InputEvent::KeyDown { code: KeyCode::D }, &mut object));
        assert_eq!(controls.mode(), Mode::Pan);
        assert!(controls.is_key_gesture_pending());

        controls.handle_event(&InputEvent::PointerMove { x: 140.0, y: 70.0 }, &mut object);
        assert!(!controls.is_key_gesture_pending());

        let samples = controls.samples();
        let expected = controls.viewport.mouse_on_screen(140.0, 70.0);
        assert_eq!(samples.pan.start, expected);
        assert_eq!(samples.pan.end, expected);
        assert_eq!(samples.zoom.start, expected);
        assert_eq!(samples.zoom.end, expected);
        assert_eq!(samples.rotate.start, samples.rotate.end);
        assert!(samples.is_settled());
    }

    #[test]
    fn test_key_down_does_not_stack() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.handle_event(&InputEvent::KeyDown { code: KeyCode::S }, &mut object);
        controls.handle_event(&InputEvent::KeyDown { code: KeyCode::A }, &mut object);
        assert_eq!(controls.mode(), Mode::Zoom);

        controls.handle_event(&InputEvent::KeyUp { code: KeyCode::A }, &mut object);
        assert_eq!(controls.mode(), Mode::None);
    }

    #[test]
    fn test_key_up_keeps_samples() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.handle_event(&down(2, 100.0, 100.0), &mut object);
        controls.handle_event(&InputEvent::PointerMove { x: 150.0, y: 100.0 }, &mut object);
        let before = *controls.samples();
        controls.handle_event(&InputEvent::KeyUp { code: KeyCode::D }, &mut object);
        assert_eq!(controls.mode(), Mode::None);
        assert_eq!(*controls.samples(), before);
    }

    #[test]
    fn test_pointer_up_always_ends_gesture() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.handle_event(&InputEvent::KeyDown { code: KeyCode::A }, &mut object);
        assert!(controls.handle_event(
            &InputEvent::PointerUp { button: PointerButton::Secondary, x: 0.0, y: 0.0 },
            &mut object,
        ));
        assert_eq!(controls.mode(), Mode::None);
    }

    #[test]
    fn test_zero_angle_rotation_is_noop() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.handle_event(&down(0, 123.0, 456.0), &mut object);
        controls.update(&mut object);
        assert_eq!(object.orientation, Quat::IDENTITY);
    }

    #[test]
    fn test_pan_uses_height_and_view_plane() {
        let mut object = ControlledObject::new().with_position(Vec3::new(0.0, 2.0, 0.0));
        let mut controls = InteractionController::new(
            ControllerConfig::static_moving(),
            ViewportMetrics::new(800.0, 600.0),
        );
        controls.handle_event(&down(2, 100.0, 100.0), &mut object);
        controls.handle_event(&InputEvent::PointerMove { x: 170.0, y: 135.0 }, &mut object);
        controls.update(&mut object);

        // delta (0.1, 0.05) * |2.0| * 0.3 = (0.06, 0.03); eye x up = Z x Y = -X
        let expected = Vec3::new(0.06, 2.0 - 0.03, 0.0);
        assert!((object.position - expected).length() < 1e-5, "{:?}", object.position);
        assert!(controls.samples().is_settled());
    }

    #[test]
    fn test_pan_at_zero_height_does_not_move() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.handle_event(&down(2, 100.0, 100.0), &mut object);
        controls.handle_event(&InputEvent::PointerMove { x: 300.0, y: 300.0 }, &mut object);
        controls.update(&mut object);
        assert_eq!(object.position, Vec3::ZERO);
    }

    #[test]
    fn test_non_positive_zoom_factor_is_skipped() {
        let mut object = ControlledObject::new();
        let mut controls = InteractionController::new(
            ControllerConfig { zoom_speed: 10.0, ..Default::default() },
            ViewportMetrics::new(800.0, 600.0),
        );
        controls.handle_event(&down(1, 400.0, 600.0), &mut object);
        controls.handle_event(&InputEvent::PointerMove { x: 400.0, y: 0.0 }, &mut object);

        // factor = 1 + (-600 / 700) * 10 < 0
        controls.update(&mut object);
        assert_eq!(object.scale, Vec3::ONE);

        // start still settles, so the factor climbs back into range
        let mut frames = 0;
        while object.scale == Vec3::ONE && frames < 100 {
            controls.update(&mut object);
            frames += 1;
        }
        assert!(frames < 100);
        assert!(object.scale.x > 0.0);
    }

    #[test]
    fn test_wheel_respects_zoom_switch() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.config.zoom_enabled = false;
        let wheel = InputEvent::Wheel { delta: 120.0, detail: 0.0 };
        assert!(!controls.handle_event(&wheel, &mut object));
        assert_eq!(object.scale, Vec3::ONE);
    }

    #[test]
    fn test_disabled_controller_ignores_everything() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.config.enabled = false;
        assert!(!controls.handle_event(&down(0, 400.0, 300.0), &mut object));
        assert!(!controls.handle_event(&InputEvent::KeyDown { code: KeyCode::A }, &mut object));
        assert!(!controls.handle_event(&InputEvent::Wheel { delta: 120.0, detail: 0.0 }, &mut object));
        assert_eq!(controls.mode(), Mode::None);
        assert_eq!(object.scale, Vec3::ONE);
    }

    #[test]
    fn test_reset_clears_residual_motion() {
        let mut object = ControlledObject::new();
        let mut controls = controller();
        controls.handle_event(&down(1, 400.0, 300.0), &mut object);
        controls.handle_event(&InputEvent::PointerMove { x: 400.0, y: 200.0 }, &mut object);
        controls.reset();
        assert_eq!(controls.mode(), Mode::None);
        controls.update(&mut object);
        assert_eq!(object.scale, Vec3::ONE);
    }
}
