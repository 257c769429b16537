//! # void_controls - Object Interaction Controls
//!
//! Mouse and keyboard controls that rotate, zoom and pan a single object,
//! independent of any renderer or scene graph.
//!
//! - Pointer and key events select a [`Mode`] (rotate, zoom or pan)
//! - Pointer positions are projected onto an arcball or the normalized screen
//! - [`InteractionController::update`] turns the sampled deltas into
//!   orientation, scale and position changes, snapping or damping per frame
//!
//! # Example
//!
//! ```ignore
//! use void_controls::prelude::*;
//!
//! let mut object = ControlledObject::new();
//! let mut controls = InteractionController::new(
//!     ControllerConfig::default(),
//!     ViewportMetrics::new(800.0, 600.0),
//! );
//!
//! controls.handle_event(&InputEvent::PointerDown { button: PointerButton::Primary, x: 400.0, y: 300.0 }, &mut object);
//! controls.handle_event(&InputEvent::PointerMove { x: 500.0, y: 300.0 }, &mut object);
//!
//! // once per rendered frame
//! controls.update(&mut object);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod state;
pub mod target;
pub mod viewport;

pub use config::{ControllerConfig, KeyBindings, Motion};
pub use controller::{InteractionController, WHEEL_ZOOM_STEP};
pub use error::{ControlsError, Result};
pub use event::{normalize_wheel, InputEvent, KeyCode, PointerButton};
pub use state::{Mode, ModeState, Sample, SampleState};
pub use target::{ControlTarget, ControlledObject};
pub use viewport::{ViewportMetrics, ViewportSource, MIN_RADIUS};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ControllerConfig, KeyBindings, Motion};
    pub use crate::controller::InteractionController;
    pub use crate::event::{InputEvent, KeyCode, PointerButton};
    pub use crate::state::Mode;
    pub use crate::target::{ControlTarget, ControlledObject};
    pub use crate::viewport::{ViewportMetrics, ViewportSource};
}
