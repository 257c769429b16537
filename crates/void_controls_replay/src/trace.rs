//! Recorded input traces and their playback.
//!
//! # Trace Format
//!
//! ```json
//! {
//!   "viewport": { "width": 800, "height": 600 },
//!   "object": { "position": [0, 1, 0] },
//!   "frames": [
//!     { "events": [{ "type": "PointerDown", "button": 0, "x": 400, "y": 300 }] },
//!     { "events": [{ "type": "PointerMove", "x": 750, "y": 300 }] },
//!     { "repeat": 20 }
//!   ]
//! }
//! ```
//!
//! Every frame delivers its events in order and then calls `update` once per
//! `repeat` (default 1).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use void_controls::{
    ControlledObject, ControllerConfig, ControlsError, InputEvent, InteractionController,
    ViewportMetrics,
};

/// Errors from loading or replaying a trace
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read trace '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Trace JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] ControlsError),

    #[error("Usage: controls-replay <trace.json> [--config <controls.toml>]")]
    Usage,
}

/// Result type for replay operations
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One frame of recorded input
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub events: Vec<InputEvent>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

/// A recorded session
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub viewport: ViewportMetrics,
    #[serde(default)]
    pub object: ControlledObject,
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Trace {
    /// Parse a JSON trace
    pub fn from_json_str(content: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a JSON trace file
    pub fn load(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

/// Summary of a finished replay
#[derive(Clone, Debug, Serialize)]
pub struct ReplayReport {
    pub frames: u32,
    pub consumed_events: u32,
    pub object: ControlledObject,
}

/// Play `trace` through a fresh controller and return the final object
pub fn replay(trace: &Trace, config: ControllerConfig) -> ReplayReport {
    let mut controls = InteractionController::new(config, trace.viewport);
    let mut object = trace.object;
    let mut frames = 0;
    let mut consumed_events = 0;

    for frame in &trace.frames {
        for event in &frame.events {
            if controls.handle_event(event, &mut object) {
                consumed_events += 1;
            }
        }
        for _ in 0..frame.repeat {
            controls.update(&mut object);
            frames += 1;
        }
        log::debug!("Frame {}: mode {:?}", frames, controls.mode());
    }

    ReplayReport { frames, consumed_events, object }
}
