//! Error types for controller configuration

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ControlsError>;

/// Errors raised while loading or validating a [`ControllerConfig`](crate::ControllerConfig).
///
/// The per-event and per-frame paths never fail; these only surface at the
/// edges where configuration enters the controller.
#[derive(Debug, Error)]
pub enum ControlsError {
    /// Config file could not be read
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Damping factor outside (0, 1]
    #[error("Damping factor must be in (0, 1], got {0}")]
    InvalidDamping(f32),

    /// Negative or non-finite speed scalar
    #[error("Speed '{name}' must be finite and non-negative, got {value}")]
    InvalidSpeed { name: &'static str, value: f32 },

    /// Distance bounds are inverted or negative
    #[error("Invalid distance range: min {min} / max {max}")]
    InvalidDistanceRange { min: f32, max: f32 },
}
