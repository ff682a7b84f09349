//! Construction-time errors
//!
//! The per-tick simulation is infallible. Everything that can go wrong is
//! caught when a `Tuning` or `World` is built.

use thiserror::Error;

/// Rejected configuration or world geometry
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A tuning value is outside its legal domain
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// Tuning override JSON failed to parse
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// No built-in profile with this name
    #[error("unknown tuning profile `{0}`")]
    UnknownProfile(String),

    /// Tuning override file could not be read
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// Viewport/world geometry cannot hold the player or the camera
    #[error("invalid world geometry: {0}")]
    World(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
