//! Error types for playback orchestration

use cadence_core::CoreError;
use thiserror::Error;

/// Playback errors
///
/// Only startup and configuration problems are errors. Navigation on an empty or
/// exhausted playlist degrades to a stop, and engine runtime failures are relayed as
/// `PlayerEvent::Error`.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The configured engine backend is not compiled into this build
    #[error("Selected engine not compiled in: {0}")]
    EngineUnavailable(String),

    /// The engine backend failed to initialise
    #[error("Error initialising audio engine: {0}")]
    EngineInit(String),

    /// The player control thread is gone
    #[error("Player service is not running")]
    ServiceStopped,

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Core error (settings, locators)
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<config::ConfigError> for PlaybackError {
    fn from(err: config::ConfigError) -> Self {
        PlaybackError::Config(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
