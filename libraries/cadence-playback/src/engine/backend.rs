//! Engine backend selection
//!
//! Backends are compiled in through cargo features. A configured backend that is
//! not part of the build is a startup error, never a silent fallback.

use crate::config::EngineConfig;
use crate::error::{PlaybackError, Result};
use cadence_core::AudioEngine;
use std::fmt;
use std::str::FromStr;

/// Engine backend compiled into this build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EngineKind {
    /// Clock-driven engine without audio output (headless use, tests)
    #[cfg(feature = "silent-engine")]
    Silent,
}

impl EngineKind {
    /// Configuration name of the backend
    pub fn name(&self) -> &'static str {
        match *self {
            #[cfg(feature = "silent-engine")]
            Self::Silent => "silent",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match *self {
            #[cfg(feature = "silent-engine")]
            Self::Silent => "Timing-only engine with no audio output",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = PlaybackError;

    fn from_str(name: &str) -> Result<Self> {
        available_engines()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| PlaybackError::EngineUnavailable(name.to_string()))
    }
}

/// List all backends compiled into this build
pub fn available_engines() -> Vec<EngineKind> {
    #[allow(unused_mut)]
    let mut engines = Vec::new();

    #[cfg(feature = "silent-engine")]
    engines.push(EngineKind::Silent);

    engines
}

/// Create the engine named in `config`
///
/// # Errors
/// Returns `PlaybackError::EngineUnavailable` if the backend is not compiled in.
pub fn create_engine(config: &EngineConfig) -> Result<Box<dyn AudioEngine>> {
    let kind: EngineKind = config.backend.parse()?;
    tracing::info!(backend = %kind, "Creating audio engine");

    match kind {
        #[cfg(feature = "silent-engine")]
        EngineKind::Silent => Ok(Box::new(super::SilentEngine::from_config(config))),
    }
}
