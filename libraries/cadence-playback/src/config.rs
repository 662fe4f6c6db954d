/// Player configuration
use crate::error::{PlaybackError, Result};
use crate::metadata::{LocatorPattern, MetadataReconciler};
use crate::types::{RepeatMode, ShuffleMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the player and its engine
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    /// JSON file holding persisted settings; in-memory only when unset
    #[serde(default)]
    pub settings_path: Option<PathBuf>,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub playlist: PlaylistConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default)]
    pub crossfade: bool,

    /// How long before the end of a track the engine asks for the next one
    #[serde(default = "default_about_to_end_ms")]
    pub about_to_end_ms: u64,

    /// Length assumed for tracks the engine knows nothing about
    #[serde(default = "default_track_length_ms")]
    pub default_track_length_ms: u64,

    /// Clock resolution; no clock thread when unset or 0
    #[serde(default = "default_tick_ms")]
    pub tick_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MetadataConfig {
    /// Providers sending artist and title backwards, on top of the built-in ones
    #[serde(default)]
    pub swap_rules: Vec<LocatorPattern>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct PlaylistConfig {
    #[serde(default)]
    pub shuffle: ShuffleMode,

    #[serde(default)]
    pub repeat: RepeatMode,
}

impl PlayerConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables are prefixed with `CADENCE_` and use `__` between
    /// nested keys, e.g. `CADENCE_ENGINE__CROSSFADE=true`.
    ///
    /// # Errors
    /// Returns `PlaybackError::Config` if a source cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(PlaybackError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Reconciler with the built-in swap rules plus the configured ones
    pub fn reconciler(&self) -> MetadataReconciler {
        let mut reconciler = MetadataReconciler::default();
        for rule in &self.metadata.swap_rules {
            reconciler.add_swap_rule(rule.clone());
        }
        reconciler
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            crossfade: false,
            about_to_end_ms: default_about_to_end_ms(),
            default_track_length_ms: default_track_length_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

// Default values
fn default_backend() -> String {
    "silent".to_string()
}

fn default_about_to_end_ms() -> u64 {
    5_000
}

fn default_track_length_ms() -> u64 {
    180_000
}

#[allow(clippy::unnecessary_wraps)]
fn default_tick_ms() -> Option<u64> {
    Some(100)
}
