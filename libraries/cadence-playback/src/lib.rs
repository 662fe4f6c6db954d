//! Cadence - Playback Orchestration
//!
//! Platform-agnostic playback control for Cadence.
//!
//! This crate provides:
//! - The `Player` orchestrator (play/pause/next/previous/stop, seek, volume, mute)
//! - Resolution of streams and containers that load asynchronously
//! - Gapless preloading and crossfade hand-off on track end
//! - Live stream metadata normalisation (artist/title split and swap)
//! - An in-memory playlist with shuffle (Random + Smart) and repeat (Off, All, One)
//! - A control thread (`PlayerService`) fed by commands, engine events and load results
//!
//! # Architecture
//!
//! The player never talks to audio hardware. It drives any `AudioEngine` from
//! `cadence-core` and reads the playlist through `PlaylistManager`. Engine backends
//! are compiled in through features; `silent-engine` keeps time without producing
//! sound and is enabled by default.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_core::{DisabledScrobbler, Locator, MemorySettings};
//! use cadence_playback::{Player, Playlist, Playlists, SilentEngine, SongItem};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let track = Locator::parse("http://example.com/music/song.ogg").unwrap();
//! let playlist = Playlist::with_items("Queue", [SongItem::from_locator(track).into_ref()]);
//!
//! let mut player = Player::new(
//!     Box::new(SilentEngine::new(Duration::from_secs(180))),
//!     Box::new(Playlists::new(playlist)),
//!     Arc::new(DisabledScrobbler),
//!     Box::new(MemorySettings::new()),
//! )
//! .unwrap();
//!
//! player.set_volume(80);
//! player.play_pause();
//! assert_eq!(player.playlists().active().current_index(), Some(0));
//!
//! player.stop();
//! assert!(player.current_item().is_none());
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use cadence_playback::{Playlist, RepeatMode, ShuffleMode};
//!
//! let mut playlist = Playlist::new("Party");
//! playlist.set_shuffle(ShuffleMode::Smart);
//! playlist.set_repeat(RepeatMode::All);
//! ```

pub mod config;
pub mod engine;
mod error;
pub mod events;
pub mod metadata;
mod player;
pub mod playlist;
mod service;
pub mod types;
pub mod volume;

// Public exports
pub use config::{EngineConfig, PlayerConfig};
#[cfg(feature = "silent-engine")]
pub use engine::SilentEngine;
pub use engine::{available_engines, create_engine, EngineKind};
pub use error::{PlaybackError, Result};
pub use events::{EventBus, PlayerEvent};
pub use metadata::{LocatorPattern, MetadataReconciler};
pub use player::Player;
pub use playlist::{Playlist, Playlists, SongItem};
pub use service::{PlayerCommand, PlayerHandle, PlayerService};
pub use types::{RepeatMode, ShuffleMode};
