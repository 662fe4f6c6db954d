//! Cadence Core
//!
//! Platform-agnostic types and collaborator contracts for the Cadence playback core.
//!
//! The playback orchestrator in `cadence-playback` never talks to a concrete audio
//! backend, playlist widget or scrobbling service. It talks to the traits defined here:
//! - **Engine**: `AudioEngine` (play/pause/seek/volume, preloading, event channel)
//! - **Playlist cursor**: `PlaylistManager` + `PlaylistSession`
//! - **Items**: `PlaylistItem`, shared as `ItemRef`
//! - **Scrobbling**: `Scrobbler`
//! - **Settings**: `SettingsStore` (JSON values under string keys)
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{ItemOptions, Locator, Metadata};
//!
//! let locator = Locator::parse("http://ice.somafm.com/groovesalad").unwrap();
//! assert_eq!(locator.host(), Some("ice.somafm.com"));
//!
//! let options = ItemOptions::SPECIAL_PLAY_BEHAVIOUR | ItemOptions::PAUSE_DISABLED;
//! assert!(!options.contains(ItemOptions::CONTAINS_MULTIPLE_TRACKS));
//!
//! let song = Metadata::new("Title", "Artist");
//! assert!(!song.is_untitled());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod settings;
pub mod traits;
pub mod types;

pub use error::{CoreError, Result};
pub use settings::{JsonFileSettings, MemorySettings, SettingsStore, SETTING_VOLUME};
pub use traits::{
    AudioEngine, DisabledScrobbler, ItemRef, PlaylistId, PlaylistItem, PlaylistManager,
    PlaylistSession, Scrobbler,
};
pub use types::{
    EngineEvent, EngineEventSender, EngineState, ItemOptions, Locator, MetaBundle, Metadata,
    SpecialLoadResult, TrackChangeType,
};
