use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

use super::metadata::MetaBundle;

/// Engine playback state
///
/// Owned by the engine. The orchestrator only observes transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineState {
    /// Nothing loaded
    Empty,

    /// A stream is loaded but not playing
    Idle,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Why a track change happened
///
/// Passed through to the engine so it can pick crossfade or gapless behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackChangeType {
    /// First track after starting from a stopped state
    First,

    /// Natural advance at the end of a track
    Auto,

    /// User-initiated skip
    Manual,
}

/// Events pushed by an engine to its subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine moved to a new state
    StateChanged(EngineState),

    /// The current track is about to end (preload or crossfade point)
    TrackAboutToEnd,

    /// The current track reached its natural end
    TrackEnded,

    /// Live stream metadata arrived
    MetadataReceived(MetaBundle),

    /// Decode or I/O failure while playing
    Error(String),
}

/// Listener handle an engine holds to publish its events
///
/// The engine never owns a reference to the orchestrator, only this sender.
pub type EngineEventSender = Sender<EngineEvent>;
