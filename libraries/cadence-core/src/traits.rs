/// Collaborator contracts consumed by the playback orchestrator
use crate::error::Result;
use crate::types::{
    EngineEventSender, EngineState, ItemOptions, Locator, Metadata, SpecialLoadResult,
    TrackChangeType,
};
use std::fmt;
use std::sync::Arc;

/// Audio engine contract
///
/// Implementers run their own decode/output processing and report back through the
/// `EngineEventSender` handed to `init`. Runtime failures (decode errors, broken
/// streams) are reported as `EngineEvent::Error`, not returned.
pub trait AudioEngine: Send {
    /// Initialise the backend and subscribe the orchestrator to engine events
    ///
    /// # Errors
    /// Returns an error if the backend cannot be brought up. This is fatal for startup.
    fn init(&mut self, events: EngineEventSender) -> Result<()>;

    /// Re-read backend-specific settings
    fn reload_settings(&mut self) {}

    /// Start playing `locator`
    fn play(&mut self, locator: &Locator, change: TrackChangeType);

    /// Pause playback
    fn pause(&mut self);

    /// Resume paused playback
    fn unpause(&mut self);

    /// Stop playback and unload the stream
    fn stop(&mut self);

    /// Seek to `position_ms` in the current track
    fn seek(&mut self, position_ms: u64);

    /// Set output volume (0-100)
    fn set_volume(&mut self, volume: u8);

    /// Current output volume (0-100)
    fn volume(&self) -> u8;

    /// Current engine state
    fn state(&self) -> EngineState;

    /// Length of the current track in milliseconds (0 if unknown)
    fn length(&self) -> u64;

    /// Start buffering `locator` for a gapless transition without switching to it
    fn start_preloading(&mut self, locator: &Locator);

    /// Whether the engine crossfades automatically between tracks
    fn is_autocrossfade_enabled(&self) -> bool;
}

/// A playable unit owned by a playlist
pub trait PlaylistItem: Send + Sync + fmt::Debug {
    /// Address of the resource
    fn locator(&self) -> &Locator;

    /// Capability bits
    fn options(&self) -> ItemOptions {
        ItemOptions::empty()
    }

    /// Song metadata
    fn metadata(&self) -> Metadata;

    /// Resolve the item for playback
    ///
    /// Only called for items with `SPECIAL_PLAY_BEHAVIOUR`.
    fn start_loading(&self) -> SpecialLoadResult {
        SpecialLoadResult::available(self.locator().clone(), self.locator().clone())
    }

    /// Resolve the next sub-track of a multi-track container
    fn load_next(&self) -> SpecialLoadResult {
        SpecialLoadResult::NoMoreTracks
    }

    /// Whether the item has all bits of `option`
    fn has_option(&self, option: ItemOptions) -> bool {
        self.options().contains(option)
    }
}

/// Shared handle to a playlist item
pub type ItemRef = Arc<dyn PlaylistItem>;

/// Playlist identifier
pub type PlaylistId = usize;

/// One playlist seen as a playback cursor
///
/// Indices are `Option<usize>`; `None` means "no current track".
pub trait PlaylistSession: Send {
    /// Index of the current track
    fn current_index(&self) -> Option<usize>;

    /// Move the cursor; `None` clears it (and invalidates the shuffle anchor)
    fn set_current_index(&mut self, index: Option<usize>);

    /// Index that follows the current one under the shuffle/repeat policy
    fn next_index(&self) -> Option<usize>;

    /// Index that precedes the current one under the shuffle/repeat policy
    fn previous_index(&self) -> Option<usize>;

    /// Index that was current before the cursor last moved
    fn last_played_index(&self) -> Option<usize>;

    /// Whether playback should stop once the current track ends
    fn stop_after_current(&self) -> bool;

    /// Set (or clear with `None`) the stop-after-track marker
    fn stop_after(&mut self, index: Option<usize>);

    /// Number of rows
    fn row_count(&self) -> usize;

    /// Item at `index`
    fn item_at(&self, index: usize) -> Option<ItemRef>;

    /// Item under the cursor
    fn current_item(&self) -> Option<ItemRef> {
        self.current_index().and_then(|index| self.item_at(index))
    }

    /// Store metadata received for a live stream
    fn set_stream_metadata(&mut self, locator: &Locator, metadata: Metadata);

    /// Mark whether the current track was already scrobbled
    fn set_scrobbled(&mut self, scrobbled: bool);
}

/// Owner of all playlists
///
/// The *active* playlist is the one being played; the *current* playlist is the one
/// the user is looking at.
pub trait PlaylistManager: Send {
    /// The playlist being played
    fn active(&self) -> &dyn PlaylistSession;

    /// Mutable access to the playlist being played
    fn active_mut(&mut self) -> &mut dyn PlaylistSession;

    /// Identifier of the playlist shown to the user
    fn current_id(&self) -> PlaylistId;

    /// Make `id` the playlist being played
    fn set_active_playlist(&mut self, id: PlaylistId);
}

/// Now-playing reporting to an external tracking service
pub trait Scrobbler: Send + Sync {
    /// Whether scrobbling is switched on
    fn is_scrobbling_enabled(&self) -> bool;

    /// Announce the track that just started
    fn now_playing(&self, metadata: &Metadata);
}

/// Scrobbler that is always switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledScrobbler;

impl Scrobbler for DisabledScrobbler {
    fn is_scrobbling_enabled(&self) -> bool {
        false
    }

    fn now_playing(&self, _metadata: &Metadata) {}
}
