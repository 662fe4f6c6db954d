//! Playback orchestrator
//!
//! Translates user intents (play, pause, next, ...) and engine notifications
//! (about to end, ended, metadata) into engine commands and playlist cursor moves.
//!
//! Everything runs on one control thread. The engine and async item loads report back
//! through channels; `process_pending_events` (or [`crate::PlayerService`]) drains them
//! and dispatches into the same `&mut self` methods the user commands use.

mod resolver;

use crate::{
    error::{PlaybackError, Result},
    events::{EventBus, PlayerEvent},
    metadata::MetadataReconciler,
    volume::{self, MuteMemory},
};
use cadence_core::{
    AudioEngine, EngineEvent, EngineState, ItemOptions, ItemRef, Locator, MetaBundle, Metadata,
    PlaylistManager, Scrobbler, SettingsStore, SpecialLoadResult, TrackChangeType,
    SETTING_VOLUME,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Playback orchestrator
pub struct Player {
    engine: Box<dyn AudioEngine>,
    playlists: Box<dyn PlaylistManager>,
    scrobbler: Arc<dyn Scrobbler>,
    settings: Box<dyn SettingsStore>,
    reconciler: MetadataReconciler,
    events: EventBus,

    /// Item the engine was last told to play; released on stop
    current_item: Option<ItemRef>,

    /// Locator of the item whose load is in flight
    loading_async: Option<Locator>,

    /// Change type to use once a special load resolves
    stream_change_type: TrackChangeType,

    mute: MuteMemory,

    engine_rx: Receiver<EngineEvent>,
    load_tx: Sender<SpecialLoadResult>,
    load_rx: Receiver<SpecialLoadResult>,
}

impl Player {
    /// Initialise the engine and restore the persisted volume
    ///
    /// # Errors
    /// Returns `PlaybackError::EngineInit` if the engine cannot be brought up.
    pub fn new(
        mut engine: Box<dyn AudioEngine>,
        playlists: Box<dyn PlaylistManager>,
        scrobbler: Arc<dyn Scrobbler>,
        settings: Box<dyn SettingsStore>,
    ) -> Result<Self> {
        let (engine_tx, engine_rx) = unbounded();
        engine
            .init(engine_tx)
            .map_err(|e| PlaybackError::EngineInit(e.to_string()))?;

        let (load_tx, load_rx) = unbounded();
        let volume = volume::load(settings.as_ref());

        let mut player = Self {
            engine,
            playlists,
            scrobbler,
            settings,
            reconciler: MetadataReconciler::default(),
            events: EventBus::new(),
            current_item: None,
            loading_async: None,
            stream_change_type: TrackChangeType::First,
            mute: MuteMemory::new(),
            engine_rx,
            load_tx,
            load_rx,
        };

        player.set_volume(i32::from(volume));
        info!(volume, "Player initialised");

        Ok(player)
    }

    /// Replace the stream metadata reconciler
    pub fn with_reconciler(mut self, reconciler: MetadataReconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    // ===== Navigation =====

    /// Play the item at `index` of the active playlist
    ///
    /// With `reset_shuffle` the cursor is cleared first so a shuffled playlist
    /// reshuffles around `index`.
    pub fn play_at(&mut self, index: usize, change: TrackChangeType, reset_shuffle: bool) {
        if reset_shuffle {
            self.playlists.active_mut().set_current_index(None);
        }
        self.playlists.active_mut().set_current_index(Some(index));

        let Some(item) = self.playlists.active().item_at(index) else {
            debug!(index, "No item at index, stopping");
            self.stop();
            return;
        };
        self.current_item = Some(item.clone());

        if item.has_option(ItemOptions::SPECIAL_PLAY_BEHAVIOUR) {
            if self.is_loading(item.locator()) {
                debug!(locator = %item.locator(), "Load already in flight");
                return;
            }
            self.stream_change_type = change;
            let result = item.start_loading();
            self.handle_special_load(result);
        } else {
            self.loading_async = None;
            info!(index, locator = %item.locator(), ?change, "Playing");
            self.engine.play(item.locator(), change);

            if self.scrobbler.is_scrobbling_enabled() {
                self.scrobbler.now_playing(&item.metadata());
            }
        }
    }

    /// Skip to the next track
    pub fn next(&mut self) {
        self.next_internal(TrackChangeType::Manual);
    }

    fn next_internal(&mut self, change: TrackChangeType) {
        if change == TrackChangeType::Manual {
            self.events
                .emit(PlayerEvent::TrackSkipped(self.current_item.clone()));
        }

        if self.take_stop_after() {
            return;
        }

        if let Some(item) = self.playlists.active().current_item() {
            if item.has_option(ItemOptions::CONTAINS_MULTIPLE_TRACKS) {
                if self.is_loading(item.locator()) {
                    debug!(locator = %item.locator(), "Next sub-track already loading");
                    return;
                }
                self.stream_change_type = change;
                let result = item.load_next();
                self.handle_special_load(result);
                return;
            }
        }

        self.next_item(change);
    }

    pub(crate) fn next_item(&mut self, change: TrackChangeType) {
        match self.playlists.active().next_index() {
            Some(index) => self.play_at(index, change, false),
            None => {
                info!("Playlist finished");
                self.playlists.active_mut().set_current_index(None);
                self.events.emit(PlayerEvent::PlaylistFinished);
                self.stop();
            }
        }
    }

    /// Go back to the previous track
    pub fn previous(&mut self) {
        let index = self.playlists.active().previous_index();
        self.playlists.active_mut().set_current_index(index);

        match index {
            Some(index) => self.play_at(index, TrackChangeType::Manual, false),
            None => self.stop(),
        }
    }

    /// Stop playback and release the current item
    pub fn stop(&mut self) {
        info!("Stopping playback");
        self.engine.stop();
        self.playlists.active_mut().set_current_index(None);
        self.current_item = None;
    }

    /// Clear a pending stop-after marker on the current track and stop
    ///
    /// Returns true if playback was stopped.
    fn take_stop_after(&mut self) -> bool {
        if !self.playlists.active().stop_after_current() {
            return false;
        }

        debug!("Stop after current track");
        self.playlists.active_mut().stop_after(None);
        self.stop();
        true
    }

    // ===== Transport =====

    /// Toggle between playing and paused, starting playback when stopped
    pub fn play_pause(&mut self) {
        match self.engine.state() {
            EngineState::Paused => self.engine.unpause(),
            EngineState::Playing => {
                let pause_disabled = self
                    .current_item
                    .as_ref()
                    .is_some_and(|item| item.has_option(ItemOptions::PAUSE_DISABLED));

                if pause_disabled {
                    debug!("Pausing disabled for current item, stopping engine");
                    self.engine.stop();
                } else {
                    self.engine.pause();
                }
            }
            EngineState::Empty | EngineState::Idle => {
                let id = self.playlists.current_id();
                self.playlists.set_active_playlist(id);

                let session = self.playlists.active();
                if session.row_count() == 0 {
                    return;
                }

                let index = session
                    .current_index()
                    .or_else(|| session.last_played_index())
                    .unwrap_or(0);
                self.play_at(index, TrackChangeType::First, true);
            }
        }
    }

    /// Play: restart when playing, resume when paused, start when stopped
    pub fn play(&mut self) {
        match self.engine.state() {
            EngineState::Playing => self.seek(0),
            EngineState::Paused => self.engine.unpause(),
            EngineState::Empty | EngineState::Idle => self.play_pause(),
        }
    }

    /// Pause: pause when playing, resume when paused
    pub fn pause(&mut self) {
        match self.engine.state() {
            EngineState::Playing => self.engine.pause(),
            EngineState::Paused => self.engine.unpause(),
            EngineState::Empty | EngineState::Idle => {}
        }
    }

    /// Seek to `seconds` into the current track
    ///
    /// The position is clamped to the track length. Seeking counts as a listen, so
    /// the track is marked scrobbled.
    pub fn seek(&mut self, seconds: i64) {
        let length = i64::try_from(self.engine.length()).unwrap_or(i64::MAX);
        let position = seconds.saturating_mul(1000).clamp(0, length);

        self.engine.seek(u64::try_from(position).unwrap_or(0));
        self.playlists.active_mut().set_scrobbled(true);
    }

    // ===== Volume =====

    /// Set, persist and apply the volume (clamped to 0-100)
    pub fn set_volume(&mut self, value: i32) {
        let old = self.engine.volume();
        let volume = volume::clamp(value);

        if let Err(e) = self
            .settings
            .set(SETTING_VOLUME, serde_json::Value::from(volume))
        {
            warn!("Failed to persist volume: {}", e);
        }

        self.engine.set_volume(volume);

        if volume != old {
            self.events.emit(PlayerEvent::VolumeChanged(volume));
        }
    }

    /// Toggle mute
    pub fn mute(&mut self) {
        let target = self.mute.toggle(self.engine.volume());
        self.set_volume(i32::from(target));
    }

    /// Current engine volume
    pub fn volume(&self) -> u8 {
        self.engine.volume()
    }

    /// Current engine state
    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    // ===== Engine notifications =====

    /// The current track is close to its end
    pub fn track_about_to_end(&mut self) {
        if self.engine.is_autocrossfade_enabled() {
            self.next_internal(TrackChangeType::Auto);
            return;
        }

        let current_is_container = self
            .current_item
            .as_ref()
            .is_some_and(|item| item.has_option(ItemOptions::CONTAINS_MULTIPLE_TRACKS));
        if current_is_container {
            return;
        }

        let session = self.playlists.active();
        let Some(next) = session.next_index().and_then(|index| session.item_at(index)) else {
            return;
        };

        let locator = if next.has_option(ItemOptions::CONTAINS_MULTIPLE_TRACKS) {
            match next.load_next() {
                SpecialLoadResult::NoMoreTracks => return,
                SpecialLoadResult::WillLoadAsynchronously { .. } => {
                    self.loading_async = Some(next.locator().clone());
                    return;
                }
                SpecialLoadResult::TrackAvailable { resolved, .. } => resolved,
            }
        } else {
            next.locator().clone()
        };

        debug!(%locator, "Preloading next track");
        self.engine.start_preloading(&locator);
    }

    /// The current track finished
    pub fn track_ended(&mut self) {
        if self.take_stop_after() {
            return;
        }

        self.next_internal(TrackChangeType::Auto);
    }

    /// Relay an engine state change
    pub fn engine_state_changed(&mut self, state: EngineState) {
        debug!(?state, "Engine state changed");
        self.events.emit(PlayerEvent::from(state));
    }

    /// Merge live stream metadata into the current item
    pub fn engine_metadata_received(&mut self, bundle: &MetaBundle) {
        let Some(item) = self.current_item.clone() else {
            return;
        };

        let Some(metadata) = self.reconciler.reconcile(&*item, bundle) else {
            debug!(locator = %item.locator(), "Ignoring empty stream metadata");
            return;
        };

        self.playlists
            .active_mut()
            .set_stream_metadata(item.locator(), metadata.clone());
        self.current_metadata_changed(&metadata);
    }

    /// Announce new metadata for the current track
    pub fn current_metadata_changed(&self, metadata: &Metadata) {
        if self.scrobbler.is_scrobbling_enabled() {
            self.scrobbler.now_playing(metadata);
        }
    }

    /// Dispatch one engine event
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::StateChanged(state) => self.engine_state_changed(state),
            EngineEvent::TrackAboutToEnd => self.track_about_to_end(),
            EngineEvent::TrackEnded => self.track_ended(),
            EngineEvent::MetadataReceived(bundle) => self.engine_metadata_received(&bundle),
            EngineEvent::Error(message) => {
                warn!("Engine error: {}", message);
                self.events.emit(PlayerEvent::Error(message));
            }
        }
    }

    /// Drain queued engine events and load results
    ///
    /// Handling one message may queue more, so this loops until both channels are
    /// empty. Returns the number of messages handled.
    pub fn process_pending_events(&mut self) -> usize {
        let mut handled = 0;

        loop {
            let before = handled;

            while let Ok(event) = self.engine_rx.try_recv() {
                self.handle_engine_event(event);
                handled += 1;
            }

            while let Ok(result) = self.load_rx.try_recv() {
                self.handle_special_load(result);
                handled += 1;
            }

            if handled == before {
                return handled;
            }
        }
    }

    // ===== Misc =====

    /// Ask UIs to show the now-playing display
    pub fn show_now_playing(&mut self) {
        if let Some(item) = &self.current_item {
            let metadata = item.metadata();
            self.events.emit(PlayerEvent::ForceShowNowPlaying(metadata));
        }
    }

    /// Re-read engine settings
    pub fn reload_settings(&mut self) {
        self.engine.reload_settings();
    }

    /// Item at `index` of the active playlist
    pub fn item_at(&self, index: usize) -> Option<ItemRef> {
        self.playlists.active().item_at(index)
    }

    /// Item the engine was last told to play
    pub fn current_item(&self) -> Option<&ItemRef> {
        self.current_item.as_ref()
    }

    /// Locator of the load in flight, if any
    pub fn loading_async(&self) -> Option<&Locator> {
        self.loading_async.as_ref()
    }

    /// Subscribe to player events
    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Sender for results of asynchronous item loads
    pub fn load_sender(&self) -> Sender<SpecialLoadResult> {
        self.load_tx.clone()
    }

    /// Receiver side of the engine event channel
    pub fn engine_events(&self) -> Receiver<EngineEvent> {
        self.engine_rx.clone()
    }

    /// Receiver side of the load result channel
    pub fn load_results(&self) -> Receiver<SpecialLoadResult> {
        self.load_rx.clone()
    }

    /// Playlists driven by this player
    pub fn playlists(&self) -> &dyn PlaylistManager {
        self.playlists.as_ref()
    }

    /// Mutable playlists driven by this player
    pub fn playlists_mut(&mut self) -> &mut dyn PlaylistManager {
        self.playlists.as_mut()
    }

    fn is_loading(&self, locator: &Locator) -> bool {
        self.loading_async.as_ref() == Some(locator)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("state", &self.engine.state())
            .field("volume", &self.engine.volume())
            .field("current_item", &self.current_item)
            .field("loading_async", &self.loading_async)
            .finish_non_exhaustive()
    }
}
