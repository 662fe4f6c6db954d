//! Shared test doubles for the player integration tests
//!
//! Every double keeps its state behind `Arc<Mutex<_>>` so a test can keep a handle
//! after the player takes ownership of the boxed collaborator.

#![allow(dead_code)]

use cadence_core::{
    AudioEngine, CoreError, EngineEventSender, EngineState, ItemOptions, ItemRef, Locator,
    MemorySettings, Metadata, PlaylistId, PlaylistItem, PlaylistManager, PlaylistSession,
    Scrobbler, SpecialLoadResult, TrackChangeType,
};
use cadence_playback::{Player, PlayerEvent};
use crossbeam_channel::Receiver;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

// ===== Engine =====

/// Engine call recorded by `MockEngine`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Play(Locator, TrackChangeType),
    Pause,
    Unpause,
    Stop,
    Seek(u64),
    SetVolume(u8),
    Preload(Locator),
    ReloadSettings,
}

#[derive(Debug)]
pub struct EngineLog {
    pub calls: Vec<EngineCall>,
    pub state: EngineState,
    pub volume: u8,
    pub length: u64,
    pub crossfade: bool,
    pub fail_init: bool,
    pub events: Option<EngineEventSender>,
}

/// Engine that records calls and follows play/pause/stop with its state
#[derive(Debug, Clone)]
pub struct MockEngine {
    log: Arc<Mutex<EngineLog>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(EngineLog {
                calls: Vec::new(),
                state: EngineState::Empty,
                volume: 0,
                length: 180_000,
                crossfade: false,
                fail_init: false,
                events: None,
            })),
        }
    }

    pub fn failing() -> Self {
        let engine = Self::new();
        engine.log().fail_init = true;
        engine
    }

    pub fn log(&self) -> MutexGuard<'_, EngineLog> {
        self.log.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.log().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.log().calls.clear();
    }

    /// Locators handed to `play`, in order
    pub fn plays(&self) -> Vec<Locator> {
        self.log()
            .calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Play(locator, _) => Some(locator.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn play_calls(&self) -> Vec<(Locator, TrackChangeType)> {
        self.log()
            .calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Play(locator, change) => Some((locator.clone(), *change)),
                _ => None,
            })
            .collect()
    }

    pub fn stop_count(&self) -> usize {
        self.log()
            .calls
            .iter()
            .filter(|call| **call == EngineCall::Stop)
            .count()
    }

    pub fn preloads(&self) -> Vec<Locator> {
        self.log()
            .calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Preload(locator) => Some(locator.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn set_state(&self, state: EngineState) {
        self.log().state = state;
    }

    pub fn set_length(&self, length_ms: u64) {
        self.log().length = length_ms;
    }

    pub fn set_crossfade(&self, enabled: bool) {
        self.log().crossfade = enabled;
    }

    pub fn volume(&self) -> u8 {
        self.log().volume
    }

    pub fn events(&self) -> EngineEventSender {
        self.log().events.clone().expect("engine not initialised")
    }
}

impl AudioEngine for MockEngine {
    fn init(&mut self, events: EngineEventSender) -> cadence_core::Result<()> {
        let mut log = self.log();
        if log.fail_init {
            return Err(CoreError::engine("no audio device"));
        }
        log.events = Some(events);
        Ok(())
    }

    fn reload_settings(&mut self) {
        self.log().calls.push(EngineCall::ReloadSettings);
    }

    fn play(&mut self, locator: &Locator, change: TrackChangeType) {
        let mut log = self.log();
        log.calls.push(EngineCall::Play(locator.clone(), change));
        log.state = EngineState::Playing;
    }

    fn pause(&mut self) {
        let mut log = self.log();
        log.calls.push(EngineCall::Pause);
        log.state = EngineState::Paused;
    }

    fn unpause(&mut self) {
        let mut log = self.log();
        log.calls.push(EngineCall::Unpause);
        log.state = EngineState::Playing;
    }

    fn stop(&mut self) {
        let mut log = self.log();
        log.calls.push(EngineCall::Stop);
        log.state = EngineState::Empty;
    }

    fn seek(&mut self, position_ms: u64) {
        self.log().calls.push(EngineCall::Seek(position_ms));
    }

    fn set_volume(&mut self, volume: u8) {
        let mut log = self.log();
        log.calls.push(EngineCall::SetVolume(volume));
        log.volume = volume;
    }

    fn volume(&self) -> u8 {
        self.log().volume
    }

    fn state(&self) -> EngineState {
        self.log().state
    }

    fn length(&self) -> u64 {
        self.log().length
    }

    fn start_preloading(&mut self, locator: &Locator) {
        self.log().calls.push(EngineCall::Preload(locator.clone()));
    }

    fn is_autocrossfade_enabled(&self) -> bool {
        self.log().crossfade
    }
}

// ===== Items =====

pub fn locator(name: &str) -> Locator {
    Locator::parse(&format!("http://example.com/{name}")).unwrap()
}

/// Item with scripted load results and call counters
#[derive(Debug)]
pub struct MockItem {
    locator: Locator,
    metadata: Metadata,
    options: ItemOptions,
    start_result: Mutex<Option<SpecialLoadResult>>,
    next_results: Mutex<VecDeque<SpecialLoadResult>>,
    start_calls: AtomicUsize,
    next_calls: AtomicUsize,
}

impl MockItem {
    /// Plain song
    pub fn song(name: &str) -> Self {
        Self {
            locator: locator(name),
            metadata: Metadata::new(format!("{name} title"), format!("{name} artist")),
            options: ItemOptions::empty(),
            start_result: Mutex::new(None),
            next_results: Mutex::new(VecDeque::new()),
            start_calls: AtomicUsize::new(0),
            next_calls: AtomicUsize::new(0),
        }
    }

    /// Stream whose load completes later
    pub fn async_stream(name: &str) -> Self {
        let item = Self::song(name).with_options(ItemOptions::SPECIAL_PLAY_BEHAVIOUR);
        let pending = SpecialLoadResult::pending(item.locator.clone());
        item.with_start(pending)
    }

    pub fn with_options(mut self, options: ItemOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_start(self, result: SpecialLoadResult) -> Self {
        *self.start_result.lock().unwrap() = Some(result);
        self
    }

    pub fn with_next(self, results: impl IntoIterator<Item = SpecialLoadResult>) -> Self {
        self.next_results.lock().unwrap().extend(results);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn next_calls(&self) -> usize {
        self.next_calls.load(Ordering::SeqCst)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl PlaylistItem for MockItem {
    fn locator(&self) -> &Locator {
        &self.locator
    }

    fn options(&self) -> ItemOptions {
        self.options
    }

    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }

    fn start_loading(&self) -> SpecialLoadResult {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.start_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| SpecialLoadResult::available(self.locator.clone(), self.locator.clone()))
    }

    fn load_next(&self) -> SpecialLoadResult {
        self.next_calls.fetch_add(1, Ordering::SeqCst);
        self.next_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(SpecialLoadResult::NoMoreTracks)
    }
}

// ===== Playlist =====

#[derive(Debug, Default)]
pub struct SessionState {
    pub items: Vec<ItemRef>,
    pub current: Option<usize>,
    pub last_played: Option<usize>,
    pub stop_after: Option<usize>,
    pub scrobbled: bool,
    pub repeat_all: bool,
    pub stream_metadata: Vec<(Locator, Metadata)>,
    pub cursor_moves: Vec<Option<usize>>,
}

/// Linear playlist cursor
#[derive(Debug, Clone, Default)]
pub struct MockSession {
    state: Arc<Mutex<SessionState>>,
}

impl MockSession {
    pub fn new(items: Vec<ItemRef>) -> Self {
        let session = Self::default();
        session.state().items = items;
        session
    }

    pub fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap()
    }
}

impl PlaylistSession for MockSession {
    fn current_index(&self) -> Option<usize> {
        self.state().current
    }

    fn set_current_index(&mut self, index: Option<usize>) {
        let mut state = self.state();
        state.cursor_moves.push(index);
        if index != state.current {
            if state.current.is_some() {
                state.last_played = state.current;
            }
            state.scrobbled = false;
        }
        state.current = index;
    }

    fn next_index(&self) -> Option<usize> {
        let state = self.state();
        let next = state.current.map_or(0, |current| current + 1);
        if next < state.items.len() {
            Some(next)
        } else if state.repeat_all && !state.items.is_empty() {
            Some(0)
        } else {
            None
        }
    }

    fn previous_index(&self) -> Option<usize> {
        self.state().current?.checked_sub(1)
    }

    fn last_played_index(&self) -> Option<usize> {
        self.state().last_played
    }

    fn stop_after_current(&self) -> bool {
        let state = self.state();
        state.current.is_some() && state.stop_after == state.current
    }

    fn stop_after(&mut self, index: Option<usize>) {
        self.state().stop_after = index;
    }

    fn row_count(&self) -> usize {
        self.state().items.len()
    }

    fn item_at(&self, index: usize) -> Option<ItemRef> {
        self.state().items.get(index).cloned()
    }

    fn set_stream_metadata(&mut self, locator: &Locator, metadata: Metadata) {
        self.state()
            .stream_metadata
            .push((locator.clone(), metadata));
    }

    fn set_scrobbled(&mut self, scrobbled: bool) {
        self.state().scrobbled = scrobbled;
    }
}

/// Manager with a single active session
#[derive(Debug)]
pub struct MockPlaylists {
    session: MockSession,
    pub activated: Arc<Mutex<Vec<PlaylistId>>>,
}

impl MockPlaylists {
    pub fn new(session: MockSession) -> Self {
        Self {
            session,
            activated: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl PlaylistManager for MockPlaylists {
    fn active(&self) -> &dyn PlaylistSession {
        &self.session
    }

    fn active_mut(&mut self) -> &mut dyn PlaylistSession {
        &mut self.session
    }

    fn current_id(&self) -> PlaylistId {
        0
    }

    fn set_active_playlist(&mut self, id: PlaylistId) {
        self.activated.lock().unwrap().push(id);
    }
}

// ===== Scrobbler =====

#[derive(Debug, Default)]
pub struct RecordingScrobbler {
    pub enabled: bool,
    pub announced: Mutex<Vec<Metadata>>,
}

impl RecordingScrobbler {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            announced: Mutex::new(Vec::new()),
        }
    }

    pub fn announced(&self) -> Vec<Metadata> {
        self.announced.lock().unwrap().clone()
    }
}

impl Scrobbler for RecordingScrobbler {
    fn is_scrobbling_enabled(&self) -> bool {
        self.enabled
    }

    fn now_playing(&self, metadata: &Metadata) {
        self.announced.lock().unwrap().push(metadata.clone());
    }
}

// ===== Harness =====

pub struct Harness {
    pub player: Player,
    pub engine: MockEngine,
    pub session: MockSession,
    pub scrobbler: Arc<RecordingScrobbler>,
    pub events: Receiver<PlayerEvent>,
}

impl Harness {
    pub fn new(items: Vec<ItemRef>) -> Self {
        Self::with_scrobbler(items, RecordingScrobbler::enabled())
    }

    pub fn with_scrobbler(items: Vec<ItemRef>, scrobbler: RecordingScrobbler) -> Self {
        let engine = MockEngine::new();
        let session = MockSession::new(items);
        let scrobbler = Arc::new(scrobbler);

        let mut player = Player::new(
            Box::new(engine.clone()),
            Box::new(MockPlaylists::new(session.clone())),
            scrobbler.clone(),
            Box::new(MemorySettings::new()),
        )
        .unwrap();

        let events = player.subscribe();
        engine.clear_calls();

        Self {
            player,
            engine,
            session,
            scrobbler,
            events,
        }
    }

    /// Events emitted since the last call
    pub fn events(&self) -> Vec<PlayerEvent> {
        self.events.try_iter().collect()
    }
}

pub fn songs(names: &[&str]) -> Vec<ItemRef> {
    names
        .iter()
        .map(|name| Arc::new(MockItem::song(name)) as ItemRef)
        .collect()
}
