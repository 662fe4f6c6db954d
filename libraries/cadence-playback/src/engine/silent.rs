//! Silent engine
//!
//! Plays nothing but keeps time. Tracks have a length (per-locator override or a
//! default), a position that advances with `advance` or an optional clock thread, and
//! the usual `TrackAboutToEnd`/`TrackEnded` notifications. Useful for headless runs
//! and for exercising the player end to end without an audio device.

use crate::config::EngineConfig;
use cadence_core::{
    AudioEngine, CoreError, EngineEvent, EngineEventSender, EngineState, Locator, MetaBundle,
    Result, TrackChangeType,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug)]
struct SilentState {
    state: EngineState,
    volume: u8,
    current: Option<Locator>,
    preloaded: Option<Locator>,
    position: Duration,
    length: Duration,
    about_to_end_sent: bool,
    end_sent: bool,
    crossfade: bool,
    about_to_end: Duration,
    default_length: Duration,
    lengths: HashMap<Locator, Duration>,
    events: Option<EngineEventSender>,
}

impl SilentState {
    fn emit(&self, event: EngineEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                trace!("Engine event dropped, listener gone");
            }
        }
    }

    fn set_state(&mut self, state: EngineState) {
        if self.state != state {
            self.state = state;
            self.emit(EngineEvent::StateChanged(state));
        }
    }

    fn remaining(&self) -> Duration {
        self.length.saturating_sub(self.position)
    }

    fn advance(&mut self, by: Duration) {
        if self.state != EngineState::Playing {
            return;
        }

        self.position = (self.position + by).min(self.length);

        if !self.about_to_end_sent && self.remaining() <= self.about_to_end {
            self.about_to_end_sent = true;
            self.emit(EngineEvent::TrackAboutToEnd);
        }

        if !self.end_sent && self.position >= self.length {
            self.end_sent = true;
            self.emit(EngineEvent::TrackEnded);
        }
    }
}

/// Clock-driven engine without audio output
///
/// Cloning yields another handle to the same engine, so tests can keep one handle
/// while the player owns another.
#[derive(Debug, Clone)]
pub struct SilentEngine {
    inner: Arc<Mutex<SilentState>>,
    tick: Option<Duration>,
}

impl SilentEngine {
    /// Create an engine with a fixed default track length and no clock thread
    pub fn new(default_length: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SilentState {
                state: EngineState::Empty,
                volume: 0,
                current: None,
                preloaded: None,
                position: Duration::ZERO,
                length: Duration::ZERO,
                about_to_end_sent: false,
                end_sent: false,
                crossfade: false,
                about_to_end: Duration::from_secs(5),
                default_length,
                lengths: HashMap::new(),
                events: None,
            })),
            tick: None,
        }
    }

    /// Create an engine from configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut engine = Self::new(Duration::from_millis(config.default_track_length_ms));
        engine.tick = config.tick_ms.filter(|&ms| ms > 0).map(Duration::from_millis);

        {
            let mut state = engine.lock();
            state.crossfade = config.crossfade;
            state.about_to_end = Duration::from_millis(config.about_to_end_ms);
        }

        engine
    }

    fn lock(&self) -> MutexGuard<'_, SilentState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Override the length of one track
    pub fn set_track_length(&self, locator: Locator, length: Duration) {
        self.lock().lengths.insert(locator, length);
    }

    /// Switch automatic crossfading on or off
    pub fn set_crossfade(&self, enabled: bool) {
        self.lock().crossfade = enabled;
    }

    /// Set how long before the end `TrackAboutToEnd` fires
    pub fn set_about_to_end(&self, window: Duration) {
        self.lock().about_to_end = window;
    }

    /// Move the clock forward; has no effect unless playing
    pub fn advance(&self, by: Duration) {
        self.lock().advance(by);
    }

    /// Simulate metadata arriving from a live stream
    pub fn push_metadata(&self, bundle: MetaBundle) {
        self.lock().emit(EngineEvent::MetadataReceived(bundle));
    }

    /// Simulate a runtime failure
    pub fn report_error(&self, message: impl Into<String>) {
        self.lock().emit(EngineEvent::Error(message.into()));
    }

    /// Position in the current track
    pub fn position(&self) -> Duration {
        self.lock().position
    }

    /// Locator being played
    pub fn current(&self) -> Option<Locator> {
        self.lock().current.clone()
    }

    /// Locator buffered for the next transition
    pub fn preloaded(&self) -> Option<Locator> {
        self.lock().preloaded.clone()
    }

    fn spawn_clock(inner: Weak<Mutex<SilentState>>, tick: Duration) -> Result<()> {
        thread::Builder::new()
            .name("cadence-silent-clock".to_string())
            .spawn(move || loop {
                thread::sleep(tick);

                let Some(inner) = inner.upgrade() else {
                    trace!("Silent engine dropped, clock thread exiting");
                    break;
                };
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .advance(tick);
            })
            .map(|_| ())
            .map_err(|e| CoreError::engine(format!("Failed to start clock thread: {}", e)))
    }
}

impl Default for SilentEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl AudioEngine for SilentEngine {
    fn init(&mut self, events: EngineEventSender) -> Result<()> {
        self.lock().events = Some(events);

        if let Some(tick) = self.tick {
            Self::spawn_clock(Arc::downgrade(&self.inner), tick)?;
        }

        debug!(tick = ?self.tick, "Silent engine initialised");
        Ok(())
    }

    fn play(&mut self, locator: &Locator, change: TrackChangeType) {
        let mut state = self.lock();

        let preloaded = state.preloaded.take().as_ref() == Some(locator);
        state.length = state
            .lengths
            .get(locator)
            .copied()
            .unwrap_or(state.default_length);
        state.current = Some(locator.clone());
        state.position = Duration::ZERO;
        state.about_to_end_sent = false;
        state.end_sent = false;

        debug!(%locator, ?change, preloaded, "Silent engine playing");
        state.set_state(EngineState::Playing);
    }

    fn pause(&mut self) {
        let mut state = self.lock();
        if state.state == EngineState::Playing {
            state.set_state(EngineState::Paused);
        }
    }

    fn unpause(&mut self) {
        let mut state = self.lock();
        if state.state == EngineState::Paused {
            state.set_state(EngineState::Playing);
        }
    }

    fn stop(&mut self) {
        let mut state = self.lock();
        state.current = None;
        state.preloaded = None;
        state.position = Duration::ZERO;
        state.length = Duration::ZERO;
        state.set_state(EngineState::Empty);
    }

    fn seek(&mut self, position_ms: u64) {
        let mut state = self.lock();
        if state.current.is_none() {
            return;
        }

        state.position = Duration::from_millis(position_ms).min(state.length);
        if state.remaining() > state.about_to_end {
            state.about_to_end_sent = false;
        }
        if state.position < state.length {
            state.end_sent = false;
        }
    }

    fn set_volume(&mut self, volume: u8) {
        self.lock().volume = volume.min(100);
    }

    fn volume(&self) -> u8 {
        self.lock().volume
    }

    fn state(&self) -> EngineState {
        self.lock().state
    }

    fn length(&self) -> u64 {
        u64::try_from(self.lock().length.as_millis()).unwrap_or(u64::MAX)
    }

    fn start_preloading(&mut self, locator: &Locator) {
        debug!(%locator, "Silent engine preloading");
        self.lock().preloaded = Some(locator.clone());
    }

    fn is_autocrossfade_enabled(&self) -> bool {
        self.lock().crossfade
    }
}
