//! Player Events
//!
//! Outward notifications for UIs, desktop notifications and remote-control bridges.
//! Every subscriber gets its own channel and sees every event in emission order.

use cadence_core::{EngineState, ItemRef, Metadata};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::trace;

/// Events emitted by the player
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// The engine started (or resumed) playing
    Playing,

    /// The engine paused
    Paused,

    /// The engine stopped or became idle
    Stopped,

    /// Navigation ran past the end of the playlist
    PlaylistFinished,

    /// The user skipped away from this item
    TrackSkipped(Option<ItemRef>),

    /// Volume changed (0-100)
    VolumeChanged(u8),

    /// Engine runtime error, relayed verbatim
    Error(String),

    /// A UI should show the now-playing display for this song
    ForceShowNowPlaying(Metadata),
}

impl From<EngineState> for PlayerEvent {
    fn from(state: EngineState) -> Self {
        match state {
            EngineState::Paused => PlayerEvent::Paused,
            EngineState::Playing => PlayerEvent::Playing,
            EngineState::Empty | EngineState::Idle => PlayerEvent::Stopped,
        }
    }
}

/// Fan-out of player events to any number of subscribers
///
/// Subscribers whose receiver was dropped are pruned on the next emit.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<PlayerEvent>>,
}

impl EventBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber
    pub fn emit(&mut self, event: PlayerEvent) {
        trace!(?event, subscribers = self.subscribers.len(), "Emitting player event");
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_states_map_to_notifications() {
        assert!(matches!(
            PlayerEvent::from(EngineState::Playing),
            PlayerEvent::Playing
        ));
        assert!(matches!(
            PlayerEvent::from(EngineState::Paused),
            PlayerEvent::Paused
        ));
        assert!(matches!(
            PlayerEvent::from(EngineState::Empty),
            PlayerEvent::Stopped
        ));
        assert!(matches!(
            PlayerEvent::from(EngineState::Idle),
            PlayerEvent::Stopped
        ));
    }

    #[test]
    fn every_subscriber_receives_events() {
        let mut bus = EventBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.emit(PlayerEvent::VolumeChanged(40));

        assert!(matches!(first.try_recv(), Ok(PlayerEvent::VolumeChanged(40))));
        assert!(matches!(second.try_recv(), Ok(PlayerEvent::VolumeChanged(40))));
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(PlayerEvent::Stopped);

        assert_eq!(bus.subscriber_count(), 1);
        assert!(matches!(kept.try_recv(), Ok(PlayerEvent::Stopped)));
    }
}
