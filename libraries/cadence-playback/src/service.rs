//! Player control thread
//!
//! Owns the [`Player`] on a dedicated thread and serialises user commands, engine
//! events and async load results into it. Nothing else touches the player while the
//! service runs, so none of its methods is ever re-entered.

use crate::error::{PlaybackError, Result};
use crate::player::Player;
use crossbeam_channel::{bounded, select, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Commands sent to the control thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Start, resume or restart playback
    Play,

    /// Toggle play/pause
    PlayPause,

    /// Pause (or resume when paused)
    Pause,

    /// Stop playback
    Stop,

    /// Skip to next track
    Next,

    /// Go to previous track
    Previous,

    /// Play the row at this index of the active playlist
    PlayAt(usize),

    /// Seek to position (in seconds)
    Seek(i64),

    /// Set volume (clamped to 0-100)
    SetVolume(i32),

    /// Toggle mute
    Mute,

    /// Ask UIs to show the now-playing display
    ShowNowPlaying,

    /// Re-read engine settings
    ReloadSettings,

    /// Stop the control thread
    Shutdown,
}

/// Spawns the control thread
pub struct PlayerService;

impl PlayerService {
    /// Move `player` onto its own control thread
    ///
    /// Subscribe to player events before calling this; the player is not reachable
    /// afterwards except through the returned handle.
    ///
    /// # Errors
    /// Returns `PlaybackError::ServiceStopped` if the thread cannot be spawned.
    pub fn spawn(player: Player) -> Result<PlayerHandle> {
        let (command_tx, command_rx) = bounded(32);

        let thread = thread::Builder::new()
            .name("cadence-player".to_string())
            .spawn(move || Self::run(player, &command_rx))
            .map_err(|_| PlaybackError::ServiceStopped)?;

        Ok(PlayerHandle {
            command_tx,
            thread: Some(thread),
        })
    }

    fn run(mut player: Player, commands: &Receiver<PlayerCommand>) -> Player {
        let engine_events = player.engine_events();
        let load_results = player.load_results();

        info!("Player service started");

        loop {
            select! {
                recv(commands) -> command => match command {
                    Ok(PlayerCommand::Shutdown) | Err(_) => break,
                    Ok(command) => Self::apply(&mut player, command),
                },
                recv(engine_events) -> event => {
                    if let Ok(event) = event {
                        player.handle_engine_event(event);
                    }
                }
                recv(load_results) -> result => {
                    if let Ok(result) = result {
                        player.handle_special_load(result);
                    }
                }
            }
        }

        info!("Player service stopped");
        player
    }

    fn apply(player: &mut Player, command: PlayerCommand) {
        debug!(?command, "Applying player command");

        match command {
            PlayerCommand::Play => player.play(),
            PlayerCommand::PlayPause => player.play_pause(),
            PlayerCommand::Pause => player.pause(),
            PlayerCommand::Stop => player.stop(),
            PlayerCommand::Next => player.next(),
            PlayerCommand::Previous => player.previous(),
            PlayerCommand::PlayAt(index) => {
                player.play_at(index, cadence_core::TrackChangeType::Manual, true);
            }
            PlayerCommand::Seek(seconds) => player.seek(seconds),
            PlayerCommand::SetVolume(volume) => player.set_volume(volume),
            PlayerCommand::Mute => player.mute(),
            PlayerCommand::ShowNowPlaying => player.show_now_playing(),
            PlayerCommand::ReloadSettings => player.reload_settings(),
            PlayerCommand::Shutdown => {}
        }
    }
}

/// Handle to a running player service
///
/// Dropping the handle shuts the service down and waits for the thread.
pub struct PlayerHandle {
    command_tx: Sender<PlayerCommand>,
    thread: Option<JoinHandle<Player>>,
}

impl PlayerHandle {
    /// Send a command to the control thread
    ///
    /// # Errors
    /// Returns `PlaybackError::ServiceStopped` if the thread has exited.
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| PlaybackError::ServiceStopped)
    }

    /// Stop the control thread and take the player back
    ///
    /// # Errors
    /// Returns `PlaybackError::ServiceStopped` if the thread panicked.
    pub fn shutdown(mut self) -> Result<Player> {
        // A closed channel means the thread is already on its way out
        let _ = self.command_tx.send(PlayerCommand::Shutdown);

        self.thread
            .take()
            .ok_or(PlaybackError::ServiceStopped)?
            .join()
            .map_err(|_| PlaybackError::ServiceStopped)
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.command_tx.send(PlayerCommand::Shutdown);
            let _ = thread.join();
        }
    }
}
