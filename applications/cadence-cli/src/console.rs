//! Line-oriented command parsing for the interactive prompt

use cadence_playback::{PlayerCommand, PlayerEvent};

/// Help text printed for `help` and unknown input
pub const HELP: &str = "\
commands:
  play            start or resume playback
  pause           pause or resume
  toggle          toggle play/pause
  stop            stop playback
  next | prev     skip forward or back
  goto <n>        play track number n (1-based)
  seek <seconds>  jump to a position in the current track
  vol <0-100>     set the volume
  mute            toggle mute
  now             show what is playing
  reload          reload engine settings
  quit            stop and exit";

/// Parse one line of input
///
/// Returns `Ok(None)` for blank lines and `Err` with a message for anything
/// that is not a command.
pub fn parse_line(line: &str) -> Result<Option<PlayerCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    let command = match word.to_ascii_lowercase().as_str() {
        "play" => PlayerCommand::Play,
        "pause" => PlayerCommand::Pause,
        "toggle" | "p" => PlayerCommand::PlayPause,
        "stop" => PlayerCommand::Stop,
        "next" | "n" => PlayerCommand::Next,
        "prev" | "previous" => PlayerCommand::Previous,
        "mute" => PlayerCommand::Mute,
        "now" => PlayerCommand::ShowNowPlaying,
        "reload" => PlayerCommand::ReloadSettings,
        "quit" | "exit" | "q" => PlayerCommand::Shutdown,
        "goto" => {
            let number: usize = parse_number(word, argument)?;
            let index = number
                .checked_sub(1)
                .ok_or_else(|| "track numbers start at 1".to_string())?;
            PlayerCommand::PlayAt(index)
        }
        "seek" => PlayerCommand::Seek(parse_number(word, argument)?),
        "vol" | "volume" => PlayerCommand::SetVolume(parse_number(word, argument)?),
        other => return Err(format!("unknown command '{other}'")),
    };

    Ok(Some(command))
}

fn parse_number<T: std::str::FromStr>(command: &str, argument: Option<&str>) -> Result<T, String> {
    let argument = argument.ok_or_else(|| format!("'{command}' needs a number"))?;
    argument
        .parse()
        .map_err(|_| format!("'{argument}' is not a valid number"))
}

/// One-line description of a player event, `None` for events not worth printing
pub fn describe(event: &PlayerEvent) -> Option<String> {
    let line = match event {
        PlayerEvent::Playing => "playing".to_string(),
        PlayerEvent::Paused => "paused".to_string(),
        PlayerEvent::Stopped => "stopped".to_string(),
        PlayerEvent::PlaylistFinished => "end of playlist".to_string(),
        PlayerEvent::TrackSkipped(Some(item)) => format!("skipped {}", item.locator()),
        PlayerEvent::TrackSkipped(None) => return None,
        PlayerEvent::VolumeChanged(volume) => format!("volume {volume}"),
        PlayerEvent::Error(message) => format!("error: {message}"),
        PlayerEvent::ForceShowNowPlaying(song) => {
            if song.artist.is_empty() {
                format!("now playing: {}", song.title)
            } else {
                format!("now playing: {} - {}", song.artist, song.title)
            }
        }
    };
    Some(line)
}
