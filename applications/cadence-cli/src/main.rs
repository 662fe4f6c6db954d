/// Cadence - headless player driven from the terminal
mod console;

use anyhow::Context;
use cadence_core::{DisabledScrobbler, JsonFileSettings, Locator, MemorySettings, SettingsStore};
use cadence_playback::{
    available_engines, create_engine, Player, PlayerCommand, PlayerConfig, PlayerEvent,
    PlayerService, Playlist, Playlists, RepeatMode, ShuffleMode, SongItem,
};
use clap::{Parser, Subcommand, ValueEnum};
use crossbeam_channel::Receiver;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Headless music player", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play files or URLs, reading commands from stdin
    Play {
        /// Files or URLs, in playlist order
        #[arg(required = true)]
        tracks: Vec<String>,

        /// Configuration file path
        #[arg(short, long, env = "CADENCE_CONFIG")]
        config: Option<PathBuf>,

        /// Audio engine backend (overrides the configuration)
        #[arg(short, long)]
        engine: Option<String>,

        /// Shuffle mode (overrides the configuration)
        #[arg(long, value_enum)]
        shuffle: Option<ShuffleArg>,

        /// Repeat mode (overrides the configuration)
        #[arg(long, value_enum)]
        repeat: Option<RepeatArg>,

        /// Initial volume, 0-100
        #[arg(long)]
        volume: Option<i32>,

        /// Wait for a command instead of starting playback immediately
        #[arg(long)]
        paused: bool,
    },
    /// List the audio engines compiled into this build
    Engines,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShuffleArg {
    Off,
    Random,
    Smart,
}

impl From<ShuffleArg> for ShuffleMode {
    fn from(arg: ShuffleArg) -> Self {
        match arg {
            ShuffleArg::Off => ShuffleMode::Off,
            ShuffleArg::Random => ShuffleMode::Random,
            ShuffleArg::Smart => ShuffleMode::Smart,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RepeatArg {
    Off,
    All,
    One,
}

impl From<RepeatArg> for RepeatMode {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::Off => RepeatMode::Off,
            RepeatArg::All => RepeatMode::All,
            RepeatArg::One => RepeatMode::One,
        }
    }
}

struct PlayOptions {
    tracks: Vec<String>,
    config: Option<PathBuf>,
    engine: Option<String>,
    shuffle: Option<ShuffleArg>,
    repeat: Option<RepeatArg>,
    volume: Option<i32>,
    paused: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info,cadence_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            tracks,
            config,
            engine,
            shuffle,
            repeat,
            volume,
            paused,
        } => play(PlayOptions {
            tracks,
            config,
            engine,
            shuffle,
            repeat,
            volume,
            paused,
        })?,
        Commands::Engines => {
            for kind in available_engines() {
                println!("{:<10} {}", kind.name(), kind.description());
            }
        }
    }

    Ok(())
}

fn play(options: PlayOptions) -> anyhow::Result<()> {
    let mut config =
        PlayerConfig::load(options.config.as_deref()).context("Failed to load configuration")?;
    if let Some(engine) = options.engine {
        config.engine.backend = engine;
    }

    let playlist = build_playlist(&options.tracks, &config, options.shuffle, options.repeat)?;
    info!(tracks = playlist.items().len(), "Playlist ready");

    let settings: Box<dyn SettingsStore> = match &config.settings_path {
        Some(path) => Box::new(
            JsonFileSettings::open(path.clone())
                .with_context(|| format!("Failed to open settings file {}", path.display()))?,
        ),
        None => Box::new(MemorySettings::new()),
    };

    let engine = create_engine(&config.engine).context("Failed to create audio engine")?;
    let mut player = Player::new(
        engine,
        Box::new(Playlists::new(playlist)),
        Arc::new(DisabledScrobbler),
        settings,
    )
    .context("Failed to start player")?
    .with_reconciler(config.reconciler());

    if let Some(volume) = options.volume {
        player.set_volume(volume);
    }

    let events = player.subscribe();
    let printer = thread::Builder::new()
        .name("cadence-events".to_string())
        .spawn(move || print_events(&events))
        .context("Failed to spawn event thread")?;

    let handle = PlayerService::spawn(player)?;
    if !options.paused {
        handle.send(PlayerCommand::Play)?;
    }

    println!("{}", console::HELP);
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match console::parse_line(&line) {
            Ok(Some(PlayerCommand::Shutdown)) => break,
            Ok(Some(command)) => handle.send(command)?,
            Ok(None) => {}
            Err(message) => eprintln!("{message}\n{}", console::HELP),
        }
    }

    let mut player = handle.shutdown()?;
    player.stop();
    drop(player);

    if printer.join().is_err() {
        warn!("Event thread panicked");
    }

    info!("Goodbye");
    Ok(())
}

fn build_playlist(
    tracks: &[String],
    config: &PlayerConfig,
    shuffle: Option<ShuffleArg>,
    repeat: Option<RepeatArg>,
) -> anyhow::Result<Playlist> {
    let items = tracks
        .iter()
        .map(|track| {
            Locator::parse(track)
                .map(|locator| SongItem::from_locator(locator).into_ref())
                .with_context(|| format!("Invalid track '{track}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut playlist = Playlist::with_items("Command line", items);
    playlist.set_shuffle(shuffle.map_or(config.playlist.shuffle, ShuffleMode::from));
    playlist.set_repeat(repeat.map_or(config.playlist.repeat, RepeatMode::from));
    Ok(playlist)
}

fn print_events(events: &Receiver<PlayerEvent>) {
    // Ends once the player and its event bus are dropped
    for event in events {
        if let Some(line) = console::describe(&event) {
            println!("{line}");
        }
    }
}
