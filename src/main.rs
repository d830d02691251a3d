//! `squatcount` - replay and inspect squat-counting sessions
//!
//! Replays a recorded stream of pose tracker events through a session and prints
//! every status change, or prints the effective tracker configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use squatcount::{
    config::{ConfigManager, TrackerConfig},
    error::{SquatCountError, get_user_friendly_error},
    recording,
    session::SessionController,
    tracker::ScriptedTracker,
    utils,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "squatcount", version)]
#[command(about = "Supervise squat-counting sessions driven by a pose tracker")]
struct Args {
    /// Tracker configuration file (defaults to $SQUATCOUNT_HOME/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON-lines recording of tracker events and print status changes
    Replay {
        /// Recording file, one tracker event per line
        recording: PathBuf,
    },
    /// Print the effective tracker configuration as JSON
    Config,
}

fn main() -> Result<()> {
    let args = Args::parse();

    utils::init_logging().context("Failed to initialize logging system")?;
    info!("squatcount v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => ConfigManager::load_from(path),
        None => ConfigManager::load(),
    }
    .context("Failed to load tracker configuration")?;

    let outcome = match args.command {
        Command::Replay { recording } => replay(config, &recording),
        Command::Config => print_config(&config),
    };

    if let Err(e) = &outcome {
        error!("squatcount failed: {:#}", e);
        if let Some(err) = e.downcast_ref::<SquatCountError>() {
            eprintln!("{}", get_user_friendly_error(err));
        }
    }

    outcome
}

/// Replay the recording at `path` through a fresh session, printing each distinct status
fn replay(config: TrackerConfig, path: &Path) -> Result<()> {
    let events = recording::load_recording(path)
        .with_context(|| format!("Failed to read recording {}", path.display()))?;

    // One slot per event plus the initial status; the sink never fills up
    let (status_tx, status_rx) = mpsc::sync_channel(events.len() + 1);
    let mut session = SessionController::new(config)
        .context("Failed to create session")?
        .with_status_sink(status_tx);
    let mut tracker = ScriptedTracker::new();
    session
        .attach(&mut tracker)
        .context("Failed to attach session to tracker")?;

    println!("{}", session.heading());
    for event in &events {
        tracker.emit(event);
        for view in status_rx.try_iter() {
            println!("{view}");
        }
    }

    session.detach(&mut tracker);
    info!(
        "Replayed {} events; final status: {}",
        tracker.emitted(),
        session.status()
    );
    Ok(())
}

fn print_config(config: &TrackerConfig) -> Result<()> {
    config
        .validate()
        .context("Configuration failed validation")?;
    let json = serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
    println!("{json}");
    Ok(())
}
