//! Memento CLI - headless session runner.
//!
//! Plays one full session with a simulated player and writes the score file.
//!
//! ```text
//! main() -> load config -> RoundController + SimulatedPlayer -> SessionDriver
//!                                                                  |
//!                                      frame loop (fast or paced)  v
//!                                                        SessionOutcome -> stdout
//! ```

mod player;
mod session;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, value_parser};
use memento_config::MementoConfig;
use memento_engine::{FileScoreSink, RoundController, render_score_sheet};
use tokio::signal;
use tokio::time::{self, MissedTickBehavior};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::player::{PlayerProfile, SimulatedPlayer};
use crate::session::{SessionDriver, SessionOutcome};

#[derive(Debug, Parser)]
#[command(name = "memento")]
#[command(about = "Run a memory-matching session with a simulated player")]
struct Args {
    /// Config file (defaults to $MEMENTO_CONFIG or ~/.memento/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fix the arrangement seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Chance the player recalls each object correctly.
    #[arg(long, default_value_t = 0.8)]
    accuracy: f64,
    /// Max pointer offset from the target anchor, in world units.
    #[arg(long, default_value_t = 0.05)]
    jitter: f32,
    #[arg(long, default_value_t = 60, value_parser = value_parser!(u32).range(1..=1000))]
    fps: u32,
    /// Pace frames in real time instead of running them back to back.
    #[arg(long)]
    realtime: bool,
    /// Score file (overrides `[scores].path`).
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Seconds to linger on each result before moving on.
    #[arg(long, default_value_t = 1.0)]
    next_delay: f64,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_memento_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stdout carries the score sheet, so logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
    for warning in init_warnings {
        tracing::warn!("{warning}");
    }
}

fn open_memento_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in memento_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn memento_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.memento/logs/memento.log
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".memento").join("logs").join("memento.log"));
    }

    // Fallback: ./.memento/logs/memento.log
    candidates.push(PathBuf::from(".memento").join("logs").join("memento.log"));

    candidates
}

fn load_config(path: Option<&PathBuf>) -> Result<MementoConfig> {
    match path {
        Some(path) => MementoConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(MementoConfig::load()
            .context("loading config")?
            .unwrap_or_default()),
    }
}

async fn run_realtime(driver: &mut SessionDriver, frame: Duration) -> Result<SessionOutcome> {
    let mut ticker = time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(outcome) = driver.step()? {
                    return Ok(outcome);
                }
            }
            _ = &mut ctrl_c => {
                tracing::warn!(phase = %driver.controller().phase(), "Interrupted");
                bail!("session interrupted during {}", driver.controller().phase());
            }
        }
    }
}

fn run_fast(driver: &mut SessionDriver) -> Result<SessionOutcome> {
    loop {
        if let Some(outcome) = driver.step()? {
            return Ok(outcome);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let mut settings = config.resolve().context("resolving config")?;
    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }
    let scores_path = args
        .scores
        .clone()
        .or_else(|| config.scores_path())
        .context("no score file location; pass --scores")?;
    let next_delay = Duration::try_from_secs_f64(args.next_delay)
        .context("--next-delay must be a non-negative number of seconds")?;

    let controller = RoundController::new(&settings, Box::new(FileScoreSink::new(&scores_path)))?;
    let player = SimulatedPlayer::new(
        PlayerProfile {
            accuracy: args.accuracy,
            jitter: args.jitter,
            frames_between_drags: args.fps / 4,
        },
        settings.seed().map_or_else(rand::random, |seed| seed.wrapping_add(1)),
    )
    .context("invalid --accuracy or --jitter")?;
    let frame = Duration::from_secs(1) / args.fps;
    let mut driver = SessionDriver::new(controller, player, frame, next_delay);

    let outcome = if args.realtime {
        run_realtime(&mut driver, frame).await?
    } else {
        run_fast(&mut driver)?
    };

    print!("{}", render_score_sheet(&outcome.sheet));
    println!(
        "Total: {}/{}",
        outcome.sheet.total(),
        u32::from(outcome.sheet.object_count) * 4
    );
    match outcome.persist_error {
        None => println!("Saved to {}", scores_path.display()),
        Some(err) => eprintln!("Warning: {err}"),
    }
    Ok(())
}
