//! # Play Command
//!
//! Seats the requested players, runs a full game, and reports the result.
//!
//! The transcript goes to a log file and is mirrored to `out` unless
//! `--quiet`. `out` also receives the log location and a one-line result;
//! diagnostics go through `tracing`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use std::io::Write;
use tablemind_ai::{DEFAULT_REQUEST_TIMEOUT, ModelSettings, create_provider};
use tablemind_engine::table::{GameOutcome, Table};
use tablemind_engine::transcript::{HistoryWriter, Transcript, WriterTranscript};
use tablemind_engine::usage::UsageTracker;

use crate::cli::PlayArgs;
use crate::config::{self, CliOverrides};
use crate::error::CliError;
use crate::roster;
use crate::ui;

pub fn handle_play_command(args: &PlayArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let seats = roster::parse_roster(&args.players)?;
    let overrides = CliOverrides {
        deck_count: args.decks,
        min_bet: args.min_bet,
        hit_soft_17: args.no_hit_soft_17.then_some(false),
        max_rounds: args.max_rounds,
        starting_balance: args.starting_balance,
        seed: args.seed,
        decision_timeout_secs: args.timeout,
    };
    let cfg = config::load_with_overrides(&overrides)?.config;
    let rules = cfg.table_rules();

    let usage = Arc::new(UsageTracker::new());
    let settings = ModelSettings {
        endpoint: cfg.endpoint.clone(),
        api_key: config::api_key(),
        request_timeout: rules.decision_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
    };
    let mut providers = Vec::with_capacity(seats.len());
    for seat in &seats {
        providers.push(create_provider(&seat.provider, &settings, Arc::clone(&usage))?);
    }

    let log_path = args
        .log
        .clone()
        .unwrap_or_else(|| default_log_path(&cfg.log_dir));
    let file = WriterTranscript::create(&log_path)?;
    writeln!(out, "Logging to: {}", log_path.display())?;
    let transcript: Box<dyn Transcript + '_> = if args.quiet {
        Box::new(file)
    } else {
        Box::new(file.with_echo(&mut *out))
    };

    let mut table = match cfg.seed {
        Some(seed) => Table::with_seed(rules, transcript, seed)?,
        None => Table::new(rules, transcript)?,
    };
    if let Some(path) = &args.history {
        table = table.with_history(HistoryWriter::create(path)?);
    }
    for (seat, provider) in seats.iter().zip(providers) {
        table.add_player(seat.name.clone(), provider)?;
    }
    tracing::info!(players = seats.len(), seed = ?cfg.seed, "starting game");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let started = Instant::now();
    let outcome = runtime.block_on(async {
        tokio::select! {
            res = table.play_until_one_remaining() => res.map_err(CliError::from),
            _ = tokio::signal::ctrl_c() => {
                Err(CliError::Interrupted("game stopped before completion".into()))
            }
        }
    })?;
    let elapsed = started.elapsed();

    let transcript = table.transcript_mut();
    transcript.blank();
    transcript.line(&usage.summary());
    transcript.line(&format!("Game duration: {}", ui::format_duration(elapsed)));
    // releases `out`
    drop(table);

    writeln!(out, "{}", describe(&outcome))?;
    writeln!(out, "Game log saved to: {}", log_path.display())?;
    Ok(())
}

fn default_log_path(log_dir: &str) -> PathBuf {
    Path::new(log_dir).join(format!("game_{}.log", Local::now().format("%Y%m%d_%H%M%S")))
}

fn describe(outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::SingleWinner(w) => format!("Winner: {} (Balance: ${})", w.name, w.balance),
        GameOutcome::RoundCap {
            rounds_played,
            leader,
            ..
        } => format!(
            "Round cap reached after {} rounds. Leader: {} (Balance: ${})",
            rounds_played, leader.name, leader.balance
        ),
        GameOutcome::NoPlayersLeft => "No players left with sufficient balance.".to_string(),
    }
}
