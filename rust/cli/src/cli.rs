//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tablemind",
    version,
    about = "Multi-seat blackjack with pluggable decision providers"
)]
pub struct TablemindCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play until one player remains, everyone is broke, or the round cap is hit
    Play(PlayArgs),
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Seat a player; KIND is house (default), basic, or model:<model-id>
    #[arg(long = "player", value_name = "NAME[=KIND]", required = true)]
    pub players: Vec<String>,
    /// Table minimum bet
    #[arg(long)]
    pub min_bet: Option<u64>,
    /// Number of 52-card decks per round
    #[arg(long)]
    pub decks: Option<u32>,
    /// Stop after this many rounds
    #[arg(long)]
    pub max_rounds: Option<u32>,
    /// Balance each player starts with
    #[arg(long)]
    pub starting_balance: Option<u64>,
    /// Dealer stands on soft 17
    #[arg(long)]
    pub no_hit_soft_17: bool,
    /// RNG seed for shuffles and house-seat bets
    #[arg(long)]
    pub seed: Option<u64>,
    /// Seconds to wait for each provider decision
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Transcript path (default: <log_dir>/game_<timestamp>.log)
    #[arg(long)]
    pub log: Option<PathBuf>,
    /// Write one JSON line per round to this file
    #[arg(long)]
    pub history: Option<PathBuf>,
    /// Do not echo the transcript to stdout
    #[arg(long)]
    pub quiet: bool,
}
