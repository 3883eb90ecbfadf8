//! # Tablemind CLI Library
//!
//! Command-line wiring for the Tablemind blackjack engine: argument
//! parsing, layered configuration, roster construction, and running a game.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["tablemind", "play", "--player", "Ann=basic", "--player", "Bob", "--quiet"];
//! let code = tablemind_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Seat players and run a game to completion
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod roster;
pub mod ui;

use cli::{Commands, TablemindCli};
use commands::{handle_cfg_command, handle_play_command};

pub use error::CliError;
pub use logging::init_logging;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let mut out = Vec::new();
/// let code = tablemind_cli::run(vec!["tablemind", "--help"], &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("play"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = TablemindCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = writeln!(err, "{}", e);
                    let _ = writeln!(err);
                    let _ = writeln!(err, "Tablemind Blackjack CLI");
                    let _ = writeln!(err, "Usage: tablemind <command> [options]\n");
                    let _ = writeln!(err, "Commands:");
                    for c in COMMANDS {
                        let _ = writeln!(err, "  {}", c);
                    }
                    let _ = writeln!(err, "\nFor full help, run: tablemind --help");
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Cfg => handle_cfg_command(out),
                Commands::Play(args) => handle_play_command(&args, out),
            };
            match result {
                Ok(()) => exit_code::SUCCESS,
                Err(CliError::Interrupted(msg)) => {
                    let _ = ui::display_warning(err, &format!("Interrupted: {}", msg));
                    exit_code::INTERRUPTED
                }
                Err(e) => {
                    tracing::debug!(error = %e, "command failed");
                    let _ = ui::write_error(err, &e.to_string());
                    exit_code::ERROR
                }
            }
        }
    }
}
