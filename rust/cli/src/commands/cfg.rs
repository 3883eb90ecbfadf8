//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value tagged with the
//! layer it came from (default, file, env).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "min_bet": {
//!     "value": 5,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;

    let display = serde_json::json!({
        "deck_count": { "value": config.deck_count, "source": sources.deck_count },
        "shuffle": { "value": config.shuffle, "source": sources.shuffle },
        "min_bet": { "value": config.min_bet, "source": sources.min_bet },
        "hit_soft_17": { "value": config.hit_soft_17, "source": sources.hit_soft_17 },
        "max_rounds": { "value": config.max_rounds, "source": sources.max_rounds },
        "starting_balance": { "value": config.starting_balance, "source": sources.starting_balance },
        "seed": { "value": config.seed, "source": sources.seed },
        "decision_timeout_secs": {
            "value": config.decision_timeout_secs,
            "source": sources.decision_timeout_secs,
        },
        "endpoint": { "value": config.endpoint, "source": sources.endpoint },
        "log_dir": { "value": config.log_dir, "source": sources.log_dir },
        "api_key_set": config::api_key().is_some(),
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
