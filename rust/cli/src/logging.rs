//! Diagnostic logging setup.
//!
//! The game transcript is written separately; this only covers `tracing`
//! events from the engine, providers, and CLI.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn,tablemind_engine=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a stderr fmt subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_logging() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
