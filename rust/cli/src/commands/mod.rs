//! Command handlers, one module per subcommand.
//!
//! Each handler takes its parsed arguments plus injected output streams
//! (`&mut dyn Write`) and returns `Result<(), CliError>`.

mod cfg;
mod play;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
