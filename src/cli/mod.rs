//! CLI library modules for the litcoref binary.
//!
//! Kept in the library so commands can be tested without spawning a process.

pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

pub use parser::{Cli, Commands};

use clap::CommandFactory;
use clap_complete::generate;
use std::io;

use crate::config::Config;

/// Dispatch a parsed command line.
///
/// No subcommand runs the demo: the built-in excerpt with the demo token
/// resolved.
pub fn run(cli: Cli) -> Result<(), String> {
    if let Some(Commands::Completions { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "litcoref", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    match cli.command {
        Some(Commands::Run(args)) => commands::cmd_run(args, &config),
        Some(Commands::Tokens(args)) => commands::cmd_tokens(args, &config),
        Some(Commands::Info) => commands::cmd_info(&config, cli.config.as_deref()),
        Some(Commands::Completions { .. }) => Ok(()),
        None => commands::cmd_run(commands::RunArgs::demo(), &config),
    }
}
