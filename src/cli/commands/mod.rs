//! Command implementations for the litcoref CLI
//!
//! Each command has its own module.

pub mod info;
pub mod run;
pub mod tokens;

pub use info::cmd_info;
pub use run::{cmd_run, RunArgs};
pub use tokens::{cmd_tokens, TokensArgs};
