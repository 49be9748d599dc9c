//! CLI argument parsing and structure definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{RunArgs, TokensArgs};

/// Coreference chains for English prose
#[derive(Parser, Debug)]
#[command(name = "litcoref")]
#[command(
    author,
    version,
    about = "Coreference chains for English prose",
    long_about = r#"
litcoref - rule-based coreference for literary text

Without a subcommand, runs the built-in excerpt through the default pipeline,
prints its coreference chains and the resolution of token 31.

PIPELINES:
  • en_literary (alias: en_core) - senter, tagger, ner
  • en_blank                     - senter only

EXAMPLES:
  litcoref
  litcoref run --resolve 6 "My father was a farmer. He raised foxes."
  litcoref run -f story.txt --characters --format json -o story.json
  litcoref run -f story.txt --segments --features
  litcoref tokens "The cellar was whitewashed."
  litcoref info
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand; none runs the demo
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (default: $LITCOREF_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline and print coreference chains
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Print tokens with tags and sentence numbers
    #[command(visible_alias = "t")]
    Tokens(TokensArgs),

    /// Show pipeline presets, components and config location
    #[command(visible_alias = "i")]
    Info,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_demo() {
        let cli = Cli::try_parse_from(["litcoref"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn run_arguments() {
        let cli = Cli::try_parse_from([
            "litcoref", "-vv", "run", "--resolve", "3", "--resolve", "7", "--format", "json",
            "He", "left.",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.resolve, [3, 7]);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.positional, ["He", "left."]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["litcoref", "-q", "-v", "info"]).is_err());
    }
}
