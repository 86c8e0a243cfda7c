use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "quickentry")]
#[command(about = "Parse quick-entry schedule commands and suggest completions")]
#[command(long_about = "quickentry - shorthand parser for day scheduling

Turns terse one-line commands into structured schedule entries:
time blocks, events, routines, tasks, batches, templates, assistant
queries and quick actions.

QUICK START:
  quickentry parse \"blk deep 9-11 1-outline-30\"   Deep work block with a task
  quickentry parse \"evt standup 1000-1015 @sam\"  Event with an attendee
  quickentry parse \"review code-30\"              Implicit 30 minute task
  quickentry suggest \"blk \"                      Completions for partial input
  quickentry time \"now+45m\"                      Evaluate a time expression

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  quickentry <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output. Defaults to `general.default_output` from
    /// the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Enable debug logging on stderr
    ///
    /// Overridden by RUST_LOG when that is set.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(long, global = true, env = "QUICKENTRY_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a quick-entry command
    ///
    /// Classifies the line by its first word and extracts times, tasks,
    /// attendees and hints. Invalid commands are still printed, with a
    /// suggestion explaining what is missing.
    ///
    /// # Examples
    ///
    ///   quickentry parse "blk deep 930-1030 1-read-30 notes-15"
    ///   quickentry parse "evt call 2pm-3pm @ana @raj"
    ///   quickentry parse "now+1h"
    ///   quickentry parse "batch blk 9-11 / evt lunch 12-1" --expand
    ///   quickentry parse "blk" --at 09:10
    ///
    /// # Keywords
    ///
    ///   Blocks:     blk, block, deep, admin, break, exercise, personal
    ///   Events:     evt, event, meeting, standup, call, review
    ///   Routines:   rtn, routine
    ///   Tasks:      tsk, task
    ///   Batches:    batch (pieces separated by '/')
    ///   Templates:  tmpl, template
    ///   Assistant:  /, ai
    ///   Quick:      now, next, clear, undo
    #[command(alias = "p")]
    Parse(ParseArgs),

    /// Suggest completions for partial input
    ///
    /// Returns at most three suggestions, ranked by confidence. Trailing
    /// spaces matter: "blk " suggests block kinds.
    ///
    /// # Examples
    ///
    ///   quickentry suggest ""
    ///   quickentry suggest "blk "
    ///   quickentry suggest "blk deep 9"
    #[command(alias = "s")]
    Suggest {
        /// Partially typed command
        text: String,
    },

    /// Parse commands from stdin, one per line
    ///
    /// Blank lines are skipped. In JSON mode every result is written as a
    /// single JSON line.
    ///
    /// # Examples
    ///
    ///   printf 'blk 9-10\nevt call 2-3\n' | quickentry pipe -o json
    Pipe(PipeArgs),

    /// Evaluate a single time expression
    ///
    /// # Examples
    ///
    ///   quickentry time 930-1030
    ///   quickentry time "2pm-3:30pm"
    ///   quickentry time 10-45m
    ///   quickentry time now+1h --at 14:00
    Time {
        /// Time expression
        expr: String,

        /// Clock reading to use instead of the local time (HH:MM)
        #[arg(long, value_name = "HH:MM")]
        at: Option<String>,
    },

    /// Show, locate or create the config file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Outputs completion script for the specified shell.
    /// Redirect to a file or source directly.
    ///
    /// Example: quickentry completions bash > ~/.bash_completion.d/quickentry
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// The quick-entry line
    pub text: String,

    /// Clock reading to use instead of the local time (HH:MM)
    ///
    /// Only affects relative expressions like now, now+1h and 30m,
    /// and the start of a bare blk.
    #[arg(long, value_name = "HH:MM")]
    pub at: Option<String>,

    /// Also parse every command inside a batch
    #[arg(long, short = 'e')]
    pub expand: bool,
}

/// Arguments for the pipe command.
#[derive(Args)]
pub struct PipeArgs {
    /// Clock reading to use instead of the local time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub at: Option<String>,

    /// Only print valid commands
    #[arg(long)]
    pub valid_only: bool,
}

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
