//! Parse, suggest, time and pipe commands.

use std::io::{self, BufRead};

use chrono::{Local, NaiveTime};
use tracing::debug;

use crate::cli::args::{OutputFormat, ParseArgs, PipeArgs};
use crate::config::Config;
use crate::core::{parse_time_expression, ClockTime};
use crate::error::QuickEntryError;
use crate::features::nlp::{CommandKind, CommandParser};
use crate::features::suggest::SuggestionEngine;
use crate::output::{
    format_command, format_command_line_json, format_command_pretty, format_expanded,
    format_suggestions, format_time_spec,
};

/// Execute the parse command.
///
/// # Errors
///
/// Returns an error if `--at` is not a valid `HH:MM` time or output
/// formatting fails.
pub fn parse(
    config: &Config,
    args: &ParseArgs,
    format: OutputFormat,
) -> Result<String, QuickEntryError> {
    let now = resolve_clock(args.at.as_deref())?;
    let parser = CommandParser::with_config(config.parser.clone());
    let command = parser.parse_at(&args.text, now);

    if args.expand && command.kind == CommandKind::Batch {
        let expanded = parser.expand_batch(&command, now);
        return format_expanded(&command, &expanded, format);
    }

    format_command(&command, format)
}

/// Execute the suggest command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn suggest(
    config: &Config,
    text: &str,
    format: OutputFormat,
) -> Result<String, QuickEntryError> {
    let engine = SuggestionEngine::with_limit(config.suggestions.limit);
    format_suggestions(text, &engine.suggestions(text), format)
}

/// Execute the time command.
///
/// # Errors
///
/// Returns an error if `--at` is not a valid `HH:MM` time or output
/// formatting fails.
pub fn time(expr: &str, at: Option<&str>, format: OutputFormat) -> Result<String, QuickEntryError> {
    let now = resolve_clock(at)?;
    format_time_spec(&parse_time_expression(expr, now), format)
}

/// Execute the pipe command against stdin.
///
/// # Errors
///
/// Returns an error if reading stdin fails, `--at` is malformed, or output
/// formatting fails.
pub fn pipe(
    config: &Config,
    args: &PipeArgs,
    format: OutputFormat,
) -> Result<String, QuickEntryError> {
    let stdin = io::stdin();
    pipe_lines(config, args, stdin.lock(), format)
}

fn pipe_lines<R: BufRead>(
    config: &Config,
    args: &PipeArgs,
    reader: R,
    format: OutputFormat,
) -> Result<String, QuickEntryError> {
    let now = resolve_clock(args.at.as_deref())?;
    let parser = CommandParser::with_config(config.parser.clone());
    let mut results = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let command = parser.parse_at(line, now);
        if args.valid_only && !command.is_valid {
            debug!(line, "skipping invalid command");
            continue;
        }

        results.push(match format {
            OutputFormat::Pretty => format_command_pretty(&command),
            OutputFormat::Json => format_command_line_json(&command)?,
        });
    }

    Ok(results.join("\n"))
}

/// Resolve `--at` to a clock reading, defaulting to the local time.
fn resolve_clock(at: Option<&str>) -> Result<NaiveTime, QuickEntryError> {
    match at {
        Some(value) => Ok(value.parse::<ClockTime>()?.to_naive()),
        None => Ok(Local::now().time()),
    }
}
