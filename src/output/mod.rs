//! Output formatting for quickentry.
//!
//! This module provides formatters for displaying parse results in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::core::TimeSpec;
use crate::error::QuickEntryError;
use crate::features::nlp::ParsedCommand;
use crate::features::suggest::CommandSuggestion;

pub use json::*;
pub use pretty::*;

/// Format a parsed command based on output format
///
/// # Errors
///
/// Returns `QuickEntryError::Json` if JSON serialization fails.
pub fn format_command(
    command: &ParsedCommand,
    format: OutputFormat,
) -> Result<String, QuickEntryError> {
    match format {
        OutputFormat::Pretty => Ok(format_command_pretty(command)),
        OutputFormat::Json => format_command_json(command),
    }
}

/// Format a batch and its expansion based on output format
///
/// # Errors
///
/// Returns `QuickEntryError::Json` if JSON serialization fails.
pub fn format_expanded(
    batch: &ParsedCommand,
    expanded: &[ParsedCommand],
    format: OutputFormat,
) -> Result<String, QuickEntryError> {
    match format {
        OutputFormat::Pretty => Ok(format_expanded_pretty(batch, expanded)),
        OutputFormat::Json => format_expanded_json(batch, expanded),
    }
}

/// Format suggestions based on output format
///
/// # Errors
///
/// Returns `QuickEntryError::Json` if JSON serialization fails.
pub fn format_suggestions(
    input: &str,
    suggestions: &[CommandSuggestion],
    format: OutputFormat,
) -> Result<String, QuickEntryError> {
    match format {
        OutputFormat::Pretty => Ok(format_suggestions_pretty(suggestions)),
        OutputFormat::Json => format_suggestions_json(input, suggestions),
    }
}

/// Format a time spec based on output format
///
/// # Errors
///
/// Returns `QuickEntryError::Json` if JSON serialization fails.
pub fn format_time_spec(spec: &TimeSpec, format: OutputFormat) -> Result<String, QuickEntryError> {
    match format {
        OutputFormat::Pretty => Ok(format_time_spec_pretty(spec)),
        OutputFormat::Json => format_time_spec_json(spec),
    }
}
