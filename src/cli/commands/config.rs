//! Config inspection commands.

use std::path::Path;

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::QuickEntryError;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if serialization fails, or if `init` would overwrite an
/// existing file without `--force` or cannot write it.
pub fn config(
    config: &Config,
    path: &Path,
    cmd: &ConfigCommands,
    format: OutputFormat,
) -> Result<String, QuickEntryError> {
    match (cmd, format) {
        (ConfigCommands::Show, OutputFormat::Pretty) => config.to_yaml(),
        (ConfigCommands::Show, OutputFormat::Json) => Ok(serde_json::to_string_pretty(config)?),
        (ConfigCommands::Path, _) => Ok(path.display().to_string()),
        (ConfigCommands::Init { force }, _) => init(path, *force),
    }
}

fn init(path: &Path, force: bool) -> Result<String, QuickEntryError> {
    if path.exists() && !force {
        return Err(QuickEntryError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to_path(path)?;
    Ok(format!("{} {}", "Wrote".green(), path.display()))
}
