//! Shell completion command.

use crate::error::QuickEntryError;
use crate::features::shell::completions::{
    completion_install_instructions, generate_completions, shell_from_str,
};

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if the shell is unknown or the script is not valid UTF-8.
pub fn completions(shell: &str, install: bool) -> Result<String, QuickEntryError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        QuickEntryError::InvalidInput(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}
