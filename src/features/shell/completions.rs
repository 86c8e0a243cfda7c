//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, PowerShell and elvish.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::QuickEntryError;

const BIN_NAME: &str = "quickentry";

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, QuickEntryError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| QuickEntryError::InvalidInput(format!("Completion script is not UTF-8: {e}")))
}

/// Get shell from string name.
#[must_use]
pub fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

/// Where a generated script is saved, and what makes the shell load it.
///
/// `None` as the file means the script is evaluated from the profile instead.
const fn completion_target(shell: Shell) -> Option<(Option<&'static str>, &'static str)> {
    match shell {
        Shell::Bash => Some((
            Some("~/.local/share/bash-completion/completions/quickentry"),
            "bash-completion picks the file up on the next login shell.",
        )),
        Shell::Zsh => Some((
            Some("~/.zsh/completions/_quickentry"),
            "Put `fpath=(~/.zsh/completions $fpath)` before `compinit` in ~/.zshrc.",
        )),
        Shell::Fish => Some((
            Some("~/.config/fish/completions/quickentry.fish"),
            "fish loads it automatically.",
        )),
        Shell::PowerShell => Some((
            None,
            "Add `quickentry completions powershell | Out-String | Invoke-Expression` to $PROFILE.",
        )),
        Shell::Elvish => Some((
            Some("~/.config/elvish/lib/quickentry.elv"),
            "Add `use quickentry` to ~/.config/elvish/rc.elv.",
        )),
        _ => None,
    }
}

/// Setup steps for loading quickentry completions in `shell`.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    let Some((file, activate)) = completion_target(shell) else {
        return format!("No setup steps known for {shell}\n");
    };
    match file {
        Some(file) => format!(
            "Write the script once and reload your shell:\n  \
             {BIN_NAME} completions {shell} > {file}\n{activate}\n"
        ),
        None => format!("{activate}\n"),
    }
}
