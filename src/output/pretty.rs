use std::fmt::Write;

use colored::Colorize;

use crate::core::TimeSpec;
use crate::features::nlp::ParsedCommand;
use crate::features::suggest::CommandSuggestion;

/// Format a parsed command as a coloured summary
pub fn format_command_pretty(command: &ParsedCommand) -> String {
    let status = if command.is_valid {
        "valid".green()
    } else {
        "invalid".red()
    };

    let mut header = command.kind.to_string().bold().to_string();
    if let Some(subtype) = &command.subtype {
        header.push_str(&format!(" ({})", subtype.cyan()));
    }
    let mut output = format!("{header}  [{status}]\n");

    if let Some(preview) = &command.preview {
        writeln!(output, "  {} {preview}", "Preview:".cyan().bold()).ok();
    }

    let time = format_time_line(&command.time());
    if !time.is_empty() {
        writeln!(output, "  {time}").ok();
    }

    if !command.tasks.is_empty() {
        writeln!(
            output,
            "  {} {} min total",
            "Tasks:".yellow(),
            command.task_minutes()
        )
        .ok();
        for task in &command.tasks {
            let marker = task
                .order
                .map_or_else(|| "-".to_string(), |o| format!("{o}."));
            writeln!(output, "    {marker} {} ({} min)", task.name, task.duration).ok();
        }
    }

    if !command.attendees.is_empty() {
        let attendees: Vec<String> = command.attendees.iter().map(|a| format!("@{a}")).collect();
        writeln!(output, "  {} {}", "Attendees:".magenta(), attendees.join(" ")).ok();
    }

    let metadata = &command.metadata;
    if let Some(title) = &metadata.title {
        writeln!(output, "  {} {title}", "Title:".dimmed()).ok();
    }
    if let Some(query) = &metadata.query {
        writeln!(output, "  {} {query}", "Query:".blue()).ok();
    }
    if !metadata.commands.is_empty() {
        writeln!(output, "  {}", "Commands:".dimmed()).ok();
        for (i, cmd) in metadata.commands.iter().enumerate() {
            writeln!(output, "    {}. {cmd}", i + 1).ok();
        }
    }

    let flags: Vec<&str> = [
        (metadata.needs_time, "needs time"),
        (metadata.invalid_time, "invalid time"),
        (metadata.needs_duration, "needs duration"),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|(_, name)| *name)
    .collect();
    if !flags.is_empty() {
        writeln!(output, "  {} {}", "Flags:".red(), flags.join(", ")).ok();
    }

    if let Some(suggestion) = &command.suggestion {
        writeln!(output, "  {} {suggestion}", "Hint:".yellow().bold()).ok();
    }

    output
}

/// Format a batch and its expanded commands
pub fn format_expanded_pretty(batch: &ParsedCommand, expanded: &[ParsedCommand]) -> String {
    let mut output = format_command_pretty(batch);
    for (i, command) in expanded.iter().enumerate() {
        output.push_str(&"─".repeat(40).dimmed().to_string());
        output.push('\n');
        write!(output, "{} ", format!("[{}]", i + 1).dimmed()).ok();
        output.push_str(&format_command_pretty(command));
    }
    output
}

/// Format suggestions as a ranked list
pub fn format_suggestions_pretty(suggestions: &[CommandSuggestion]) -> String {
    if suggestions.is_empty() {
        return "No suggestions".dimmed().to_string();
    }

    let mut output = String::new();
    for suggestion in suggestions {
        let confidence = format!("{:>3.0}%", suggestion.confidence * 100.0);
        writeln!(
            output,
            "{}  {}  {}",
            confidence.dimmed(),
            suggestion.text.bold(),
            suggestion.description
        )
        .ok();
        if let Some(example) = &suggestion.example {
            writeln!(output, "      {} {example}", "e.g.".dimmed()).ok();
        }
    }
    output
}

/// Format a time spec on its own
pub fn format_time_spec_pretty(spec: &TimeSpec) -> String {
    if spec.is_empty() {
        return format!("{} not a recognized time expression", "✗".red());
    }
    format!("{} {}", "✓".green(), format_time_line(spec))
}

fn format_time_line(spec: &TimeSpec) -> String {
    let mut parts = Vec::new();
    if let Some(start) = spec.start {
        parts.push(format!("{} {start}", "Start:".cyan()));
    }
    if let Some(end) = spec.end {
        parts.push(format!("{} {end}", "End:".cyan()));
    }
    if let Some(minutes) = spec.duration {
        parts.push(format!("{} {minutes} min", "Duration:".cyan()));
    }
    parts.join("  ")
}
