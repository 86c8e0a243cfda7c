//! JSON output formatting for quickentry.
//!
//! Parsed commands serialize with the camelCase field names shared with the
//! scheduling front end, so this output can be piped straight into it.

use serde_json::json;

use crate::core::TimeSpec;
use crate::error::QuickEntryError;
use crate::features::nlp::ParsedCommand;
use crate::features::suggest::CommandSuggestion;

/// Format a parsed command as JSON
///
/// # Errors
///
/// Returns `QuickEntryError::Json` if JSON serialization fails.
pub fn format_command_json(command: &ParsedCommand) -> Result<String, QuickEntryError> {
    Ok(serde_json::to_string_pretty(command)?)
}

/// Format a batch together with its expanded commands
///
/// # Errors
///
/// Returns `QuickEntryError::Json` if JSON serialization fails.
pub fn format_expanded_json(
    batch: &ParsedCommand,
    expanded: &[ParsedCommand],
) -> Result<String, QuickEntryError> {
    let output = json!({
        "command": batch,
        "count": expanded.len(),
        "expanded": expanded
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format one parsed command per line, for streaming consumers
///
/// # Errors
///
/// Returns `QuickEntryError::Json` if JSON serialization fails.
pub fn format_command_line_json(command: &ParsedCommand) -> Result<String, QuickEntryError> {
    Ok(serde_json::to_string(command)?)
}

/// Format suggestions as JSON
///
/// # Errors
///
/// Returns `QuickEntryError::Json` if JSON serialization fails.
pub fn format_suggestions_json(
    input: &str,
    suggestions: &[CommandSuggestion],
) -> Result<String, QuickEntryError> {
    let output = json!({
        "input": input,
        "count": suggestions.len(),
        "suggestions": suggestions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a time spec as JSON
///
/// # Errors
///
/// Returns `QuickEntryError::Json` if JSON serialization fails.
pub fn format_time_spec_json(spec: &TimeSpec) -> Result<String, QuickEntryError> {
    Ok(serde_json::to_string_pretty(spec)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::nlp::CommandParser;
    use chrono::NaiveTime;
    use serde_json::Value;

    fn parse(input: &str) -> ParsedCommand {
        CommandParser::new().parse_at(input, NaiveTime::from_hms_opt(9, 0, 0).unwrap())
    }

    #[test]
    fn test_format_command_json() {
        let json = format_command_json(&parse("blk deep 9-11")).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "block");
        assert_eq!(value["subtype"], "deep-work");
        assert_eq!(value["timeStart"], "09:00");
        assert_eq!(value["timeEnd"], "11:00");
        assert_eq!(value["duration"], 120);
        assert_eq!(value["isValid"], true);
    }

    #[test]
    fn test_format_expanded_json() {
        let parser = CommandParser::new();
        let now = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let batch = parser.parse_at("batch blk 9-10 / evt call 2-3", now);
        let expanded = parser.expand_batch(&batch, now);

        let json = format_expanded_json(&batch, &expanded).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["command"]["type"], "batch");
        assert_eq!(value["count"], 2);
        assert_eq!(value["expanded"][1]["type"], "event");
    }

    #[test]
    fn test_format_command_line_json_is_single_line() {
        let json = format_command_line_json(&parse("now")).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"type\":\"quick\""));
    }

    #[test]
    fn test_format_suggestions_json() {
        let suggestions = crate::features::suggest::get_suggestions("");
        let json = format_suggestions_json("", &suggestions).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 3);
        assert_eq!(value["suggestions"][0]["text"], "blk deep 9-11");
        assert_eq!(value["suggestions"][0]["confidence"], 1.0);
    }

    #[test]
    fn test_format_time_spec_json() {
        let spec = crate::core::parse_time_expression("bogus", NaiveTime::MIN);
        assert_eq!(format_time_spec_json(&spec).unwrap(), "{}");
    }
}
