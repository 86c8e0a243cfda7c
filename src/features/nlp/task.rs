//! Task notation grammar.
//!
//! A task is written as one hyphen-joined token: `write-report-45` or, with an
//! explicit position inside its block, `1-write-report-45`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A task extracted from a block or task command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTask {
    /// Task name, hyphens replaced by spaces.
    pub name: String,
    /// Duration in minutes, always positive.
    pub duration: u32,
    /// Explicit position within the block. Absent means parse order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl ParsedTask {
    /// Create an unordered task.
    #[must_use]
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            duration,
            order: None,
        }
    }

    /// Set the explicit order.
    #[must_use]
    pub const fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }
}

static ORDERED_TASK: Lazy<Regex> = Lazy::new(|| {
    // <order>-<name>-<duration>, name may itself contain hyphens
    Regex::new(r"^(\d+)-(.+)-(\d+)$").unwrap_or_else(|e| panic!("Invalid ordered task regex: {e}"))
});

static UNORDERED_TASK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)-(\d+)$").unwrap_or_else(|e| panic!("Invalid task regex: {e}"))
});

/// Parse one task token.
///
/// Returns `None` when the token carries no trailing duration, when the
/// duration is zero, or when the name is empty.
///
/// # Examples
///
/// ```
/// use quickentry::features::nlp::parse_task;
///
/// let task = parse_task("1-write-report-45").unwrap();
/// assert_eq!(task.order, Some(1));
/// assert_eq!(task.name, "write report");
/// assert_eq!(task.duration, 45);
///
/// assert!(parse_task("no-numbers-here").is_none());
/// ```
#[must_use]
pub fn parse_task(token: &str) -> Option<ParsedTask> {
    let token = token.trim();

    if let Some(caps) = ORDERED_TASK.captures(token) {
        // an order too large for u32 is read as part of the name
        if let Ok(order) = caps[1].parse::<u32>() {
            let task = build_task(&caps[2], &caps[3])?;
            return Some(task.with_order(order));
        }
    }

    let caps = UNORDERED_TASK.captures(token)?;
    build_task(&caps[1], &caps[2])
}

/// Turn a hyphenated name and a digit run into a task.
pub(crate) fn build_task(name: &str, duration: &str) -> Option<ParsedTask> {
    let duration: u32 = duration.parse().ok().filter(|d| *d > 0)?;
    let name = dehyphenate(name);
    if name.is_empty() {
        return None;
    }
    Some(ParsedTask::new(name, duration))
}

/// Replace hyphens with spaces and collapse the result.
fn dehyphenate(text: &str) -> String {
    text.replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_task() {
        let task = parse_task("1-write-report-45").unwrap();
        assert_eq!(task, ParsedTask::new("write report", 45).with_order(1));
    }

    #[test]
    fn test_unordered_task() {
        let task = parse_task("write-report-45").unwrap();
        assert_eq!(task, ParsedTask::new("write report", 45));
    }

    #[test]
    fn test_single_word_ordered_task() {
        let task = parse_task("1-read-30").unwrap();
        assert_eq!(task.order, Some(1));
        assert_eq!(task.name, "read");
        assert_eq!(task.duration, 30);
    }

    #[test]
    fn test_unparsable_task() {
        assert_eq!(parse_task("no-numbers-here"), None);
        assert_eq!(parse_task("read"), None);
        assert_eq!(parse_task(""), None);
        assert_eq!(parse_task("-30"), None);
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        assert_eq!(parse_task("read-0"), None);
        assert_eq!(parse_task("2-read-0"), None);
    }

    #[test]
    fn test_two_segments_is_unordered() {
        // Only one hyphen: the leading digits are the name, not an order.
        let task = parse_task("1-30").unwrap();
        assert_eq!(task.name, "1");
        assert_eq!(task.order, None);
        assert_eq!(task.duration, 30);
    }

    #[test]
    fn test_numeric_name_segment() {
        let task = parse_task("2-chapter-3-review-20").unwrap();
        assert_eq!(task.order, Some(2));
        assert_eq!(task.name, "chapter 3 review");
        assert_eq!(task.duration, 20);
    }

    #[test]
    fn test_serializes_without_order() {
        let json = serde_json::to_string(&ParsedTask::new("read", 30)).unwrap();
        assert_eq!(json, r#"{"name":"read","duration":30}"#);
    }

    #[test]
    fn test_oversized_order_falls_back_to_unordered() {
        let task = parse_task("99999999999-read-30").unwrap();
        assert_eq!(task, ParsedTask::new("99999999999 read", 30));
    }
}
