//! Live suggestion engine.
//!
//! Heuristics run in a fixed order and each may contribute suggestions. The
//! first ones to fire win when the list is cut to the limit.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::features::nlp::{BlockKind, EventKind};

/// Most suggestions ever returned for one input.
pub const MAX_SUGGESTIONS: usize = 3;

/// An advisory completion for a partially typed command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandSuggestion {
    /// The completed command text.
    pub text: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Between 0 and 1.
    pub confidence: f32,
}

impl CommandSuggestion {
    fn new(text: impl Into<String>, description: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
            example: None,
            confidence,
        }
    }

    fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

static FULL_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,4}(?::\d{2})?(?:am|pm)?-\d{1,4}(?::\d{2})?(?:am|pm)?")
        .unwrap_or_else(|e| panic!("Invalid range regex: {e}"))
});

static BARE_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}$").unwrap_or_else(|e| panic!("Invalid hour regex: {e}")));

static NUMERIC_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+-\d+").unwrap_or_else(|e| panic!("Invalid numeric range regex: {e}"))
});

static TASK_STUB: Lazy<Regex> = Lazy::new(|| {
    // "1-read", "2-write-notes": a task still missing its minutes
    Regex::new(r"^\d+-[a-z]+(?:-[a-z]+)*$").unwrap_or_else(|e| panic!("Invalid task stub regex: {e}"))
});

/// One typed line, normalized for the heuristics.
struct Partial<'a> {
    /// Input with surrounding whitespace removed, original case.
    base: &'a str,
    /// Lowercased input with leading whitespace removed. Trailing spaces
    /// are kept so "blk " differs from "blk".
    lower: String,
    /// Whitespace-separated lowercase tokens.
    tokens: Vec<String>,
}

impl<'a> Partial<'a> {
    fn new(input: &'a str) -> Self {
        let lower = input.trim_start().to_lowercase();
        let tokens = lower.split_whitespace().map(String::from).collect();
        Self {
            base: input.trim(),
            lower,
            tokens,
        }
    }

    fn first(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    fn starts_with_any(&self, prefixes: &[&str]) -> bool {
        prefixes.iter().any(|p| self.lower.starts_with(p))
    }

    fn is_only(&self, words: &[&str]) -> bool {
        self.tokens.len() == 1 && self.first().is_some_and(|t| words.contains(&t))
    }
}

type Heuristic = fn(&Partial<'_>) -> Vec<CommandSuggestion>;

/// Heuristics in priority order.
const HEURISTICS: &[Heuristic] = &[
    block_subtypes,
    block_times_and_tasks,
    event_details,
    range_completion,
    task_duration,
    routines,
    relative_now,
    assistant,
];

/// Produces ranked autocomplete suggestions for partial input.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine {
    limit: usize,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self {
            limit: MAX_SUGGESTIONS,
        }
    }
}

impl SuggestionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap results at `limit`. The cap never exceeds [`MAX_SUGGESTIONS`].
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.min(MAX_SUGGESTIONS),
        }
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Suggest completions for `input`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quickentry::features::suggest::SuggestionEngine;
    ///
    /// let suggestions = SuggestionEngine::new().suggestions("blk");
    /// assert_eq!(suggestions[0].text, "blk deep");
    /// assert!(suggestions.len() <= 3);
    /// ```
    #[must_use]
    pub fn suggestions(&self, input: &str) -> Vec<CommandSuggestion> {
        let mut suggestions = if input.trim().chars().count() <= 1 {
            starters()
        } else {
            let partial = Partial::new(input);
            HEURISTICS.iter().flat_map(|heuristic| heuristic(&partial)).collect()
        };

        suggestions.truncate(self.limit);
        trace!(input, count = suggestions.len(), "suggestions");
        suggestions
    }
}

/// Suggest completions with the default limit.
#[must_use]
pub fn get_suggestions(input: &str) -> Vec<CommandSuggestion> {
    SuggestionEngine::new().suggestions(input)
}

fn starters() -> Vec<CommandSuggestion> {
    vec![
        CommandSuggestion::new("blk deep 9-11", "Deep work block from 9 to 11", 1.0),
        CommandSuggestion::new("evt meeting 2pm-1h", "Meeting at 2pm for an hour", 1.0),
        CommandSuggestion::new("rtn", "Start one of your routines", 1.0),
    ]
}

/// `blk` alone: offer the common block kinds.
fn block_subtypes(partial: &Partial<'_>) -> Vec<CommandSuggestion> {
    if partial.lower.trim_end() != "blk" && partial.lower.trim_end() != "block" {
        return Vec::new();
    }
    let keyword = partial.base;
    vec![
        CommandSuggestion::new(format!("{keyword} deep"), "Deep work block", 1.0)
            .with_example(format!("{keyword} deep 9-11")),
        CommandSuggestion::new(format!("{keyword} admin"), "Admin block", 0.95)
            .with_example(format!("{keyword} admin 1400-1500")),
        CommandSuggestion::new(format!("{keyword} break"), "Break", 0.9)
            .with_example(format!("{keyword} break 15m")),
    ]
}

/// `blk <kind>`: offer time formats; `blk <kind> <time>`: offer task syntax.
fn block_times_and_tasks(partial: &Partial<'_>) -> Vec<CommandSuggestion> {
    if !partial.starts_with_any(&["blk ", "block "])
        || !partial.tokens.iter().any(|t| BlockKind::from_token(t).is_some())
    {
        return Vec::new();
    }

    let base = partial.base;
    match partial.tokens.len() {
        2 => vec![
            CommandSuggestion::new(format!("{base} 930-1030"), "Compact time range", 1.0),
            CommandSuggestion::new(format!("{base} 9-11"), "Whole-hour range", 0.95),
            CommandSuggestion::new(format!("{base} 2pm-3:30pm"), "12-hour clock range", 0.9),
        ],
        n if n >= 3 => vec![CommandSuggestion::new(
            format!("{base} 1-task-30"),
            "Add numbered tasks as order-name-minutes",
            0.9,
        )
        .with_example("blk deep 9-11 1-outline-30 2-draft-60")],
        _ => Vec::new(),
    }
}

/// Event lines: propose a subtype and time, then attendees.
fn event_details(partial: &Partial<'_>) -> Vec<CommandSuggestion> {
    if !partial.starts_with_any(&["ev", "meet", "call"]) {
        return Vec::new();
    }

    let has_subtype = partial.tokens.iter().any(|t| EventKind::from_token(t).is_some());
    if !has_subtype {
        let base = if partial.tokens.len() > 1 || partial.is_only(&["evt", "event"]) {
            partial.base
        } else {
            "evt"
        };
        return vec![CommandSuggestion::new(
            format!("{base} meeting 2-3"),
            "Meeting from 2 to 3",
            0.9,
        )];
    }

    if partial.tokens.len() >= 2 {
        return vec![CommandSuggestion::new(
            format!("{} @name", partial.base),
            "Invite attendees with @name",
            0.85,
        )
        .with_example("evt meeting 2-3 @alex @sam")];
    }

    Vec::new()
}

/// A trailing bare hour: complete it into a range.
fn range_completion(partial: &Partial<'_>) -> Vec<CommandSuggestion> {
    if !partial.lower.chars().any(|c| c.is_ascii_digit()) || FULL_RANGE.is_match(&partial.lower) {
        return Vec::new();
    }
    let Some(last) = partial.last().filter(|t| BARE_HOUR.is_match(t)) else {
        return Vec::new();
    };
    let Ok(hour) = last.parse::<u32>() else {
        return Vec::new();
    };
    if hour > 23 {
        return Vec::new();
    }

    let next = (hour + 1) % 24;
    let prefix = partial.base.strip_suffix(last).unwrap_or(partial.base);
    vec![
        CommandSuggestion::new(
            format!("{prefix}{hour}-{next}"),
            format!("One hour from {hour}:00"),
            0.9,
        ),
        CommandSuggestion::new(
            format!("{prefix}{hour}:30-{next}:30"),
            format!("One hour from {hour}:30"),
            0.85,
        ),
    ]
}

/// A task missing its minutes: `1-read` becomes `1-read-30`.
///
/// Lines that already hold a numeric range are left alone.
fn task_duration(partial: &Partial<'_>) -> Vec<CommandSuggestion> {
    if NUMERIC_RANGE.is_match(&partial.lower) {
        return Vec::new();
    }
    match partial.last() {
        Some(last) if TASK_STUB.is_match(last) => vec![CommandSuggestion::new(
            format!("{}-30", partial.base),
            "Set the task length in minutes",
            0.85,
        )],
        _ => Vec::new(),
    }
}

fn routines(partial: &Partial<'_>) -> Vec<CommandSuggestion> {
    if !partial.starts_with_any(&["rtn", "routine"]) {
        return Vec::new();
    }
    vec![
        CommandSuggestion::new("rtn", "Pick from your routines", 0.95),
        CommandSuggestion::new("rtn morning", "Start a routine by name", 0.9)
            .with_example("rtn evening shutdown"),
    ]
}

fn relative_now(partial: &Partial<'_>) -> Vec<CommandSuggestion> {
    if !partial.lower.starts_with("now") {
        return Vec::new();
    }
    vec![
        CommandSuggestion::new("now+1h", "Start now for an hour", 0.95),
        CommandSuggestion::new("now+30m", "Start now for 30 minutes", 0.9),
    ]
}

fn assistant(partial: &Partial<'_>) -> Vec<CommandSuggestion> {
    if partial.lower.trim_end() != "/" && !partial.lower.starts_with("ai") {
        return Vec::new();
    }
    vec![CommandSuggestion::new("ai plan my afternoon", "Ask the AI assistant", 0.9)
        .with_example("/ what should I focus on next?")]
}
