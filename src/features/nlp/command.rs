//! Parsed command types.

use std::fmt;

use serde::Serialize;

use super::task::ParsedTask;
use crate::core::{ClockTime, TimeSpec};

/// The closed set of command kinds a quick-entry line can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Block,
    Event,
    Routine,
    Task,
    Batch,
    Template,
    Ai,
    Quick,
}

impl CommandKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Event => "event",
            Self::Routine => "routine",
            Self::Task => "task",
            Self::Batch => "batch",
            Self::Template => "template",
            Self::Ai => "ai",
            Self::Quick => "quick",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of schedule block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockKind {
    #[default]
    DeepWork,
    Admin,
    Break,
    Exercise,
    Personal,
}

impl BlockKind {
    /// Recognize a subtype token (`deep` maps to deep-work).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "deep" | "deep-work" => Some(Self::DeepWork),
            "admin" => Some(Self::Admin),
            "break" => Some(Self::Break),
            "exercise" => Some(Self::Exercise),
            "personal" => Some(Self::Personal),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeepWork => "deep-work",
            Self::Admin => "admin",
            Self::Break => "break",
            Self::Exercise => "exercise",
            Self::Personal => "personal",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventKind {
    #[default]
    Meeting,
    Standup,
    Call,
    Review,
}

impl EventKind {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "meeting" => Some(Self::Meeting),
            "standup" => Some(Self::Standup),
            "call" => Some(Self::Call),
            "review" => Some(Self::Review),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Standup => "standup",
            Self::Call => "call",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-word schedule actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickAction {
    Now,
    Next,
    Clear,
    Undo,
}

impl QuickAction {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "now" => Some(Self::Now),
            "next" => Some(Self::Next),
            "clear" => Some(Self::Clear),
            "undo" => Some(Self::Undo),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::Next => "next",
            Self::Clear => "clear",
            Self::Undo => "undo",
        }
    }

    /// Human-readable description of the action.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Now => "Start now",
            Self::Next => "Jump to the next block",
            Self::Clear => "Clear the schedule",
            Self::Undo => "Undo the last change",
        }
    }
}

/// Variant-specific flags and payloads.
///
/// Unset fields are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// A block was recognized but no time followed.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub needs_time: bool,
    /// A time-shaped token did not match the time grammar.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub invalid_time: bool,
    /// A start time resolved but neither an end nor a duration did.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub needs_duration: bool,
    /// Free-text query for the assistant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Unparsed command strings of a batch, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    /// Leftover words of an event line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Metadata {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Structured result of parsing one quick-entry line.
///
/// Every parse yields one of these; failures are reported through
/// `is_valid`, `suggestion` and the `metadata` flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCommand {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<ClockTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<ClockTime>,
    /// Minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<ParsedTask>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl ParsedCommand {
    /// An empty, invalid command of the given kind.
    #[must_use]
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            subtype: None,
            time_start: None,
            time_end: None,
            duration: None,
            tasks: Vec::new(),
            attendees: Vec::new(),
            metadata: Metadata::default(),
            is_valid: false,
            suggestion: None,
            preview: None,
        }
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: TimeSpec) -> Self {
        self.time_start = time.start;
        self.time_end = time.end;
        self.duration = time.duration;
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    #[must_use]
    pub fn valid(mut self) -> Self {
        self.is_valid = true;
        self
    }

    /// The time fields gathered back into a spec.
    #[must_use]
    pub const fn time(&self) -> TimeSpec {
        TimeSpec {
            start: self.time_start,
            end: self.time_end,
            duration: self.duration,
        }
    }

    /// Total minutes across all tasks.
    #[must_use]
    pub fn task_minutes(&self) -> u32 {
        self.tasks.iter().map(|t| t.duration).sum()
    }
}
