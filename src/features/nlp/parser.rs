//! Quick-entry command parser.
//!
//! Turns terse lines like `blk deep 930-1030 1-read-30` or
//! `evt standup 1000-1015 @sam` into a [`ParsedCommand`]. The first word picks
//! an extractor from a fixed keyword table; anything the table does not claim
//! becomes an implicit task.

use chrono::{Local, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::command::{BlockKind, CommandKind, EventKind, ParsedCommand, QuickAction};
use super::task::{build_task, parse_task, ParsedTask};
use crate::config::ParserConfig;
use crate::core::{parse_time_expression, ClockTime, TimeSpec};

const TIME_HINT: &str = "Add a time like 9-11, 930-1030 or 2pm-3:30pm";
const DURATION_HINT: &str = "Add an end time or a duration, e.g. now+1h or 10:30-45m";
const TASK_HINT: &str = "Use format: tsk <name> <minutes>, e.g. tsk write report 45";
const BATCH_HINT: &str = "Separate commands with '/', e.g. batch blk deep 9-11 / evt standup 1130-1145";
const EMPTY_HINT: &str = "Type a command, e.g. blk deep 9-11";

type Extractor = fn(&CommandParser, &Line<'_>) -> ParsedCommand;

/// Keyword table. Every keyword maps to exactly one extractor.
const DISPATCH_TABLE: &[(&[&str], Extractor)] = &[
    (
        &["blk", "block", "deep", "admin", "break", "exercise", "personal"],
        CommandParser::extract_block,
    ),
    (
        &["evt", "event", "meeting", "standup", "call", "review"],
        CommandParser::extract_event,
    ),
    (&["rtn", "routine"], CommandParser::extract_routine),
    (&["tsk", "task"], CommandParser::extract_task),
    (&["batch"], CommandParser::extract_batch),
    (&["tmpl", "template"], CommandParser::extract_template),
    (&["/", "ai"], CommandParser::extract_ai),
    (&["now", "next", "clear", "undo"], CommandParser::extract_quick),
];

/// Keywords that are also everyday words. They only dispatch when they stand
/// alone or are followed by a time expression or an `@attendee`.
const WORD_KEYWORDS: &[&str] = &[
    "deep", "admin", "break", "exercise", "personal", "meeting", "standup", "call", "review",
];

static IMPLICIT_TASK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)-(\d+)$").unwrap_or_else(|e| panic!("Invalid implicit task regex: {e}"))
});

/// One tokenized input line.
struct Line<'a> {
    /// Trimmed input.
    input: &'a str,
    tokens: Vec<&'a str>,
    /// Lowercased first token.
    keyword: String,
    now: NaiveTime,
}

impl<'a> Line<'a> {
    fn new(input: &'a str, now: NaiveTime) -> Self {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let keyword = tokens.first().map(|t| t.to_lowercase()).unwrap_or_default();
        Self {
            input,
            tokens,
            keyword,
            now,
        }
    }

    /// Tokens after the keyword.
    fn rest(&self) -> &[&'a str] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// Input after the keyword, with original spacing.
    fn remainder(&self) -> &'a str {
        let first = self.tokens.first().map_or(0, |t| t.len());
        self.input.get(first..).unwrap_or_default().trim()
    }

    fn time(&self, token: &str) -> TimeSpec {
        parse_time_expression(token, self.now)
    }
}

/// Stateless quick-entry parser.
///
/// Construct one per caller; it holds only configuration and can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct CommandParser {
    config: ParserConfig,
}

impl CommandParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a line against the local wall clock.
    #[must_use]
    pub fn parse(&self, input: &str) -> ParsedCommand {
        self.parse_at(input, Local::now().time())
    }

    /// Parse a line against an explicit clock reading.
    ///
    /// The clock only matters for relative expressions (`now`, `now+1h`,
    /// `30m`) and the bare `blk` default.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveTime;
    /// use quickentry::features::nlp::{CommandKind, CommandParser};
    ///
    /// let now = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    /// let cmd = CommandParser::new().parse_at("deep 9-11", now);
    /// assert_eq!(cmd.kind, CommandKind::Block);
    /// assert_eq!(cmd.subtype.as_deref(), Some("deep-work"));
    /// assert!(cmd.is_valid);
    /// ```
    #[must_use]
    pub fn parse_at(&self, input: &str, now: NaiveTime) -> ParsedCommand {
        let input = input.trim();
        if input.is_empty() {
            return ParsedCommand::new(CommandKind::Block).with_suggestion(EMPTY_HINT);
        }

        let command = self.dispatch(&Line::new(input, now));
        debug!(
            input,
            kind = %command.kind,
            subtype = command.subtype.as_deref().unwrap_or(""),
            valid = command.is_valid,
            "parsed quick-entry line"
        );
        command
    }

    /// Parse every command string stored in a batch.
    ///
    /// Returns an empty list for non-batch commands. Nested batches come back
    /// as batch commands and are not expanded further.
    #[must_use]
    pub fn expand_batch(&self, command: &ParsedCommand, now: NaiveTime) -> Vec<ParsedCommand> {
        if command.kind != CommandKind::Batch {
            return Vec::new();
        }
        command
            .metadata
            .commands
            .iter()
            .map(|c| self.parse_at(c, now))
            .collect()
    }

    fn dispatch(&self, line: &Line<'_>) -> ParsedCommand {
        match self.lookup(line) {
            Some(extractor) => extractor(self, line),
            None => self.fallback(line),
        }
    }

    fn lookup(&self, line: &Line<'_>) -> Option<Extractor> {
        let keyword = line.keyword.as_str();

        if keyword.starts_with("now+") && !line.time(keyword).is_empty() {
            return Some(Self::extract_quick);
        }
        if keyword.starts_with('/') {
            return Some(Self::extract_ai);
        }

        let extractor = DISPATCH_TABLE
            .iter()
            .find(|(keywords, _)| keywords.contains(&keyword))
            .map(|(_, extractor)| *extractor)?;

        if WORD_KEYWORDS.contains(&keyword) {
            if let Some(next) = line.rest().first() {
                if !next.starts_with('@') && line.time(next).is_empty() {
                    trace!(keyword, next, "word keyword without time, treating as text");
                    return None;
                }
            }
        }

        Some(extractor)
    }

    fn extract_block(&self, line: &Line<'_>) -> ParsedCommand {
        let tokens = &line.tokens;

        if tokens.len() == 1 && matches!(line.keyword.as_str(), "blk" | "block") {
            return self.default_block(line.now);
        }

        let (kind, time_index) = tokens
            .iter()
            .take(2)
            .enumerate()
            .find_map(|(i, t)| BlockKind::from_token(t).map(|kind| (kind, i + 1)))
            .unwrap_or((BlockKind::default(), 1));

        let mut command = ParsedCommand::new(CommandKind::Block).with_subtype(kind.as_str());

        let Some(time_token) = tokens.get(time_index) else {
            command.metadata.needs_time = true;
            return command.with_suggestion(format!("{TIME_HINT} to schedule the {kind} block"));
        };

        let time = line.time(time_token);
        if time.is_empty() {
            command.metadata.invalid_time = true;
            return command.with_suggestion(format!("Could not read '{time_token}' as a time. {TIME_HINT}"));
        }

        command = command.with_time(time);
        command.tasks = tokens
            .get(time_index + 1..)
            .unwrap_or_default()
            .iter()
            .filter_map(|t| parse_task(t))
            .collect();

        if !time.is_complete() {
            command.metadata.needs_duration = true;
            return command.with_suggestion(DURATION_HINT);
        }

        let preview = block_preview(kind, &command);
        command.with_preview(preview).valid()
    }

    /// `blk` on its own: a deep-work block at the nearest half hour.
    fn default_block(&self, now: NaiveTime) -> ParsedCommand {
        let start = ClockTime::from_naive(now).round_to_half_hour();
        let minutes = i32::try_from(self.config.default_block_minutes.max(1)).unwrap_or(60);
        let time = TimeSpec {
            duration: Some(minutes),
            ..TimeSpec::starting_at(start)
        };
        let command = ParsedCommand::new(CommandKind::Block)
            .with_subtype(BlockKind::DeepWork.as_str())
            .with_time(time);
        let preview = block_preview(BlockKind::DeepWork, &command);
        command.with_preview(preview).valid()
    }

    fn extract_event(&self, line: &Line<'_>) -> ParsedCommand {
        let (kind, rest) = match EventKind::from_token(&line.keyword) {
            Some(kind) => (kind, line.rest()),
            None => line
                .rest()
                .split_first()
                .and_then(|(first, rest)| EventKind::from_token(first).map(|kind| (kind, rest)))
                .unwrap_or_else(|| (EventKind::default(), line.rest())),
        };

        let mut command = ParsedCommand::new(CommandKind::Event).with_subtype(kind.as_str());
        let mut title = Vec::new();

        for token in rest {
            if let Some(name) = token.strip_prefix('@') {
                if !name.is_empty() {
                    command.attendees.push(name.to_string());
                }
                continue;
            }
            if command.time_start.is_none() {
                let time = line.time(token);
                if !time.is_empty() {
                    command = command.with_time(time);
                    continue;
                }
            }
            title.push(*token);
        }

        if !title.is_empty() {
            command.metadata.title = Some(title.join(" "));
        }

        let preview = event_preview(kind, &command);
        command.with_preview(preview).valid()
    }

    fn extract_routine(&self, line: &Line<'_>) -> ParsedCommand {
        let name = line.rest().join(" ");
        let command = ParsedCommand::new(CommandKind::Routine).valid();
        if name.is_empty() {
            return command
                .with_suggestion("Select a routine")
                .with_preview("Choose a routine");
        }
        let preview = format!("Start routine '{name}'");
        command.with_subtype(name).with_preview(preview)
    }

    fn extract_task(&self, line: &Line<'_>) -> ParsedCommand {
        let joined = line.rest().join("-");
        match parse_task(&joined) {
            Some(task) => implicit_task(task),
            None => ParsedCommand::new(CommandKind::Task).with_suggestion(TASK_HINT),
        }
    }

    fn extract_batch(&self, line: &Line<'_>) -> ParsedCommand {
        let commands: Vec<String> = line
            .remainder()
            .split('/')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        let mut command = ParsedCommand::new(CommandKind::Batch);
        if commands.is_empty() {
            return command.with_suggestion(BATCH_HINT);
        }

        let preview = format!("Batch of {}", plural(commands.len(), "command"));
        command.metadata.commands = commands;
        command.with_preview(preview).valid()
    }

    fn extract_template(&self, line: &Line<'_>) -> ParsedCommand {
        let name = line.rest().join(" ");
        let command = ParsedCommand::new(CommandKind::Template).valid();
        if name.is_empty() {
            return command
                .with_suggestion("Select a template")
                .with_preview("Choose a template");
        }
        let preview = format!("Apply template '{name}'");
        command.with_subtype(name).with_preview(preview)
    }

    fn extract_ai(&self, line: &Line<'_>) -> ParsedCommand {
        let query = if line.keyword.len() > 1 && line.keyword.starts_with('/') {
            line.input.trim_start_matches('/').trim().to_string()
        } else {
            line.rest().join(" ")
        };

        let preview = if query.is_empty() {
            "Open the assistant".to_string()
        } else {
            format!("Ask the assistant: {query}")
        };

        let mut command = ParsedCommand::new(CommandKind::Ai);
        command.metadata.query = Some(query);
        command.with_preview(preview).valid()
    }

    fn extract_quick(&self, line: &Line<'_>) -> ParsedCommand {
        let keyword = line.keyword.as_str();
        let action = if keyword.starts_with("now+") {
            QuickAction::Now
        } else {
            match QuickAction::from_token(keyword) {
                Some(action) => action,
                None => return self.fallback(line),
            }
        };

        let mut command = ParsedCommand::new(CommandKind::Quick).with_subtype(action.as_str());
        let mut preview = action.describe().to_string();

        if action == QuickAction::Now {
            let source = if keyword.contains('+') {
                Some(keyword)
            } else {
                line.rest().first().copied()
            };
            let time = source.map(|s| line.time(s)).unwrap_or_default();
            if !time.is_empty() {
                command = command.with_time(time);
                if let Some(minutes) = time.duration {
                    preview = format!("{preview} for {minutes} minutes");
                }
            }
        }

        command.with_preview(preview).valid()
    }

    /// Lines no keyword claims become tasks.
    fn fallback(&self, line: &Line<'_>) -> ParsedCommand {
        if let Some(task) = IMPLICIT_TASK
            .captures(line.input)
            .and_then(|caps| build_task(&caps[1], &caps[2]))
        {
            debug!(input = line.input, "implicit task with duration");
            return implicit_task(task);
        }

        debug!(input = line.input, "implicit task with default duration");
        let minutes = self.config.implicit_task_minutes.max(1);
        implicit_task(ParsedTask::new(line.input, minutes))
    }
}

/// A valid task command holding a single task.
fn implicit_task(task: ParsedTask) -> ParsedCommand {
    let preview = format!("Task: {} ({} minutes)", task.name, task.duration);
    let mut command = ParsedCommand::new(CommandKind::Task);
    command.tasks.push(task);
    command.with_preview(preview).valid()
}

fn block_preview(kind: BlockKind, command: &ParsedCommand) -> String {
    let mut preview = format!("{kind} block");
    push_time(&mut preview, " from", command);
    if !command.tasks.is_empty() {
        preview.push_str(" with ");
        preview.push_str(&plural(command.tasks.len(), "task"));
    }
    preview
}

fn event_preview(kind: EventKind, command: &ParsedCommand) -> String {
    let mut preview = kind.to_string();
    if let Some(title) = &command.metadata.title {
        preview.push_str(": ");
        preview.push_str(title);
    }
    if command.time_start.is_some() {
        push_time(&mut preview, " at", command);
    } else {
        preview.push_str(" (time to be scheduled)");
    }
    if !command.attendees.is_empty() {
        preview.push_str(" with ");
        preview.push_str(&command.attendees.join(", "));
    }
    preview
}

/// Append "<lead> <start>" plus " to <end>" or " for <n> minutes".
fn push_time(preview: &mut String, lead: &str, command: &ParsedCommand) {
    let Some(start) = command.time_start else {
        return;
    };
    preview.push_str(&format!("{lead} {start}"));
    if let Some(end) = command.time_end {
        preview.push_str(&format!(" to {end}"));
    } else if let Some(minutes) = command.duration {
        preview.push_str(&format!(" for {minutes} minutes"));
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Parse a line with default configuration against the local clock.
#[must_use]
pub fn parse(input: &str) -> ParsedCommand {
    CommandParser::new().parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveTime {
        NaiveTime::from_hms_opt(8, 10, 0).unwrap()
    }

    fn clock(hour: u32, minute: u32) -> Option<ClockTime> {
        ClockTime::new(hour, minute)
    }

    fn parse(input: &str) -> ParsedCommand {
        CommandParser::new().parse_at(input, now())
    }

    // ==========
    // Empty Input
    // ==========

    #[test]
    fn test_empty_input() {
        let cmd = parse("");
        assert_eq!(cmd.kind, CommandKind::Block);
        assert!(!cmd.is_valid);
        assert!(cmd.suggestion.is_some());

        assert_eq!(parse("   \t "), cmd);
    }

    // ============
    // Block Tests
    // ============

    #[test]
    fn test_block_via_subtype_keyword() {
        let cmd = parse("deep 9-11");
        assert_eq!(cmd.kind, CommandKind::Block);
        assert_eq!(cmd.subtype.as_deref(), Some("deep-work"));
        assert_eq!(cmd.time_start, clock(9, 0));
        assert_eq!(cmd.time_end, clock(11, 0));
        assert_eq!(cmd.duration, Some(120));
        assert!(cmd.is_valid);
        assert_eq!(cmd.preview.as_deref(), Some("deep-work block from 09:00 to 11:00"));
    }

    #[test]
    fn test_block_with_tasks() {
        let cmd = parse("blk deep 930-1030 1-read-30 write-notes-20");
        assert!(cmd.is_valid);
        assert_eq!(cmd.time_start, clock(9, 30));
        assert_eq!(cmd.duration, Some(60));
        assert_eq!(
            cmd.tasks,
            vec![
                ParsedTask::new("read", 30).with_order(1),
                ParsedTask::new("write notes", 20),
            ]
        );
        assert_eq!(
            cmd.preview.as_deref(),
            Some("deep-work block from 09:30 to 10:30 with 2 tasks")
        );
    }

    #[test]
    fn test_block_drops_unparsable_tasks() {
        let cmd = parse("blk admin 1400-1500 email inbox-20");
        assert!(cmd.is_valid);
        assert_eq!(cmd.subtype.as_deref(), Some("admin"));
        assert_eq!(cmd.tasks, vec![ParsedTask::new("inbox", 20)]);
        assert!(cmd.preview.unwrap().ends_with("with 1 task"));
    }

    #[test]
    fn test_block_missing_time() {
        let cmd = parse("blk deep");
        assert!(!cmd.is_valid);
        assert!(cmd.metadata.needs_time);
        assert!(cmd.suggestion.is_some());
        assert_eq!(cmd.subtype.as_deref(), Some("deep-work"));
    }

    #[test]
    fn test_bare_subtype_keyword_needs_time() {
        let cmd = parse("exercise");
        assert_eq!(cmd.kind, CommandKind::Block);
        assert_eq!(cmd.subtype.as_deref(), Some("exercise"));
        assert!(cmd.metadata.needs_time);
    }

    #[test]
    fn test_block_invalid_time() {
        let cmd = parse("blk deep xyz");
        assert!(!cmd.is_valid);
        assert!(cmd.metadata.invalid_time);
        assert!(cmd.suggestion.unwrap().contains("xyz"));
    }

    #[test]
    fn test_block_without_subtype_defaults_to_deep_work() {
        let cmd = parse("blk 1-3pm");
        assert!(cmd.is_valid);
        assert_eq!(cmd.subtype.as_deref(), Some("deep-work"));
        assert_eq!(cmd.time_start, clock(1, 0));
        assert_eq!(cmd.time_end, clock(15, 0));
    }

    #[test]
    fn test_bare_blk_defaults() {
        let cmd = parse("blk");
        assert!(cmd.is_valid);
        assert_eq!(cmd.subtype.as_deref(), Some("deep-work"));
        assert_eq!(cmd.time_start, clock(8, 0));
        assert_eq!(cmd.duration, Some(60));
        assert_eq!(cmd.time_end, None);
        assert_eq!(cmd.preview.as_deref(), Some("deep-work block from 08:00 for 60 minutes"));

        assert_eq!(parse("BLOCK"), cmd);
    }

    #[test]
    fn test_bare_blk_respects_config() {
        let parser = CommandParser::with_config(ParserConfig {
            default_block_minutes: 90,
            ..ParserConfig::default()
        });
        let cmd = parser.parse_at("blk", NaiveTime::from_hms_opt(13, 20, 0).unwrap());
        assert_eq!(cmd.time_start, clock(13, 30));
        assert_eq!(cmd.duration, Some(90));
    }

    #[test]
    fn test_block_start_without_length() {
        let cmd = parse("blk break now");
        assert!(!cmd.is_valid);
        assert!(cmd.metadata.needs_duration);
        assert_eq!(cmd.time_start, clock(8, 10));
        assert!(cmd.suggestion.is_some());
    }

    #[test]
    fn test_block_relative_duration() {
        let cmd = parse("break 15m");
        assert!(cmd.is_valid);
        assert_eq!(cmd.subtype.as_deref(), Some("break"));
        assert_eq!(cmd.time_start, clock(8, 10));
        assert_eq!(cmd.duration, Some(15));
        assert_eq!(cmd.preview.as_deref(), Some("break block from 08:10 for 15 minutes"));
    }

    #[test]
    fn test_block_overnight_range_is_preserved() {
        let cmd = parse("blk personal 2300-0100");
        assert!(cmd.is_valid);
        assert_eq!(cmd.duration, Some(-1320));
    }

    #[test]
    fn test_block_duration_consistency() {
        for input in ["blk deep 930-1030", "admin 2pm-3:30pm", "personal 7-8"] {
            let cmd = parse(input);
            let start = cmd.time_start.unwrap().minutes_since_midnight();
            let end = cmd.time_end.unwrap().minutes_since_midnight();
            assert_eq!(cmd.duration, Some(end - start), "{input}");
        }
    }

    // ============
    // Event Tests
    // ============

    #[test]
    fn test_event_with_attendees() {
        let cmd = parse("evt standup 1000-1015 @sam @alex");
        assert_eq!(cmd.kind, CommandKind::Event);
        assert_eq!(cmd.subtype.as_deref(), Some("standup"));
        assert_eq!(cmd.time_start, clock(10, 0));
        assert_eq!(cmd.duration, Some(15));
        assert_eq!(cmd.attendees, vec!["sam", "alex"]);
        assert!(cmd.is_valid);
    }

    #[test]
    fn test_event_defaults_to_meeting_without_time() {
        let cmd = parse("evt");
        assert_eq!(cmd.subtype.as_deref(), Some("meeting"));
        assert!(cmd.is_valid);
        assert_eq!(cmd.time_start, None);
        assert_eq!(cmd.preview.as_deref(), Some("meeting (time to be scheduled)"));
    }

    #[test]
    fn test_event_time_plus_hours() {
        let cmd = parse("evt meeting 2pm-1h @jo");
        assert_eq!(cmd.time_start, clock(14, 0));
        assert_eq!(cmd.duration, Some(60));
        assert_eq!(cmd.preview.as_deref(), Some("meeting at 14:00 for 60 minutes with jo"));
    }

    #[test]
    fn test_event_subtype_keyword_with_time() {
        let cmd = parse("call 3pm-4pm @pat");
        assert_eq!(cmd.kind, CommandKind::Event);
        assert_eq!(cmd.subtype.as_deref(), Some("call"));
        assert_eq!(cmd.time_start, clock(15, 0));
        assert_eq!(cmd.attendees, vec!["pat"]);
    }

    #[test]
    fn test_event_title_words() {
        let cmd = parse("event review 1600-1630 design doc @kim");
        assert_eq!(cmd.subtype.as_deref(), Some("review"));
        assert_eq!(cmd.metadata.title.as_deref(), Some("design doc"));
        assert_eq!(
            cmd.preview.as_deref(),
            Some("review: design doc at 16:00 to 16:30 with kim")
        );
    }

    #[test]
    fn test_event_unresolved_time_is_still_valid() {
        let cmd = parse("evt call sometime");
        assert!(cmd.is_valid);
        assert_eq!(cmd.time_start, None);
        assert_eq!(cmd.metadata.title.as_deref(), Some("sometime"));
    }

    // =====================
    // Word Keyword Fallback
    // =====================

    #[test]
    fn test_word_keyword_without_time_is_task() {
        let cmd = parse("review code-30");
        assert_eq!(cmd.kind, CommandKind::Task);
        assert_eq!(cmd.tasks, vec![ParsedTask::new("review code", 30)]);
        assert!(cmd.is_valid);
    }

    #[test]
    fn test_word_keyword_with_attendee_is_event() {
        let cmd = parse("standup @sam");
        assert_eq!(cmd.kind, CommandKind::Event);
        assert_eq!(cmd.subtype.as_deref(), Some("standup"));
        assert_eq!(cmd.attendees, vec!["sam"]);
        assert!(cmd.is_valid);

        let cmd = parse("meeting @ana 9-10");
        assert_eq!(cmd.attendees, vec!["ana"]);
        assert_eq!(cmd.time_start, clock(9, 0));
    }

    #[test]
    fn test_call_mom_is_task() {
        let cmd = parse("call mom");
        assert_eq!(cmd.kind, CommandKind::Task);
        assert_eq!(cmd.tasks, vec![ParsedTask::new("call mom", 30)]);
    }

    // =============
    // Routine Tests
    // =============

    #[test]
    fn test_routine_with_name() {
        let cmd = parse("rtn morning pages");
        assert_eq!(cmd.kind, CommandKind::Routine);
        assert_eq!(cmd.subtype.as_deref(), Some("morning pages"));
        assert!(cmd.is_valid);
        assert!(cmd.suggestion.is_none());
    }

    #[test]
    fn test_routine_without_name() {
        let cmd = parse("routine");
        assert!(cmd.is_valid);
        assert_eq!(cmd.subtype, None);
        assert_eq!(cmd.suggestion.as_deref(), Some("Select a routine"));
    }

    // ==========
    // Task Tests
    // ==========

    #[test]
    fn test_task_command() {
        let cmd = parse("tsk write report 45");
        assert_eq!(cmd.kind, CommandKind::Task);
        assert_eq!(cmd.tasks, vec![ParsedTask::new("write report", 45)]);
        assert!(cmd.is_valid);
        assert_eq!(cmd.preview.as_deref(), Some("Task: write report (45 minutes)"));
    }

    #[test]
    fn test_task_command_with_order() {
        let cmd = parse("task 2 outline talk 25");
        assert_eq!(cmd.tasks, vec![ParsedTask::new("outline talk", 25).with_order(2)]);
    }

    #[test]
    fn test_task_command_without_duration() {
        let cmd = parse("tsk write report");
        assert_eq!(cmd.kind, CommandKind::Task);
        assert!(!cmd.is_valid);
        assert!(cmd.tasks.is_empty());
        assert!(cmd.suggestion.unwrap().starts_with("Use format"));
    }

    // ===========
    // Batch Tests
    // ===========

    #[test]
    fn test_batch_splitting() {
        let cmd = parse("batch a/b/c");
        assert_eq!(cmd.kind, CommandKind::Batch);
        assert_eq!(cmd.metadata.commands, vec!["a", "b", "c"]);
        assert!(cmd.is_valid);
    }

    #[test]
    fn test_batch_trims_and_drops_empty_pieces() {
        let cmd = parse("batch blk deep 9-11 /  / evt standup 1130-1145 ");
        assert_eq!(
            cmd.metadata.commands,
            vec!["blk deep 9-11", "evt standup 1130-1145"]
        );
        assert_eq!(cmd.preview.as_deref(), Some("Batch of 2 commands"));
    }

    #[test]
    fn test_empty_batch_is_invalid() {
        let cmd = parse("batch / /");
        assert!(!cmd.is_valid);
        assert!(cmd.suggestion.is_some());
    }

    #[test]
    fn test_expand_batch() {
        let parser = CommandParser::new();
        let batch = parser.parse_at("batch deep 9-11 / evt standup 1130-1145 / undo", now());
        let expanded = parser.expand_batch(&batch, now());
        let kinds: Vec<_> = expanded.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CommandKind::Block, CommandKind::Event, CommandKind::Quick]);

        let not_batch = parser.parse_at("undo", now());
        assert!(parser.expand_batch(&not_batch, now()).is_empty());
    }

    // ==============
    // Template Tests
    // ==============

    #[test]
    fn test_template() {
        let cmd = parse("tmpl focus day");
        assert_eq!(cmd.kind, CommandKind::Template);
        assert_eq!(cmd.subtype.as_deref(), Some("focus day"));
        assert!(cmd.is_valid);
        assert!(parse("template").is_valid);
    }

    // ========
    // AI Tests
    // ========

    #[test]
    fn test_ai_query() {
        let cmd = parse("ai plan my afternoon");
        assert_eq!(cmd.kind, CommandKind::Ai);
        assert_eq!(cmd.metadata.query.as_deref(), Some("plan my afternoon"));
        assert!(cmd.is_valid);
    }

    #[test]
    fn test_slash_query() {
        assert_eq!(
            parse("/ what next").metadata.query.as_deref(),
            Some("what next")
        );
        assert_eq!(
            parse("/what next").metadata.query.as_deref(),
            Some("what next")
        );
    }

    #[test]
    fn test_empty_ai_query() {
        let cmd = parse("/");
        assert!(cmd.is_valid);
        assert_eq!(cmd.metadata.query.as_deref(), Some(""));
        assert_eq!(cmd.preview.as_deref(), Some("Open the assistant"));
    }

    // ==================
    // Quick Action Tests
    // ==================

    #[test]
    fn test_quick_actions() {
        for action in ["now", "next", "clear", "undo"] {
            let cmd = parse(action);
            assert_eq!(cmd.kind, CommandKind::Quick);
            assert_eq!(cmd.subtype.as_deref(), Some(action));
            assert!(cmd.is_valid);
        }
    }

    #[test]
    fn test_quick_now_with_duration() {
        let cmd = parse("now+1h");
        assert_eq!(cmd.kind, CommandKind::Quick);
        assert_eq!(cmd.subtype.as_deref(), Some("now"));
        assert_eq!(cmd.time_start, clock(8, 10));
        assert_eq!(cmd.duration, Some(60));
        assert_eq!(cmd.preview.as_deref(), Some("Start now for 60 minutes"));

        assert_eq!(parse("now 30m").duration, Some(30));
    }

    // ==============
    // Fallback Tests
    // ==============

    #[test]
    fn test_fallback_default_duration() {
        let cmd = parse("just write something");
        assert_eq!(cmd.kind, CommandKind::Task);
        assert_eq!(cmd.tasks, vec![ParsedTask::new("just write something", 30)]);
        assert!(cmd.is_valid);
    }

    #[test]
    fn test_fallback_respects_config() {
        let parser = CommandParser::with_config(ParserConfig {
            implicit_task_minutes: 25,
            ..ParserConfig::default()
        });
        let cmd = parser.parse_at("tidy desk", now());
        assert_eq!(cmd.tasks, vec![ParsedTask::new("tidy desk", 25)]);
    }

    #[test]
    fn test_fallback_zero_duration_uses_default() {
        let cmd = parse("stretch-0");
        assert_eq!(cmd.tasks, vec![ParsedTask::new("stretch-0", 30)]);
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let cmd = parse("BLK Deep 9-11");
        assert_eq!(cmd.kind, CommandKind::Block);
        assert_eq!(cmd.subtype.as_deref(), Some("deep-work"));
        assert!(cmd.is_valid);
    }

    // ===========
    // Determinism
    // ===========

    #[test]
    fn test_parse_is_deterministic() {
        for input in ["blk deep 930-1030 1-read-30", "evt call now @a", "blk", "hello"] {
            assert_eq!(parse(input), parse(input), "{input}");
        }
    }

    #[test]
    fn test_every_invalid_command_explains_itself() {
        for input in ["", "blk deep", "blk deep xyz", "blk deep now", "tsk nope", "batch /"] {
            let cmd = parse(input);
            assert!(!cmd.is_valid, "{input}");
            assert!(
                cmd.suggestion.is_some() || !cmd.metadata.is_empty(),
                "{input}"
            );
        }
    }
}
