//! Quick-entry command parsing.
//!
//! This module turns shorthand schedule commands into structured data:
//! - "blk deep 930-1030 1-read-30" (a deep-work block with one task)
//! - "evt standup 1000-1015 @sam" (an event with an attendee)
//! - "review code-30" (an implicit 30 minute task)

mod command;
mod parser;
mod task;

pub use command::{BlockKind, CommandKind, EventKind, Metadata, ParsedCommand, QuickAction};
pub use parser::{parse, CommandParser};
pub use task::{parse_task, ParsedTask};
