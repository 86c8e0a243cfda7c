//! quickentry - quick-entry command parsing for day scheduling
//!
//! This crate turns shorthand lines like `blk deep 9-11 1-outline-30` into
//! structured schedule commands, and suggests completions for partially
//! typed input.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::QuickEntryError;
pub use features::nlp::{parse, CommandParser, ParsedCommand};
pub use features::suggest::{get_suggestions, CommandSuggestion, SuggestionEngine};
