//! Autocomplete suggestions for partially typed commands.
//!
//! Suggestions are advisory: they help discover the shorthand while typing
//! and do not depend on whether the parser would accept the current input.

mod engine;

pub use engine::{get_suggestions, CommandSuggestion, SuggestionEngine, MAX_SUGGESTIONS};
