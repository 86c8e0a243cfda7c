//! Command implementations for quickentry.
//!
//! Every command returns the text to print; `main` writes it to stdout.

mod config;
mod parse;
mod shell;

pub use config::config;
pub use parse::{parse, pipe, suggest, time};
pub use shell::completions;
