//! Core abstractions for quickentry.
//!
//! This module provides the time grammar used by the command parser and the
//! `time` command.

mod datetime;

pub use datetime::{parse_time_expression, ClockTime, TimeSpec};
