//! Feature implementations for quickentry.
//!
//! This module contains:
//! - Quick-entry command parsing
//! - Live suggestions
//! - Shell integration

pub mod nlp;
pub mod shell;
pub mod suggest;
