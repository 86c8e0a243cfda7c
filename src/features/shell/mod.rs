//! Shell integration.
//!
//! Completion scripts for the `quickentry` binary.

pub mod completions;

pub use completions::generate_completions;
