//! Configuration management for quickentry.
//!
//! This module handles loading configuration from `~/.quickentry/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, ParserConfig, SuggestionConfig};
