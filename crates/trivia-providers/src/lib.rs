//! trivia-providers — Question sources and configuration.
//!
//! Implements the `QuestionSource` trait for the Open Trivia Database and an
//! offline mock bank, and loads the `trivia.toml` configuration.

pub mod config;
pub mod entities;
pub mod mock;
pub mod opentdb;

pub use config::{create_source, load_config, SourceConfig, TriviaConfig};
pub use trivia_core::error::SourceError;
