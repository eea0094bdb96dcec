//! Core trait definitions for question sources, persistence, and views.
//!
//! The game engine only talks to these narrow contracts. HTTP sources live in
//! `trivia-providers`, file-backed stores in `trivia-store`, and concrete
//! views in `trivia-report` and the CLI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Question, Round, ScoreEntry, Visibility};

/// Questions requested per round unless configured otherwise.
pub const DEFAULT_ROUND_SIZE: u32 = 10;

// ---------------------------------------------------------------------------
// Question source trait
// ---------------------------------------------------------------------------

/// Trait for remote question banks.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "opentdb").
    fn name(&self) -> &str;

    /// Fetch one batch of multiple-choice questions.
    async fn fetch(&self, request: &RoundRequest) -> anyhow::Result<Vec<Question>>;
}

/// Parameters for a single batch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundRequest {
    /// Number of questions to request.
    pub amount: u32,
    /// Optional numeric category filter.
    pub category: Option<u32>,
    /// Optional difficulty filter.
    pub difficulty: Option<Difficulty>,
}

impl Default for RoundRequest {
    fn default() -> Self {
        Self {
            amount: DEFAULT_ROUND_SIZE,
            category: None,
            difficulty: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Persistence traits
// ---------------------------------------------------------------------------

/// The remembered current player.
pub trait SessionStore {
    /// The stored username, or `None` when absent or expired.
    fn get(&self) -> Option<String>;

    /// Persist `username` for `ttl_days` days from now.
    fn set(&mut self, username: &str, ttl_days: u32) -> anyhow::Result<()>;

    /// Expire the stored identity immediately.
    fn clear(&mut self) -> anyhow::Result<()>;
}

/// The full persisted history of score entries.
pub trait LedgerStore {
    /// Load the complete list in stored order.
    fn load(&self) -> anyhow::Result<Vec<ScoreEntry>>;

    /// Overwrite the persisted list with `entries`.
    fn save(&mut self, entries: &[ScoreEntry]) -> anyhow::Result<()>;

    /// Read the ledger, treating an unreadable or corrupt store as empty.
    fn read(&self) -> Vec<ScoreEntry> {
        match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("ledger unreadable, treating as empty: {e:#}");
                Vec::new()
            }
        }
    }

    /// Append one entry, rewriting the whole list.
    fn append(&mut self, entry: ScoreEntry) -> anyhow::Result<()> {
        let mut entries = self.read();
        entries.push(entry);
        self.save(&entries)
    }
}

// ---------------------------------------------------------------------------
// View trait
// ---------------------------------------------------------------------------

/// Presentation capability driven by the game engine.
///
/// Implementations receive structured data and own every detail of how it
/// is shown.
pub trait Renderer {
    /// `true` shows the loading indicator and hides the question area;
    /// `false` does the inverse.
    fn set_loading(&mut self, loading: bool);

    /// Replace every rendered question with `round`.
    fn render_round(&mut self, round: &Round);

    /// Remove every rendered question.
    fn clear_round(&mut self);

    /// Rebuild the ledger table from scratch.
    fn render_ledger(&mut self, entries: &[ScoreEntry]);

    /// Show or hide the name field and the "new player" control. `prefill`
    /// carries the remembered name, if any.
    fn apply_visibility(&mut self, visibility: Visibility, prefill: Option<&str>);

    fn clear_name_field(&mut self);

    fn clear_selections(&mut self);

    /// Show a short message to the player.
    fn show_notice(&mut self, message: &str);
}
