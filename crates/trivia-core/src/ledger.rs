//! The score ledger: append-only history of submissions.

use crate::model::ScoreEntry;
use crate::traits::{LedgerStore, Renderer};

/// Appends score entries to a store and renders them in insertion order.
pub struct ScoreLedger {
    store: Box<dyn LedgerStore>,
}

impl ScoreLedger {
    pub fn new(store: Box<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Every entry in stored order. An unreadable store reads as empty.
    pub fn entries(&self) -> Vec<ScoreEntry> {
        self.store.read()
    }

    /// Append `(username, score)`.
    ///
    /// Returns `false` without touching the store when `username` is empty,
    /// and `false` when the write fails (the failure is logged).
    pub fn append_entry(&mut self, username: &str, score: u32) -> bool {
        if username.is_empty() {
            tracing::debug!("refusing ledger entry without a username");
            return false;
        }
        match self.store.append(ScoreEntry::new(username, score)) {
            Ok(()) => {
                tracing::info!(username, score, "score recorded");
                true
            }
            Err(e) => {
                tracing::error!("failed to record score for '{username}': {e:#}");
                false
            }
        }
    }

    /// Rebuild the ledger view from the store. No sorting is applied.
    pub fn render_ledger(&self, renderer: &mut dyn Renderer) {
        renderer.render_ledger(&self.entries());
    }
}
