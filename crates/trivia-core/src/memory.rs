//! In-memory stores for tests and ephemeral play.

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::model::ScoreEntry;
use crate::session::expiry_after;
use crate::traits::{LedgerStore, SessionStore};

/// A session store that lives only as long as the process.
///
/// Expiry is honoured against the wall clock, the same way a cookie would be.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    username: Option<(String, DateTime<Utc>)>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already remembers `username` for `ttl_days`.
    ///
    /// A TTL past the calendar's range never expires.
    pub fn with_user(username: &str, ttl_days: u32) -> Self {
        let expires = expiry_after(Utc::now(), ttl_days).unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            username: Some((username.to_string(), expires)),
        }
    }

    /// When the stored identity expires, if one was ever set.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.username.as_ref().map(|(_, expires)| *expires)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.username
            .as_ref()
            .filter(|(_, expires)| *expires > Utc::now())
            .map(|(name, _)| name.clone())
    }

    fn set(&mut self, username: &str, ttl_days: u32) -> anyhow::Result<()> {
        let expires = expiry_after(Utc::now(), ttl_days)
            .with_context(|| format!("session lifetime of {ttl_days} days is out of range"))?;
        self.username = Some((username.to_string(), expires));
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        self.username = None;
        Ok(())
    }
}

/// A ledger kept in a vector.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    entries: Vec<ScoreEntry>,
    saves: usize,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<ScoreEntry>) -> Self {
        Self { entries, saves: 0 }
    }

    /// Number of full rewrites performed so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> anyhow::Result<Vec<ScoreEntry>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> anyhow::Result<()> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}
