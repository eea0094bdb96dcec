//! A local-storage file and the score ledger kept in it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use trivia_core::model::ScoreEntry;
use trivia_core::traits::LedgerStore;

/// Storage key holding the JSON-encoded ledger.
pub const SCORES_KEY: &str = "triviaScores";

/// String key/value pairs persisted as one JSON object.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("corrupt local storage {}", self.path.display()))
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_all()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load_all().unwrap_or_else(|e| {
            tracing::warn!("discarding unreadable local storage: {e:#}");
            BTreeMap::new()
        });
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.load_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(items).context("failed to serialize storage")?;
        crate::write_atomic(&self.path, &json)
    }
}

/// The score ledger stored under one local-storage key.
///
/// The value is always the complete history; every save rewrites it.
#[derive(Debug, Clone)]
pub struct LocalStorageLedger {
    storage: LocalStorage,
    key: String,
}

impl LocalStorageLedger {
    pub fn new(storage: LocalStorage) -> Self {
        Self::with_key(storage, SCORES_KEY)
    }

    pub fn with_key(storage: LocalStorage, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }
}

impl LedgerStore for LocalStorageLedger {
    fn load(&self) -> Result<Vec<ScoreEntry>> {
        match self.storage.get_item(&self.key)? {
            Some(value) => serde_json::from_str(&value)
                .with_context(|| format!("corrupt ledger under '{}'", self.key)),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<()> {
        let value = serde_json::to_string(entries).context("failed to serialize ledger")?;
        self.storage.set_item(&self.key, &value)
    }
}
