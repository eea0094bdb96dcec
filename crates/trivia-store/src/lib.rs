//! trivia-store — File-backed persistence.
//!
//! Mirrors the two browser stores the game relies on: a cookie jar holding
//! the remembered player and a local-storage file holding the score ledger.
//! Both are plain JSON files under one data directory.

pub mod cookie;
pub mod local_storage;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use cookie::{Cookie, CookieJar, FileSessionStore};
pub use local_storage::{LocalStorage, LocalStorageLedger, SCORES_KEY};

/// The directory holding every persisted file.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cookies_path(&self) -> PathBuf {
        self.root.join("cookies.json")
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root.join("local-storage.json")
    }

    pub fn session_store(&self) -> FileSessionStore {
        FileSessionStore::new(CookieJar::open(self.cookies_path()))
    }

    pub fn ledger_store(&self) -> LocalStorageLedger {
        LocalStorageLedger::new(LocalStorage::open(self.storage_path()))
    }
}

/// Replace `path` with `contents` via a temporary file in the same directory.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .context("failed to write temp file")?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::ScoreEntry;
    use trivia_core::traits::{LedgerStore, SessionStore};

    #[test]
    fn data_dir_layout() {
        let dir = DataDir::new("/var/lib/trivia");
        assert_eq!(dir.cookies_path(), PathBuf::from("/var/lib/trivia/cookies.json"));
        assert_eq!(
            dir.storage_path(),
            PathBuf::from("/var/lib/trivia/local-storage.json")
        );
    }

    #[test]
    fn stores_share_one_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(tmp.path().join("nested"));

        let mut session = dir.session_store();
        let mut ledger = dir.ledger_store();
        session.set("Ada", 7).unwrap();
        ledger.append(ScoreEntry::new("Ada", 7)).unwrap();

        assert!(dir.cookies_path().exists());
        assert!(dir.storage_path().exists());
    }

    #[test]
    fn write_atomic_replaces_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("file.json");
        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
