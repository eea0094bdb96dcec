//! A cookie jar file and the session store built on it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trivia_core::session::expiry_after;
use trivia_core::traits::SessionStore;

/// Cookie name holding the remembered player.
pub const USERNAME_COOKIE: &str = "username";

/// One stored cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub expires: DateTime<Utc>,
}

impl Cookie {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }

    /// Render in `document.cookie` assignment form.
    pub fn to_cookie_string(&self) -> String {
        format!(
            "{}={}; path={}; expires={}",
            self.name,
            self.value,
            self.path,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT")
        )
    }
}

/// Cookies persisted as a JSON array in one file.
#[derive(Debug, Clone)]
pub struct CookieJar {
    path: PathBuf,
}

impl CookieJar {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Every stored cookie, expired or not. A missing file is an empty jar.
    pub fn load(&self) -> Result<Vec<Cookie>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read cookie jar {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("corrupt cookie jar {}", self.path.display()))
    }

    /// The live cookie called `name` at `now`.
    pub fn get(&self, name: &str, now: DateTime<Utc>) -> Option<Cookie> {
        let cookies = match self.load() {
            Ok(cookies) => cookies,
            Err(e) => {
                tracing::warn!("cookie jar unreadable, treating as empty: {e:#}");
                return None;
            }
        };
        cookies
            .into_iter()
            .find(|c| c.name == name && !c.is_expired_at(now))
    }

    /// Store `cookie`, replacing any cookie with the same name and path.
    ///
    /// Expired cookies are dropped on write, so storing an already expired
    /// cookie deletes it.
    pub fn put(&self, cookie: Cookie) -> Result<()> {
        let now = Utc::now();
        let mut cookies: Vec<Cookie> = self
            .load()
            .unwrap_or_else(|e| {
                tracing::warn!("discarding unreadable cookie jar: {e:#}");
                Vec::new()
            })
            .into_iter()
            .filter(|c| !(c.name == cookie.name && c.path == cookie.path))
            .collect();
        cookies.push(cookie);
        cookies.retain(|c| !c.is_expired_at(now));

        let json = serde_json::to_string_pretty(&cookies).context("failed to serialize cookies")?;
        crate::write_atomic(&self.path, &json)
    }
}

/// The remembered player, kept in the `username` cookie at path `/`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    jar: CookieJar,
}

impl FileSessionStore {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    /// The live session cookie, for display.
    pub fn cookie(&self) -> Option<Cookie> {
        self.jar.get(USERNAME_COOKIE, Utc::now())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        self.cookie().map(|c| c.value)
    }

    fn set(&mut self, username: &str, ttl_days: u32) -> Result<()> {
        let expires = expiry_after(Utc::now(), ttl_days)
            .with_context(|| format!("cookie lifetime of {ttl_days} days is out of range"))?;
        self.jar.put(Cookie {
            name: USERNAME_COOKIE.to_string(),
            value: username.to_string(),
            path: "/".to_string(),
            expires,
        })
    }

    fn clear(&mut self) -> Result<()> {
        self.jar.put(Cookie {
            name: USERNAME_COOKIE.to_string(),
            value: String::new(),
            path: "/".to_string(),
            expires: DateTime::<Utc>::UNIX_EPOCH,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn jar_in(dir: &tempfile::TempDir) -> CookieJar {
        CookieJar::open(dir.path().join("cookies.json"))
    }

    #[test]
    fn missing_jar_has_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(jar_in(&dir));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(jar_in(&dir));
        store.set("Ada", 7).unwrap();

        let reopened = FileSessionStore::new(jar_in(&dir));
        assert_eq!(reopened.get().as_deref(), Some("Ada"));

        let cookie = reopened.cookie().unwrap();
        assert_eq!(cookie.path, "/");
        let days = (cookie.expires - Utc::now()).num_days();
        assert!((6..=7).contains(&days), "expires in {days} days");
    }

    #[test]
    fn set_replaces_previous_player() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(jar_in(&dir));
        store.set("Ada", 7).unwrap();
        store.set("Bob", 7).unwrap();
        assert_eq!(store.get().as_deref(), Some("Bob"));
        assert_eq!(jar_in(&dir).load().unwrap().len(), 1);
    }

    #[test]
    fn clear_expires_the_cookie() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(jar_in(&dir));
        store.set("Ada", 7).unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(), None);
        assert!(jar_in(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn expired_cookie_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let jar = jar_in(&dir);
        let expired = Cookie {
            name: USERNAME_COOKIE.into(),
            value: "Ada".into(),
            path: "/".into(),
            expires: Utc::now() - Duration::hours(1),
        };
        let json = serde_json::to_string(&vec![expired]).unwrap();
        std::fs::write(jar.path(), json).unwrap();

        assert!(jar.get(USERNAME_COOKIE, Utc::now()).is_none());
        assert_eq!(jar.load().unwrap().len(), 1);
    }

    #[test]
    fn unrelated_cookies_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let jar = jar_in(&dir);
        jar.put(Cookie {
            name: "theme".into(),
            value: "dark".into(),
            path: "/".into(),
            expires: Utc::now() + Duration::days(30),
        })
        .unwrap();

        let mut store = FileSessionStore::new(jar.clone());
        store.set("Ada", 7).unwrap();
        store.clear().unwrap();

        let left = jar.load().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].name, "theme");
    }

    #[test]
    fn out_of_range_ttl_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(jar_in(&dir));
        store.set("Ada", 7).unwrap();

        let err = store.set("Bob", 200_000_000).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert_eq!(store.get().as_deref(), Some("Ada"));
    }

    #[test]
    fn corrupt_jar_degrades_to_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let jar = jar_in(&dir);
        std::fs::write(jar.path(), "{not json").unwrap();

        let mut store = FileSessionStore::new(jar);
        assert_eq!(store.get(), None);
        store.set("Ada", 7).unwrap();
        assert_eq!(store.get().as_deref(), Some("Ada"));
    }

    #[test]
    fn cookie_string_format() {
        let cookie = Cookie {
            name: "username".into(),
            value: "Ada".into(),
            path: "/".into(),
            expires: DateTime::<Utc>::UNIX_EPOCH,
        };
        assert_eq!(
            cookie.to_cookie_string(),
            "username=Ada; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT"
        );
    }
}
