//! Remembered-player session handling.

use chrono::{DateTime, Duration, Utc};

use crate::error::GameError;
use crate::model::Visibility;
use crate::traits::{Renderer, SessionStore};

/// Default lifetime of a remembered player, in days.
pub const DEFAULT_SESSION_TTL_DAYS: u32 = 7;

/// The instant `ttl_days` after `now`, or `None` past the calendar's range.
pub fn expiry_after(now: DateTime<Utc>, ttl_days: u32) -> Option<DateTime<Utc>> {
    Duration::try_days(i64::from(ttl_days)).and_then(|ttl| now.checked_add_signed(ttl))
}

/// Tracks the current player identity and drives the two identity regions.
pub struct SessionManager {
    store: Box<dyn SessionStore>,
    ttl_days: u32,
}

impl SessionManager {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            store,
            ttl_days: DEFAULT_SESSION_TTL_DAYS,
        }
    }

    pub fn with_ttl_days(mut self, ttl_days: u32) -> Self {
        self.ttl_days = ttl_days;
        self
    }

    pub fn ttl_days(&self) -> u32 {
        self.ttl_days
    }

    /// The remembered player, if any.
    pub fn current(&self) -> Option<String> {
        self.store.get()
    }

    /// Read the persisted identity and apply visibility to `renderer`.
    ///
    /// A remembered name is pre-filled into the name field. Calling this
    /// repeatedly without an intervening mutation yields the same result.
    pub fn restore_session(&self, renderer: &mut dyn Renderer) -> Visibility {
        let username = self.store.get();
        let visibility = Visibility::for_session(username.is_some());
        renderer.apply_visibility(visibility, username.as_deref());
        tracing::debug!(remembered = username.is_some(), "session restored");
        visibility
    }

    /// Remember `username` for `ttl_days`.
    ///
    /// The name is trimmed; an empty name is rejected. Storage failures are
    /// logged and leave the session unchanged.
    pub fn set_session(&mut self, username: &str, ttl_days: u32) -> Result<(), GameError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(GameError::UsernameRequired);
        }
        if let Err(e) = self.store.set(username, ttl_days) {
            tracing::error!("failed to persist session for '{username}': {e:#}");
        }
        Ok(())
    }

    /// Forget the current player.
    pub fn clear_session(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::error!("failed to clear session: {e:#}");
        }
    }
}
