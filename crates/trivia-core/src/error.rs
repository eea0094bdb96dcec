//! Error types shared across the trivia crates.
//!
//! `SourceError` is defined here rather than in `trivia-providers` so the
//! game engine can downcast fetch failures for logging without string
//! matching.

use thiserror::Error;

/// Errors that can occur while fetching a batch of questions.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The question bank answered with a non-zero response code.
    #[error("question bank response code {code}: {message}")]
    ResponseCode { code: u8, message: String },

    /// The API returned an HTTP error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The body could not be decoded into questions.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl SourceError {
    /// Returns `true` if the same request is expected to fail again.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            SourceError::ResponseCode { code: 1..=2, .. } | SourceError::MalformedResponse(_)
        )
    }
}

/// Errors surfaced by player actions on the game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Submission was blocked because no player name was given.
    #[error("a player name is required")]
    UsernameRequired,

    /// The selected question is not part of the current round.
    #[error("no question at index {0}")]
    NoSuchQuestion(usize),

    /// The selected option does not exist on the question.
    #[error("question {question} has no choice {choice}")]
    NoSuchChoice { question: usize, choice: usize },
}
