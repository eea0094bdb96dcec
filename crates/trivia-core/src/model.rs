//! Core data model types for trivia.
//!
//! Questions come from a remote source, get rendered into rounds of shuffled
//! choices, and each submission produces one ledger entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A multiple-choice question as delivered by a question source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the player.
    pub prompt: String,
    /// The single right answer.
    pub correct_answer: String,
    /// The wrong answers, in delivery order (three for a multiple-choice item).
    pub incorrect_answers: Vec<String>,
    /// Category label from the source, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// Difficulty label from the source, if any.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
            category: None,
            difficulty: None,
        }
    }

    /// Number of options this question renders to.
    pub fn choice_count(&self) -> usize {
        self.incorrect_answers.len() + 1
    }
}

/// Question difficulty levels offered by the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// One presented answer option bound to a question.
///
/// The correctness marker is only read by the scorer and by views that embed
/// it as hidden markup; it is not part of the displayed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChoice {
    text: String,
    correct: bool,
}

impl RenderedChoice {
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_correct(&self) -> bool {
        self.correct
    }
}

/// A question block as it appears in a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuestion {
    /// Position in the round; also the radio-group key for its choices.
    pub index: usize,
    pub prompt: String,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub choices: Vec<RenderedChoice>,
}

impl RenderedQuestion {
    /// Index of the choice carrying the correctness marker.
    pub fn correct_choice(&self) -> Option<usize> {
        self.choices.iter().position(RenderedChoice::is_correct)
    }
}

/// One fetched batch of questions currently rendered for answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: Uuid,
    pub questions: Vec<RenderedQuestion>,
}

impl Round {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// A single ledger row. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(username: impl Into<String>, score: u32) -> Self {
        Self {
            username: username.into(),
            score,
        }
    }
}

/// Which of the two player-identity regions are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    /// The name input.
    pub name_field: bool,
    /// The "new player" control.
    pub new_player: bool,
}

impl Visibility {
    /// Visibility is a pure function of whether a session is active.
    pub fn for_session(active: bool) -> Self {
        Self {
            name_field: !active,
            new_player: active,
        }
    }
}
