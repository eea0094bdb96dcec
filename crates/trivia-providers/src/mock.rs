//! Mock question source for tests and offline play.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use trivia_core::error::SourceError;
use trivia_core::model::{Difficulty, Question};
use trivia_core::traits::{QuestionSource, RoundRequest};

/// A question source that serves a fixed bank without touching the network.
///
/// Each fetch returns up to `request.amount` questions from the bank.
pub struct MockSource {
    bank: Vec<Question>,
    /// When set, every fetch fails with this network error.
    failure: Option<String>,
    call_count: AtomicU32,
    last_request: Mutex<Option<RoundRequest>>,
}

impl MockSource {
    pub fn with_questions(bank: Vec<Question>) -> Self {
        Self {
            bank,
            failure: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that always fails as if the network were down.
    pub fn failing(message: &str) -> Self {
        Self {
            bank: Vec::new(),
            failure: Some(message.to_string()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock serving a small built-in bank of general knowledge questions.
    pub fn sample() -> Self {
        Self::with_questions(sample_bank())
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<RoundRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, request: &RoundRequest) -> anyhow::Result<Vec<Question>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if let Some(message) = &self.failure {
            return Err(SourceError::NetworkError(message.clone()).into());
        }

        Ok(self
            .bank
            .iter()
            .filter(|q| request.difficulty.is_none() || q.difficulty == request.difficulty)
            .take(request.amount as usize)
            .cloned()
            .collect())
    }
}

fn q(prompt: &str, correct: &str, wrong: [&str; 3], difficulty: Difficulty) -> Question {
    Question {
        prompt: prompt.to_string(),
        correct_answer: correct.to_string(),
        incorrect_answers: wrong.iter().map(|w| w.to_string()).collect(),
        category: Some("General Knowledge".to_string()),
        difficulty: Some(difficulty),
    }
}

fn sample_bank() -> Vec<Question> {
    use Difficulty::*;
    vec![
        q("What is the capital of Australia?", "Canberra", ["Sydney", "Melbourne", "Perth"], Easy),
        q("How many sides does a hexagon have?", "6", ["5", "7", "8"], Easy),
        q("Which planet is known as the Red Planet?", "Mars", ["Venus", "Jupiter", "Mercury"], Easy),
        q("What is the chemical symbol for gold?", "Au", ["Ag", "Gd", "Go"], Easy),
        q("Who painted the Mona Lisa?", "Leonardo da Vinci", ["Michelangelo", "Raphael", "Donatello"], Easy),
        q("What is the largest ocean on Earth?", "Pacific", ["Atlantic", "Indian", "Arctic"], Easy),
        q("In what year did the Berlin Wall fall?", "1989", ["1987", "1991", "1985"], Medium),
        q("What is the smallest prime number?", "2", ["1", "3", "0"], Medium),
        q("Which element has atomic number 26?", "Iron", ["Cobalt", "Nickel", "Copper"], Medium),
        q("Who wrote \"One Hundred Years of Solitude\"?", "Gabriel García Márquez", ["Jorge Luis Borges", "Pablo Neruda", "Isabel Allende"], Hard),
        q("What is the longest river in Europe?", "Volga", ["Danube", "Rhine", "Dnieper"], Medium),
        q("How many bones are in the adult human body?", "206", ["201", "212", "198"], Medium),
    ]
}
