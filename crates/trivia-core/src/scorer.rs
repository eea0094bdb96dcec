//! Form state and scoring.

use std::collections::BTreeMap;

use crate::error::GameError;
use crate::model::Round;

/// The selected option per question, keyed by question index.
///
/// Behaves like one radio group per question: selecting a choice replaces
/// any previous selection for that question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    chosen: BTreeMap<usize, usize>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `choice` for `question` without validating against a round.
    pub fn select(&mut self, question: usize, choice: usize) {
        self.chosen.insert(question, choice);
    }

    /// Select `choice` for `question`, rejecting positions not in `round`.
    pub fn select_in(
        &mut self,
        round: &Round,
        question: usize,
        choice: usize,
    ) -> Result<(), GameError> {
        let block = round
            .questions
            .get(question)
            .ok_or(GameError::NoSuchQuestion(question))?;
        if choice >= block.choices.len() {
            return Err(GameError::NoSuchChoice { question, choice });
        }
        self.select(question, choice);
        Ok(())
    }

    pub fn selected(&self, question: usize) -> Option<usize> {
        self.chosen.get(&question).copied()
    }

    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.chosen.iter().map(|(&q, &c)| (q, c))
    }
}

/// Count the selected options that carry the correctness marker.
///
/// The result lies in `[0, round.len()]`. Unanswered questions and
/// selections that point outside the round contribute nothing.
pub fn compute_score(round: &Round, selections: &Selections) -> u32 {
    selections
        .iter()
        .filter(|&(question, choice)| {
            round
                .questions
                .get(question)
                .and_then(|block| block.choices.get(choice))
                .is_some_and(|c| c.is_correct())
        })
        .count() as u32
}
