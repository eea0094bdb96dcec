//! Turning fetched questions into a round of shuffled choices.

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::model::{Question, RenderedChoice, RenderedQuestion, Round};

/// Render one question at `index`.
///
/// The correct answer and every incorrect answer become one choice each,
/// shuffled independently per call. Exactly one choice carries the
/// correctness marker. When the shuffle happens to reproduce the delivered
/// order (correct answer first, then incorrect answers in order) the choices
/// are rotated by one, so a player never sees the source's ordering.
pub fn render_question<R: Rng + ?Sized>(
    question: &Question,
    index: usize,
    rng: &mut R,
) -> RenderedQuestion {
    let mut choices = Vec::with_capacity(question.choice_count());
    choices.push(RenderedChoice::new(question.correct_answer.clone(), true));
    choices.extend(
        question
            .incorrect_answers
            .iter()
            .map(|answer| RenderedChoice::new(answer.clone(), false)),
    );

    let delivered = choices.clone();
    choices.shuffle(rng);
    if choices.len() > 1 && choices == delivered {
        choices.rotate_left(1);
    }

    RenderedQuestion {
        index,
        prompt: question.prompt.clone(),
        category: question.category.clone(),
        difficulty: question.difficulty,
        choices,
    }
}

/// Render a fetched batch as a fresh round, preserving question order.
pub fn render_round<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Round {
    Round {
        id: Uuid::new_v4(),
        questions: questions
            .iter()
            .enumerate()
            .map(|(index, question)| render_question(question, index, rng))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(n: usize) -> Question {
        Question::new(
            format!("Question {n}?"),
            format!("right-{n}"),
            vec![
                format!("wrong-{n}-a"),
                format!("wrong-{n}-b"),
                format!("wrong-{n}-c"),
            ],
        )
    }

    #[test]
    fn every_block_has_four_options_and_one_marker() {
        let mut rng = StdRng::seed_from_u64(7);
        for k in [0usize, 1, 5, 10] {
            let questions: Vec<Question> = (0..k).map(sample).collect();
            let round = render_round(&questions, &mut rng);
            assert_eq!(round.len(), k);
            for (i, block) in round.questions.iter().enumerate() {
                assert_eq!(block.index, i);
                assert_eq!(block.choices.len(), 4);
                assert_eq!(block.choices.iter().filter(|c| c.is_correct()).count(), 1);
            }
        }
    }

    #[test]
    fn choices_are_the_delivered_answers() {
        let mut rng = StdRng::seed_from_u64(42);
        let question = sample(3);
        let block = render_question(&question, 0, &mut rng);

        let mut texts: Vec<&str> = block.choices.iter().map(|c| c.text()).collect();
        texts.sort_unstable();
        assert_eq!(texts, vec!["right-3", "wrong-3-a", "wrong-3-b", "wrong-3-c"]);

        let correct = block.correct_choice().unwrap();
        assert_eq!(block.choices[correct].text(), "right-3");
    }

    #[test]
    fn never_in_delivered_order() {
        let question = sample(1);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let block = render_question(&question, 0, &mut rng);
            let texts: Vec<&str> = block.choices.iter().map(|c| c.text()).collect();
            assert_ne!(texts, vec!["right-1", "wrong-1-a", "wrong-1-b", "wrong-1-c"]);
        }
    }

    #[test]
    fn metadata_is_carried_over() {
        let mut question = sample(0);
        question.category = Some("Science: Computers".into());
        question.difficulty = Some(crate::model::Difficulty::Hard);
        let mut rng = StdRng::seed_from_u64(1);
        let block = render_question(&question, 4, &mut rng);
        assert_eq!(block.index, 4);
        assert_eq!(block.category.as_deref(), Some("Science: Computers"));
        assert_eq!(block.difficulty, Some(crate::model::Difficulty::Hard));
    }

    #[test]
    fn each_round_gets_a_fresh_id() {
        let mut rng = StdRng::seed_from_u64(1);
        let questions = vec![sample(0)];
        let a = render_round(&questions, &mut rng);
        let b = render_round(&questions, &mut rng);
        assert_ne!(a.id, b.id);
    }
}
