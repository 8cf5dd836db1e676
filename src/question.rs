//! Read-mode question building.

use std::collections::HashMap;

use crate::catalog::{Word, WordId};
use crate::deck::{Shuffler, shuffle_in_place};
use crate::error::QuizError;

/// Distractors shown next to the correct answer.
pub const DISTRACTOR_COUNT: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnswerOption {
    pub id: WordId,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Question {
    pub word: &'static Word,
    pub options: Vec<AnswerOption>,
    pub correct_option_id: WordId,
}

impl Question {
    pub fn is_correct(&self, option_id: &str) -> bool {
        self.correct_option_id == option_id
    }

    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Display state of one answer button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum OptionState {
    #[default]
    Idle,
    /// Picked and wrong; stays disabled for the rest of the question.
    Wrong,
    Correct,
}

/// Per-question option states. Options never touched read as [`OptionState::Idle`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionStates(HashMap<WordId, OptionState>);

impl OptionStates {
    pub fn get(&self, option_id: &str) -> OptionState {
        self.0.get(option_id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, option_id: WordId, state: OptionState) {
        self.0.insert(option_id, state);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Builds a question for `target`: the target plus [`DISTRACTOR_COUNT`]
/// distinct distractors sampled from `catalog`, in random order. Labels are the
/// English meanings.
pub fn build_question(
    target: &'static Word,
    catalog: &[&'static Word],
    shuffler: &mut dyn Shuffler,
) -> Result<Question, QuizError> {
    let mut pool: Vec<&'static Word> = Vec::with_capacity(catalog.len());
    for w in catalog {
        if w.id != target.id && !pool.iter().any(|p| p.id == w.id) {
            pool.push(w);
        }
    }
    if pool.len() < DISTRACTOR_COUNT {
        return Err(QuizError::CatalogTooSmall {
            available: pool.len() + 1,
            needed: DISTRACTOR_COUNT + 1,
        });
    }

    shuffle_in_place(shuffler, &mut pool);
    let mut options: Vec<AnswerOption> = std::iter::once(target)
        .chain(pool.into_iter().take(DISTRACTOR_COUNT))
        .map(|w| AnswerOption {
            id: w.id,
            label: w.english,
        })
        .collect();
    shuffle_in_place(shuffler, &mut options);

    Ok(Question {
        word: target,
        options,
        correct_option_id: target.id,
    })
}
