//! Read mode: show a hanzi, pick its English meaning out of three options.

use log::{debug, info, warn};

use super::{MilestoneTracker, QuizEvent, Scoreboard};
use crate::catalog::{self, Word, WordId};
use crate::deck::{Deck, RandomShuffler, Shuffler};
use crate::question::{OptionState, OptionStates, Question, build_question};
use crate::timer::{TaskSlot, Timing};

pub const READ_PROMPT_ZH: &str = "这是什么字？";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Advance {
    NextQuestion,
}

/// Read-mode session over a fixed word list (the whole catalog by default).
pub struct ReadSession {
    timing: Timing,
    shuffler: Box<dyn Shuffler>,
    words: Vec<&'static Word>,
    started: bool,
    deck: Deck,
    last_word_id: Option<WordId>,
    question: Option<Question>,
    option_states: OptionStates,
    locked: bool,
    score: Scoreboard,
    milestones: MilestoneTracker,
    advance: TaskSlot<Advance>,
    events: Vec<QuizEvent>,
}

impl std::fmt::Debug for ReadSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadSession")
            .field("started", &self.started)
            .field("question", &self.question.as_ref().map(|q| q.word.id))
            .field("locked", &self.locked)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

impl ReadSession {
    pub fn new(words: Vec<&'static Word>, shuffler: Box<dyn Shuffler>) -> Self {
        Self {
            timing: Timing::default(),
            shuffler,
            words,
            started: false,
            deck: Deck::default(),
            last_word_id: None,
            question: None,
            option_states: OptionStates::default(),
            locked: false,
            score: Scoreboard::default(),
            milestones: MilestoneTracker::default(),
            advance: TaskSlot::new(),
            events: Vec::new(),
        }
    }

    /// Session over the whole catalog with entropy-seeded shuffling.
    pub fn with_catalog() -> Self {
        Self::new(
            catalog::all_words().to_vec(),
            Box::new(RandomShuffler::from_entropy()),
        )
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    // --- Transitions -------------------------------------------------------

    /// Resets all counters and draws the first question from a fresh deck.
    pub fn start(&mut self) {
        self.advance.cancel();
        self.started = true;
        self.score.reset();
        self.milestones.reset();
        self.last_word_id = None;
        self.deck = Deck::shuffled(None, &self.word_ids(), self.shuffler.as_mut());
        info!("read session started with {} words", self.words.len());
        self.next_question();
    }

    pub fn restart(&mut self) {
        self.start();
    }

    /// Picks an answer. Ignored without a question, while locked, for unknown
    /// options and for options already marked wrong.
    pub fn choose(&mut self, option_id: &str, now_ms: f64) {
        if self.locked {
            return;
        }
        let Some(question) = &self.question else {
            return;
        };
        let Some(option) = question.option(option_id) else {
            return;
        };
        let id = option.id;
        let correct = question.is_correct(id);
        if self.option_states.get(id) == OptionState::Wrong {
            return;
        }

        if correct {
            self.option_states.set(id, OptionState::Correct);
            self.locked = true;
            let streak = self.score.record_correct();
            self.events.push(QuizEvent::StopSpeech);
            self.events.push(QuizEvent::AnswerCorrect);
            if self.milestones.reached(streak) {
                info!("streak milestone {streak}");
                self.events.push(QuizEvent::Milestone { streak });
            }
            self.advance
                .schedule(now_ms, self.timing.read_next_ms, Advance::NextQuestion);
        } else {
            self.option_states.set(id, OptionState::Wrong);
            self.score.record_wrong();
            self.events.push(QuizEvent::AnswerWrong);
        }
    }

    /// Draws the next word (reshuffling when the deck is empty) and builds its
    /// question.
    pub fn next_question(&mut self) {
        self.advance.cancel();
        self.events.push(QuizEvent::StopSpeech);

        if self.deck.is_empty() {
            self.deck = Deck::shuffled(
                self.last_word_id,
                &self.word_ids(),
                self.shuffler.as_mut(),
            );
        }
        let Some(id) = self.deck.pop() else {
            return;
        };
        self.last_word_id = Some(id);
        let Some(word) = self.words.iter().copied().find(|w| w.id == id) else {
            return;
        };

        match build_question(word, &self.words, self.shuffler.as_mut()) {
            Ok(question) => {
                debug!("next question: {}", word.id);
                self.question = Some(question);
                self.option_states.clear();
                self.locked = false;
                self.replay_prompt();
            }
            Err(e) => warn!("cannot build question for {}: {e}", word.id),
        }
    }

    /// Queues the spoken prompt for the current question.
    pub fn replay_prompt(&mut self) {
        if let Some(q) = &self.question {
            self.events.push(QuizEvent::Prompt {
                segments: vec![READ_PROMPT_ZH.to_string(), q.word.hanzi.to_string()],
            });
        }
    }

    /// Audio was switched on or off. Switching it on repeats the prompt for
    /// the question on screen.
    pub fn audio_switched(&mut self, enabled: bool) {
        if enabled && self.started {
            self.replay_prompt();
        }
    }

    /// Fires the pending advance if it is due. Returns whether anything happened.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.advance.take_due(now_ms) {
            Some(Advance::NextQuestion) => {
                self.next_question();
                true
            }
            None => false,
        }
    }

    /// Drops every pending task and silences speech.
    pub fn cancel_pending(&mut self) {
        self.advance.cancel();
        self.events.push(QuizEvent::StopSpeech);
    }

    // --- Queries -----------------------------------------------------------

    pub fn drain_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn option_state(&self, option_id: &str) -> OptionState {
        self.option_states.get(option_id)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn has_pending_advance(&self) -> bool {
        self.advance.is_pending()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn view(&self) -> ReadView {
        ReadView {
            started: self.started,
            question: self.question.as_ref().map(|q| ReadQuestionView {
                hanzi: q.word.hanzi,
                pinyin: q.word.pinyin,
                options: q
                    .options
                    .iter()
                    .map(|o| {
                        let state = self.option_states.get(o.id);
                        ReadOptionView {
                            id: o.id,
                            label: o.label,
                            state,
                            disabled: self.locked || state == OptionState::Wrong,
                        }
                    })
                    .collect(),
            }),
            locked: self.locked,
            score: self.score,
        }
    }

    fn word_ids(&self) -> Vec<WordId> {
        self.words.iter().map(|w| w.id).collect()
    }
}

/// Everything the presentation layer needs to draw Read mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReadView {
    pub started: bool,
    pub question: Option<ReadQuestionView>,
    pub locked: bool,
    pub score: Scoreboard,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReadQuestionView {
    pub hanzi: &'static str,
    pub pinyin: &'static str,
    pub options: Vec<ReadOptionView>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReadOptionView {
    pub id: WordId,
    pub label: &'static str,
    pub state: OptionState,
    pub disabled: bool,
}
