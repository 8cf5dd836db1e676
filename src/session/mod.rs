//! Quiz session state machines.
//!
//! Both modes share the same pieces: a [`Scoreboard`], a [`MilestoneTracker`]
//! for streak celebrations and an outbox of [`QuizEvent`]s that the host hands
//! to the [`FeedbackCoordinator`](crate::feedback::FeedbackCoordinator) after
//! every call. Transitions whose preconditions do not hold are no-ops.

pub mod read;
pub mod units;
pub mod write;

pub use read::{ReadSession, ReadView};
pub use units::UnitSelection;
pub use write::{WriteSession, WriteView};

/// Streak values that are multiples of this trigger a celebration.
pub const STREAK_MILESTONE: u32 = 10;

/// Speech rate used for every spoken prompt.
pub const PROMPT_RATE: f32 = 0.95;

/// Something the session wants the outside world to react to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "camelCase"))]
pub enum QuizEvent {
    /// Automatic (or replayed) spoken prompt for the current question/character.
    Prompt { segments: Vec<String> },
    /// Cut off whatever is being spoken.
    StopSpeech,
    AnswerCorrect,
    AnswerWrong,
    StrokeMistake { stroke: usize },
    CharacterCompleted,
    /// The whole word was written; `hanzi` is read out.
    WordCompleted { hanzi: String },
    /// One celebration burst for reaching `streak`.
    Milestone { streak: u32 },
}

/// Session counters. Everything resets to zero on restart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Scoreboard {
    pub correct: u32,
    pub mistakes: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl Scoreboard {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Counts a correct completion and extends the streak. Returns the new streak.
    pub fn record_correct(&mut self) -> u32 {
        self.correct += 1;
        self.extend_streak()
    }

    /// Counts a mistake and breaks the streak.
    pub fn record_wrong(&mut self) {
        self.count_mistake();
        self.streak = 0;
    }

    /// Counts a mistake without touching the streak (Write mode settles the
    /// streak once the word is done).
    pub fn count_mistake(&mut self) {
        self.mistakes += 1;
    }

    /// Counts a finished word. Only a `perfect` word extends the streak.
    pub fn record_finished(&mut self, perfect: bool) -> u32 {
        self.correct += 1;
        if perfect {
            self.extend_streak()
        } else {
            self.streak = 0;
            0
        }
    }

    fn extend_streak(&mut self) -> u32 {
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
        self.streak
    }
}

/// Remembers the last streak value that was celebrated so the same value never
/// fires twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MilestoneTracker {
    last_celebrated: u32,
}

impl MilestoneTracker {
    /// True exactly once per milestone value reached.
    pub fn reached(&mut self, streak: u32) -> bool {
        if streak == 0 || streak % STREAK_MILESTONE != 0 || self.last_celebrated == streak {
            return false;
        }
        self.last_celebrated = streak;
        true
    }

    pub fn reset(&mut self) {
        self.last_celebrated = 0;
    }

    pub fn last_celebrated(&self) -> u32 {
        self.last_celebrated
    }
}
