//! Write mode: hear a word, write each of its characters stroke by stroke.
//!
//! Per character the learner gets up to [`MAX_CHARACTER_ATTEMPTS`] attempts: a
//! flawed attempt restarts the same character after a short pause, until the
//! attempts run out. The streak only grows for words written without a single
//! mistake across all characters and attempts.

use log::{debug, info};

use super::units::UnitSelection;
use super::{MilestoneTracker, QuizEvent, STREAK_MILESTONE, Scoreboard};
use crate::catalog::{Unit, Word, WordId, write_words_for_units};
use crate::deck::{Deck, RandomShuffler, Shuffler};
use crate::stroke::{StrokeAdapter, StrokeEvent, StrokeProgress, StrokeWidget, WidgetTicket};
use crate::timer::{TaskQueue, TaskSlot, Timing};

pub const WRITE_PROMPT_ZH: &str = "这个字怎么写？";
pub const MAX_CHARACTER_ATTEMPTS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Advance {
    RetryCharacter,
    NextCharacter(usize),
    NextWord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Effect {
    Burst { streak: u32 },
    ClearFlash { token: u32 },
    ClearMistakePulse { token: u32 },
}

/// Big streak number shown during a milestone celebration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StreakFlash {
    pub token: u32,
    pub value: u32,
}

/// "Miss on stroke N" hint shown briefly after a mistake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MistakePulse {
    pub token: u32,
    pub stroke: usize,
}

pub struct WriteSession<W> {
    timing: Timing,
    shuffler: Box<dyn Shuffler>,
    units: UnitSelection,
    active: Vec<&'static Word>,
    custom_words: bool,
    started: bool,
    deck: Deck,
    last_word_id: Option<WordId>,
    last_completed_first: Option<char>,
    word: Option<&'static Word>,
    characters: Vec<char>,
    character_index: usize,
    attempt: u32,
    had_mistake_this_word: bool,
    score: Scoreboard,
    milestones: MilestoneTracker,
    advance: TaskSlot<Advance>,
    effects: TaskQueue<Effect>,
    adapter: StrokeAdapter<W>,
    board_size: u32,
    streak_flash: Option<StreakFlash>,
    mistake_pulse: Option<MistakePulse>,
    tokens: u32,
    events: Vec<QuizEvent>,
}

impl<W> std::fmt::Debug for WriteSession<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteSession")
            .field("started", &self.started)
            .field("word", &self.word.map(|w| w.id))
            .field("character_index", &self.character_index)
            .field("attempt", &self.attempt)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

impl<W: StrokeWidget> WriteSession<W> {
    pub fn new(widget: W, shuffler: Box<dyn Shuffler>) -> Self {
        let units = UnitSelection::default();
        let active = write_words_for_units(units.selected());
        Self {
            timing: Timing::default(),
            shuffler,
            units,
            active,
            custom_words: false,
            started: false,
            deck: Deck::default(),
            last_word_id: None,
            last_completed_first: None,
            word: None,
            characters: Vec::new(),
            character_index: 0,
            attempt: 1,
            had_mistake_this_word: false,
            score: Scoreboard::default(),
            milestones: MilestoneTracker::default(),
            advance: TaskSlot::new(),
            effects: TaskQueue::new(),
            adapter: StrokeAdapter::new(widget),
            board_size: 0,
            streak_flash: None,
            mistake_pulse: None,
            tokens: 0,
            events: Vec::new(),
        }
    }

    pub fn with_entropy(widget: W) -> Self {
        Self::new(widget, Box::new(RandomShuffler::from_entropy()))
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Practice an explicit word list instead of the unit selection. Unit
    /// toggles and auto-unlocks still update the selection but no longer
    /// change the word list.
    pub fn with_words(mut self, words: Vec<&'static Word>) -> Self {
        self.active = words;
        self.custom_words = true;
        self
    }

    // --- Session lifecycle ---------------------------------------------------

    pub fn start(&mut self) {
        self.advance.cancel();
        self.effects.cancel_all();
        self.events.push(QuizEvent::StopSpeech);

        self.started = true;
        self.score.reset();
        self.milestones.reset();
        self.streak_flash = None;
        self.mistake_pulse = None;
        self.had_mistake_this_word = false;
        self.last_word_id = None;
        self.last_completed_first = None;
        self.word = None;
        self.characters.clear();

        self.refresh_active();
        self.deck = Deck::shuffled(None, &self.active_ids(), self.shuffler.as_mut());
        info!("write session started with {} words", self.active.len());
        self.enter_next_word();
    }

    pub fn restart(&mut self) {
        self.start();
    }

    /// Drops every pending task, silences speech and cancels the widget.
    pub fn cancel_pending(&mut self) {
        self.advance.cancel();
        self.effects.cancel_all();
        self.adapter.cancel();
        self.events.push(QuizEvent::StopSpeech);
    }

    /// Fires due tasks. Celebrations run before the advance so a late frame
    /// cannot skip them. Returns whether anything happened.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let effects = self.effects.take_due(now_ms);
        let mut fired = !effects.is_empty();
        for effect in effects {
            self.run_effect(effect, now_ms);
        }

        if let Some(action) = self.advance.take_due(now_ms) {
            fired = true;
            match action {
                Advance::RetryCharacter => {
                    debug!("retrying character, attempt {}", self.attempt);
                    self.mount_current();
                    self.prompt_current();
                }
                Advance::NextCharacter(index) if index < self.characters.len() => {
                    self.character_index = index;
                    self.attempt = 1;
                    self.mount_current();
                    self.prompt_current();
                }
                Advance::NextCharacter(_) => {}
                Advance::NextWord => self.enter_next_word(),
            }
        }
        fired
    }

    fn run_effect(&mut self, effect: Effect, now_ms: f64) {
        match effect {
            Effect::Burst { streak } => {
                let token = self.next_token();
                self.streak_flash = Some(StreakFlash {
                    token,
                    value: streak,
                });
                self.effects.schedule(
                    now_ms,
                    self.timing.streak_flash_ms,
                    Effect::ClearFlash { token },
                );
                self.events.push(QuizEvent::Milestone { streak });
            }
            Effect::ClearFlash { token } => {
                if self.streak_flash.is_some_and(|f| f.token == token) {
                    self.streak_flash = None;
                }
            }
            Effect::ClearMistakePulse { token } => {
                if self.mistake_pulse.is_some_and(|p| p.token == token) {
                    self.mistake_pulse = None;
                }
            }
        }
    }

    // --- Learner actions -----------------------------------------------------

    /// Feeds a widget callback into the session. Callbacks from stale widget
    /// instances are ignored.
    pub fn on_stroke_event(&mut self, ticket: WidgetTicket, event: StrokeEvent, now_ms: f64) {
        // A finished character waits for its advance; late callbacks are noise.
        if !self.started || self.word.is_none() || self.advance.is_pending() {
            return;
        }
        let Some(event) = self.adapter.accept(ticket, event) else {
            return;
        };
        match event {
            StrokeEvent::Mistake { stroke, .. } => {
                self.had_mistake_this_word = true;
                self.score.count_mistake();
                let token = self.next_token();
                self.mistake_pulse = Some(MistakePulse { token, stroke });
                self.effects.schedule(
                    now_ms,
                    self.timing.mistake_pulse_ms,
                    Effect::ClearMistakePulse { token },
                );
                self.events.push(QuizEvent::StrokeMistake { stroke });
            }
            StrokeEvent::CorrectStroke { .. } => {}
            StrokeEvent::Complete { total_mistakes } => {
                self.complete_character(total_mistakes, now_ms);
            }
        }
    }

    pub fn set_total_strokes(&mut self, ticket: WidgetTicket, total: Option<usize>) {
        self.adapter.set_total_strokes(ticket, total);
    }

    /// Highlights the next expected stroke.
    pub fn hint_stroke(&mut self) {
        if self.word.is_some() {
            self.adapter.hint();
        }
    }

    /// Skips the current stroke. Costs the word its streak credit.
    pub fn skip_stroke(&mut self) {
        if self.word.is_some() && self.adapter.skip() {
            self.had_mistake_this_word = true;
        }
    }

    /// Starts the current word over from its first character. Costs the word its
    /// streak credit even if the strokes that follow are perfect.
    pub fn reset_word(&mut self) {
        if self.word.is_none() {
            return;
        }
        self.advance.cancel();
        self.had_mistake_this_word = true;
        self.attempt = 1;
        let moved = self.character_index != 0;
        self.character_index = 0;
        self.mount_current();
        if moved {
            self.prompt_current();
        }
    }

    pub fn replay_prompt(&mut self) {
        self.prompt_current();
    }

    /// Manual unit toggle; see [`UnitSelection::toggle`].
    pub fn toggle_unit(&mut self, unit: Unit) {
        if self.units.toggle(unit) {
            self.units_changed();
        }
    }

    /// The board was resized; the widget is rebuilt at the new size.
    pub fn set_board_size(&mut self, size_px: u32) {
        if size_px == self.board_size {
            return;
        }
        self.board_size = size_px;
        if self.started {
            self.mount_current();
        }
    }

    // --- Internals -----------------------------------------------------------

    fn complete_character(&mut self, total_mistakes: u32, now_ms: f64) {
        let flawed = total_mistakes > 0;
        self.had_mistake_this_word |= flawed;

        if flawed && self.attempt < MAX_CHARACTER_ATTEMPTS {
            self.attempt += 1;
            self.advance.schedule(
                now_ms,
                self.timing.retry_restart_ms,
                Advance::RetryCharacter,
            );
            return;
        }

        if self.character_index + 1 < self.characters.len() {
            self.events.push(QuizEvent::CharacterCompleted);
            self.advance.schedule(
                now_ms,
                self.timing.next_character_ms,
                Advance::NextCharacter(self.character_index + 1),
            );
            return;
        }

        self.finish_word(now_ms);
    }

    fn finish_word(&mut self, now_ms: f64) {
        let Some(word) = self.word else {
            return;
        };
        let perfect = !self.had_mistake_this_word;
        let streak = self.score.record_finished(perfect);
        if !perfect {
            self.milestones.reset();
        }
        self.last_completed_first = word.first_character();
        self.events.push(QuizEvent::WordCompleted {
            hanzi: word.hanzi.to_string(),
        });
        debug!("finished {} (perfect: {perfect}, streak: {streak})", word.id);

        let bursts = if self.milestones.reached(streak) {
            streak / STREAK_MILESTONE
        } else {
            0
        };
        for i in 0..bursts {
            self.effects.schedule(
                now_ms,
                f64::from(i) * self.timing.celebration_step_ms,
                Effect::Burst { streak },
            );
        }
        if bursts > 0 {
            info!("streak milestone {streak}, {bursts} bursts");
        }
        self.advance.schedule(
            now_ms,
            self.timing.next_word_ms + self.timing.celebration_extra_ms(bursts),
            Advance::NextWord,
        );

        if self.units.apply_streak(streak) {
            self.units_changed();
        }
    }

    fn units_changed(&mut self) {
        if !self.started {
            return;
        }
        self.refresh_active();
        self.deck = Deck::shuffled(
            self.last_word_id,
            &self.active_ids(),
            self.shuffler.as_mut(),
        );
        if !self.advance.is_pending() {
            self.enter_next_word();
        }
    }

    fn enter_next_word(&mut self) {
        if self.draw_next_word() {
            self.mount_current();
            self.prompt_current();
        } else {
            self.adapter.cancel();
        }
    }

    /// Picks the next word, skipping past candidates that start with the same
    /// character as the word just completed. Skipped candidates go back to the
    /// bottom of the deck; if every candidate is skipped the most recently
    /// skipped one is used anyway.
    fn draw_next_word(&mut self) -> bool {
        self.advance.cancel();
        self.effects.cancel_all();
        self.events.push(QuizEvent::StopSpeech);
        self.had_mistake_this_word = false;
        self.character_index = 0;
        self.attempt = 1;
        self.streak_flash = None;
        self.mistake_pulse = None;

        if self.deck.is_empty() {
            self.deck = Deck::shuffled(
                self.last_word_id,
                &self.active_ids(),
                self.shuffler.as_mut(),
            );
        }

        let avoid = self.last_completed_first;
        let mut rejected = Vec::new();
        let mut next = None;
        while let Some(candidate) = self.deck.pop() {
            let first = self.lookup(candidate).and_then(Word::first_character);
            match (avoid, first) {
                (Some(a), Some(f)) if a == f => rejected.push(candidate),
                _ => {
                    next = Some(candidate);
                    break;
                }
            }
        }
        if next.is_none() {
            next = rejected.pop();
        }
        self.deck.defer(rejected);

        if let Some(id) = next {
            self.last_word_id = Some(id);
        }
        let Some(word) = next.and_then(|id| self.lookup(id)) else {
            self.word = None;
            self.characters.clear();
            return false;
        };
        debug!("next word: {}", word.id);
        self.word = Some(word);
        self.characters = word.characters();
        true
    }

    fn mount_current(&mut self) {
        self.mistake_pulse = None;
        match self.current_character() {
            Some(ch) if self.board_size > 0 => {
                self.adapter.mount(ch, self.board_size);
            }
            _ => self.adapter.cancel(),
        }
    }

    fn prompt_current(&mut self) {
        if let Some(ch) = self.current_character() {
            self.events.push(QuizEvent::Prompt {
                segments: vec![WRITE_PROMPT_ZH.to_string(), ch.to_string()],
            });
        }
    }

    fn refresh_active(&mut self) {
        if !self.custom_words {
            self.active = write_words_for_units(self.units.selected());
        }
    }

    fn lookup(&self, id: WordId) -> Option<&'static Word> {
        self.active.iter().copied().find(|w| w.id == id)
    }

    fn active_ids(&self) -> Vec<WordId> {
        self.active.iter().map(|w| w.id).collect()
    }

    fn next_token(&mut self) -> u32 {
        self.tokens = self.tokens.wrapping_add(1);
        self.tokens
    }

    // --- Queries -------------------------------------------------------------

    pub fn drain_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn word(&self) -> Option<&'static Word> {
        self.word
    }

    pub fn current_character(&self) -> Option<char> {
        self.characters.get(self.character_index).copied()
    }

    pub fn character_index(&self) -> usize {
        self.character_index
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn had_mistake_this_word(&self) -> bool {
        self.had_mistake_this_word
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn units(&self) -> &UnitSelection {
        &self.units
    }

    pub fn active_words(&self) -> &[&'static Word] {
        &self.active
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn has_pending_advance(&self) -> bool {
        self.advance.is_pending()
    }

    pub fn pending_celebrations(&self) -> usize {
        self.effects.len()
    }

    pub fn widget_ticket(&self) -> Option<WidgetTicket> {
        self.adapter.live_ticket()
    }

    pub fn adapter(&self) -> &StrokeAdapter<W> {
        &self.adapter
    }

    pub fn streak_flash(&self) -> Option<StreakFlash> {
        self.streak_flash
    }

    pub fn mistake_pulse(&self) -> Option<MistakePulse> {
        self.mistake_pulse
    }

    pub fn view(&self) -> WriteView {
        WriteView {
            started: self.started,
            word: self.word.copied(),
            character_index: self.character_index,
            character_count: self.characters.len(),
            attempt: self.attempt,
            max_attempts: MAX_CHARACTER_ATTEMPTS,
            progress: self.adapter.progress(),
            progress_label: self.adapter.progress().and_then(|p| p.label()),
            mistake_pulse: self.mistake_pulse,
            streak_flash: self.streak_flash,
            score: self.score,
            selected_units: self.units.selected().iter().map(|u| u.number()).collect(),
        }
    }
}

/// Everything the presentation layer needs to draw Write mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WriteView {
    pub started: bool,
    pub word: Option<Word>,
    pub character_index: usize,
    pub character_count: usize,
    pub attempt: u32,
    pub max_attempts: u32,
    pub progress: Option<StrokeProgress>,
    pub progress_label: Option<String>,
    pub mistake_pulse: Option<MistakePulse>,
    pub streak_flash: Option<StreakFlash>,
    pub score: Scoreboard,
    pub selected_units: Vec<u8>,
}
