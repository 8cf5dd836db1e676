//! Side effects for session events: speech, sound effects and confetti.
//!
//! Sessions only queue [`QuizEvent`]s. The coordinator turns them into calls on
//! the collaborators below and is the single place that honours the audio
//! switch, so a missing or muted audio stack never blocks the quiz itself.

use log::debug;

use crate::session::{PROMPT_RATE, QuizEvent};

/// The single speech channel.
pub trait SpeechOutput {
    /// Speaks `segments` in order.
    fn speak(&mut self, segments: &[String], rate: f32);
    /// Interrupts everything queued or playing.
    fn cancel_all(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Sfx {
    Ding,
    Pop,
    Tada,
}

impl Sfx {
    pub fn name(self) -> &'static str {
        match self {
            Sfx::Ding => "ding",
            Sfx::Pop => "pop",
            Sfx::Tada => "tada",
        }
    }
}

pub trait SoundEffects {
    fn play(&mut self, sfx: Sfx);
}

/// Fire-and-forget confetti.
pub trait Celebrations {
    fn burst(&mut self);
}

#[derive(Debug)]
pub struct FeedbackCoordinator<S, A, C> {
    speech: S,
    sfx: A,
    confetti: C,
    audio_enabled: bool,
}

impl<S: SpeechOutput, A: SoundEffects, C: Celebrations> FeedbackCoordinator<S, A, C> {
    pub fn new(speech: S, sfx: A, confetti: C, audio_enabled: bool) -> Self {
        Self {
            speech,
            sfx,
            confetti,
            audio_enabled,
        }
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    /// Turning audio off silences speech at once and mutes every later cue
    /// until it is turned back on.
    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio_enabled = enabled;
        if !enabled {
            self.speech.cancel_all();
        }
        debug!("audio {}", if enabled { "on" } else { "off" });
    }

    /// Flips the audio switch and returns the new value.
    pub fn toggle_audio(&mut self) -> bool {
        self.set_audio_enabled(!self.audio_enabled);
        self.audio_enabled
    }

    pub fn dispatch(&mut self, events: impl IntoIterator<Item = QuizEvent>) {
        for event in events {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: QuizEvent) {
        match event {
            QuizEvent::Prompt { segments } => self.say(&segments),
            QuizEvent::StopSpeech => self.speech.cancel_all(),
            QuizEvent::AnswerCorrect | QuizEvent::CharacterCompleted => self.chime(Sfx::Ding),
            QuizEvent::AnswerWrong | QuizEvent::StrokeMistake { .. } => self.chime(Sfx::Pop),
            QuizEvent::WordCompleted { hanzi } => {
                self.chime(Sfx::Ding);
                self.say(&[hanzi]);
            }
            QuizEvent::Milestone { .. } => {
                self.confetti.burst();
                self.chime(Sfx::Tada);
            }
        }
    }

    // A new utterance always interrupts the previous one.
    fn say(&mut self, segments: &[String]) {
        if !self.audio_enabled {
            return;
        }
        self.speech.cancel_all();
        self.speech.speak(segments, PROMPT_RATE);
    }

    fn chime(&mut self, sfx: Sfx) {
        if self.audio_enabled {
            self.sfx.play(sfx);
        }
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    pub fn sfx(&self) -> &A {
        &self.sfx
    }

    pub fn confetti(&self) -> &C {
        &self.confetti
    }
}
