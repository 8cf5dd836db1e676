// Shared fakes for the native integration tests.
#![allow(dead_code)]

use learncn::deck::Shuffler;
use learncn::feedback::{Celebrations, Sfx, SoundEffects, SpeechOutput};
use learncn::stroke::{QuizOptions, RenderOptions, StrokeWidget, WidgetTicket};

/// Keeps every list in its given order. A deck built from `[a, b, c]` is
/// therefore drawn as `c, b, a`.
#[derive(Debug, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }
}

/// Reverses every list it is asked to shuffle.
#[derive(Debug, Default)]
pub struct ReverseShuffler;

impl Shuffler for ReverseShuffler {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (0..len).rev().collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetCall {
    Create {
        ticket: WidgetTicket,
        character: char,
        padding: u32,
    },
    Quiz,
    Highlight(usize),
    Skip,
    ShowOutline(u32),
    Cancel,
}

#[derive(Debug, Default)]
pub struct FakeWidget {
    pub calls: Vec<WidgetCall>,
}

impl FakeWidget {
    pub fn created(&self) -> Vec<char> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                WidgetCall::Create { character, .. } => Some(*character),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &WidgetCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl StrokeWidget for FakeWidget {
    fn create(&mut self, ticket: WidgetTicket, character: char, options: &RenderOptions) {
        self.calls.push(WidgetCall::Create {
            ticket,
            character,
            padding: options.padding,
        });
    }

    fn quiz(&mut self, _options: &QuizOptions) {
        self.calls.push(WidgetCall::Quiz);
    }

    fn highlight_stroke(&mut self, stroke: usize) {
        self.calls.push(WidgetCall::Highlight(stroke));
    }

    fn skip_stroke(&mut self) {
        self.calls.push(WidgetCall::Skip);
    }

    fn show_outline(&mut self, duration_ms: u32) {
        self.calls.push(WidgetCall::ShowOutline(duration_ms));
    }

    fn cancel(&mut self) {
        self.calls.push(WidgetCall::Cancel);
    }
}

#[derive(Debug, Default)]
pub struct FakeSpeech {
    pub spoken: Vec<Vec<String>>,
    pub cancels: usize,
}

impl SpeechOutput for FakeSpeech {
    fn speak(&mut self, segments: &[String], _rate: f32) {
        self.spoken.push(segments.to_vec());
    }

    fn cancel_all(&mut self) {
        self.cancels += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakeSfx {
    pub played: Vec<Sfx>,
}

impl SoundEffects for FakeSfx {
    fn play(&mut self, sfx: Sfx) {
        self.played.push(sfx);
    }
}

#[derive(Debug, Default)]
pub struct FakeConfetti {
    pub bursts: usize,
}

impl Celebrations for FakeConfetti {
    fn burst(&mut self) {
        self.bursts += 1;
    }
}
