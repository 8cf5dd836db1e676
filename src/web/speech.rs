//! Web Speech API output.

use log::debug;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, window};

use crate::feedback::SpeechOutput;

const SPEECH_LANG: &str = "zh-CN";

pub struct WebSpeech {
    synth: Option<SpeechSynthesis>,
}

impl WebSpeech {
    pub fn open() -> Self {
        let synth = window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            debug!("speech synthesis unavailable, prompts stay silent");
        }
        Self { synth }
    }
}

impl SpeechOutput for WebSpeech {
    fn speak(&mut self, segments: &[String], rate: f32) {
        let Some(synth) = &self.synth else {
            return;
        };
        // Utterances queue up inside the browser and play in order.
        for text in segments {
            if let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) {
                utterance.set_lang(SPEECH_LANG);
                utterance.set_rate(rate);
                synth.speak(&utterance);
            }
        }
    }

    fn cancel_all(&mut self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}
