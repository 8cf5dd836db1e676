//! learncn core crate.
//!
//! Two quiz modes over a small Hanzi catalog: Read (pick the English meaning of
//! a character) and Write (write the character stroke by stroke). The quiz
//! logic in [`session`] is plain Rust driven by explicit timestamps, so it runs
//! and is tested natively; [`web`] wires it to the browser.

use std::sync::Once;

use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod deck;
pub mod error;
pub mod feedback;
pub mod question;
pub mod session;
pub mod settings;
pub mod stroke;
pub mod timer;
pub mod web;

pub use catalog::{Unit, Word, WordId};
pub use error::{QuizError, StorageError};
pub use feedback::{Celebrations, FeedbackCoordinator, Sfx, SoundEffects, SpeechOutput};
pub use session::{QuizEvent, ReadSession, Scoreboard, WriteSession};
pub use settings::{KeyValueStore, MemoryStore, QuizMode, Settings};
pub use stroke::{StrokeAdapter, StrokeEvent, StrokeWidget, WidgetTicket};
pub use timer::Timing;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    init_logging();
}

/// Panic hook and browser logger, installed once no matter how often called.
pub(crate) fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        #[cfg(target_arch = "wasm32")]
        wasm_logger::init(wasm_logger::Config::default());
        log::info!("logging initialized");
    });
}
