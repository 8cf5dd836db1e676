//! Browser entry points.
//!
//! One quiz runs at a time. It lives in a thread-local slot, is driven by a
//! `requestAnimationFrame` loop that calls `tick`, and receives clicks and
//! stroke-widget callbacks through the exported functions below. After every
//! call the queued session events go to the feedback coordinator and the page's
//! `render` hook is invoked.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

mod bridge;
mod speech;
mod storage;

use bridge::{JsHooks, JsStrokeWidget};
use speech::WebSpeech;
use storage::LocalStore;

use crate::catalog::Unit;
use crate::feedback::FeedbackCoordinator;
use crate::session::{QuizEvent, ReadSession, WriteSession};
use crate::settings::{QuizMode, Settings};
use crate::stroke::{StrokeEvent, WidgetTicket};

type Feedback = FeedbackCoordinator<WebSpeech, JsHooks, JsHooks>;

enum Quiz {
    Read(ReadSession),
    Write(WriteSession<JsStrokeWidget>),
}

struct App {
    quiz: Quiz,
    feedback: Feedback,
    settings: Settings,
    store: LocalStore,
    hooks: JsHooks,
}

impl App {
    fn mode(&self) -> QuizMode {
        match self.quiz {
            Quiz::Read(_) => QuizMode::Read,
            Quiz::Write(_) => QuizMode::Write,
        }
    }

    fn drain_events(&mut self) -> Vec<QuizEvent> {
        match &mut self.quiz {
            Quiz::Read(s) => s.drain_events(),
            Quiz::Write(s) => s.drain_events(),
        }
    }

    /// Hands queued events to the feedback coordinator.
    fn flush(&mut self) {
        let events = self.drain_events();
        self.feedback.dispatch(events);
    }

    fn tick(&mut self, now: f64) -> bool {
        match &mut self.quiz {
            Quiz::Read(s) => s.tick(now),
            Quiz::Write(s) => s.tick(now),
        }
    }

    fn shut_down(&mut self) {
        match &mut self.quiz {
            Quiz::Read(s) => s.cancel_pending(),
            Quiz::Write(s) => s.cancel_pending(),
        }
        self.flush();
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    // Widget callbacks that arrived while the app was busy (e.g. a skip that
    // completes the character synchronously).
    static DEFERRED_STROKES: RefCell<Vec<(WidgetTicket, StrokeEvent)>> = const { RefCell::new(Vec::new()) };
    static LOOP_RUNNING: Cell<bool> = const { Cell::new(false) };
    static LOOP_GENERATION: Cell<u32> = const { Cell::new(0) };
    // Callbacks of stopped loops. A closure cannot be dropped while it runs, so
    // the next live frame drops them.
    static RETIRED_LOOPS: RefCell<Vec<Closure<dyn FnMut(f64)>>> = const { RefCell::new(Vec::new()) };
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Runs `f` on the active app, flushes its events and re-renders.
fn with_app<R>(f: impl FnOnce(&mut App, f64) -> R) -> Option<R> {
    let now = performance_now();
    let (result, hooks) = APP.with(|cell| {
        let mut slot = cell.try_borrow_mut().ok()?;
        let app = slot.as_mut()?;
        let result = f(app, now);
        app.flush();
        Some((result, app.hooks.clone()))
    })?;
    drain_deferred_strokes();
    hooks.render();
    Some(result)
}

fn with_write(f: impl FnOnce(&mut WriteSession<JsStrokeWidget>, f64)) {
    with_app(|app, now| {
        if let Quiz::Write(session) = &mut app.quiz {
            f(session, now);
        }
    });
}

fn install(hooks: JsValue, mode: QuizMode, board_size: u32) {
    crate::init_logging();
    let hooks = JsHooks::new(hooks);
    let store = LocalStore::open();
    let settings = Settings::load(&store);
    let feedback = FeedbackCoordinator::new(
        WebSpeech::open(),
        hooks.clone(),
        hooks.clone(),
        settings.audio_enabled(mode),
    );
    let quiz = match mode {
        QuizMode::Read => {
            let mut session = ReadSession::with_catalog();
            session.start();
            Quiz::Read(session)
        }
        QuizMode::Write => {
            let mut session = WriteSession::with_entropy(hooks.writer());
            session.set_board_size(board_size);
            session.start();
            Quiz::Write(session)
        }
    };
    let app = App {
        quiz,
        feedback,
        settings,
        store,
        hooks,
    };

    let previous = APP.with(|cell| cell.borrow_mut().replace(app));
    if let Some(mut old) = previous {
        old.shut_down();
    }
    info!("{mode:?} mode installed");
    with_app(|_, _| ());
    start_frame_loop();
}

fn start_frame_loop() {
    if LOOP_RUNNING.with(|r| r.replace(true)) {
        return;
    }
    let generation = LOOP_GENERATION.with(Cell::get);
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        // stop_quiz bumps the generation; a stopped loop stops re-arming and
        // gives up its own callback, which breaks the Rc cycle.
        if LOOP_GENERATION.with(Cell::get) != generation {
            if let Some(cb) = f.borrow_mut().take() {
                RETIRED_LOOPS.with(|r| r.borrow_mut().push(cb));
            }
            return;
        }
        RETIRED_LOOPS.with(|r| r.borrow_mut().clear());
        on_frame();
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn on_frame() {
    let now = performance_now();
    let hooks = APP.with(|cell| {
        let mut slot = cell.try_borrow_mut().ok()?;
        let app = slot.as_mut()?;
        let fired = app.tick(now);
        app.flush();
        fired.then(|| app.hooks.clone())
    });
    if let Some(hooks) = hooks {
        drain_deferred_strokes();
        hooks.render();
    }
}

fn drain_deferred_strokes() {
    loop {
        let next = DEFERRED_STROKES.with(|q| {
            let mut q = q.borrow_mut();
            (!q.is_empty()).then(|| q.remove(0))
        });
        let Some((ticket, event)) = next else {
            break;
        };
        with_write(|session, now| session.on_stroke_event(ticket, event, now));
    }
}

fn stroke_event(ticket: u32, event: StrokeEvent) {
    let ticket = WidgetTicket(ticket);
    let busy = APP.with(|cell| cell.try_borrow_mut().is_err());
    if busy {
        debug!("deferring stroke event {event:?}");
        DEFERRED_STROKES.with(|q| q.borrow_mut().push((ticket, event)));
        return;
    }
    with_write(|session, now| session.on_stroke_event(ticket, event, now));
}

// --- Exports -----------------------------------------------------------------

#[wasm_bindgen]
pub fn start_read_mode(hooks: JsValue) {
    install(hooks, QuizMode::Read, 0);
}

#[wasm_bindgen]
pub fn start_write_mode(hooks: JsValue, board_size: u32) {
    install(hooks, QuizMode::Write, board_size);
}

/// Tears the active quiz down (timers, speech, widget) and stops the frame loop.
#[wasm_bindgen]
pub fn stop_quiz() {
    let previous = APP.with(|cell| cell.try_borrow_mut().ok().and_then(|mut s| s.take()));
    if let Some(mut app) = previous {
        app.shut_down();
    }
    LOOP_RUNNING.with(|r| r.set(false));
    LOOP_GENERATION.with(|g| g.set(g.get().wrapping_add(1)));
}

#[wasm_bindgen]
pub fn restart_quiz() {
    with_app(|app, _| match &mut app.quiz {
        Quiz::Read(s) => s.restart(),
        Quiz::Write(s) => s.restart(),
    });
}

/// Flips the audio switch of the active mode, persists it, returns the new value.
#[wasm_bindgen]
pub fn toggle_audio() -> bool {
    with_app(|app, _| {
        let enabled = app.feedback.toggle_audio();
        let mode = app.mode();
        app.settings.set_audio_enabled(mode, enabled, &mut app.store);
        if let Quiz::Read(s) = &mut app.quiz {
            s.audio_switched(enabled);
        }
        enabled
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn audio_enabled() -> bool {
    APP.with(|cell| {
        cell.try_borrow()
            .ok()
            .and_then(|s| s.as_ref().map(|app| app.feedback.audio_enabled()))
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn replay_prompt() {
    with_app(|app, _| match &mut app.quiz {
        Quiz::Read(s) => s.replay_prompt(),
        Quiz::Write(s) => s.replay_prompt(),
    });
}

#[wasm_bindgen]
pub fn choose_option(option_id: &str) {
    with_app(|app, now| {
        if let Quiz::Read(s) = &mut app.quiz {
            s.choose(option_id, now);
        }
    });
}

#[wasm_bindgen]
pub fn hint_stroke() {
    with_write(|s, _| s.hint_stroke());
}

#[wasm_bindgen]
pub fn skip_stroke() {
    with_write(|s, _| s.skip_stroke());
}

#[wasm_bindgen]
pub fn reset_word() {
    with_write(|s, _| s.reset_word());
}

#[wasm_bindgen]
pub fn toggle_unit(unit: u8) {
    if let Some(unit) = Unit::from_number(unit) {
        with_write(|s, _| s.toggle_unit(unit));
    }
}

#[wasm_bindgen]
pub fn set_board_size(size_px: u32) {
    with_write(|s, _| s.set_board_size(size_px));
}

#[wasm_bindgen]
pub fn on_stroke_mistake(ticket: u32, stroke: u32, total_mistakes: u32, strokes_remaining: u32) {
    stroke_event(
        ticket,
        StrokeEvent::Mistake {
            stroke: stroke as usize,
            total_mistakes,
            strokes_remaining: strokes_remaining as usize,
        },
    );
}

#[wasm_bindgen]
pub fn on_correct_stroke(ticket: u32, stroke: u32, strokes_remaining: u32) {
    stroke_event(
        ticket,
        StrokeEvent::CorrectStroke {
            stroke: stroke as usize,
            strokes_remaining: strokes_remaining as usize,
        },
    );
}

#[wasm_bindgen]
pub fn on_character_complete(ticket: u32, total_mistakes: u32) {
    stroke_event(ticket, StrokeEvent::Complete { total_mistakes });
}

/// Result of the widget's character-data load; `None` when it failed.
#[wasm_bindgen]
pub fn on_stroke_count(ticket: u32, total: Option<u32>) {
    with_write(|s, _| s.set_total_strokes(WidgetTicket(ticket), total.map(|t| t as usize)));
}

#[cfg(feature = "serde_json")]
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewEnvelope<V> {
    mode: QuizMode,
    audio_enabled: bool,
    view: V,
}

/// Current view of the active quiz as JSON, for the `render` hook.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn view_json() -> Option<String> {
    APP.with(|cell| {
        let slot = cell.try_borrow().ok()?;
        let app = slot.as_ref()?;
        let mode = app.mode();
        let audio_enabled = app.feedback.audio_enabled();
        let json = match &app.quiz {
            Quiz::Read(s) => serde_json::to_string(&ViewEnvelope {
                mode,
                audio_enabled,
                view: s.view(),
            }),
            Quiz::Write(s) => serde_json::to_string(&ViewEnvelope {
                mode,
                audio_enabled,
                view: s.view(),
            }),
        };
        json.ok()
    })
}
