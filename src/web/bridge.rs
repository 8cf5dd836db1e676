//! Collaborators implemented in JavaScript.
//!
//! The page passes one hooks object to `start_read_mode` / `start_write_mode`:
//!
//! ```text
//! {
//!   render(),                 // redraw from view_json()
//!   playSfx(name),            // "ding" | "pop" | "tada"
//!   burstConfetti(),
//!   writer: {                 // Write mode only (HanziWriter wrapper)
//!     create(ticket, character, options),
//!     quiz(options),
//!     highlightStroke(stroke),
//!     skipStroke(),
//!     showOutline(durationMs),
//!     cancel(),
//!   },
//! }
//! ```
//!
//! Missing hooks are skipped.

use js_sys::{Array, Function, Object, Reflect};
use log::debug;
use wasm_bindgen::{JsCast, JsValue};

use crate::feedback::{Celebrations, Sfx, SoundEffects};
use crate::stroke::{QuizOptions, RenderOptions, StrokeWidget, WidgetTicket};

fn call(target: &JsValue, name: &str, args: &[JsValue]) {
    let Ok(hook) = Reflect::get(target, &JsValue::from_str(name)) else {
        return;
    };
    let Ok(hook) = hook.dyn_into::<Function>() else {
        return;
    };
    let args: Array = args.iter().collect();
    if let Err(e) = hook.apply(target, &args) {
        debug!("js hook {name} threw: {e:?}");
    }
}

fn set(obj: &Object, key: &str, value: impl Into<JsValue>) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value.into());
}

#[derive(Clone, Debug)]
pub struct JsHooks {
    target: JsValue,
}

impl JsHooks {
    pub fn new(target: JsValue) -> Self {
        Self { target }
    }

    pub fn render(&self) {
        call(&self.target, "render", &[]);
    }

    pub fn writer(&self) -> JsStrokeWidget {
        let writer = Reflect::get(&self.target, &JsValue::from_str("writer"))
            .unwrap_or(JsValue::UNDEFINED);
        JsStrokeWidget { writer }
    }
}

impl SoundEffects for JsHooks {
    fn play(&mut self, sfx: Sfx) {
        call(&self.target, "playSfx", &[JsValue::from_str(sfx.name())]);
    }
}

impl Celebrations for JsHooks {
    fn burst(&mut self) {
        call(&self.target, "burstConfetti", &[]);
    }
}

/// Forwards to the page's stroke widget. Its callbacks come back through the
/// `on_stroke_*` exports, tagged with the ticket passed to `create`.
#[derive(Clone, Debug)]
pub struct JsStrokeWidget {
    writer: JsValue,
}

impl StrokeWidget for JsStrokeWidget {
    fn create(&mut self, ticket: WidgetTicket, character: char, options: &RenderOptions) {
        let o = Object::new();
        set(&o, "width", options.width);
        set(&o, "height", options.height);
        set(&o, "padding", options.padding);
        set(&o, "showOutline", options.show_outline);
        set(&o, "showCharacter", options.show_character);
        set(&o, "outlineColor", options.outline_color);
        set(&o, "strokeColor", options.stroke_color);
        set(&o, "drawingColor", options.drawing_color);
        set(&o, "highlightColor", options.highlight_color);
        set(&o, "highlightCompleteColor", options.highlight_complete_color);
        set(&o, "drawingFadeDuration", options.drawing_fade_duration_ms);
        set(&o, "drawingWidth", options.drawing_width);
        set(&o, "strokeWidth", options.stroke_width);
        set(&o, "outlineWidth", options.outline_width);
        call(
            &self.writer,
            "create",
            &[
                JsValue::from(ticket.0),
                JsValue::from_str(&character.to_string()),
                o.into(),
            ],
        );
    }

    fn quiz(&mut self, options: &QuizOptions) {
        let o = Object::new();
        set(&o, "showHintAfterMisses", options.show_hint_after_misses);
        set(&o, "acceptBackwardsStrokes", options.accept_backwards_strokes);
        call(&self.writer, "quiz", &[o.into()]);
    }

    fn highlight_stroke(&mut self, stroke: usize) {
        call(&self.writer, "highlightStroke", &[JsValue::from(stroke as u32)]);
    }

    fn skip_stroke(&mut self) {
        call(&self.writer, "skipStroke", &[]);
    }

    fn show_outline(&mut self, duration_ms: u32) {
        call(&self.writer, "showOutline", &[JsValue::from(duration_ms)]);
    }

    fn cancel(&mut self) {
        call(&self.writer, "cancel", &[]);
    }
}
