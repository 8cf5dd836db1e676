//! Stroke-order validation adapter.
//!
//! The stroke judging itself happens in an external widget (HanziWriter in the
//! browser). [`StrokeAdapter`] owns that widget, sizes it for the board, and
//! turns its callbacks into [`StrokeEvent`]s for the Write session. Every mount
//! gets a fresh [`WidgetTicket`]; callbacks from an instance that has since been
//! cancelled carry an old ticket and are dropped.

use log::debug;

/// Tags one widget instance. Hosts pass it back with every callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WidgetTicket(pub u32);

/// Rendering parameters for a square board of a given pixel size.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub show_outline: bool,
    pub show_character: bool,
    pub outline_color: &'static str,
    pub stroke_color: &'static str,
    pub drawing_color: &'static str,
    pub highlight_color: &'static str,
    pub highlight_complete_color: &'static str,
    pub drawing_fade_duration_ms: u32,
    pub drawing_width: u32,
    pub stroke_width: u32,
    pub outline_width: u32,
}

// round(size * fraction), clamped to [min, max]
fn scaled(size: u32, fraction: f64, min: u32, max: u32) -> u32 {
    let v = (f64::from(size) * fraction).round();
    (v.max(0.0) as u32).clamp(min, max)
}

impl RenderOptions {
    pub fn for_board(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            padding: scaled(size, 0.08, 10, 28),
            show_outline: false,
            show_character: false,
            outline_color: "rgba(148, 163, 184, 0.22)",
            stroke_color: "#cbd5e1",
            drawing_color: "rgba(52, 211, 153, 0.9)",
            highlight_color: "rgba(56, 189, 248, 0.45)",
            highlight_complete_color: "#fbbf24",
            drawing_fade_duration_ms: 750,
            drawing_width: scaled(size, 0.022, 5, 16),
            stroke_width: scaled(size, 0.007, 2, 6),
            outline_width: scaled(size, 0.006, 1, 5),
        }
    }
}

/// How the widget judges strokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct QuizOptions {
    pub show_hint_after_misses: u32,
    pub accept_backwards_strokes: bool,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            show_hint_after_misses: 1,
            accept_backwards_strokes: false,
        }
    }
}

/// Outline flash shown on the second miss of an attempt.
pub const OUTLINE_FLASH_MS: u32 = 250;

/// The external stroke judging widget.
pub trait StrokeWidget {
    /// Creates a widget instance for `character`. Any previous instance has
    /// already been cancelled.
    fn create(&mut self, ticket: WidgetTicket, character: char, options: &RenderOptions);
    /// Starts judging strokes on the instance just created.
    fn quiz(&mut self, options: &QuizOptions);
    fn highlight_stroke(&mut self, stroke: usize);
    fn skip_stroke(&mut self);
    fn show_outline(&mut self, duration_ms: u32);
    /// Stops the instance, including its timers and animations.
    fn cancel(&mut self);
}

/// Callback from the widget, already tied to a ticket by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeEvent {
    /// `total_mistakes` counts misses in the current attempt.
    Mistake {
        stroke: usize,
        total_mistakes: u32,
        strokes_remaining: usize,
    },
    CorrectStroke {
        stroke: usize,
        strokes_remaining: usize,
    },
    Complete {
        total_mistakes: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StrokeProgress {
    pub done: usize,
    pub total: usize,
}

impl StrokeProgress {
    /// "3 / 7 strokes"; `None` while the total is unknown.
    pub fn label(&self) -> Option<String> {
        (self.total > 0).then(|| format!("{} / {} strokes", self.done.min(self.total), self.total))
    }
}

/// Exclusive owner of the widget instance for the current character.
#[derive(Debug)]
pub struct StrokeAdapter<W> {
    widget: W,
    live: Option<WidgetTicket>,
    issued: u32,
    next_stroke: usize,
    total_strokes: Option<usize>,
    progress: Option<StrokeProgress>,
}

impl<W: StrokeWidget> StrokeAdapter<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            live: None,
            issued: 0,
            next_stroke: 0,
            total_strokes: None,
            progress: None,
        }
    }

    /// Cancels the live instance (if any) and mounts a new one for `character`.
    pub fn mount(&mut self, character: char, board_size: u32) -> WidgetTicket {
        self.cancel();
        self.issued = self.issued.wrapping_add(1);
        let ticket = WidgetTicket(self.issued);

        self.widget
            .create(ticket, character, &RenderOptions::for_board(board_size));
        self.widget.quiz(&QuizOptions::default());
        self.live = Some(ticket);
        self.next_stroke = 0;
        self.total_strokes = None;
        self.progress = None;
        debug!("mounted stroke widget {ticket:?} for {character}");
        ticket
    }

    pub fn cancel(&mut self) {
        if self.live.take().is_some() {
            self.widget.cancel();
        }
    }

    pub fn live_ticket(&self) -> Option<WidgetTicket> {
        self.live
    }

    pub fn is_live(&self, ticket: WidgetTicket) -> bool {
        self.live == Some(ticket)
    }

    /// Records the stroke count once the character data has loaded. A failed
    /// load passes `None` and progress keeps using the per-event estimate.
    pub fn set_total_strokes(&mut self, ticket: WidgetTicket, total: Option<usize>) {
        if self.is_live(ticket) {
            self.total_strokes = total;
        }
    }

    /// Updates progress for a widget callback. Returns `None` for callbacks from
    /// an instance that is no longer live.
    pub fn accept(&mut self, ticket: WidgetTicket, event: StrokeEvent) -> Option<StrokeEvent> {
        if !self.is_live(ticket) {
            debug!("dropping stroke event from stale widget {ticket:?}");
            return None;
        }
        match event {
            StrokeEvent::Mistake {
                stroke,
                total_mistakes,
                strokes_remaining,
            } => {
                self.next_stroke = stroke;
                self.progress = Some(StrokeProgress {
                    done: stroke,
                    total: self.total_or_estimate(stroke, strokes_remaining),
                });
                if total_mistakes == 2 {
                    self.widget.show_outline(OUTLINE_FLASH_MS);
                }
            }
            StrokeEvent::CorrectStroke {
                stroke,
                strokes_remaining,
            } => {
                self.next_stroke = stroke + 1;
                self.progress = Some(StrokeProgress {
                    done: stroke + 1,
                    total: self.total_or_estimate(stroke, strokes_remaining),
                });
            }
            StrokeEvent::Complete { .. } => {}
        }
        Some(event)
    }

    fn total_or_estimate(&self, stroke: usize, strokes_remaining: usize) -> usize {
        self.total_strokes
            .unwrap_or_else(|| (stroke + strokes_remaining + 1).max(1))
    }

    /// Highlights the next expected stroke. Returns false without a live instance.
    pub fn hint(&mut self) -> bool {
        if self.live.is_none() {
            return false;
        }
        self.widget.highlight_stroke(self.next_stroke);
        true
    }

    /// Skips the current stroke. Returns false without a live instance.
    pub fn skip(&mut self) -> bool {
        if self.live.is_none() {
            return false;
        }
        self.widget.skip_stroke();
        true
    }

    pub fn next_stroke(&self) -> usize {
        self.next_stroke
    }

    pub fn total_strokes(&self) -> Option<usize> {
        self.total_strokes
    }

    pub fn progress(&self) -> Option<StrokeProgress> {
        self.progress
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }
}
