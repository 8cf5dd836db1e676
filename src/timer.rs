//! Deadline-based scheduled tasks.
//!
//! Sessions never call `setTimeout` themselves. They record what should happen
//! and when, and the host drives them with `tick(now_ms)` from its frame loop.
//! Dropping or cancelling a record is all it takes to stop a pending callback.

/// A task due at an absolute time (milliseconds on the host clock).
#[derive(Clone, Debug, PartialEq)]
pub struct Scheduled<A> {
    pub due_ms: f64,
    pub action: A,
}

/// Holds at most one pending task. Scheduling replaces (cancels) the previous one.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSlot<A> {
    pending: Option<Scheduled<A>>,
}

impl<A> Default for TaskSlot<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> TaskSlot<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` at `now_ms + delay_ms`, returning the task it replaced.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, action: A) -> Option<A> {
        self.pending
            .replace(Scheduled {
                due_ms: now_ms + delay_ms,
                action,
            })
            .map(|s| s.action)
    }

    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|s| s.action)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<f64> {
        self.pending.as_ref().map(|s| s.due_ms)
    }

    pub fn peek(&self) -> Option<&A> {
        self.pending.as_ref().map(|s| &s.action)
    }

    /// Removes and returns the task if it is due at `now_ms`.
    pub fn take_due(&mut self, now_ms: f64) -> Option<A> {
        if self.due_at().is_some_and(|due| due <= now_ms) {
            self.cancel()
        } else {
            None
        }
    }
}

/// Any number of independent pending tasks, cancelled together.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskQueue<A> {
    pending: Vec<Scheduled<A>>,
}

impl<A> Default for TaskQueue<A> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<A> TaskQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, action: A) {
        self.pending.push(Scheduled {
            due_ms: now_ms + delay_ms,
            action,
        });
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes every task due at `now_ms`, earliest first. Ties keep the order
    /// they were scheduled in.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<A> {
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|s| s.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|s| s.action).collect()
    }
}

/// Every delay used by the sessions, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Timing {
    /// Read mode: correct answer → next question.
    pub read_next_ms: f64,
    /// Write mode: finished word → next word.
    pub next_word_ms: f64,
    /// Write mode: finished character → next character of the same word.
    pub next_character_ms: f64,
    /// Write mode: flawed attempt → same character again.
    pub retry_restart_ms: f64,
    /// Gap between consecutive milestone bursts.
    pub celebration_step_ms: f64,
    /// Extra wait after the last burst before moving on.
    pub celebration_buffer_ms: f64,
    pub streak_flash_ms: f64,
    pub mistake_pulse_ms: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            read_next_ms: 650.0,
            next_word_ms: 900.0,
            next_character_ms: 520.0,
            retry_restart_ms: 820.0,
            celebration_step_ms: 260.0,
            celebration_buffer_ms: 220.0,
            streak_flash_ms: 650.0,
            mistake_pulse_ms: 520.0,
        }
    }
}

impl Timing {
    /// Extra delay before the next word so `bursts` celebrations can play out.
    pub fn celebration_extra_ms(&self, bursts: u32) -> f64 {
        if bursts == 0 {
            return 0.0;
        }
        f64::from(bursts - 1) * self.celebration_step_ms + self.celebration_buffer_ms
    }
}
