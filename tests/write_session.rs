// Integration tests (native) for the quiz sessions. Timers are driven through
// explicit timestamps, so no browser clock is involved.

use learncn::catalog::{Unit, Word};
use learncn::deck::RandomShuffler;
use learncn::session::write::{MAX_CHARACTER_ATTEMPTS, WRITE_PROMPT_ZH};
use learncn::session::{QuizEvent, Scoreboard, WriteSession};
use learncn::stroke::{StrokeEvent, WidgetTicket};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod common;
use common::{FakeWidget, IdentityShuffler, WidgetCall};

static YI: Word = Word::new("yi", "一", "yī", "one");
static NIHAO: Word = Word::new("nihao", "你好", "nǐ hǎo", "hello");
static DA: Word = Word::new("da", "大", "dà", "big");
static DAREN: Word = Word::new("daren", "大人", "dàrén", "adult");
static REN: Word = Word::new("ren", "人", "rén", "person");

const NEXT_WORD: f64 = 900.0;
const NEXT_CHARACTER: f64 = 520.0;
const RETRY: f64 = 820.0;

fn session(words: Vec<&'static Word>) -> WriteSession<FakeWidget> {
    let mut s = WriteSession::new(FakeWidget::default(), Box::new(IdentityShuffler)).with_words(words);
    s.set_board_size(300);
    s.start();
    s
}

fn catalog_session(seed: u64) -> WriteSession<FakeWidget> {
    let mut s = WriteSession::new(
        FakeWidget::default(),
        Box::new(RandomShuffler(ChaCha8Rng::seed_from_u64(seed))),
    );
    s.set_board_size(300);
    s.start();
    s
}

fn ticket(s: &WriteSession<FakeWidget>) -> WidgetTicket {
    s.widget_ticket().expect("live widget")
}

fn complete(s: &mut WriteSession<FakeWidget>, total_mistakes: u32, now: f64) {
    let t = ticket(s);
    s.on_stroke_event(t, StrokeEvent::Complete { total_mistakes }, now);
}

fn mistake(stroke: usize, total_mistakes: u32) -> StrokeEvent {
    StrokeEvent::Mistake {
        stroke,
        total_mistakes,
        strokes_remaining: 4,
    }
}

/// Writes every character of the current word cleanly and returns the events
/// it queued. The next-word advance is still pending afterwards.
fn finish_word(s: &mut WriteSession<FakeWidget>, now: &mut f64) -> Vec<QuizEvent> {
    let n = s.word().expect("word").characters().len();
    let mut events = Vec::new();
    for i in 0..n {
        complete(s, 0, *now);
        if i + 1 < n {
            *now += 1_000.0;
            s.tick(*now);
        }
        events.extend(s.drain_events());
    }
    events
}

/// Finishes the word and lets every pending task run.
fn write_perfect_word(s: &mut WriteSession<FakeWidget>, now: &mut f64) -> Vec<QuizEvent> {
    let mut events = finish_word(s, now);
    *now += 5_000.0;
    s.tick(*now);
    events.extend(s.drain_events());
    events
}

fn milestones(events: &[QuizEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            QuizEvent::Milestone { streak } => Some(*streak),
            _ => None,
        })
        .collect()
}

#[test]
fn start_mounts_first_character_and_prompts() {
    let mut s = session(vec![&NIHAO, &YI]);
    assert_eq!(s.word().map(|w| w.id), Some("yi"));
    assert_eq!(s.current_character(), Some('一'));
    assert_eq!(s.attempt(), 1);
    assert_eq!(s.adapter().widget().created(), vec!['一']);
    assert!(
        s.drain_events().contains(&QuizEvent::Prompt {
            segments: vec![WRITE_PROMPT_ZH.to_string(), "一".to_string()]
        })
    );
}

#[test]
fn two_character_word_with_one_flawed_attempt() {
    let mut s = session(vec![&NIHAO, &YI]);

    complete(&mut s, 0, 0.0);
    assert_eq!(s.score().streak, 1);
    assert!(
        s.drain_events()
            .contains(&QuizEvent::WordCompleted { hanzi: "一".into() })
    );
    assert!(s.tick(NEXT_WORD));
    assert_eq!(s.word().map(|w| w.id), Some("nihao"));
    assert_eq!(s.character_index(), 0);

    let first = ticket(&s);
    s.on_stroke_event(first, mistake(0, 1), 1_000.0);
    assert_eq!(s.score().mistakes, 1);
    assert_eq!(s.mistake_pulse().map(|p| p.stroke), Some(0));
    assert!(s.drain_events().contains(&QuizEvent::StrokeMistake { stroke: 0 }));

    complete(&mut s, 1, 1_100.0);
    assert_eq!(s.attempt(), 2);
    assert_eq!(s.character_index(), 0);
    s.tick(1_100.0 + RETRY - 1.0);
    assert_eq!(ticket(&s), first);
    s.tick(1_100.0 + RETRY);
    let second = ticket(&s);
    assert_ne!(second, first);

    // Late callback from the cancelled instance.
    s.on_stroke_event(first, mistake(1, 1), 2_000.0);
    assert_eq!(s.score().mistakes, 1);

    complete(&mut s, 0, 2_000.0);
    assert!(s.drain_events().contains(&QuizEvent::CharacterCompleted));
    s.tick(2_000.0 + NEXT_CHARACTER);
    assert_eq!(s.character_index(), 1);
    assert_eq!(s.current_character(), Some('好'));
    assert_eq!(s.attempt(), 1);

    complete(&mut s, 0, 3_000.0);
    let score = s.score();
    assert_eq!(score.correct, 2);
    assert_eq!(score.streak, 0);
    assert_eq!(score.best_streak, 1);
    assert_eq!(score.mistakes, 1);
    assert_eq!(s.adapter().widget().created(), vec!['一', '你', '你', '好']);
}

#[test]
fn attempts_run_out_and_the_word_still_finishes() {
    let mut s = session(vec![&YI]);
    let mut now = 0.0;
    for attempt in 1..MAX_CHARACTER_ATTEMPTS {
        assert_eq!(s.attempt(), attempt);
        complete(&mut s, 1, now);
        now += RETRY;
        s.tick(now);
    }
    assert_eq!(s.attempt(), MAX_CHARACTER_ATTEMPTS);
    s.drain_events();

    complete(&mut s, 2, now);
    assert_eq!(s.score().correct, 1);
    assert_eq!(s.score().streak, 0);
    assert!(
        s.drain_events()
            .contains(&QuizEvent::WordCompleted { hanzi: "一".into() })
    );
}

#[test]
fn duplicate_completion_is_ignored_while_advance_pending() {
    let mut s = session(vec![&YI]);
    complete(&mut s, 0, 0.0);
    complete(&mut s, 0, 10.0);
    assert_eq!(s.score().correct, 1);
    assert_eq!(s.score().streak, 1);
}

#[test]
fn reset_word_restarts_and_forfeits_streak() {
    let mut s = session(vec![&NIHAO]);
    complete(&mut s, 0, 0.0);
    assert!(s.has_pending_advance());

    s.reset_word();
    assert!(!s.has_pending_advance());
    assert_eq!(s.character_index(), 0);
    assert_eq!(s.attempt(), 1);
    assert!(s.had_mistake_this_word());

    let mut now = 100.0;
    finish_word(&mut s, &mut now);
    assert_eq!(s.score().correct, 1);
    assert_eq!(s.score().streak, 0);
    assert_eq!(s.adapter().widget().created(), vec!['你', '你', '好']);
}

#[test]
fn skipping_a_stroke_forfeits_streak() {
    let mut s = session(vec![&YI]);
    s.skip_stroke();
    assert_eq!(s.adapter().widget().count(&WidgetCall::Skip), 1);
    complete(&mut s, 0, 0.0);
    assert_eq!(s.score().streak, 0);
    assert_eq!(s.score().correct, 1);
}

#[test]
fn hint_highlights_next_stroke_and_progress_is_tracked() {
    let mut s = session(vec![&YI]);
    let t = ticket(&s);
    s.on_stroke_event(
        t,
        StrokeEvent::CorrectStroke {
            stroke: 2,
            strokes_remaining: 3,
        },
        0.0,
    );
    s.hint_stroke();
    assert_eq!(s.adapter().widget().count(&WidgetCall::Highlight(3)), 1);
    assert_eq!(s.view().progress_label.as_deref(), Some("3 / 6 strokes"));

    s.set_total_strokes(t, Some(8));
    s.on_stroke_event(
        t,
        StrokeEvent::CorrectStroke {
            stroke: 3,
            strokes_remaining: 2,
        },
        10.0,
    );
    assert_eq!(s.view().progress_label.as_deref(), Some("4 / 8 strokes"));
    // Hints do not cost the streak.
    assert!(!s.had_mistake_this_word());
}

#[test]
fn second_miss_flashes_the_outline() {
    let mut s = session(vec![&YI]);
    let t = ticket(&s);
    s.on_stroke_event(t, mistake(0, 1), 0.0);
    s.on_stroke_event(t, mistake(0, 2), 10.0);
    s.on_stroke_event(t, mistake(0, 3), 20.0);
    assert_eq!(s.adapter().widget().count(&WidgetCall::ShowOutline(250)), 1);
    assert_eq!(s.score().mistakes, 3);
}

#[test]
fn mistake_pulse_clears_after_its_delay() {
    let mut s = session(vec![&YI]);
    let t = ticket(&s);
    s.on_stroke_event(t, mistake(1, 1), 0.0);
    assert!(s.mistake_pulse().is_some());
    s.tick(519.0);
    assert!(s.mistake_pulse().is_some());
    s.tick(520.0);
    assert!(s.mistake_pulse().is_none());
}

#[test]
fn next_word_avoids_same_first_character() {
    let mut s = session(vec![&REN, &DAREN, &DA]);
    assert_eq!(s.word().map(|w| w.id), Some("da"));
    complete(&mut s, 0, 0.0);
    s.tick(NEXT_WORD);
    assert_eq!(s.word().map(|w| w.id), Some("ren"));
    assert_eq!(s.deck().draw_order().collect::<Vec<_>>(), vec!["daren"]);
}

#[test]
fn falls_back_when_every_candidate_shares_the_first_character() {
    let mut s = session(vec![&DAREN, &DA]);
    assert_eq!(s.word().map(|w| w.id), Some("da"));
    complete(&mut s, 0, 0.0);
    s.tick(NEXT_WORD);
    assert_eq!(s.word().map(|w| w.id), Some("daren"));
}

#[test]
fn no_words_means_no_widget() {
    let mut s = session(Vec::new());
    assert!(s.word().is_none());
    assert!(s.widget_ticket().is_none());
    s.on_stroke_event(WidgetTicket(1), StrokeEvent::Complete { total_mistakes: 0 }, 0.0);
    assert_eq!(s.score(), Scoreboard::default());
}

#[test]
fn widget_waits_for_a_board_size() {
    let mut s = WriteSession::new(FakeWidget::default(), Box::new(IdentityShuffler))
        .with_words(vec![&YI]);
    s.start();
    assert!(s.widget_ticket().is_none());

    s.set_board_size(300);
    let first = ticket(&s);
    s.set_board_size(200);
    assert_ne!(ticket(&s), first);

    let paddings: Vec<u32> = s
        .adapter()
        .widget()
        .calls
        .iter()
        .filter_map(|c| match c {
            WidgetCall::Create { padding, .. } => Some(*padding),
            _ => None,
        })
        .collect();
    assert_eq!(paddings, vec![24, 16]);
}

#[test]
fn restart_clears_counters_and_timers() {
    let mut s = session(vec![&NIHAO, &YI]);
    complete(&mut s, 0, 0.0);
    assert!(s.has_pending_advance());

    s.restart();
    assert_eq!(s.score(), Scoreboard::default());
    assert!(!s.has_pending_advance());
    assert_eq!(s.pending_celebrations(), 0);
    assert_eq!(s.word().map(|w| w.id), Some("yi"));
    assert!(!s.tick(100_000.0));
}

#[test]
fn cancel_pending_cancels_the_widget() {
    let mut s = session(vec![&YI]);
    complete(&mut s, 0, 0.0);
    s.cancel_pending();
    assert!(!s.has_pending_advance());
    assert!(s.widget_ticket().is_none());
    assert_eq!(s.adapter().widget().count(&WidgetCall::Cancel), 1);
    assert!(!s.tick(NEXT_WORD));
}

#[test]
fn streak_unlocks_units_two_and_three() {
    let mut s = catalog_session(3);
    assert_eq!(s.units().selected(), &[Unit::One]);
    assert_eq!(s.active_words().len(), 16);

    let mut now = 0.0;
    for _ in 0..9 {
        write_perfect_word(&mut s, &mut now);
    }
    assert_eq!(s.units().selected(), &[Unit::One]);

    write_perfect_word(&mut s, &mut now);
    assert_eq!(s.units().selected(), &[Unit::One, Unit::Two]);
    assert_eq!(s.active_words().len(), 16 + 13);

    for _ in 0..10 {
        write_perfect_word(&mut s, &mut now);
    }
    assert_eq!(s.units().selected(), &[Unit::One, Unit::Two, Unit::Three]);
    assert_eq!(s.active_words().len(), 16 + 13 + 12);
    assert!(s.word().is_some());
}

#[test]
fn manual_toggle_turns_off_auto_unlock() {
    let mut s = catalog_session(4);
    s.toggle_unit(Unit::Two);
    assert!(!s.units().auto_unlock_enabled());
    assert_eq!(s.units().selected(), &[Unit::One, Unit::Two]);
    assert!(s.word().is_some());

    let mut now = 0.0;
    for _ in 0..20 {
        write_perfect_word(&mut s, &mut now);
    }
    assert_eq!(s.units().selected(), &[Unit::One, Unit::Two]);
}

#[test]
fn celebration_bursts_scale_with_streak() {
    let mut s = catalog_session(5);
    let mut now = 0.0;
    let mut fired = Vec::new();
    for _ in 0..9 {
        fired.extend(milestones(&write_perfect_word(&mut s, &mut now)));
    }
    assert!(fired.is_empty());

    // Streak 10: one burst, next word after 900 + 220.
    finish_word(&mut s, &mut now);
    let done = now;
    assert_eq!(s.pending_celebrations(), 1);
    s.tick(done + 1_119.0);
    assert!(s.has_pending_advance());
    assert_eq!(s.streak_flash().map(|f| f.value), Some(10));
    fired.extend(milestones(&s.drain_events()));
    s.tick(done + 1_120.0);
    assert!(!s.has_pending_advance());
    assert!(s.streak_flash().is_none());
    now = done + 1_120.0;

    for _ in 0..9 {
        fired.extend(milestones(&write_perfect_word(&mut s, &mut now)));
    }

    // Streak 20: two bursts 260 ms apart, next word after 900 + 260 + 220.
    finish_word(&mut s, &mut now);
    let done = now;
    assert_eq!(s.pending_celebrations(), 2);
    s.tick(done);
    fired.extend(milestones(&s.drain_events()));
    s.tick(done + 1_379.0);
    assert!(s.has_pending_advance());
    fired.extend(milestones(&s.drain_events()));
    s.tick(done + 1_380.0);
    assert!(!s.has_pending_advance());

    assert_eq!(fired, vec![10, 20, 20]);
}

#[test]
fn flawed_word_resets_milestones() {
    let mut s = catalog_session(6);
    let mut now = 0.0;
    let mut fired = Vec::new();
    for _ in 0..10 {
        fired.extend(milestones(&write_perfect_word(&mut s, &mut now)));
    }

    let t = ticket(&s);
    s.on_stroke_event(t, mistake(0, 1), now);
    let n = s.word().expect("word").characters().len();
    for _ in 0..n {
        for _ in 0..MAX_CHARACTER_ATTEMPTS {
            complete(&mut s, 1, now);
            now += 2_000.0;
            s.tick(now);
        }
    }
    now += 5_000.0;
    s.tick(now);
    assert_eq!(s.score().streak, 0);

    for _ in 0..10 {
        fired.extend(milestones(&write_perfect_word(&mut s, &mut now)));
    }
    assert_eq!(fired, vec![10, 10]);
}
