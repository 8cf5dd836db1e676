// Integration tests (native) for the quiz sessions. Timers are driven through
// explicit timestamps, so no browser clock is involved.

use learncn::catalog::Word;
use learncn::deck::RandomShuffler;
use learncn::question::OptionState;
use learncn::session::read::READ_PROMPT_ZH;
use learncn::session::{QuizEvent, ReadSession, Scoreboard};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

mod common;
use common::IdentityShuffler;

static A: Word = Word::new("a", "甲", "jiǎ", "first");
static B: Word = Word::new("b", "乙", "yǐ", "second");
static C: Word = Word::new("c", "丙", "bǐng", "third");

const READ_NEXT: f64 = 650.0;

fn abc_session() -> ReadSession {
    ReadSession::new(vec![&A, &B, &C], Box::new(IdentityShuffler))
}

fn seeded_catalog_session(seed: u64) -> ReadSession {
    ReadSession::new(
        learncn::catalog::all_words().to_vec(),
        Box::new(RandomShuffler(ChaCha8Rng::seed_from_u64(seed))),
    )
}

fn wrong_option(s: &ReadSession) -> &'static str {
    let q = s.question().expect("question");
    q.options
        .iter()
        .find(|o| !q.is_correct(o.id))
        .map(|o| o.id)
        .expect("distractor")
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
fn nothing_happens_before_start() {
    let mut s = abc_session();
    assert!(!s.is_started());
    s.choose("a", 0.0);
    assert!(!s.tick(10_000.0));
    assert!(s.question().is_none());
    assert!(s.drain_events().is_empty());
}

#[test]
fn start_draws_first_question_and_speaks_prompt() {
    let mut s = abc_session();
    s.start();
    let q = s.question().expect("question");
    assert_eq!(q.word.id, "c");
    assert_eq!(
        q.options.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec!["c", "a", "b"]
    );

    let events = s.drain_events();
    assert_eq!(events.first(), Some(&QuizEvent::StopSpeech));
    assert_eq!(
        events.last(),
        Some(&QuizEvent::Prompt {
            segments: vec![READ_PROMPT_ZH.to_string(), "丙".to_string()]
        })
    );
}

#[test]
fn answer_scenario_over_three_words() {
    let mut s = abc_session();
    s.start();
    s.drain_events();

    s.choose("c", 0.0);
    assert_eq!(s.score().correct, 1);
    assert_eq!(s.score().streak, 1);
    assert!(s.is_locked());
    assert_eq!(s.option_state("c"), OptionState::Correct);
    assert!(s.drain_events().contains(&QuizEvent::AnswerCorrect));

    // Locked until the advance fires.
    s.choose("a", 100.0);
    assert_eq!(s.score().mistakes, 0);

    assert!(!s.tick(READ_NEXT - 1.0));
    assert_eq!(s.question().map(|q| q.word.id), Some("c"));
    assert!(s.tick(READ_NEXT));
    assert_eq!(s.question().map(|q| q.word.id), Some("b"));
    assert!(!s.is_locked());
    assert_eq!(s.option_state("c"), OptionState::Idle);

    let wrong = wrong_option(&s);
    s.choose(wrong, 1000.0);
    assert_eq!(s.score().mistakes, 1);
    assert_eq!(s.score().streak, 0);
    assert_eq!(s.score().best_streak, 1);
    assert_eq!(s.option_state(wrong), OptionState::Wrong);
    assert!(!s.is_locked());
    assert!(!s.has_pending_advance());
    assert!(s.drain_events().contains(&QuizEvent::AnswerWrong));

    // A wrong option stays disabled.
    s.choose(wrong, 1010.0);
    assert_eq!(s.score().mistakes, 1);

    s.choose("b", 1100.0);
    assert_eq!(s.score().correct, 2);
    assert_eq!(s.score().streak, 1);
    s.tick(1100.0 + READ_NEXT);
    assert_eq!(s.question().map(|q| q.word.id), Some("a"));
}

#[test]
fn unknown_option_is_ignored() {
    let mut s = abc_session();
    s.start();
    s.drain_events();
    s.choose("zzz", 0.0);
    assert_eq!(s.score(), Scoreboard::default());
    assert!(s.drain_events().is_empty());
}

#[test]
fn empty_deck_reshuffles_without_repeating() {
    let mut s = seeded_catalog_session(9);
    s.start();
    let total = learncn::catalog::all_words().len();
    let mut now = 0.0;
    let mut previous = s.question().map(|q| q.word.id);
    for _ in 0..total * 3 {
        let correct = s.question().expect("question").correct_option_id;
        s.choose(correct, now);
        now += READ_NEXT;
        s.tick(now);
        let current = s.question().map(|q| q.word.id);
        assert_ne!(current, previous);
        previous = current;
    }
}

#[test]
fn milestone_fires_once_per_multiple_of_ten() {
    let mut s = seeded_catalog_session(1);
    s.start();
    let mut now = 0.0;
    let mut fired = Vec::new();
    for _ in 0..25 {
        let correct = s.question().expect("question").correct_option_id;
        s.choose(correct, now);
        fired.extend(milestones(&s.drain_events()));
        now += READ_NEXT;
        s.tick(now);
    }
    assert_eq!(fired, vec![10, 20]);
    assert_eq!(s.score().streak, 25);
}

fn answer_correctly(s: &mut ReadSession, times: usize, now: &mut f64) -> Vec<u32> {
    let mut fired = Vec::new();
    for _ in 0..times {
        let correct = s.question().expect("question").correct_option_id;
        s.choose(correct, *now);
        fired.extend(milestones(&s.drain_events()));
        *now += READ_NEXT;
        s.tick(*now);
    }
    fired
}

#[test]
fn milestone_value_is_not_celebrated_twice_after_broken_streak() {
    let mut s = abc_session();
    s.start();
    let mut now = 0.0;
    let mut fired = answer_correctly(&mut s, 10, &mut now);

    let wrong = wrong_option(&s);
    s.choose(wrong, now);
    assert_eq!(s.score().streak, 0);

    fired.extend(answer_correctly(&mut s, 10, &mut now));
    assert_eq!(fired, vec![10]);

    fired.extend(answer_correctly(&mut s, 10, &mut now));
    assert_eq!(fired, vec![10, 20]);
}

#[test]
fn restart_allows_celebrating_ten_again() {
    let mut s = abc_session();
    s.start();
    let mut now = 0.0;
    assert_eq!(answer_correctly(&mut s, 10, &mut now), vec![10]);
    s.restart();
    assert_eq!(answer_correctly(&mut s, 10, &mut now), vec![10]);
}

#[test]
fn switching_audio_on_repeats_the_prompt() {
    let mut s = abc_session();
    s.audio_switched(true);
    assert!(s.drain_events().is_empty());

    s.start();
    s.drain_events();
    s.audio_switched(false);
    assert!(s.drain_events().is_empty());
    s.audio_switched(true);
    assert_eq!(
        s.drain_events(),
        vec![QuizEvent::Prompt {
            segments: vec![READ_PROMPT_ZH.to_string(), "丙".to_string()]
        }]
    );
}

#[test]
fn best_streak_tracks_the_maximum() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut s = seeded_catalog_session(42);
    s.start();
    let mut now = 0.0;
    let mut best = 0;
    for _ in 0..300 {
        if rng.gen_bool(0.3) {
            let wrong = wrong_option(&s);
            s.choose(wrong, now);
        } else {
            let correct = s.question().expect("question").correct_option_id;
            s.choose(correct, now);
            now += READ_NEXT;
            s.tick(now);
        }
        let score = s.score();
        best = best.max(score.streak);
        assert!(score.best_streak >= score.streak);
        assert_eq!(score.best_streak, best);
    }
}

#[test]
fn restart_clears_score_and_pending_advance() {
    let mut s = abc_session();
    s.start();
    s.choose("c", 0.0);
    assert!(s.has_pending_advance());

    s.restart();
    assert_eq!(s.score(), Scoreboard::default());
    assert!(!s.has_pending_advance());
    assert!(!s.is_locked());
    assert_eq!(s.question().map(|q| q.word.id), Some("c"));
    // The old advance must not fire into the new session.
    assert!(!s.tick(10_000.0));
}

#[test]
fn replay_prompt_repeats_current_word() {
    let mut s = abc_session();
    s.start();
    s.drain_events();
    s.replay_prompt();
    assert_eq!(
        s.drain_events(),
        vec![QuizEvent::Prompt {
            segments: vec![READ_PROMPT_ZH.to_string(), "丙".to_string()]
        }]
    );
}

#[test]
fn cancel_pending_stops_advance_and_speech() {
    let mut s = abc_session();
    s.start();
    s.choose("c", 0.0);
    s.drain_events();
    s.cancel_pending();
    assert!(!s.has_pending_advance());
    assert_eq!(s.drain_events(), vec![QuizEvent::StopSpeech]);
    assert!(!s.tick(READ_NEXT));
}

#[test]
fn view_disables_wrong_options_and_locks_after_correct() {
    let mut s = abc_session();
    s.start();
    let wrong = wrong_option(&s);
    s.choose(wrong, 0.0);
    let view = s.view();
    let q = view.question.expect("question view");
    for o in &q.options {
        assert_eq!(o.disabled, o.id == wrong);
    }

    s.choose("c", 10.0);
    let view = s.view();
    assert!(view.locked);
    assert!(view.question.expect("question view").options.iter().all(|o| o.disabled));
}
