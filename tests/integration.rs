// Integration tests (native) for the `panda-math` crate.
// These tests avoid wasm-specific functionality and exercise the game engine
// and its derived layers so they can run under `cargo test` on the host.

use panda_math::game::quests::{self, QuestId, QuestLog};
use panda_math::{Category, GameEngine};

fn answer_correctly(engine: &mut GameEngine) {
    let answer = engine
        .state()
        .current_question
        .as_ref()
        .expect("engine always holds a question")
        .correct_answer();
    assert!(engine.check_answer(answer));
}

fn answer_wrongly(engine: &mut GameEngine) {
    let answer = engine
        .state()
        .current_question
        .as_ref()
        .expect("engine always holds a question")
        .correct_answer();
    assert!(!engine.check_answer(answer + 1));
}

// Scenario: a fresh plus session, five straight correct answers, then the
// acknowledged celebration resets only the meter.
#[test]
fn five_correct_answers_fill_the_bamboo_meter() {
    let mut engine = GameEngine::with_seed(Category::Plus, 1001);
    assert_eq!(engine.state().score, 0);
    assert_eq!(engine.state().bamboo_growth, 0);
    for _ in 0..5 {
        answer_correctly(&mut engine);
        engine.next_question();
    }
    assert_eq!(engine.state().score, 50);
    assert_eq!(engine.state().bamboo_growth, 5);
    assert_eq!(engine.state().correct_streak, 5);
    assert!(engine.is_bamboo_complete());

    engine.reset_bamboo_growth();
    assert_eq!(engine.state().bamboo_growth, 0);
    assert!(!engine.is_bamboo_complete());
    assert_eq!(engine.state().score, 50);
}

// Scenario: one wrong then one right answer.
#[test]
fn wrong_then_right_keeps_accurate_counters() {
    let mut engine = GameEngine::with_seed(Category::Plus, 1002);
    answer_wrongly(&mut engine);
    engine.next_question();
    answer_correctly(&mut engine);
    let s = engine.state();
    assert_eq!(s.correct_streak, 1);
    assert_eq!(s.total_answered, 2);
    assert_eq!(s.correct_answers, 1);
    assert_eq!(s.score, 10);
}

// Scenario: switching to subtraction mid-session preserves the score and
// yields a non-negative subtraction question.
#[test]
fn switching_category_preserves_progress() {
    let mut engine = GameEngine::with_seed(Category::Plus, 1003);
    for _ in 0..3 {
        answer_correctly(&mut engine);
        engine.next_question();
    }
    assert_eq!(engine.state().score, 30);

    engine.change_category(Category::Minus);
    let q = engine.state().current_question.as_ref().unwrap();
    assert_eq!(q.category(), Category::Minus);
    let op1 = q.operand1();
    let op2 = q.operand2().expect("subtraction has a second operand");
    assert!(op2 <= op1, "operand2 {} exceeds operand1 {}", op2, op1);
    assert!(q.correct_answer() >= 0);
    assert_eq!(engine.state().score, 30);
    assert_eq!(engine.state().bamboo_growth, 3);
    assert_eq!(engine.state().correct_streak, 3);
}

// The meter saturates; a long streak never pushes it past 5.
#[test]
fn bamboo_meter_saturates_on_long_streaks() {
    let mut engine = GameEngine::with_seed(Category::Multiply, 1004);
    for _ in 0..12 {
        answer_correctly(&mut engine);
        engine.next_question();
    }
    assert_eq!(engine.state().bamboo_growth, 5);
    assert_eq!(engine.state().correct_streak, 12);
    assert_eq!(engine.state().score, 120);
}

// Quest layer derives straight from engine state and claims pay out once.
#[test]
fn quest_layer_tracks_an_engine_session() {
    let mut engine = GameEngine::with_seed(Category::Plus, 1005);
    let mut log = QuestLog::new();

    let early = quests::quest_progress(engine.state());
    assert!(early.iter().all(|q| !q.is_completed()));
    assert!(!log.claim(QuestId::Streak, &early));

    for _ in 0..5 {
        answer_correctly(&mut engine);
        engine.next_question();
    }
    let done = quests::quest_progress(engine.state());
    assert!(done.iter().all(|q| q.is_completed()));
    assert!(log.claim(QuestId::Streak, &done));
    assert!(log.claim(QuestId::Bamboo, &done));
    assert!(log.claim(QuestId::Precision, &done));
    assert_eq!(log.stickers_earned(), 3);
    // Claims never feed back into the engine.
    assert_eq!(engine.state().score, 50);

    // Levels are pure derivation from score.
    assert_eq!(quests::level_for_score(engine.state().score), 2);
}

// Basic dataset sanity checks: the coach always has something to say.
#[test]
fn coach_message_datasets_are_nonempty() {
    assert!(!panda_math::SUCCESS_MESSAGES.is_empty());
    assert!(!panda_math::ENCOURAGEMENT_MESSAGES.is_empty());
    for msg in panda_math::SUCCESS_MESSAGES.iter().chain(panda_math::ENCOURAGEMENT_MESSAGES) {
        assert!(!msg.is_empty(), "empty coach message in dataset");
    }
}
