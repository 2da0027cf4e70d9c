//! Question generation and scoring state machine.
//!
//! Pure logic with no DOM dependency: the widget layer (and the native tests)
//! drive it through [`GameEngine`] and read the exposed [`GameState`]. Every
//! mutating operation builds the successor state in full and swaps it in with
//! one assignment, so observers never see a half-updated session.

pub mod input;
pub mod quests;
pub(crate) mod rng;

use rng::Rng;

/// Points awarded per correct answer.
pub const POINTS_PER_CORRECT: i64 = 10;
/// The bamboo meter is full (celebration time) at this many segments.
pub const BAMBOO_MAX: u8 = 5;

/// The arithmetic skill being practiced. Selects the generation rule and the
/// fixed operand ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Numbers,
    Plus,
    Minus,
    Multiply,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Numbers,
        Category::Plus,
        Category::Minus,
        Category::Multiply,
    ];

    /// Lowercase wire name used at the JS boundary and inside question ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Numbers => "numbers",
            Category::Plus => "plus",
            Category::Minus => "minus",
            Category::Multiply => "multiply",
        }
    }

    /// Inverse of [`Category::as_str`]. Unknown names yield `None`; callers
    /// treat that as "ignore", there is no error taxonomy here.
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "numbers" => Some(Category::Numbers),
            "plus" => Some(Category::Plus),
            "minus" => Some(Category::Minus),
            "multiply" => Some(Category::Multiply),
            _ => None,
        }
    }
}

/// Per-category question payload. One variant per category so that impossible
/// operand combinations are unrepresentable: a counting question simply has
/// no second operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QuestionKind {
    /// Recognize a quantity shown as a group of objects.
    Counting { quantity: i64 },
    Add { a: i64, b: i64 },
    Sub { a: i64, b: i64 },
    Mul { a: i64, b: i64 },
}

/// One generated arithmetic prompt with a known correct answer. Immutable
/// once created; a new one is generated per round.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Question {
    id: String,
    kind: QuestionKind,
    display_text: String,
}

impl Question {
    /// Opaque unique token; differs across successive questions even when
    /// they are generated back-to-back (monotonic sequence + random salt,
    /// no wall-clock involved).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        match self.kind {
            QuestionKind::Counting { .. } => Category::Numbers,
            QuestionKind::Add { .. } => Category::Plus,
            QuestionKind::Sub { .. } => Category::Minus,
            QuestionKind::Mul { .. } => Category::Multiply,
        }
    }

    pub fn operand1(&self) -> i64 {
        match self.kind {
            QuestionKind::Counting { quantity } => quantity,
            QuestionKind::Add { a, .. } | QuestionKind::Sub { a, .. } | QuestionKind::Mul { a, .. } => a,
        }
    }

    /// Absent for counting questions.
    pub fn operand2(&self) -> Option<i64> {
        match self.kind {
            QuestionKind::Counting { .. } => None,
            QuestionKind::Add { b, .. } | QuestionKind::Sub { b, .. } | QuestionKind::Mul { b, .. } => Some(b),
        }
    }

    pub fn correct_answer(&self) -> i64 {
        match self.kind {
            QuestionKind::Counting { quantity } => quantity,
            QuestionKind::Add { a, b } => a + b,
            QuestionKind::Sub { a, b } => a - b,
            QuestionKind::Mul { a, b } => a * b,
        }
    }

    /// Human-readable prompt, produced at generation time.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }
}

/// Session counters plus the active question. Lives for one practice run;
/// no persistence.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameState {
    pub current_question: Option<Question>,
    pub score: i64,
    pub correct_streak: u32,
    /// 0..=[`BAMBOO_MAX`]; +1 per correct answer, reset only explicitly.
    pub bamboo_growth: u8,
    pub total_answered: u32,
    pub correct_answers: u32,
}

impl GameState {
    fn fresh(question: Question) -> Self {
        GameState {
            current_question: Some(question),
            score: 0,
            correct_streak: 0,
            bamboo_growth: 0,
            total_answered: 0,
            correct_answers: 0,
        }
    }
}

/// Owns one session. All operations are synchronous and total: out-of-domain
/// calls degrade to a no-op / `false` instead of failing.
pub struct GameEngine {
    category: Category,
    state: GameState,
    rng: Rng,
    question_seq: u64,
}

impl GameEngine {
    pub fn new(initial_category: Category) -> Self {
        Self::with_rng(initial_category, Rng::from_entropy())
    }

    /// Deterministic engine for tests.
    pub fn with_seed(initial_category: Category, seed: u64) -> Self {
        Self::with_rng(initial_category, Rng::from_seed(seed))
    }

    fn with_rng(category: Category, rng: Rng) -> Self {
        let mut engine = GameEngine {
            category,
            // Placeholder, replaced right below once the rng is owned.
            state: GameState {
                current_question: None,
                score: 0,
                correct_streak: 0,
                bamboo_growth: 0,
                total_answered: 0,
                correct_answers: 0,
            },
            rng,
            question_seq: 0,
        };
        let first = engine.generate_question(category);
        engine.state.current_question = Some(first);
        engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Recomputed from state on every read, never stored.
    pub fn is_bamboo_complete(&self) -> bool {
        self.state.bamboo_growth >= BAMBOO_MAX
    }

    /// Roll a fresh question for `category`. The plus/minus bounds keep sums
    /// within 20 and differences non-negative; these are tuned for early
    /// learners and are load-bearing for the question difficulty.
    pub fn generate_question(&mut self, category: Category) -> Question {
        self.question_seq += 1;
        let id = format!(
            "{}-{}-{:08x}",
            category.as_str(),
            self.question_seq,
            self.rng.token()
        );
        let kind = match category {
            Category::Numbers => QuestionKind::Counting {
                quantity: self.rng.int_in(0, 100),
            },
            Category::Plus => {
                let a = self.rng.int_in(1, 15);
                let b = self.rng.int_in(1, 20 - a);
                QuestionKind::Add { a, b }
            }
            Category::Minus => {
                let a = self.rng.int_in(5, 20);
                let b = self.rng.int_in(1, a);
                QuestionKind::Sub { a, b }
            }
            Category::Multiply => QuestionKind::Mul {
                a: self.rng.int_in(1, 10),
                b: self.rng.int_in(1, 10),
            },
        };
        let display_text = match kind {
            QuestionKind::Counting { .. } => "Hoeveel zie je er?".to_string(),
            QuestionKind::Add { a, b } => format!("{} + {} = ?", a, b),
            QuestionKind::Sub { a, b } => format!("{} - {} = ?", a, b),
            QuestionKind::Mul { a, b } => format!("{} × {} = ?", a, b),
        };
        Question {
            id,
            kind,
            display_text,
        }
    }

    /// Replace the current question with a fresh one for the active category.
    /// Nothing else changes.
    pub fn next_question(&mut self) {
        let question = self.generate_question(self.category);
        let mut next = self.state.clone();
        next.current_question = Some(question);
        self.commit(next);
    }

    /// Validate `user_answer` against the current question and update the
    /// counters. Does NOT advance the question; the caller runs its feedback
    /// animation first and decides when to move on.
    pub fn check_answer(&mut self, user_answer: i64) -> bool {
        let Some(question) = self.state.current_question.as_ref() else {
            // Defensive: nothing to grade, nothing changes.
            return false;
        };
        let is_correct = user_answer == question.correct_answer();
        let mut next = self.state.clone();
        if is_correct {
            next.score += POINTS_PER_CORRECT;
            next.correct_streak += 1;
            next.bamboo_growth = (next.bamboo_growth + 1).min(BAMBOO_MAX);
            next.correct_answers += 1;
        } else {
            next.correct_streak = 0;
        }
        next.total_answered += 1;
        self.commit(next);
        is_correct
    }

    /// Empty the bamboo meter once the celebration has been acknowledged.
    /// Every other field is untouched.
    pub fn reset_bamboo_growth(&mut self) {
        let mut next = self.state.clone();
        next.bamboo_growth = 0;
        self.commit(next);
    }

    /// Full reset: zero all counters and roll a fresh question for the
    /// current category.
    pub fn reset_game(&mut self) {
        let question = self.generate_question(self.category);
        self.commit(GameState::fresh(question));
    }

    /// Switch skill mid-session. Score, streak, growth and the accuracy
    /// counters carry over; only the question is regenerated.
    pub fn change_category(&mut self, new_category: Category) {
        self.category = new_category;
        let question = self.generate_question(new_category);
        let mut next = self.state.clone();
        next.current_question = Some(question);
        self.commit(next);
    }

    // Single swap point for successor states.
    fn commit(&mut self, next: GameState) {
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_answer(engine: &GameEngine) -> i64 {
        engine
            .state()
            .current_question
            .as_ref()
            .expect("engine always holds a question")
            .correct_answer()
    }

    #[test]
    fn engine_starts_with_a_question_for_the_initial_category() {
        let engine = GameEngine::with_seed(Category::Multiply, 1);
        let q = engine.state().current_question.as_ref().unwrap();
        assert_eq!(q.category(), Category::Multiply);
        assert_eq!(engine.category(), Category::Multiply);
        assert_eq!(engine.state().score, 0);
    }

    #[test]
    fn correct_answer_updates_all_counters() {
        let mut engine = GameEngine::with_seed(Category::Plus, 2);
        let answer = current_answer(&engine);
        assert!(engine.check_answer(answer));
        let s = engine.state();
        assert_eq!(s.score, POINTS_PER_CORRECT);
        assert_eq!(s.correct_streak, 1);
        assert_eq!(s.bamboo_growth, 1);
        assert_eq!(s.total_answered, 1);
        assert_eq!(s.correct_answers, 1);
    }

    #[test]
    fn wrong_answer_resets_streak_but_not_growth_or_score() {
        let mut engine = GameEngine::with_seed(Category::Plus, 3);
        let answer = current_answer(&engine);
        assert!(engine.check_answer(answer));
        let wrong = current_answer(&engine) + 1;
        assert!(!engine.check_answer(wrong));
        let s = engine.state();
        assert_eq!(s.correct_streak, 0);
        assert_eq!(s.bamboo_growth, 1);
        assert_eq!(s.score, POINTS_PER_CORRECT);
        assert_eq!(s.total_answered, 2);
        assert_eq!(s.correct_answers, 1);
    }

    #[test]
    fn check_answer_does_not_advance_the_question() {
        let mut engine = GameEngine::with_seed(Category::Plus, 4);
        let id_before = engine.state().current_question.as_ref().unwrap().id().to_string();
        let answer = current_answer(&engine);
        engine.check_answer(answer);
        let id_after = engine.state().current_question.as_ref().unwrap().id();
        assert_eq!(id_before, id_after);
    }

    #[test]
    fn grading_the_same_question_twice_counts_twice() {
        let mut engine = GameEngine::with_seed(Category::Plus, 5);
        let answer = current_answer(&engine);
        assert!(engine.check_answer(answer));
        assert!(engine.check_answer(answer));
        let s = engine.state();
        assert_eq!(s.score, 2 * POINTS_PER_CORRECT);
        assert_eq!(s.correct_streak, 2);
        assert_eq!(s.total_answered, 2);
    }

    #[test]
    fn bamboo_growth_caps_at_max() {
        let mut engine = GameEngine::with_seed(Category::Multiply, 6);
        for _ in 0..8 {
            let answer = current_answer(&engine);
            engine.check_answer(answer);
            engine.next_question();
        }
        assert_eq!(engine.state().bamboo_growth, BAMBOO_MAX);
        assert!(engine.is_bamboo_complete());
        assert_eq!(engine.state().correct_streak, 8);
    }

    #[test]
    fn reset_bamboo_growth_touches_only_the_meter() {
        let mut engine = GameEngine::with_seed(Category::Plus, 7);
        for _ in 0..3 {
            let answer = current_answer(&engine);
            engine.check_answer(answer);
            engine.next_question();
        }
        engine.reset_bamboo_growth();
        let s = engine.state();
        assert_eq!(s.bamboo_growth, 0);
        assert_eq!(s.score, 30);
        assert_eq!(s.correct_streak, 3);
        assert_eq!(s.total_answered, 3);
        assert_eq!(s.correct_answers, 3);
    }

    #[test]
    fn next_question_changes_only_the_question() {
        let mut engine = GameEngine::with_seed(Category::Minus, 8);
        let answer = current_answer(&engine);
        engine.check_answer(answer);
        let before = engine.state().clone();
        engine.next_question();
        let after = engine.state();
        assert_ne!(
            before.current_question.as_ref().unwrap().id(),
            after.current_question.as_ref().unwrap().id()
        );
        assert_eq!(before.score, after.score);
        assert_eq!(before.correct_streak, after.correct_streak);
        assert_eq!(before.bamboo_growth, after.bamboo_growth);
        assert_eq!(before.total_answered, after.total_answered);
    }

    #[test]
    fn change_category_regenerates_question_and_keeps_progress() {
        let mut engine = GameEngine::with_seed(Category::Plus, 9);
        let answer = current_answer(&engine);
        engine.check_answer(answer);
        engine.change_category(Category::Minus);
        assert_eq!(engine.category(), Category::Minus);
        let q = engine.state().current_question.as_ref().unwrap();
        assert_eq!(q.category(), Category::Minus);
        assert_eq!(engine.state().score, POINTS_PER_CORRECT);
        assert_eq!(engine.state().correct_streak, 1);
    }

    #[test]
    fn reset_game_zeroes_everything_and_rolls_a_question() {
        let mut engine = GameEngine::with_seed(Category::Plus, 10);
        for _ in 0..2 {
            let answer = current_answer(&engine);
            engine.check_answer(answer);
            engine.next_question();
        }
        engine.reset_game();
        let s = engine.state();
        assert!(s.current_question.is_some());
        assert_eq!(s.score, 0);
        assert_eq!(s.correct_streak, 0);
        assert_eq!(s.bamboo_growth, 0);
        assert_eq!(s.total_answered, 0);
        assert_eq!(s.correct_answers, 0);
    }

    #[test]
    fn check_answer_without_a_question_is_a_safe_no_op() {
        let mut engine = GameEngine::with_seed(Category::Plus, 11);
        engine.state.current_question = None;
        assert!(!engine.check_answer(0));
        assert_eq!(engine.state().total_answered, 0);
        assert_eq!(engine.state().score, 0);
    }

    #[test]
    fn successive_question_ids_differ() {
        let mut engine = GameEngine::with_seed(Category::Plus, 12);
        let mut ids = std::collections::HashSet::new();
        ids.insert(engine.state().current_question.as_ref().unwrap().id().to_string());
        for _ in 0..100 {
            engine.next_question();
            let id = engine.state().current_question.as_ref().unwrap().id().to_string();
            assert!(ids.insert(id), "duplicate question id generated");
        }
    }

    #[test]
    fn category_names_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::parse(cat.as_str()), Some(cat));
        }
        assert_eq!(Category::parse("division"), None);
    }
}
