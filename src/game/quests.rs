//! Derived progression: levels, accuracy and claimable quest goals.
//!
//! Everything here is recomputed from [`GameState`] on every read. Nothing is
//! cached and nothing writes back to the engine; the only mutable piece is
//! [`QuestLog`], which tracks which completed quests the player has claimed.

use super::{BAMBOO_MAX, GameState};

/// Score needed to advance one level.
pub const XP_PER_LEVEL: i64 = 50;
/// Consecutive correct answers for the streak quest.
pub const STREAK_GOAL: i64 = 3;
/// Accuracy percentage for the precision quest.
pub const PRECISION_GOAL: i64 = 80;

/// `score 0..49` is level 1, `50..99` level 2, and so on.
pub fn level_for_score(score: i64) -> i64 {
    score / XP_PER_LEVEL + 1
}

/// XP gathered inside the current level, `0..XP_PER_LEVEL`.
pub fn xp_into_level(score: i64) -> i64 {
    score % XP_PER_LEVEL
}

/// Progress toward the next level as a `0..=1` fraction.
pub fn xp_fraction(score: i64) -> f64 {
    xp_into_level(score) as f64 / XP_PER_LEVEL as f64
}

pub fn xp_label(score: i64) -> String {
    format!("{} / {} XP", xp_into_level(score), XP_PER_LEVEL)
}

/// Rounded accuracy percentage; 0 before anything has been answered.
pub fn accuracy_percent(correct: u32, total: u32) -> i64 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as i64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestId {
    Streak,
    Bamboo,
    Precision,
}

/// One goal tracker, rebuilt from engine state per read.
#[derive(Clone, Debug)]
pub struct QuestProgress {
    pub id: QuestId,
    pub title: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    pub reward: &'static str,
    pub goal: i64,
    pub current: i64,
}

impl QuestProgress {
    pub fn is_completed(&self) -> bool {
        self.current >= self.goal
    }

    /// "current / goal" text; the precision quest renders as percentages.
    pub fn progress_label(&self) -> String {
        if self.is_completed() {
            return "Voltooid".to_string();
        }
        match self.id {
            QuestId::Precision => format!("{}% / {}%", self.current, self.goal),
            _ => format!("{} / {}", self.current, self.goal),
        }
    }

    /// Fill percentage for a progress bar, clamped to 100.
    pub fn percent(&self) -> i64 {
        if self.goal == 0 {
            return 0;
        }
        (self.current * 100 / self.goal).clamp(0, 100)
    }
}

/// The three goal trackers, derived from already-exposed engine fields.
pub fn quest_progress(state: &GameState) -> [QuestProgress; 3] {
    [
        QuestProgress {
            id: QuestId::Streak,
            title: "Op een rij",
            description: "Geef 3 goede antwoorden achter elkaar",
            emoji: "🔥",
            reward: "1 sticker",
            goal: STREAK_GOAL,
            current: state.correct_streak as i64,
        },
        QuestProgress {
            id: QuestId::Bamboo,
            title: "Volle bamboe",
            description: "Laat de bamboe helemaal groeien",
            emoji: "🎋",
            reward: "1 sticker",
            goal: BAMBOO_MAX as i64,
            current: state.bamboo_growth as i64,
        },
        QuestProgress {
            id: QuestId::Precision,
            title: "Scherpschutter",
            description: "Houd je nauwkeurigheid op 80% of hoger",
            emoji: "🎯",
            reward: "1 sticker",
            goal: PRECISION_GOAL,
            current: accuracy_percent(state.correct_answers, state.total_answered),
        },
    ]
}

/// Claim bookkeeping. Reads the derived trackers, never the engine itself,
/// and never mutates engine state.
#[derive(Clone, Debug, Default)]
pub struct QuestLog {
    claimed: Vec<QuestId>,
    stickers_earned: u32,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, id: QuestId) -> bool {
        self.claimed.contains(&id)
    }

    pub fn stickers_earned(&self) -> u32 {
        self.stickers_earned
    }

    /// Claim a completed quest once; each claim earns one sticker. Returns
    /// whether the claim took effect.
    pub fn claim(&mut self, id: QuestId, quests: &[QuestProgress]) -> bool {
        if self.is_claimed(id) {
            return false;
        }
        let Some(quest) = quests.iter().find(|q| q.id == id) else {
            return false;
        };
        if !quest.is_completed() {
            return false;
        }
        self.claimed.push(id);
        self.stickers_earned += 1;
        true
    }
}
