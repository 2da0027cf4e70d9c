//! Panda Math core crate.
//!
//! A panda-coached arithmetic practice widget for young learners, compiled to
//! wasm. The game logic (question generation, scoring, bamboo streak meter,
//! derived quests) lives in [`game`] and is pure, natively testable code;
//! `start_widget()` mounts the DOM presentation and input glue around it.

use wasm_bindgen::prelude::*;

pub mod game;
mod widget;

pub use game::{Category, GameEngine, GameState, Question, QuestionKind};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Coach message datasets (Dutch). The widget varies its feedback by picking
// randomly from these; kept public so hosts and tests can inspect them.
// -----------------------------------------------------------------------------

pub const SUCCESS_MESSAGES: &[&str] = &[
    "Yes! Dat is goed! 🎉",
    "Perfect! Super gedaan! ⭐",
    "Geweldig! Je bent een ster! 🌟",
    "Fantastisch! Dat klopt! 🎊",
    "Top! Helemaal goed! 💪",
];

pub const ENCOURAGEMENT_MESSAGES: &[&str] = &[
    "Bijna goed! Probeer het nog eens! 💪",
    "Oeps! Probeer nog een keer! Je kunt het! 😊",
    "Niet helemaal! Probeer opnieuw! 🐼",
    "Bijna! Kijk nog eens goed! 👀",
    "Hmm, probeer het nog eens! Jij kunt het! 💚",
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Mount the practice widget into the current document.
#[wasm_bindgen]
pub fn start_widget() -> Result<(), JsValue> {
    widget::start_widget()
}

/// JSON snapshot of the current session state, for the hosting page.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn session_snapshot() -> String {
    widget::session_snapshot()
}
