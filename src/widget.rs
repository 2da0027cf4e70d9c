//! DOM presentation and input glue around the game engine.
//!
//! Everything visual is plain DOM elements with inline styles, created once
//! at mount and refreshed by id afterwards. Widget state lives in a
//! thread-local cell; event handlers and timers borrow it, apply the engine
//! operation, and re-render the parts they touched. Sequencing policy (like
//! ignoring keys during the bamboo celebration) lives here, not in the
//! engine.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent, MouseEvent, window};

use crate::game::input::AnswerBuffer;
use crate::game::quests::{self, QuestId, QuestLog};
use crate::game::rng::Rng;
use crate::game::{BAMBOO_MAX, Category, GameEngine, Question, QuestionKind};
use crate::{ENCOURAGEMENT_MESSAGES, SUCCESS_MESSAGES};

// Feedback timings for the coach: short pause after a correct answer, a
// longer one for the full-meter celebration.
const NEXT_QUESTION_DELAY_MS: i32 = 1_500;
const CELEBRATION_MS: i32 = 3_000;
const CONFETTI_PIECES: usize = 40;

const ROOT_STYLE: &str = "position:fixed; inset:0; overflow:auto; display:flex; flex-direction:column; align-items:center; gap:14px; padding:18px; font-family:'Nunito','Comic Sans MS',sans-serif; background:linear-gradient(#e8f7ee,#f7fbe8); z-index:10;";
const SCORE_STYLE: &str = "position:fixed; top:10px; right:14px; font-size:16px; padding:6px 14px; background:#ffffff; border-radius:14px; box-shadow:0 2px 8px rgba(0,0,0,0.12); z-index:45;";
const BUBBLE_STYLE: &str = "background:#ffffff; border-radius:18px; padding:10px 18px; box-shadow:0 4px 12px rgba(0,0,0,0.10); font-size:17px; max-width:380px; text-align:center; min-height:22px;";
const AVATAR_STYLE: &str = "width:96px; height:96px; border-radius:50%; background:#b8f3d8; display:flex; align-items:center; justify-content:center; font-size:56px; box-shadow:0 4px 14px rgba(0,0,0,0.14);";
const QUESTION_STYLE: &str = "background:#fef6c7; border-radius:18px; padding:12px 28px; font-size:30px; box-shadow:0 4px 12px rgba(0,0,0,0.10);";
const INPUT_STYLE: &str = "background:#ffffff; border-radius:18px; padding:14px 40px; font-size:40px; min-width:140px; text-align:center; box-shadow:0 4px 12px rgba(0,0,0,0.10);";
const KEY_STYLE: &str = "width:64px; height:64px; border:none; border-radius:50%; background:#b8f3d8; font-size:24px; cursor:pointer; box-shadow:0 2px 6px rgba(0,0,0,0.15);";
const BACK_STYLE: &str = "width:64px; height:64px; border:none; border-radius:50%; background:#ffb4a2; font-size:22px; cursor:pointer; box-shadow:0 2px 6px rgba(0,0,0,0.15);";
const SUBMIT_STYLE: &str = "width:64px; height:64px; border:none; border-radius:50%; background:#cfe8fc; font-size:22px; cursor:pointer; box-shadow:0 2px 6px rgba(0,0,0,0.15);";
const CAT_BUTTON_STYLE: &str = "border:none; border-radius:14px; padding:8px 14px; font-size:14px; background:#ffffff; opacity:0.7; cursor:pointer; box-shadow:0 2px 6px rgba(0,0,0,0.12);";
const CAT_BUTTON_SELECTED: &str = "border:none; border-radius:14px; padding:8px 14px; font-size:14px; background:#b8f3d8; opacity:1; cursor:pointer; box-shadow:0 2px 10px rgba(0,0,0,0.20);";
const QUEST_PANEL_STYLE: &str = "background:#ffffff; border-radius:18px; padding:14px 18px; width:300px; box-shadow:0 4px 12px rgba(0,0,0,0.10);";
const CLAIM_STYLE: &str = "border:none; border-radius:10px; padding:3px 12px; font-size:12px; background:#b8f3d8; cursor:pointer;";

struct WidgetState {
    engine: GameEngine,
    buffer: AnswerBuffer,
    quest_log: QuestLog,
    // Variation for coach messages and confetti placement only; the engine
    // keeps its own stream for question rolls.
    msg_rng: Rng,
    celebrating: bool,
}

thread_local! {
    static WIDGET_STATE: RefCell<Option<WidgetState>> = RefCell::new(None);
}

fn with_state<R>(f: impl FnOnce(&mut WidgetState) -> R) -> Option<R> {
    WIDGET_STATE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub(crate) fn start_widget() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    ensure_dom(&doc)?;

    WIDGET_STATE.with(|cell| {
        cell.replace(Some(WidgetState {
            engine: GameEngine::new(Category::Plus),
            buffer: AnswerBuffer::new(),
            quest_log: QuestLog::new(),
            msg_rng: Rng::from_entropy(),
            celebrating: false,
        }));
    });

    install_listeners(&doc)?;
    set_coach(&doc, "😊", "Kies een oefening om te beginnen! 🐼");
    with_state(|st| render(&doc, st));
    Ok(())
}

/// JSON snapshot of the live session; empty string when the widget is not
/// mounted.
#[cfg(feature = "serde_json")]
pub(crate) fn session_snapshot() -> String {
    with_state(|st| serde_json::to_string(st.engine.state()).unwrap_or_default())
        .unwrap_or_default()
}

// --- DOM construction --------------------------------------------------------

fn div(doc: &Document, id: &str, style: &str) -> Result<web_sys::Element, JsValue> {
    let el = doc.create_element("div")?;
    el.set_id(id);
    el.set_attribute("style", style).ok();
    Ok(el)
}

fn button(doc: &Document, id: &str, label: &str, style: &str) -> Result<web_sys::Element, JsValue> {
    let el = doc.create_element("button")?;
    el.set_id(id);
    el.set_text_content(Some(label));
    el.set_attribute("style", style).ok();
    Ok(el)
}

fn ensure_dom(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("pm-root").is_some() {
        return Ok(());
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let root = div(doc, "pm-root", ROOT_STYLE)?;

    // Score overlay (fixed top-right, outside the column flow)
    let score = div(doc, "pm-score", SCORE_STYLE)?;
    score.set_text_content(Some("Score: 0"));
    root.append_child(&score)?;

    // Coach: speech bubble above the avatar, small emotion badge on top
    let coach = div(
        doc,
        "pm-coach",
        "display:flex; flex-direction:column; align-items:center; gap:8px;",
    )?;
    let bubble = div(doc, "pm-coach-text", BUBBLE_STYLE)?;
    let avatar = div(doc, "pm-coach-avatar", AVATAR_STYLE)?;
    avatar.set_text_content(Some("🐼"));
    let emotion = div(
        doc,
        "pm-coach-emotion",
        "position:relative; top:-92px; left:46px; font-size:26px; height:0;",
    )?;
    coach.append_child(&bubble)?;
    coach.append_child(&avatar)?;
    coach.append_child(&emotion)?;
    root.append_child(&coach)?;

    // Category row
    let cats = div(
        doc,
        "pm-cats",
        "display:flex; gap:10px; flex-wrap:wrap; justify-content:center;",
    )?;
    for (cat, label) in [
        (Category::Numbers, "🔢 Getallen"),
        (Category::Plus, "➕ Optellen"),
        (Category::Minus, "➖ Aftrekken"),
        (Category::Multiply, "✖️ Keer"),
    ] {
        let b = button(
            doc,
            &format!("pm-cat-{}", cat.as_str()),
            label,
            CAT_BUTTON_STYLE,
        )?;
        cats.append_child(&b)?;
    }
    root.append_child(&cats)?;

    // Bamboo meter (0-5 segments)
    let bamboo_wrap = div(
        doc,
        "pm-bamboo-wrap",
        "display:flex; flex-direction:column; align-items:center; gap:4px;",
    )?;
    let bamboo_label = div(doc, "pm-bamboo-label", "font-size:13px; color:#4b5d52;")?;
    bamboo_label.set_text_content(Some("Bamboe groei"));
    let bamboo = div(doc, "pm-bamboo", "display:flex;")?;
    bamboo_wrap.append_child(&bamboo_label)?;
    bamboo_wrap.append_child(&bamboo)?;
    root.append_child(&bamboo_wrap)?;

    // Operand iconography, prompt text, pending-answer display
    let visual = div(
        doc,
        "pm-visual",
        "font-size:22px; text-align:center; max-width:440px; line-height:1.5;",
    )?;
    root.append_child(&visual)?;
    let question = div(doc, "pm-question", QUESTION_STYLE)?;
    root.append_child(&question)?;
    let input = div(doc, "pm-input", INPUT_STYLE)?;
    input.set_text_content(Some("_"));
    root.append_child(&input)?;

    // Numpad: 1-9, then backspace / 0 / submit
    let numpad = div(
        doc,
        "pm-numpad",
        "display:grid; grid-template-columns:repeat(3, 64px); gap:10px;",
    )?;
    for d in 1..=9 {
        let key = button(doc, &format!("pm-key-{}", d), &d.to_string(), KEY_STYLE)?;
        numpad.append_child(&key)?;
    }
    let back = button(doc, "pm-key-back", "⌫", BACK_STYLE)?;
    numpad.append_child(&back)?;
    let zero = button(doc, "pm-key-0", "0", KEY_STYLE)?;
    numpad.append_child(&zero)?;
    let submit = button(doc, "pm-key-submit", "✓", SUBMIT_STYLE)?;
    numpad.append_child(&submit)?;
    root.append_child(&numpad)?;

    let hint = div(doc, "pm-hint", "font-size:12px; color:#6b7a70;")?;
    hint.set_text_content(Some("Je kunt ook je toetsenbord gebruiken! ⌨️"));
    root.append_child(&hint)?;

    // Quest panel: level line, three tracker rows, sticker counter
    let quests_panel = div(doc, "pm-quests", QUEST_PANEL_STYLE)?;
    let level = div(doc, "pm-level", "font-weight:bold; margin-bottom:6px;")?;
    quests_panel.append_child(&level)?;
    for key in ["streak", "bamboo", "precision"] {
        let row = div(doc, &format!("pm-quest-{}", key), "margin-bottom:8px;")?;
        let label = div(doc, &format!("pm-quest-label-{}", key), "font-size:14px;")?;
        let track = div(
            doc,
            &format!("pm-quest-track-{}", key),
            "height:6px; border-radius:3px; background:#dfe8e2; margin:4px 0;",
        )?;
        let bar = div(
            doc,
            &format!("pm-quest-bar-{}", key),
            "height:6px; border-radius:3px; background:#7ac74f; width:0%;",
        )?;
        track.append_child(&bar)?;
        let claim = button(doc, &format!("pm-claim-{}", key), "Claim", CLAIM_STYLE)?;
        claim.set_attribute("disabled", "").ok();
        row.append_child(&label)?;
        row.append_child(&track)?;
        row.append_child(&claim)?;
        quests_panel.append_child(&row)?;
    }
    let stickers = div(doc, "pm-stickers", "margin-top:6px; font-size:14px;")?;
    stickers.set_text_content(Some("📚 0 stickers"));
    quests_panel.append_child(&stickers)?;
    root.append_child(&quests_panel)?;

    // Confetti overlay, filled during celebrations
    let confetti = div(
        doc,
        "pm-confetti",
        "position:fixed; inset:0; pointer-events:none; z-index:60;",
    )?;

    body.append_child(&root)?;
    body.append_child(&confetti)?;
    Ok(())
}

// --- Event wiring ------------------------------------------------------------

fn on_click(
    doc: &Document,
    id: &str,
    f: impl FnMut(MouseEvent) + 'static,
) -> Result<(), JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(MouseEvent)>);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn install_listeners(doc: &Document) -> Result<(), JsValue> {
    // Physical keyboard: digits, Backspace, Enter
    {
        let doc_keys = doc.clone();
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            let key = evt.key();
            if key == "Enter" {
                handle_submit(&doc_keys);
            } else if key == "Backspace" {
                handle_backspace(&doc_keys);
            } else if key.len() == 1 {
                let c = key.chars().next().unwrap();
                if c.is_ascii_digit() {
                    handle_digit(&doc_keys, c);
                }
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // On-screen keypad
    for d in 0..=9u32 {
        let c = char::from_digit(d, 10).unwrap_or('0');
        let doc_click = doc.clone();
        on_click(doc, &format!("pm-key-{}", d), move |_evt| {
            handle_digit(&doc_click, c);
        })?;
    }
    {
        let doc_click = doc.clone();
        on_click(doc, "pm-key-back", move |_evt| handle_backspace(&doc_click))?;
    }
    {
        let doc_click = doc.clone();
        on_click(doc, "pm-key-submit", move |_evt| handle_submit(&doc_click))?;
    }

    // Category switching
    for cat in Category::ALL {
        let doc_click = doc.clone();
        on_click(doc, &format!("pm-cat-{}", cat.as_str()), move |_evt| {
            handle_category(&doc_click, cat);
        })?;
    }

    // Quest claims
    for (key, id) in [
        ("streak", QuestId::Streak),
        ("bamboo", QuestId::Bamboo),
        ("precision", QuestId::Precision),
    ] {
        let doc_click = doc.clone();
        on_click(doc, &format!("pm-claim-{}", key), move |_evt| {
            handle_claim(&doc_click, id);
        })?;
    }
    Ok(())
}

// --- Handlers ----------------------------------------------------------------

fn handle_digit(doc: &Document, c: char) {
    with_state(|st| {
        if st.celebrating {
            return;
        }
        if st.buffer.push_digit(c) {
            set_coach(doc, "🤔", "Typ het antwoord...");
        }
        render(doc, st);
    });
}

fn handle_backspace(doc: &Document) {
    with_state(|st| {
        if st.celebrating {
            return;
        }
        st.buffer.backspace();
        render(doc, st);
    });
}

fn handle_submit(doc: &Document) {
    with_state(|st| {
        if st.celebrating {
            return;
        }
        // Empty buffer: submission is a no-op.
        let Some(answer) = st.buffer.submit() else {
            return;
        };
        let correct = st.engine.check_answer(answer);
        if correct {
            if st.engine.is_bamboo_complete() {
                st.celebrating = true;
                set_coach(doc, "🎉", "🎉 Geweldig! Je hebt 5 goede antwoorden! 🎉");
                spawn_confetti(doc, &mut st.msg_rng);
                schedule_celebration_end(doc);
            } else {
                let msg = SUCCESS_MESSAGES[st.msg_rng.index(SUCCESS_MESSAGES.len())];
                set_coach(doc, "😊", msg);
                schedule_next_question(doc);
            }
        } else {
            let msg = ENCOURAGEMENT_MESSAGES[st.msg_rng.index(ENCOURAGEMENT_MESSAGES.len())];
            set_coach(doc, "💪", msg);
        }
        render(doc, st);
    });
}

fn handle_category(doc: &Document, category: Category) {
    with_state(|st| {
        if st.celebrating {
            return;
        }
        st.engine.change_category(category);
        st.buffer.clear();
        set_coach(doc, "😊", "Super! Laten we beginnen!");
        render(doc, st);
    });
}

fn handle_claim(doc: &Document, id: QuestId) {
    with_state(|st| {
        let trackers = quests::quest_progress(st.engine.state());
        if st.quest_log.claim(id, &trackers) {
            set_coach(doc, "🎉", "Sticker verdiend! 📚");
        }
        render(doc, st);
    });
}

// --- Timers ------------------------------------------------------------------

fn set_timeout(cb: Closure<dyn FnMut()>, delay_ms: i32) {
    if let Some(win) = window() {
        let _ = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms,
            );
    }
    cb.forget();
}

fn schedule_next_question(doc: &Document) {
    let doc = doc.clone();
    set_timeout(
        Closure::wrap(Box::new(move || {
            with_state(|st| {
                if st.celebrating {
                    return;
                }
                st.engine.next_question();
                st.buffer.clear();
                set_coach(&doc, "🐼", "Probeer deze! 💪");
                render(&doc, st);
            });
        }) as Box<dyn FnMut()>),
        NEXT_QUESTION_DELAY_MS,
    );
}

fn schedule_celebration_end(doc: &Document) {
    let doc = doc.clone();
    set_timeout(
        Closure::wrap(Box::new(move || {
            with_state(|st| {
                st.engine.reset_bamboo_growth();
                st.engine.next_question();
                st.buffer.clear();
                st.celebrating = false;
                clear_confetti(&doc);
                set_coach(&doc, "😊", "Laten we doorgaan!");
                render(&doc, st);
            });
        }) as Box<dyn FnMut()>),
        CELEBRATION_MS,
    );
}

// --- Rendering ---------------------------------------------------------------

fn set_coach(doc: &Document, emotion: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id("pm-coach-text") {
        el.set_text_content(Some(text));
    }
    if let Some(el) = doc.get_element_by_id("pm-coach-emotion") {
        el.set_text_content(Some(emotion));
    }
}

/// Operand iconography. Counting questions must show exactly the quantity to
/// recognize; additions show the two groups being joined. Subtraction and
/// multiplication stay text-only.
fn visual_markup(q: &Question) -> String {
    match q.kind() {
        QuestionKind::Counting { quantity } => {
            let mut html = String::new();
            for i in 0..quantity {
                html.push_str("🐼");
                if (i + 1) % 10 == 0 {
                    html.push_str("<br>");
                }
            }
            html
        }
        QuestionKind::Add { a, b } => format!(
            "{} ➕ {}",
            "🎋".repeat(a as usize),
            "🎋".repeat(b as usize)
        ),
        _ => String::new(),
    }
}

fn quest_key(id: QuestId) -> &'static str {
    match id {
        QuestId::Streak => "streak",
        QuestId::Bamboo => "bamboo",
        QuestId::Precision => "precision",
    }
}

fn render(doc: &Document, st: &WidgetState) {
    let state = st.engine.state();

    if let Some(el) = doc.get_element_by_id("pm-score") {
        el.set_text_content(Some(&format!("Score: {}", state.score)));
    }
    if let Some(el) = doc.get_element_by_id("pm-question") {
        let text = state
            .current_question
            .as_ref()
            .map(|q| q.display_text().to_string())
            .unwrap_or_default();
        el.set_text_content(Some(&text));
    }
    if let Some(el) = doc.get_element_by_id("pm-visual") {
        let html = state
            .current_question
            .as_ref()
            .map(|q| visual_markup(q))
            .unwrap_or_default();
        el.set_inner_html(&html);
    }
    if let Some(el) = doc.get_element_by_id("pm-input") {
        let shown = if st.buffer.is_empty() {
            "_"
        } else {
            st.buffer.as_str()
        };
        el.set_text_content(Some(shown));
    }
    if let Some(el) = doc.get_element_by_id("pm-bamboo") {
        let mut html = String::new();
        let grown = state.bamboo_growth.min(BAMBOO_MAX) as usize;
        for _ in 0..grown {
            html.push_str("<span style='font-size:30px; margin-right:6px;'>🎋</span>");
        }
        for _ in grown..BAMBOO_MAX as usize {
            html.push_str("<span style='font-size:30px; margin-right:6px; opacity:0.3;'>○</span>");
        }
        el.set_inner_html(&html);
    }

    // Category highlight follows the engine, not the last click.
    for cat in Category::ALL {
        if let Some(el) = doc.get_element_by_id(&format!("pm-cat-{}", cat.as_str())) {
            let style = if cat == st.engine.category() {
                CAT_BUTTON_SELECTED
            } else {
                CAT_BUTTON_STYLE
            };
            el.set_attribute("style", style).ok();
        }
    }

    // Level / XP line and quest trackers, all derived per render.
    if let Some(el) = doc.get_element_by_id("pm-level") {
        let level = quests::level_for_score(state.score);
        let pct = (quests::xp_fraction(state.score) * 100.0).round() as i64;
        el.set_text_content(Some(&format!(
            "Level {} · {} ({}% richting level {})",
            level,
            quests::xp_label(state.score),
            pct,
            level + 1
        )));
    }
    let trackers = quests::quest_progress(state);
    for quest in &trackers {
        let key = quest_key(quest.id);
        if let Some(el) = doc.get_element_by_id(&format!("pm-quest-label-{}", key)) {
            el.set_text_content(Some(&format!(
                "{} {} · {}",
                quest.emoji,
                quest.title,
                quest.progress_label()
            )));
        }
        if let Some(el) = doc.get_element_by_id(&format!("pm-quest-bar-{}", key)) {
            el.set_attribute(
                "style",
                &format!(
                    "height:6px; border-radius:3px; background:#7ac74f; width:{}%;",
                    quest.percent()
                ),
            )
            .ok();
        }
        if let Some(el) = doc.get_element_by_id(&format!("pm-claim-{}", key)) {
            let claimed = st.quest_log.is_claimed(quest.id);
            if let Ok(btn) = el.dyn_into::<web_sys::HtmlButtonElement>() {
                btn.set_text_content(Some(if claimed { "Ontvangen" } else { "Claim" }));
                btn.set_disabled(claimed || !quest.is_completed());
            }
        }
    }
    if let Some(el) = doc.get_element_by_id("pm-stickers") {
        let n = st.quest_log.stickers_earned();
        let noun = if n == 1 { "sticker" } else { "stickers" };
        el.set_text_content(Some(&format!("📚 {} {}", n, noun)));
    }
}

// --- Confetti ----------------------------------------------------------------

fn spawn_confetti(doc: &Document, rng: &mut Rng) {
    const PIECES: &[&str] = &["🎊", "🎉", "✨", "🌟", "🎋"];
    if let Some(el) = doc.get_element_by_id("pm-confetti") {
        let mut html = String::new();
        for _ in 0..CONFETTI_PIECES {
            let left = rng.int_in(0, 100);
            let top = rng.int_in(0, 90);
            let size = rng.int_in(16, 34);
            let piece = PIECES[rng.index(PIECES.len())];
            html.push_str(&format!(
                "<span style='position:absolute; left:{}%; top:{}%; font-size:{}px;'>{}</span>",
                left, top, size, piece
            ));
        }
        el.set_inner_html(&html);
    }
}

fn clear_confetti(doc: &Document) {
    if let Some(el) = doc.get_element_by_id("pm-confetti") {
        el.set_inner_html("");
    }
}
