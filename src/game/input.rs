//! Pending-answer digit buffer.
//!
//! Shared by the on-screen keypad and the physical keyboard: digits collect
//! into a string until the user submits or erases them. Only `0..=9` is
//! accepted and the length is capped so the submit parse can never overflow.

/// Enough for any reachable answer; also keeps the parse inside `i64`.
pub const MAX_DIGITS: usize = 9;

#[derive(Clone, Debug, Default)]
pub struct AnswerBuffer {
    digits: String,
}

impl AnswerBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one digit. Non-digits and presses beyond [`MAX_DIGITS`] are
    /// ignored; returns whether the buffer changed.
    pub fn push_digit(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || self.digits.len() >= MAX_DIGITS {
            return false;
        }
        self.digits.push(c);
        true
    }

    /// Remove the last digit, if any.
    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Parse and consume the buffer. An empty buffer yields `None`, which
    /// makes submission a no-op for the caller.
    pub fn submit(&mut self) -> Option<i64> {
        if self.digits.is_empty() {
            return None;
        }
        // Max 9 ASCII digits, always fits.
        let value = self.digits.parse().ok();
        self.digits.clear();
        value
    }
}
