//! Accumulator for four-character Unicode escape sequences.
//!
//! After a `\u` prefix the state machine feeds the next four characters in
//! here one at a time — they may arrive in separate input chunks. On the
//! fourth character the buffer reports either the decoded scalar or, when
//! the digits are not valid hex or name an invalid code point, the raw
//! four characters so the caller can surface the escape verbatim.
use alloc::string::String;

/// Result of feeding the fourth character of an escape sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EscapeOutcome {
    /// The four digits named a valid Unicode scalar value.
    Decoded(char),
    /// Not a decodable escape; carries the four raw characters as fed.
    Invalid(String),
}

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    digits: String,
    count: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Discards any partially accumulated sequence.
    pub(crate) fn reset(&mut self) {
        self.digits.clear();
        self.count = 0;
    }

    /// Feeds one character. Returns `None` until four characters have been
    /// accumulated, then the outcome; the buffer resets itself afterwards.
    ///
    /// Non-hex characters are accepted — the escape is then reported as
    /// [`EscapeOutcome::Invalid`] once complete, so callers can emit the
    /// sequence as literal text rather than halting.
    pub(crate) fn feed(&mut self, c: char) -> Option<EscapeOutcome> {
        self.digits.push(c);
        self.count += 1;
        if self.count < 4 {
            return None;
        }

        let code = self
            .digits
            .chars()
            .try_fold(0u32, |acc, d| d.to_digit(16).map(|v| acc << 4 | v));
        let outcome = match code.and_then(char::from_u32) {
            Some(decoded) => {
                self.reset();
                EscapeOutcome::Decoded(decoded)
            }
            None => {
                let raw = core::mem::take(&mut self.digits);
                self.count = 0;
                EscapeOutcome::Invalid(raw)
            }
        };
        Some(outcome)
    }
}
