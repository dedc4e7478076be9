//! Scratch buffers for the value currently being scanned.
//!
//! One string accumulates raw text (a field name, string body, or primitive
//! literal in flight); the unicode buffer accumulates the digits of a
//! pending `\uXXXX` escape. Both are owned by the parser and cleared on
//! every state boundary that finishes a value.
use alloc::string::String;

use crate::escape_buffer::UnicodeEscapeBuffer;

#[derive(Debug, Default)]
pub(crate) struct Buffers {
    raw: String,
    pub(crate) unicode: UnicodeEscapeBuffer,
}

impl Buffers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.raw
    }

    pub(crate) fn push(&mut self, c: char) {
        self.raw.push(c);
    }

    /// Appends a two-character escape (`\` plus the escape character) as raw
    /// text, preserving the source form for the raw-value payload.
    pub(crate) fn push_raw_escape(&mut self, c: char) {
        self.raw.push('\\');
        self.raw.push(c);
    }

    pub(crate) fn clear(&mut self) {
        self.raw.clear();
    }

    /// Clears the buffer and starts it with `c` (the first character of a
    /// primitive).
    pub(crate) fn seed(&mut self, c: char) {
        self.raw.clear();
        self.raw.push(c);
    }

    pub(crate) fn take(&mut self) -> String {
        core::mem::take(&mut self.raw)
    }

    /// Replaces the trailing `\uXXXX` sequence (six characters) with its
    /// decoded character. Called only after a successful decode, at which
    /// point the buffer is guaranteed to end with the six-character escape.
    pub(crate) fn replace_unicode_suffix(&mut self, decoded: char) {
        let cut = self
            .raw
            .char_indices()
            .rev()
            .nth(5)
            .map_or(0, |(i, _)| i);
        self.raw.truncate(cut);
        self.raw.push(decoded);
    }
}

#[cfg(test)]
mod tests {
    use super::Buffers;

    #[test]
    fn raw_escape_keeps_source_form() {
        let mut buf = Buffers::new();
        buf.push('a');
        buf.push_raw_escape('n');
        assert_eq!(buf.as_str(), "a\\n");
    }

    #[test]
    fn unicode_suffix_replacement() {
        let mut buf = Buffers::new();
        for c in "He\\u2019".chars() {
            buf.push(c);
        }
        buf.replace_unicode_suffix('\u{2019}');
        assert_eq!(buf.as_str(), "He\u{2019}");
    }

    #[test]
    fn seed_resets_previous_content() {
        let mut buf = Buffers::new();
        buf.push('x');
        buf.seed('1');
        assert_eq!(buf.as_str(), "1");
        assert_eq!(buf.take(), "1");
        assert_eq!(buf.as_str(), "");
    }
}
