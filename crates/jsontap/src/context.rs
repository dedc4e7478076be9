//! The bounded lookback window.
//!
//! Every character fed to the parser is appended here before the state
//! machine sees it. The extractor later slices complete values back out of
//! the window, which is why the window must be trimmed only from the front
//! and why every recorded offset has to move in lockstep with each trim
//! (see [`Tracker::shift_array_starts`](crate::tracker::Tracker)).
//!
//! Characters are stored decoded so that offsets index code points, never
//! the middle of a UTF-8 sequence.
use alloc::string::String;
use alloc::vec::Vec;

#[derive(Debug)]
pub(crate) struct Context {
    chars: Vec<char>,
    capacity: usize,
}

impl Context {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            chars: Vec::new(),
            capacity,
        }
    }

    /// Appends one character, returning how many characters were trimmed
    /// from the front to stay within capacity. The caller must shift any
    /// recorded offsets by the returned amount.
    pub(crate) fn push(&mut self, c: char) -> usize {
        self.chars.push(c);
        if self.chars.len() > self.capacity {
            let trim = self.chars.len() - self.capacity;
            self.chars.drain(..trim);
            trim
        } else {
            0
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Collects `start..end` into an owned string.
    pub(crate) fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Context;

    #[test]
    fn push_within_capacity_does_not_trim() {
        let mut ctx = Context::new(4);
        for c in "abcd".chars() {
            assert_eq!(ctx.push(c), 0);
        }
        assert_eq!(ctx.len(), 4);
        assert_eq!(ctx.text(0, 4), "abcd");
    }

    #[test]
    fn push_over_capacity_trims_front() {
        let mut ctx = Context::new(3);
        for c in "abc".chars() {
            ctx.push(c);
        }
        assert_eq!(ctx.push('d'), 1);
        assert_eq!(ctx.text(0, 3), "bcd");
        assert_eq!(ctx.push('e'), 1);
        assert_eq!(ctx.text(0, 3), "cde");
    }

    #[test]
    fn multibyte_characters_count_as_one() {
        let mut ctx = Context::new(2);
        ctx.push('é');
        ctx.push('漢');
        assert_eq!(ctx.push('a'), 1);
        assert_eq!(ctx.get(0), Some('漢'));
        assert_eq!(ctx.get(1), Some('a'));
    }
}
