//! Structural memory: bracket stack, path stack, and array-start offsets.
//!
//! The bracket stack mirrors the literal `{`/`[` nesting of the input. The
//! path stack holds one entry per composite value opened as a named field's
//! value (or as an anonymous array element), and is what turns nesting into
//! the `/`-joined paths reported to callbacks. Array-start offsets index
//! into the lookback window so a whole array can be sliced back out when it
//! closes.
use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// One kind of composite bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bracket {
    /// `{` / `}`
    Brace,
    /// `[` / `]`
    Square,
}

/// A path-stack entry: the field name a composite was opened under (empty
/// for anonymous array elements), which bracket opened it, and the index
/// that bracket occupies in the bracket stack. The depth lets a pop resolve
/// an entry only when its own bracket closes, not when a deeper one does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathEntry {
    pub(crate) field: String,
    pub(crate) bracket: Bracket,
    pub(crate) depth: usize,
}

/// Key for a recorded array start: (parent path, field name).
pub(crate) type ArrayKey = (String, String);

#[derive(Debug, Default)]
pub(crate) struct Tracker {
    brackets: Vec<Bracket>,
    path: Vec<PathEntry>,
    array_starts: BTreeMap<ArrayKey, usize>,
    /// Field name parsed but not yet resolved to a value.
    pub(crate) field_name: String,
}

impl Tracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // ---- bracket stack -------------------------------------------------

    pub(crate) fn push_bracket(&mut self, bracket: Bracket) {
        self.brackets.push(bracket);
    }

    pub(crate) fn pop_bracket(&mut self) -> Option<Bracket> {
        self.brackets.pop()
    }

    pub(crate) fn peek_bracket(&self) -> Option<Bracket> {
        self.brackets.last().copied()
    }

    /// Bracket `n` positions below the top of the stack (`0` is the top).
    pub(crate) fn bracket_from_top(&self, n: usize) -> Option<Bracket> {
        self.brackets
            .len()
            .checked_sub(n + 1)
            .and_then(|i| self.brackets.get(i))
            .copied()
    }

    /// Current height of the bracket stack; recorded as the depth of path
    /// entries pushed for brackets about to open.
    pub(crate) fn bracket_depth(&self) -> usize {
        self.brackets.len()
    }

    pub(crate) fn in_array(&self) -> bool {
        self.peek_bracket() == Some(Bracket::Square)
    }

    // ---- path stack ----------------------------------------------------

    pub(crate) fn push_path(&mut self, field: String, bracket: Bracket, depth: usize) {
        self.path.push(PathEntry {
            field,
            bracket,
            depth,
        });
    }

    pub(crate) fn pop_path(&mut self) -> Option<PathEntry> {
        self.path.pop()
    }

    pub(crate) fn top_path(&self) -> Option<&PathEntry> {
        self.path.last()
    }

    pub(crate) fn path_len(&self) -> usize {
        self.path.len()
    }

    pub(crate) fn path_entry(&self, index: usize) -> Option<&PathEntry> {
        self.path.get(index)
    }

    /// True when the innermost path entry is an array — the condition under
    /// which strings and primitives are array items rather than field
    /// values.
    pub(crate) fn at_array_level(&self) -> bool {
        matches!(
            self.top_path(),
            Some(PathEntry {
                bracket: Bracket::Square,
                ..
            })
        )
    }

    /// Path built from the first `count` entries: `/`-joined non-empty field
    /// names with a leading `/`; the empty string when no entries are
    /// considered (the root). A stack holding only anonymous entries yields
    /// `/`, e.g. inside a root-level array of objects.
    pub(crate) fn path_up_to(&self, count: usize) -> String {
        let entries = &self.path[..count.min(self.path.len())];
        if entries.is_empty() {
            return String::new();
        }
        let mut path = String::from("/");
        let mut first = true;
        for entry in entries {
            if entry.field.is_empty() {
                continue;
            }
            if !first {
                path.push('/');
            }
            first = false;
            path.push_str(&entry.field);
        }
        path
    }

    /// Full path from every entry on the stack.
    pub(crate) fn path(&self) -> String {
        self.path_up_to(self.path.len())
    }

    /// Path excluding the innermost entry — the parent path reported for
    /// array items and for the array's own `field_end`.
    pub(crate) fn parent_path(&self) -> String {
        self.path_up_to(self.path.len().saturating_sub(1))
    }

    /// Field name used for `value_chunk` callbacks: the enclosing array's
    /// field name when inside an array, otherwise the pending field name.
    pub(crate) fn current_field_name(&self) -> &str {
        if self.in_array() {
            if let Some(entry) = self.top_path() {
                return &entry.field;
            }
        }
        &self.field_name
    }

    // ---- array-start offsets -------------------------------------------

    pub(crate) fn record_array_start(&mut self, key: ArrayKey, offset: usize) {
        self.array_starts.insert(key, offset);
    }

    pub(crate) fn array_start(&self, key: &ArrayKey) -> Option<usize> {
        self.array_starts.get(key).copied()
    }

    pub(crate) fn remove_array_start(&mut self, key: &ArrayKey) {
        self.array_starts.remove(key);
    }

    /// Rewrites every recorded offset after the lookback window dropped
    /// `trim` characters from its front. Offsets that now precede the window
    /// are discarded; extraction for those arrays fails soft later.
    pub(crate) fn shift_array_starts(&mut self, trim: usize) {
        if trim == 0 {
            return;
        }
        let old = core::mem::take(&mut self.array_starts);
        self.array_starts = old
            .into_iter()
            .filter_map(|(key, pos)| (pos >= trim).then(|| (key, pos - trim)))
            .collect();
    }
}
