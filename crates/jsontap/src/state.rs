//! The character-level state machine.
//!
//! Exactly one [`ParserState`] is active at a time; each consumed character
//! runs one `step` call, which mutates the scratch buffers and the tracker,
//! fires zero or more handler callbacks, and returns the next state. There
//! is no terminal error state: characters the active state does not expect
//! are ignored and parsing continues, so the machine degrades gracefully on
//! malformed input instead of halting.
use alloc::string::{String, ToString};

use crate::{
    decode::{decode, decode_string_body},
    escape_buffer::EscapeOutcome,
    extract,
    handler::Handler,
    parser::StreamingParser,
    tracker::Bracket,
    value::Value,
};

/// Which kind of string literal an escape sequence was entered from. The
/// machine resumes in that state once the escape completes, and only value
/// strings emit decoded `value_chunk`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringMode {
    /// Escaping inside a field name.
    FieldName,
    /// Escaping inside a string value.
    Value,
}

/// One lexical mode of the parser. States are replaced, never mutated in
/// place: the active state plus the tracker fully determine how the next
/// character is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParserState {
    /// Outside any value, or between top-level values.
    Root,
    /// Inside a field name, before the closing quote.
    FieldName,
    /// Field name complete, expecting `:`.
    AfterFieldName,
    /// Saw `:`, expecting the field's value.
    AfterColon,
    /// Inside a string value.
    ValueString,
    /// Inside a number, boolean, or null literal.
    Primitive,
    /// Inside an object, between fields.
    InObjectWait,
    /// Inside an array, between items.
    InArrayWait,
    /// Saw `\`, expecting the escape character.
    Escape(StringMode),
    /// Inside a `\uXXXX` escape, accumulating digits.
    UnicodeEscape(StringMode),
}

fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn starts_primitive(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, 't' | 'f' | 'n' | '-')
}

impl<H: Handler> StreamingParser<H> {
    /// Consumes exactly one character in the given state and returns the
    /// next state.
    pub(crate) fn step(&mut self, state: ParserState, c: char) -> ParserState {
        use ParserState::{
            AfterColon, AfterFieldName, Escape, FieldName, InArrayWait, InObjectWait, Primitive,
            Root, UnicodeEscape, ValueString,
        };

        match state {
            Root => match c {
                '{' => {
                    self.tracker.push_bracket(Bracket::Brace);
                    InObjectWait
                }
                '[' => {
                    self.tracker.push_bracket(Bracket::Square);
                    InArrayWait
                }
                // Whitespace and stray characters alike produce no event.
                _ => Root,
            },

            InObjectWait => match c {
                '"' => {
                    self.buffers.clear();
                    FieldName
                }
                '}' => self.close_brace(),
                // `,` means ready for the next field; anything else is
                // malformed input we skip over.
                _ => InObjectWait,
            },

            FieldName => match c {
                '\\' => Escape(StringMode::FieldName),
                '"' => {
                    let raw = self.buffers.take();
                    self.tracker.field_name = match decode_string_body(&raw) {
                        Ok(name) => name,
                        Err(_) => raw,
                    };
                    AfterFieldName
                }
                _ => {
                    self.buffers.push(c);
                    FieldName
                }
            },

            AfterFieldName => match c {
                ':' => AfterColon,
                _ => AfterFieldName,
            },

            AfterColon => match c {
                _ if is_ws(c) => AfterColon,
                '"' => {
                    let path = self.tracker.path();
                    self.handler.on_field_start(&path, &self.tracker.field_name);
                    self.buffers.clear();
                    ValueString
                }
                '{' => {
                    let path = self.tracker.path();
                    self.handler.on_field_start(&path, &self.tracker.field_name);
                    let depth = self.tracker.bracket_depth();
                    let field = core::mem::take(&mut self.tracker.field_name);
                    self.tracker.push_path(field, Bracket::Brace, depth);
                    self.tracker.push_bracket(Bracket::Brace);
                    InObjectWait
                }
                '[' => {
                    let path = self.tracker.path();
                    self.handler.on_field_start(&path, &self.tracker.field_name);
                    let depth = self.tracker.bracket_depth();
                    let field = core::mem::take(&mut self.tracker.field_name);
                    // The `[` was appended to the window just before this
                    // step, so its offset is the current end minus one.
                    self.tracker
                        .record_array_start((path, field.clone()), self.context.len() - 1);
                    self.tracker.push_path(field, Bracket::Square, depth);
                    self.tracker.push_bracket(Bracket::Square);
                    InArrayWait
                }
                _ if starts_primitive(c) => {
                    let path = self.tracker.path();
                    self.handler.on_field_start(&path, &self.tracker.field_name);
                    self.buffers.seed(c);
                    Primitive
                }
                _ => AfterColon,
            },

            ValueString => match c {
                '\\' => Escape(StringMode::Value),
                '"' => {
                    let raw = self.buffers.take();
                    if !self.tracker.in_array() {
                        let parsed = match decode_string_body(&raw) {
                            Ok(s) => Value::String(s),
                            Err(_) => Value::String(raw.clone()),
                        };
                        let path = self.tracker.path();
                        let field = core::mem::take(&mut self.tracker.field_name);
                        self.handler.on_field_end(&path, &field, &raw, Some(&parsed));
                    }
                    if self.tracker.in_array() {
                        InArrayWait
                    } else {
                        InObjectWait
                    }
                }
                _ => {
                    self.buffers.push(c);
                    let path = self.tracker.path();
                    let field = self.tracker.current_field_name().to_string();
                    self.handler.on_value_chunk(&path, &field, c);
                    ValueString
                }
            },

            Primitive => match c {
                ',' | '}' | ']' => self.finish_primitive(c),
                _ if is_ws(c) => self.finish_primitive(c),
                _ => {
                    self.buffers.push(c);
                    Primitive
                }
            },

            InArrayWait => match c {
                _ if is_ws(c) => InArrayWait,
                ',' => {
                    self.item_end_on_separator();
                    InArrayWait
                }
                ']' => self.close_bracket(),
                '"' => {
                    self.buffers.clear();
                    ValueString
                }
                '{' => {
                    if self.tracker.at_array_level() {
                        let field = self.array_field();
                        let path = self.tracker.parent_path();
                        self.handler.on_array_item_start(&path, &field);
                    }
                    self.tracker.push_bracket(Bracket::Brace);
                    let depth = self.tracker.bracket_depth() - 1;
                    self.tracker.push_path(String::new(), Bracket::Brace, depth);
                    InObjectWait
                }
                '[' => {
                    self.tracker.push_bracket(Bracket::Square);
                    let depth = self.tracker.bracket_depth() - 1;
                    self.tracker.push_path(String::new(), Bracket::Square, depth);
                    InArrayWait
                }
                _ if starts_primitive(c) => {
                    if self.tracker.at_array_level() {
                        let field = self.array_field();
                        let path = self.tracker.parent_path();
                        self.handler.on_field_start(&path, &field);
                    }
                    self.buffers.seed(c);
                    Primitive
                }
                _ => InArrayWait,
            },

            Escape(mode) => {
                if c == 'u' {
                    self.buffers.push('\\');
                    self.buffers.push('u');
                    self.buffers.unicode.reset();
                    return UnicodeEscape(mode);
                }
                self.buffers.push_raw_escape(c);
                if mode == StringMode::Value {
                    let decoded = match c {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        'b' => '\u{0008}',
                        'f' => '\u{000C}',
                        // `\\`, `\"`, `\/`, and unknown escapes pass through.
                        other => other,
                    };
                    let path = self.tracker.path();
                    let field = self.tracker.current_field_name().to_string();
                    self.handler.on_value_chunk(&path, &field, decoded);
                }
                match mode {
                    StringMode::Value => ValueString,
                    StringMode::FieldName => FieldName,
                }
            }

            UnicodeEscape(mode) => {
                self.buffers.push(c);
                let Some(outcome) = self.buffers.unicode.feed(c) else {
                    return UnicodeEscape(mode);
                };
                match outcome {
                    EscapeOutcome::Decoded(decoded) => {
                        self.buffers.replace_unicode_suffix(decoded);
                        if mode == StringMode::Value {
                            let path = self.tracker.path();
                            let field = self.tracker.current_field_name().to_string();
                            self.handler.on_value_chunk(&path, &field, decoded);
                        }
                    }
                    EscapeOutcome::Invalid(digits) => {
                        // The raw buffer keeps the `\uXXXX` text; surface
                        // the six characters verbatim instead of dropping
                        // them.
                        if mode == StringMode::Value {
                            let path = self.tracker.path();
                            let field = self.tracker.current_field_name().to_string();
                            self.handler.on_value_chunk(&path, &field, '\\');
                            self.handler.on_value_chunk(&path, &field, 'u');
                            for d in digits.chars() {
                                self.handler.on_value_chunk(&path, &field, d);
                            }
                        }
                    }
                }
                match mode {
                    StringMode::Value => ValueString,
                    StringMode::FieldName => FieldName,
                }
            }
        }
    }

    /// Field name of the innermost path entry (the enclosing array).
    fn array_field(&self) -> String {
        self.tracker
            .top_path()
            .map(|entry| entry.field.clone())
            .unwrap_or_default()
    }

    /// Finalizes the primitive in the scratch buffer at its terminating
    /// delimiter, then dispatches on the delimiter itself.
    fn finish_primitive(&mut self, delimiter: char) -> ParserState {
        let text = self.buffers.take();
        let raw = text.trim().to_string();
        let parsed = match decode(&raw) {
            Ok(value) => value,
            Err(_) => Value::String(raw.clone()),
        };

        if !self.tracker.in_array() {
            let path = self.tracker.path();
            let field = core::mem::take(&mut self.tracker.field_name);
            self.handler.on_field_end(&path, &field, &raw, Some(&parsed));
        }

        match delimiter {
            ',' => {
                if self.tracker.in_array() {
                    if let Some(last) = raw.chars().last() {
                        self.primitive_item_end(last);
                    }
                    ParserState::InArrayWait
                } else {
                    ParserState::InObjectWait
                }
            }
            '}' => self.close_brace(),
            ']' => self.close_bracket(),
            // Whitespace: the primitive is done, wait for the separator.
            _ => {
                if self.tracker.in_array() {
                    ParserState::InArrayWait
                } else {
                    ParserState::InObjectWait
                }
            }
        }
    }

    /// Close-brace protocol: report the object as an array item when it is
    /// one, then unwind the stacks.
    fn close_brace(&mut self) -> ParserState {
        let is_object_in_array = self.tracker.bracket_depth() >= 2
            && self.tracker.peek_bracket() == Some(Bracket::Brace)
            && self.tracker.bracket_from_top(1) == Some(Bracket::Square);

        if is_object_in_array && self.tracker.path_len() >= 2 {
            let array_index = self.tracker.path_len() - 2;
            let field = self
                .tracker
                .path_entry(array_index)
                .map(|entry| entry.field.clone())
                .unwrap_or_default();
            let path = self.tracker.path_up_to(array_index);
            if let Some(item) = extract::last_object(&self.context) {
                let is_empty = matches!(&item, Value::Object(map) if map.is_empty());
                if !is_empty {
                    self.handler.on_array_item_end(&path, &field, Some(&item));
                }
            }
        }

        self.tracker.pop_bracket();

        // Pop the path entry only when the brace that just closed is the one
        // that opened it.
        let matches_entry = self.tracker.top_path().is_some_and(|entry| {
            entry.bracket == Bracket::Brace && entry.depth == self.tracker.bracket_depth()
        });
        if matches_entry {
            self.tracker.pop_path();
        }

        self.after_close()
    }

    /// Close-bracket protocol: report a trailing non-composite item, then
    /// the array itself, then unwind the stacks.
    fn close_bracket(&mut self) -> ParserState {
        if self.tracker.bracket_depth() >= 2 && self.tracker.at_array_level() {
            // The `]` itself is the last window character; classify what
            // precedes it, skipping whitespace.
            if let Some(pos) = self.significant_char_before_last() {
                if !matches!(self.context.get(pos), Some('}' | ']')) {
                    let field = self.array_field();
                    let path = self.tracker.parent_path();
                    if let Some(item) = extract::last_array_item(&self.context) {
                        self.handler.on_array_item_end(&path, &field, Some(&item));
                    }
                }
            }
        }

        if self.tracker.at_array_level() {
            let field = self.array_field();
            let path = self.tracker.parent_path();
            let key = (path.clone(), field.clone());
            let (raw, parsed) = match self.tracker.array_start(&key) {
                Some(start) => (
                    extract::array_inner_text_at(&self.context, start),
                    extract::array_at(&self.context, start),
                ),
                // Start offset evicted from the window (or an anonymous
                // nested array): the event still fires, without a payload.
                None => (String::new(), None),
            };
            self.handler.on_field_end(&path, &field, &raw, parsed.as_ref());
            self.tracker.remove_array_start(&key);
            self.tracker.pop_path();
        }

        self.tracker.pop_bracket();
        self.after_close()
    }

    /// Fires `array_item_end` for a primitive that just terminated on `,`
    /// inside an array. `last` is the final character of its raw text:
    /// composites (`}`/`]`) already reported themselves when they closed.
    fn primitive_item_end(&mut self, last: char) {
        if !self.tracker.in_array() || !self.tracker.at_array_level() {
            return;
        }
        if matches!(last, '}' | ']') {
            return;
        }
        let field = self.array_field();
        let path = self.tracker.parent_path();
        if let Some(item) = extract::last_array_item(&self.context) {
            self.handler.on_array_item_end(&path, &field, Some(&item));
        }
    }

    /// Fires `array_item_end` when a bare `,` arrives while waiting inside
    /// an array, classifying the preceding significant character to skip
    /// composites that already self-reported.
    fn item_end_on_separator(&mut self) {
        if !self.tracker.in_array() || !self.tracker.at_array_level() {
            return;
        }
        let Some(pos) = self.significant_char_before_last() else {
            return;
        };
        if matches!(self.context.get(pos), Some('}' | ']')) {
            return;
        }
        let field = self.array_field();
        let path = self.tracker.parent_path();
        if let Some(item) = extract::last_array_item(&self.context) {
            self.handler.on_array_item_end(&path, &field, Some(&item));
        }
    }

    /// Position of the last non-whitespace character before the one just
    /// consumed (which sits at the end of the window).
    fn significant_char_before_last(&self) -> Option<usize> {
        let mut pos = self.context.len().checked_sub(2)?;
        loop {
            match self.context.get(pos) {
                Some(c) if is_ws(c) => pos = pos.checked_sub(1)?,
                Some(_) => return Some(pos),
                None => return None,
            }
        }
    }

    /// State for whatever container is now innermost, or `Root` when the
    /// bracket stack emptied.
    fn after_close(&self) -> ParserState {
        match self.tracker.peek_bracket() {
            Some(Bracket::Square) => ParserState::InArrayWait,
            Some(Bracket::Brace) => ParserState::InObjectWait,
            None => ParserState::Root,
        }
    }
}
