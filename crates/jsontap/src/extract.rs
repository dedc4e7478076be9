//! On-demand value reconstruction from the lookback window.
//!
//! When a composite closes, the state machine asks this module to slice the
//! complete JSON text back out of the [`Context`] and decode it. Every
//! function here fails soft: an unfound boundary or a decode failure yields
//! `None` (or an empty string), never an error that halts parsing — the
//! defining text may legitimately have scrolled out of the bounded window.
//!
//! The backward object scan counts braces without honoring string contents.
//! The position-tracked array scans do honor string boundaries and escapes,
//! since arrays routinely embed `,`/`]` inside string items. The asymmetry
//! is deliberate: object extraction only runs immediately after a `}` was
//! consumed, where the closing brace is the last character of the window.
use alloc::string::String;

use crate::{context::Context, decode::decode, value::Value};

/// Whitespace as the state machine classifies it.
fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn decode_range(ctx: &Context, start: usize, end: usize) -> Option<Value> {
    decode(&ctx.text(start, end)).ok()
}

/// Extracts the most recently closed object: scans backward counting `}`
/// against `{` to find its start, then forward to the matching close.
pub(crate) fn last_object(ctx: &Context) -> Option<Value> {
    let chars = ctx.chars();
    let mut depth = 0i32;
    let mut start = None;
    for (i, &c) in chars.iter().enumerate().rev() {
        match c {
            '}' => depth += 1,
            '{' => {
                depth -= 1;
                if depth == 0 {
                    start = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let start = start?;

    let mut depth = 0i32;
    let mut end = start;
    for (i, &c) in chars.iter().enumerate().skip(start) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = i + 1;
                    break;
                }
            }
            _ => {}
        }
    }
    decode_range(ctx, start, end)
}

/// Extracts the last completed array item, whatever its kind. Skips the
/// trailing separator/closer and whitespace, classifies the final
/// significant character, and extracts accordingly.
pub(crate) fn last_array_item(ctx: &Context) -> Option<Value> {
    if ctx.is_empty() {
        return None;
    }
    let chars = ctx.chars();
    let mut pos = chars.len();
    while pos > 0 && (matches!(chars[pos - 1], ',' | ']') || is_ws(chars[pos - 1])) {
        pos -= 1;
    }
    if pos == 0 {
        return None;
    }
    let pos = pos - 1;

    match chars[pos] {
        '}' => last_object(ctx),
        ']' => nested_array_ending_at(ctx, pos),
        '"' => quoted_string_ending_at(ctx, pos),
        _ => primitive_ending_at(ctx, pos),
    }
}

/// Extracts a nested array whose `]` sits at `pos`, by backward bracket
/// counting.
fn nested_array_ending_at(ctx: &Context, pos: usize) -> Option<Value> {
    let chars = ctx.chars();
    let mut depth = 0i32;
    let mut start = None;
    for i in (0..=pos).rev() {
        match chars[i] {
            ']' => depth += 1,
            '[' => {
                depth -= 1;
                if depth == 0 {
                    start = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    decode_range(ctx, start?, pos + 1)
}

/// Extracts a string whose closing `"` sits at `pos`, scanning backward for
/// the opening quote while honoring backslash escapes.
fn quoted_string_ending_at(ctx: &Context, pos: usize) -> Option<Value> {
    let chars = ctx.chars();
    let mut escaped = false;
    let mut start = pos;
    for i in (0..pos).rev() {
        if escaped {
            escaped = false;
            continue;
        }
        match chars[i] {
            '\\' => escaped = true,
            '"' => {
                start = i;
                break;
            }
            _ => {}
        }
    }
    decode_range(ctx, start, pos + 1)
}

/// Extracts a bare primitive ending at `pos` by scanning backward to the
/// nearest delimiter.
fn primitive_ending_at(ctx: &Context, pos: usize) -> Option<Value> {
    let chars = ctx.chars();
    let mut start = pos;
    while start > 0 {
        let prev = chars[start - 1];
        if matches!(prev, ',' | ':' | '[') || is_ws(prev) {
            break;
        }
        start -= 1;
    }
    let text = ctx.text(start, pos + 1);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    decode(trimmed).ok()
}

/// Forward scan from a known `[` offset to its matching `]`, honoring string
/// boundaries and escapes. Returns the exclusive end, or the window length
/// when no match exists yet.
fn array_end_at(ctx: &Context, start: usize) -> usize {
    let chars = ctx.chars();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }
    chars.len()
}

/// Extracts and decodes the complete array starting at `start`.
pub(crate) fn array_at(ctx: &Context, start: usize) -> Option<Value> {
    let end = array_end_at(ctx, start);
    decode_range(ctx, start, end)
}

/// Returns the array's inner text, without the outer brackets.
pub(crate) fn array_inner_text_at(ctx: &Context, start: usize) -> String {
    let end = array_end_at(ctx, start);
    if end > start + 1 {
        ctx.text(start + 1, end - 1)
    } else {
        String::new()
    }
}
