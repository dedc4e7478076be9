//! Strict JSON text decoder.
//!
//! The state machine and the extractor both need to turn slices of raw JSON
//! text into [`Value`]s: completed primitives, decoded string literals, and
//! whole objects or arrays reconstructed from the lookback window. Decoding
//! is strict (RFC 8259); every caller treats a failure as "fall back to the
//! raw text" rather than an error, so this module never sees invalid input
//! escalate beyond its return value.
use alloc::string::String;

use crate::value::{Array, Map, Value};

/// Opaque decode failure. Callers only branch on success vs. failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecodeError;

/// Nesting cap for the recursive decoder. The lookback window is bounded, but
/// a pathological run of `[` characters would otherwise recurse once per
/// character.
const MAX_DEPTH: usize = 512;

/// Decodes a complete JSON document. Trailing non-whitespace is an error.
pub(crate) fn decode(text: &str) -> Result<Value, DecodeError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    let value = cursor.value(0)?;
    cursor.skip_whitespace();
    if cursor.peek().is_some() {
        return Err(DecodeError);
    }
    Ok(value)
}

/// Decodes the body of a string literal (the text between the quotes, with
/// escape sequences still intact). Runs to the end of the input; there is no
/// terminating quote.
pub(crate) fn decode_string_body(body: &str) -> Result<String, DecodeError> {
    let mut cursor = Cursor::new(body);
    let mut out = String::new();
    while let Some(c) = cursor.peek() {
        cursor.chars.next();
        match c {
            '\\' => out.push(cursor.escape()?),
            '"' => return Err(DecodeError),
            c if (c as u32) < 0x20 => return Err(DecodeError),
            c => out.push(c),
        }
    }
    Ok(out)
}

struct Cursor<'a> {
    chars: core::iter::Peekable<core::str::Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Result<char, DecodeError> {
        self.chars.next().ok_or(DecodeError)
    }

    fn expect(&mut self, c: char) -> Result<(), DecodeError> {
        if self.bump()? == c { Ok(()) } else { Err(DecodeError) }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.chars.next();
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth > MAX_DEPTH {
            return Err(DecodeError);
        }
        match self.peek().ok_or(DecodeError)? {
            '{' => self.object(depth),
            '[' => self.array(depth),
            '"' => {
                self.chars.next();
                self.string_tail().map(Value::String)
            }
            't' => self.literal("true", Value::Boolean(true)),
            'f' => self.literal("false", Value::Boolean(false)),
            'n' => self.literal("null", Value::Null),
            '-' | '0'..='9' => self.number(),
            _ => Err(DecodeError),
        }
    }

    fn literal(&mut self, expected: &str, value: Value) -> Result<Value, DecodeError> {
        for c in expected.chars() {
            self.expect(c)?;
        }
        Ok(value)
    }

    fn object(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.expect('{')?;
        let mut map = Map::new();
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.chars.next();
            return Ok(Value::Object(map));
        }
        loop {
            self.skip_whitespace();
            self.expect('"')?;
            let key = self.string_tail()?;
            self.skip_whitespace();
            self.expect(':')?;
            self.skip_whitespace();
            let value = self.value(depth + 1)?;
            map.insert(key, value);
            self.skip_whitespace();
            match self.bump()? {
                ',' => {}
                '}' => return Ok(Value::Object(map)),
                _ => return Err(DecodeError),
            }
        }
    }

    fn array(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.expect('[')?;
        let mut items = Array::new();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.chars.next();
            return Ok(Value::Array(items));
        }
        loop {
            self.skip_whitespace();
            items.push(self.value(depth + 1)?);
            self.skip_whitespace();
            match self.bump()? {
                ',' => {}
                ']' => return Ok(Value::Array(items)),
                _ => return Err(DecodeError),
            }
        }
    }

    /// Decodes a string literal after the opening quote has been consumed.
    fn string_tail(&mut self) -> Result<String, DecodeError> {
        let mut out = String::new();
        loop {
            match self.bump()? {
                '"' => return Ok(out),
                '\\' => out.push(self.escape()?),
                c if (c as u32) < 0x20 => return Err(DecodeError),
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self) -> Result<char, DecodeError> {
        match self.bump()? {
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            '/' => Ok('/'),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => self.unicode_escape(),
            _ => Err(DecodeError),
        }
    }

    fn unicode_escape(&mut self) -> Result<char, DecodeError> {
        let high = self.hex4()?;
        if (0xD800..=0xDBFF).contains(&high) {
            // Surrogate pair: the low half must follow immediately.
            self.expect('\\')?;
            self.expect('u')?;
            let low = self.hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(DecodeError);
            }
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(code).ok_or(DecodeError);
        }
        char::from_u32(high).ok_or(DecodeError)
    }

    fn hex4(&mut self) -> Result<u32, DecodeError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self.bump()?.to_digit(16).ok_or(DecodeError)?;
            code = code << 4 | digit;
        }
        Ok(code)
    }

    fn number(&mut self) -> Result<Value, DecodeError> {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push(self.bump()?);
        }
        match self.peek().ok_or(DecodeError)? {
            '0' => text.push(self.bump()?),
            '1'..='9' => self.digits(&mut text)?,
            _ => return Err(DecodeError),
        }
        if self.peek() == Some('.') {
            text.push(self.bump()?);
            self.digits(&mut text)?;
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            text.push(self.bump()?);
            if matches!(self.peek(), Some('+' | '-')) {
                text.push(self.bump()?);
            }
            self.digits(&mut text)?;
        }
        text.parse::<f64>().map(Value::Number).map_err(|_| DecodeError)
    }

    /// Consumes one or more ASCII digits into `text`.
    fn digits(&mut self, text: &mut String) -> Result<(), DecodeError> {
        let mut seen = false;
        while matches!(self.peek(), Some('0'..='9')) {
            text.push(self.bump()?);
            seen = true;
        }
        if seen { Ok(()) } else { Err(DecodeError) }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{DecodeError, decode, decode_string_body};
    use crate::value::Value;

    fn from_json(v: serde_json::Value) -> Value {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(a) => Value::Array(a.into_iter().map(from_json).collect()),
            serde_json::Value::Object(o) => Value::Object(
                o.into_iter().map(|(k, v)| (k, from_json(v))).collect(),
            ),
        }
    }

    fn oracle(text: &str) -> Value {
        from_json(serde_json::from_str(text).unwrap())
    }

    #[test]
    fn scalars_match_serde_json() {
        for text in [
            "null", "true", "false", "0", "-0", "42", "-17", "3.14", "1e5", "2.5E-3", "\"\"",
            "\"hi\"", "\"a\\nb\"", "\"\\u2019\"",
        ] {
            assert_eq!(decode(text).unwrap(), oracle(text), "input: {text}");
        }
    }

    #[test]
    fn composites_match_serde_json() {
        for text in [
            "[]",
            "{}",
            "[1,2,3]",
            "[1,[2,[3]]]",
            r#"{"a":1,"b":[true,null],"c":{"d":"e"}}"#,
            r#"  { "spaced" : [ 1 , 2 ] }  "#,
        ] {
            assert_eq!(decode(text).unwrap(), oracle(text), "input: {text}");
        }
    }

    #[test]
    fn surrogate_pairs_combine() {
        assert_eq!(
            decode("\"\\uD83D\\uDE00\"").unwrap(),
            Value::String("\u{1F600}".to_string())
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for text in [
            "", "tru", "01", "1.", ".5", "+1", "[1,]", "{\"a\"}", "\"unterminated", "1 2",
            "\"\\uD800\"", "\"\\x\"", "nulll",
        ] {
            assert_eq!(decode(text), Err(DecodeError), "input: {text}");
        }
    }

    #[test]
    fn rejects_control_characters_in_strings() {
        assert_eq!(decode("\"a\nb\""), Err(DecodeError));
    }

    #[test]
    fn string_body_decoding() {
        assert_eq!(decode_string_body("plain").unwrap(), "plain");
        assert_eq!(decode_string_body("a\\tb").unwrap(), "a\tb");
        assert_eq!(decode_string_body("bad\\q"), Err(DecodeError));
    }
}
