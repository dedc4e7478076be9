//! JSON value types.
//!
//! This module defines the [`Value`] enum, which represents any complete JSON
//! value handed to callbacks, plus helpers for serializing values back to
//! JSON text.
use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// Object representation used by [`Value::Object`].
pub type Map = BTreeMap<String, Value>;
/// Array representation used by [`Value::Array`].
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// Callbacks receive a `Value` whenever the parser has reconstructed a
/// complete field value or array item. Consumers pattern-match exhaustively
/// instead of relying on runtime type checks.
///
/// # Examples
///
/// ```
/// use jsontap::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The JSON `null` literal.
    Null,
    /// A JSON boolean.
    Boolean(bool),
    /// A JSON number. All numbers are held as `f64`.
    Number(f64),
    /// A JSON string.
    String(String),
    /// A JSON array.
    Array(Array),
    /// A JSON object.
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice if the value is a [`String`].
    ///
    /// [`String`]: Value::String
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontap::Value;
    ///
    /// assert_eq!(Value::String("foo".into()).as_str(), Some("foo"));
    /// assert_eq!(Value::Null.as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if the value is a [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if the value is a [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements if the value is an [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the map if the value is an [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up a key in an [`Object`] value.
    ///
    /// Returns `None` for non-objects and missing keys.
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Replaces quotes, backslashes, Unicode line separators, and control
/// characters up to the basic multilingual plane with their JSON escape
/// sequences.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => f.write_str(&alloc::string::ToString::to_string(&n)),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
