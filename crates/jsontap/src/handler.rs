//! The callback contract between the parser and its consumer.
//!
//! Implement [`Handler`] and override the methods you care about; every
//! method has a no-op default, so a renderer that only needs streaming text
//! can implement `on_value_chunk` alone.
//!
//! Callbacks are synchronous upcalls issued while a character is being
//! processed. A handler must not feed input back into the parser that is
//! invoking it.
use crate::value::Value;

/// Receives parse events as JSON text streams in.
///
/// `path` is the `/`-joined sequence of enclosing field names, excluding the
/// field being reported; the root is the empty string. Array items are
/// addressed by the array's own field name and the array's parent path.
///
/// # Examples
///
/// ```
/// use jsontap::{Handler, StreamingParser, Value};
///
/// #[derive(Default)]
/// struct Titles(Vec<String>);
///
/// impl Handler for Titles {
///     fn on_field_end(&mut self, _path: &str, field: &str, _raw: &str, parsed: Option<&Value>) {
///         if field == "title" {
///             if let Some(title) = parsed.and_then(Value::as_str) {
///                 self.0.push(title.to_string());
///             }
///         }
///     }
/// }
///
/// let mut parser = StreamingParser::new(Titles::default());
/// parser.parse_incremental(r#"{"title":"Streaming"#);
/// parser.parse_incremental(r#" JSON"}"#);
/// assert_eq!(parser.into_handler().0, vec!["Streaming JSON"]);
/// ```
#[allow(unused_variables)]
pub trait Handler {
    /// A field's value is about to start streaming in.
    fn on_field_start(&mut self, path: &str, field: &str) {}

    /// A field's value is complete.
    ///
    /// `raw` is the accumulated source text (for arrays, the inner text
    /// without the outer brackets). `parsed` is the decoded value, or `None`
    /// when the defining text could not be reconstructed from the lookback
    /// window.
    fn on_field_end(&mut self, path: &str, field: &str, raw: &str, parsed: Option<&Value>) {}

    /// One decoded character of a string value, emitted as soon as it is
    /// consumed — before the value completes.
    fn on_value_chunk(&mut self, path: &str, field: &str, chunk: char) {}

    /// An object item in an array is about to start.
    fn on_array_item_start(&mut self, path: &str, field: &str) {}

    /// An array item is complete. `item` is `None` when the item's text
    /// could not be reconstructed from the lookback window.
    fn on_array_item_end(&mut self, path: &str, field: &str, item: Option<&Value>) {}
}

/// The do-nothing handler. Useful when only driving the parser for its side
/// effects in tests, or as a placeholder while wiring up a consumer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl Handler for NoopHandler {}
