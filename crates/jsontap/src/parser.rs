//! The incremental parser that drives a [`Handler`].
use alloc::string::String;

use crate::{
    buffers::Buffers,
    context::Context,
    error::ParserError,
    handler::Handler,
    options::ParserOptions,
    state::ParserState,
    tracker::Tracker,
};

/// An incremental JSON parser that fires [`Handler`] callbacks as text
/// arrives.
///
/// Feed input with [`parse_incremental`](Self::parse_incremental) in chunks
/// of any size, down to a single character. The parser never buffers a whole
/// document: it keeps a bounded lookback window, a pair of structural
/// stacks, and the scratch text of whatever value is currently open, so
/// memory stays proportional to the window plus the largest single value.
///
/// Malformed input does not halt parsing. Unexpected characters are skipped,
/// and values whose text fails to decode are delivered with their raw text
/// and a string fallback instead of an error.
///
/// # Examples
///
/// ```
/// use jsontap::{Handler, StreamingParser, Value};
///
/// #[derive(Default)]
/// struct FieldNames(Vec<String>);
///
/// impl Handler for FieldNames {
///     fn on_field_end(
///         &mut self,
///         _path: &str,
///         field: &str,
///         _raw: &str,
///         _parsed: Option<&Value>,
///     ) {
///         self.0.push(field.to_string());
///     }
/// }
///
/// let mut parser = StreamingParser::new(FieldNames::default());
/// parser.parse_incremental(r#"{"name":"Ada","#);
/// parser.parse_incremental(r#""age":36}"#);
///
/// assert_eq!(parser.handler().0, ["name", "age"]);
/// ```
#[derive(Debug)]
pub struct StreamingParser<H> {
    pub(crate) handler: H,
    pub(crate) state: ParserState,
    pub(crate) buffers: Buffers,
    pub(crate) tracker: Tracker,
    pub(crate) context: Context,
}

impl<H: Handler> StreamingParser<H> {
    /// Creates a parser with the default options.
    pub fn new(handler: H) -> Self {
        Self::with_options(handler, ParserOptions::default())
    }

    /// Creates a parser with explicit options.
    pub fn with_options(handler: H, options: ParserOptions) -> Self {
        Self {
            handler,
            state: ParserState::Root,
            buffers: Buffers::new(),
            tracker: Tracker::new(),
            context: Context::new(options.context_capacity),
        }
    }

    /// Consumes the next chunk of input text.
    ///
    /// The chunk may split the document anywhere, including inside a string
    /// escape or a multi-character literal. Callbacks fire during the call,
    /// on the same thread, as each completes.
    pub fn parse_incremental(&mut self, delta: &str) {
        for c in delta.chars() {
            let trimmed = self.context.push(c);
            if trimmed > 0 {
                self.tracker.shift_array_starts(trimmed);
            }
            self.state = self.step(self.state, c);
        }
    }

    /// Consumes input presented as cumulative snapshots: `new` must extend
    /// `old`, and only the suffix beyond `old` is parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::StalePrefix`] when `new` does not start with
    /// `old`; no input is consumed in that case.
    pub fn parse_from_old_new(&mut self, old: &str, new: &str) -> Result<(), ParserError> {
        let Some(delta) = new.strip_prefix(old) else {
            return Err(ParserError::StalePrefix);
        };
        self.parse_incremental(delta);
        Ok(())
    }

    /// Borrows the handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutably borrows the handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the parser and returns the handler.
    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// The current `/`-joined field path, empty at the root.
    #[must_use]
    pub fn path(&self) -> String {
        self.tracker.path()
    }
}
