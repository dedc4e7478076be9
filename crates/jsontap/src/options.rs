//! Parser configuration.

/// Number of characters retained by default in the lookback window.
pub const DEFAULT_CONTEXT_CAPACITY: usize = 50_000;

/// Configuration options for the streaming parser.
///
/// # Examples
///
/// ```rust
/// use jsontap::{NoopHandler, ParserOptions, StreamingParser};
///
/// let parser = StreamingParser::with_options(
///     NoopHandler,
///     ParserOptions {
///         context_capacity: 1024,
///     },
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Maximum number of characters retained in the lookback window used to
    /// reconstruct complete values.
    ///
    /// The window is trimmed from the front once it exceeds this size.
    /// Values whose defining text has scrolled out of the window can no
    /// longer be reconstructed: the affected callback either does not fire
    /// (array items) or fires without a parsed payload (array fields). This
    /// is the documented boundary condition of long streams, not an error.
    ///
    /// # Default
    ///
    /// [`DEFAULT_CONTEXT_CAPACITY`] (50,000 characters).
    pub context_capacity: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            context_capacity: DEFAULT_CONTEXT_CAPACITY,
        }
    }
}
