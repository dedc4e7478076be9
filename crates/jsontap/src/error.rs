//! Error type for the driver API.
//!
//! Malformed JSON is never an error: the state machine ignores unexpected
//! characters and keeps consuming. The only condition surfaced to the caller
//! is a bookkeeping mistake in the caller's own stream handling.
use thiserror::Error;

/// Errors returned by [`StreamingParser`](crate::StreamingParser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParserError {
    /// `parse_from_old_new` was called with a `new` text that does not start
    /// with the previously seen `old` text, so no suffix delta exists.
    #[error("new text does not start with the previously parsed text")]
    StalePrefix,
}
