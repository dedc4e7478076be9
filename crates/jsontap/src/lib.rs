//! Incremental JSON parsing with field-level callbacks.
//!
//! [`StreamingParser`] consumes JSON text in arbitrarily sized chunks and
//! fires [`Handler`] callbacks as structure is recognized: a field's value
//! starting, each character of a string value as it arrives, a field or
//! array item completing. It is built for LLM and network streams where the
//! document is produced token by token and consumers want to act on fields
//! long before the closing brace shows up.
//!
//! Three properties shape the design:
//!
//! - **Chunk-size independence.** Feeding a document one character at a time
//!   produces exactly the same callback sequence as feeding it whole.
//! - **Fail-soft parsing.** Malformed input never halts the parser. Stray
//!   characters are skipped, and value text that does not decode as JSON is
//!   delivered raw with a string fallback.
//! - **Bounded memory.** Completed values are reconstructed from a bounded
//!   lookback window (50,000 characters by default). Values larger than the
//!   window lose their payload, not the event.
//!
//! ```
//! use jsontap::{Handler, StreamingParser};
//!
//! #[derive(Default)]
//! struct Printer(String);
//!
//! impl Handler for Printer {
//!     fn on_value_chunk(&mut self, _path: &str, field: &str, chunk: char) {
//!         if field == "answer" {
//!             self.0.push(chunk);
//!         }
//!     }
//! }
//!
//! let mut parser = StreamingParser::new(Printer::default());
//! for chunk in [r#"{"ans"#, r#"wer":"par"#, r#"tial text"}"#] {
//!     parser.parse_incremental(chunk);
//! }
//! assert_eq!(parser.into_handler().0, "partial text");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffers;
mod context;
mod decode;
mod escape_buffer;
mod extract;
mod value;

mod error;
mod handler;
mod options;
mod parser;
mod state;
mod tracker;

#[cfg(test)]
mod tests;

pub use error::ParserError;
pub use handler::{Handler, NoopHandler};
pub use options::{ParserOptions, DEFAULT_CONTEXT_CAPACITY};
pub use parser::StreamingParser;
pub use value::{Array, Map, Value};
