//! Renders an LLM tool-call response while it is still streaming in.
//!
//! The assistant replies with a JSON object describing an answer plus a list
//! of citations (abridged):
//!
//! ```text
//! {
//!   "answer":    string,
//!   "citations": [ { "title": string, "url": string }, ... ],
//!   "confidence": number
//! }
//! ```
//!
//! The payload arrives in small, irregular chunks the way completion APIs
//! deliver partial tokens. Two things happen while it streams:
//!
//! 1. Every character of the `answer` string is printed the moment it is
//!    consumed, so a UI could render the text as it is generated.
//! 2. Each citation object is handed over as a complete value as soon as its
//!    closing brace arrives, long before the document finishes.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsontap --example streaming_answer
//! ```

use std::io::Write as _;

use jsontap::{Handler, StreamingParser, Value};

#[derive(Default)]
struct AnswerRenderer {
    citations: Vec<Value>,
}

impl Handler for AnswerRenderer {
    fn on_value_chunk(&mut self, _path: &str, field: &str, chunk: char) {
        if field == "answer" {
            print!("{chunk}");
            std::io::stdout().flush().ok();
        }
    }

    fn on_array_item_end(&mut self, _path: &str, field: &str, item: Option<&Value>) {
        if field == "citations" {
            if let Some(citation) = item {
                let title = citation.get("title").and_then(Value::as_str).unwrap_or("?");
                let url = citation.get("url").and_then(Value::as_str).unwrap_or("?");
                println!("\n  [{}] {title} <{url}>", self.citations.len() + 1);
                self.citations.push(citation.clone());
            }
        }
    }

    fn on_field_end(&mut self, _path: &str, field: &str, _raw: &str, parsed: Option<&Value>) {
        if field == "confidence" {
            if let Some(confidence) = parsed.and_then(Value::as_number) {
                println!("\nconfidence: {confidence}");
            }
        }
    }
}

fn main() {
    // A toy response split mid-token. In real life this comes from the
    // network.
    let simulated_stream = [
        r#"{"answer":"Streaming parsers emit "#,
        r#"results before the document closes.","#,
        r#""citations":[{"title":"RFC 8259","#,
        r#""url":"https://www.rfc-editor.org/rfc/rfc8259"},"#,
        r#"{"title":"Parsing Gigabytes of JSON per Second","#,
        r#""url":"https://arxiv.org/abs/1902.08318"}],"#,
        r#""confidence":0.92}"#,
    ];

    let mut parser = StreamingParser::new(AnswerRenderer::default());
    for chunk in simulated_stream {
        parser.parse_incremental(chunk);
    }

    let renderer = parser.into_handler();
    println!("citations received: {}", renderer.citations.len());
}
