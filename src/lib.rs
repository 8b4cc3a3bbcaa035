//! Error-tolerant JSON tokenizer and parser.
//!
//! Source text becomes a stream of [`Token`]s and then a [`Node`] tree. Malformed input never
//! fails: every problem is reported as a [`Diagnostic`] with an exact byte span, and parsing
//! recovers and continues.
//!
//! ```
//! use tolerant_json::{parse, DiagnosticCode};
//!
//! let result = parse(r#"{ "a": 1, "a": 2, "b": }"#);
//! let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
//! assert_eq!(
//!     codes,
//!     [DiagnosticCode::PropertyKeyAlreadyExists, DiagnosticCode::MissingValue]
//! );
//! assert_eq!(result.root.unwrap().as_map().unwrap().len(), 3);
//! ```

pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod text;
pub mod types;

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use crate::decode::{ParseResult, Parser, Scanner};
pub use crate::error::Error;
pub use crate::options::{Indent, ParseOptions, PrintOptions};
pub use crate::text::{LineIndex, Location, TextIndex};
pub use crate::types::{
    sort_diagnostics, CommentKind, Diagnostic, DiagnosticCode, InvalidSection, Key, MapNode, Node,
    NodeKind, Span, TerminalSymbol, Token, UndefinedKind,
};

pub type Result<T> = std::result::Result<T, Error>;

pub fn tokenize(input: &str) -> Scanner<'_> {
    decode::tokenize(input)
}

pub fn parse(input: &str) -> ParseResult {
    decode::parse(input)
}

pub fn parse_with_options(input: &str, options: &ParseOptions) -> ParseResult {
    decode::parse_with_options(input, options)
}

pub fn parse_many<S: AsRef<str> + Sync>(inputs: &[S], options: &ParseOptions) -> Vec<ParseResult> {
    decode::parse_many(inputs, options)
}

pub fn to_string(node: &Node) -> Result<String> {
    encode::to_string(node)
}

pub fn to_string_with_options(node: &Node, options: &PrintOptions) -> Result<String> {
    encode::to_string_with_options(node, options)
}

pub fn to_writer<W: Write>(writer: W, node: &Node) -> Result<()> {
    encode::to_writer(writer, node)
}

pub fn to_writer_with_options<W: Write>(
    writer: W,
    node: &Node,
    options: &PrintOptions,
) -> Result<()> {
    encode::to_writer_with_options(writer, node, options)
}

pub fn to_value(node: &Node) -> Result<Value> {
    encode::to_value(node)
}

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    decode::from_str(input)
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    decode::from_slice(input)
}

pub fn from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    decode::from_reader(reader)
}
