pub mod parser;
pub mod scanner;

use std::io::Read;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::sort_diagnostics;
use crate::{Error, ParseOptions, Result};

pub use parser::{ParseResult, Parser};
pub use scanner::{tokenize, Scanner};

pub fn parse(input: &str) -> ParseResult {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(input: &str, options: &ParseOptions) -> ParseResult {
    debug!(len = input.len(), "parsing document");
    let mut result = Parser::new(tokenize(input)).parse();
    if options.sort_diagnostics {
        sort_diagnostics(&mut result.diagnostics);
    }
    debug!(
        diagnostics = result.diagnostics.len(),
        has_root = result.root.is_some(),
        "parsed document"
    );
    result
}

/// Parses independent documents, in parallel when the `parallel` feature is on.
///
/// Results come back in input order.
#[cfg(feature = "parallel")]
pub fn parse_many<S: AsRef<str> + Sync>(inputs: &[S], options: &ParseOptions) -> Vec<ParseResult> {
    use rayon::prelude::*;

    inputs
        .par_iter()
        .map(|input| parse_with_options(input.as_ref(), options))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn parse_many<S: AsRef<str> + Sync>(inputs: &[S], options: &ParseOptions) -> Vec<ParseResult> {
    inputs
        .iter()
        .map(|input| parse_with_options(input.as_ref(), options))
        .collect()
}

/// Deserializes a document that parses without any diagnostic.
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    let result = parse(input);
    if let Some(err) = Error::syntax(&result.diagnostics) {
        return Err(err);
    }
    let root = result.root.ok_or(Error::EmptyDocument)?;
    let value = crate::encode::to_value(&root)?;
    serde_json::from_value(value).map_err(|err| Error::deserialize(err.to_string()))
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    let text =
        std::str::from_utf8(input).map_err(|err| Error::deserialize(format!("invalid utf-8: {err}")))?;
    from_str(text)
}

pub fn from_reader<T: DeserializeOwned, R: Read>(mut reader: R) -> Result<T> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    from_str(&buf)
}
