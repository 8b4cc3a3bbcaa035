use thiserror::Error as ThisError;

use crate::types::{Diagnostic, Span};

/// Errors for API misuse and for the printer and serde bridge.
///
/// Malformed JSON is never an `Error`: the parser reports it as [`Diagnostic`]s.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("token at {found} does not continue the text index, which ends at {expected}")]
    NonContiguousSpan { expected: usize, found: usize },

    #[error("offset {offset} is outside the indexed text of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("undefined value at {}..{} cannot be written", .span.start, .span.end())]
    UndefinedValue { span: Span },

    #[error("object section at {}..{} is not a key-value pair and cannot be written", .span.start, .span.end())]
    InvalidSection { span: Span },

    #[error("document has {count} syntax error(s), first: {first}")]
    Syntax { count: usize, first: Box<Diagnostic> },

    #[error("document contains no value")]
    EmptyDocument,

    #[error("serialize failed: {0}")]
    Serialize(String),

    #[error("deserialize failed: {0}")]
    Deserialize(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn serialize(message: impl Into<String>) -> Self {
        Error::Serialize(message.into())
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Error::Deserialize(message.into())
    }

    pub(crate) fn syntax(diagnostics: &[Diagnostic]) -> Option<Self> {
        let first = diagnostics.first()?;
        Some(Error::Syntax {
            count: diagnostics.len(),
            first: Box::new(first.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiagnosticCode;

    #[rstest::rstest]
    fn test_syntax_error_reports_first_diagnostic() {
        let diagnostics = vec![
            Diagnostic::at(DiagnosticCode::MissingValue, Span::new(3, 1)),
            Diagnostic::at(DiagnosticCode::ExpectedEof, Span::new(9, 1)),
        ];
        let err = Error::syntax(&diagnostics).unwrap();
        assert_eq!(
            err.to_string(),
            "document has 2 syntax error(s), first: 3..4: missing value (missing-value)"
        );
        assert!(Error::syntax(&[]).is_none());
    }

    #[rstest::rstest]
    fn test_undefined_value_message() {
        let err = Error::UndefinedValue {
            span: Span::new(4, 0),
        };
        assert_eq!(err.to_string(), "undefined value at 4..4 cannot be written");
    }
}
