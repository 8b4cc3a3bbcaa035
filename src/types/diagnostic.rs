use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;
use smol_str::SmolStr;

use super::Span;

/// Every kind of problem the tokenizer or parser can report.
///
/// Declaration order is the tie-breaker when diagnostics at the same span are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    UnexpectedSymbol,
    UnterminatedMultiLineComment,
    UnterminatedString,
    UnrecognizedEscapeSequence,
    IllegalControlCharacterInString,
    ExpectedEof,
    UnexpectedEofInObject,
    UnexpectedEofInArray,
    ControlSymbolInObject,
    ControlSymbolInArray,
    InvalidPropertyKey,
    PropertyKeyAlreadyExists,
    MissingPropertyKey,
    MissingValue,
    UnrecognizedValue,
    MultiplePropertyKeySections,
    MultiplePropertyKeys,
    MultipleValues,
    Unspecified,
    Custom,
}

impl DiagnosticCode {
    /// Number of message parameters a diagnostic with this code carries.
    pub const fn arity(self) -> usize {
        match self {
            DiagnosticCode::UnexpectedSymbol
            | DiagnosticCode::UnrecognizedEscapeSequence
            | DiagnosticCode::IllegalControlCharacterInString
            | DiagnosticCode::PropertyKeyAlreadyExists
            | DiagnosticCode::UnrecognizedValue
            | DiagnosticCode::Custom => 1,
            _ => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::UnexpectedSymbol => "unexpected-symbol",
            DiagnosticCode::UnterminatedMultiLineComment => "unterminated-multi-line-comment",
            DiagnosticCode::UnterminatedString => "unterminated-string",
            DiagnosticCode::UnrecognizedEscapeSequence => "unrecognized-escape-sequence",
            DiagnosticCode::IllegalControlCharacterInString => {
                "illegal-control-character-in-string"
            }
            DiagnosticCode::ExpectedEof => "expected-eof",
            DiagnosticCode::UnexpectedEofInObject => "unexpected-eof-in-object",
            DiagnosticCode::UnexpectedEofInArray => "unexpected-eof-in-array",
            DiagnosticCode::ControlSymbolInObject => "control-symbol-in-object",
            DiagnosticCode::ControlSymbolInArray => "control-symbol-in-array",
            DiagnosticCode::InvalidPropertyKey => "invalid-property-key",
            DiagnosticCode::PropertyKeyAlreadyExists => "property-key-already-exists",
            DiagnosticCode::MissingPropertyKey => "missing-property-key",
            DiagnosticCode::MissingValue => "missing-value",
            DiagnosticCode::UnrecognizedValue => "unrecognized-value",
            DiagnosticCode::MultiplePropertyKeySections => "multiple-property-key-sections",
            DiagnosticCode::MultiplePropertyKeys => "multiple-property-keys",
            DiagnosticCode::MultipleValues => "multiple-values",
            DiagnosticCode::Unspecified => "unspecified",
            DiagnosticCode::Custom => "custom",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Params = SmallVec<[SmolStr; 2]>;

/// A problem found in the source, tied to the span it concerns.
///
/// Diagnostics are plain data collected while tokenizing and parsing. The message parameters
/// are kept raw so a presentation layer can localize them; [`Diagnostic::message`] renders a
/// default English text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub span: Span,
    pub params: Params,
}

impl Diagnostic {
    /// Panics when the number of parameters does not match [`DiagnosticCode::arity`].
    pub fn new<I, S>(code: DiagnosticCode, span: Span, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let params: Params = params.into_iter().map(Into::into).collect();
        assert_eq!(
            params.len(),
            code.arity(),
            "diagnostic `{code}` takes {} parameter(s)",
            code.arity()
        );
        Self { code, span, params }
    }

    pub fn at(code: DiagnosticCode, span: Span) -> Self {
        Self::new(code, span, std::iter::empty::<SmolStr>())
    }

    pub fn with_param(code: DiagnosticCode, span: Span, param: impl Into<SmolStr>) -> Self {
        Self::new(code, span, [param.into()])
    }

    pub fn custom(span: Span, message: impl Into<SmolStr>) -> Self {
        Self::with_param(DiagnosticCode::Custom, span, message)
    }

    pub fn param(&self, idx: usize) -> Option<&str> {
        self.params.get(idx).map(SmolStr::as_str)
    }

    pub fn message(&self) -> String {
        let p0 = self.param(0).unwrap_or_default();
        match self.code {
            DiagnosticCode::UnexpectedSymbol => format!("unexpected symbol '{p0}'"),
            DiagnosticCode::UnterminatedMultiLineComment => {
                "unterminated multi-line comment".to_string()
            }
            DiagnosticCode::UnterminatedString => "unterminated string".to_string(),
            DiagnosticCode::UnrecognizedEscapeSequence => {
                format!("unrecognized escape sequence '{p0}'")
            }
            DiagnosticCode::IllegalControlCharacterInString => {
                format!("illegal control character '{p0}' in string")
            }
            DiagnosticCode::ExpectedEof => "end of file expected".to_string(),
            DiagnosticCode::UnexpectedEofInObject => {
                "unexpected end of file, expected '}'".to_string()
            }
            DiagnosticCode::UnexpectedEofInArray => {
                "unexpected end of file, expected ']'".to_string()
            }
            DiagnosticCode::ControlSymbolInObject => "'}' expected".to_string(),
            DiagnosticCode::ControlSymbolInArray => "']' expected".to_string(),
            DiagnosticCode::InvalidPropertyKey => "invalid property key".to_string(),
            DiagnosticCode::PropertyKeyAlreadyExists => {
                format!("key '{p0}' already exists in object")
            }
            DiagnosticCode::MissingPropertyKey => "missing property key".to_string(),
            DiagnosticCode::MissingValue => "missing value".to_string(),
            DiagnosticCode::UnrecognizedValue => format!("unrecognized value '{p0}'"),
            DiagnosticCode::MultiplePropertyKeySections => {
                "unexpected ':', expected ',' or '}'".to_string()
            }
            DiagnosticCode::MultiplePropertyKeys => "',' expected between keys".to_string(),
            DiagnosticCode::MultipleValues => "',' expected between values".to_string(),
            DiagnosticCode::Unspecified => "unspecified error".to_string(),
            DiagnosticCode::Custom => p0.to_string(),
        }
    }

    fn sort_key(&self) -> (usize, usize, DiagnosticCode) {
        (self.span.start, self.span.len, self.code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}: {} ({})",
            self.span.start,
            self.span.end(),
            self.message(),
            self.code
        )
    }
}

/// Stable presentation order: by start, then length, then code.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(Diagnostic::sort_key);
}
