use std::fmt;

use smol_str::SmolStr;

use super::{Diagnostic, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    SingleLine,
    MultiLine,
}

/// The closed set of terminal symbols the scanner produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalSymbol {
    CurlyOpen,
    CurlyClose,
    SquareBracketOpen,
    SquareBracketClose,
    Colon,
    Comma,
    /// A maximal run of value characters, classified later as boolean, integer or neither.
    Value(SmolStr),
    /// A well-formed quoted string, holding its decoded value.
    String(String),
    /// A quoted string with lexical errors. It has no usable value.
    ErrorString(Vec<Diagnostic>),
    Comment(CommentKind),
    UnterminatedMultiLineComment(Diagnostic),
    Whitespace,
    UnknownSymbol { character: char, error: Diagnostic },
}

impl TerminalSymbol {
    /// Background symbols are skipped by the grammar, though their errors are still reported.
    pub fn is_background(&self) -> bool {
        matches!(
            self,
            TerminalSymbol::Comment(_)
                | TerminalSymbol::UnterminatedMultiLineComment(_)
                | TerminalSymbol::Whitespace
        )
    }

    /// Whether a value production may start at this symbol.
    ///
    /// Unknown symbols count as value starts so that the parser consumes them as stand-in
    /// values and keeps making progress.
    pub fn is_value_start(&self) -> bool {
        matches!(
            self,
            TerminalSymbol::CurlyOpen
                | TerminalSymbol::SquareBracketOpen
                | TerminalSymbol::Value(_)
                | TerminalSymbol::String(_)
                | TerminalSymbol::ErrorString(_)
                | TerminalSymbol::UnknownSymbol { .. }
        )
    }

    pub fn errors(&self) -> &[Diagnostic] {
        match self {
            TerminalSymbol::ErrorString(errors) => errors,
            TerminalSymbol::UnterminatedMultiLineComment(error)
            | TerminalSymbol::UnknownSymbol { error, .. } => std::slice::from_ref(error),
            _ => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TerminalSymbol::CurlyOpen => "curly-open",
            TerminalSymbol::CurlyClose => "curly-close",
            TerminalSymbol::SquareBracketOpen => "square-bracket-open",
            TerminalSymbol::SquareBracketClose => "square-bracket-close",
            TerminalSymbol::Colon => "colon",
            TerminalSymbol::Comma => "comma",
            TerminalSymbol::Value(_) => "value",
            TerminalSymbol::String(_) => "string",
            TerminalSymbol::ErrorString(_) => "error-string",
            TerminalSymbol::Comment(_) => "comment",
            TerminalSymbol::UnterminatedMultiLineComment(_) => "unterminated-comment",
            TerminalSymbol::Whitespace => "whitespace",
            TerminalSymbol::UnknownSymbol { .. } => "unknown-symbol",
        }
    }
}

/// A terminal symbol together with the source span it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub symbol: TerminalSymbol,
    pub span: Span,
}

impl Token {
    pub fn new(symbol: TerminalSymbol, span: Span) -> Self {
        Self { symbol, span }
    }

    pub fn is_background(&self) -> bool {
        self.symbol.is_background()
    }

    pub fn is_value_start(&self) -> bool {
        self.symbol.is_value_start()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        self.symbol.errors()
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{} {}",
            self.span.start,
            self.span.end(),
            self.symbol.name()
        )
    }
}
