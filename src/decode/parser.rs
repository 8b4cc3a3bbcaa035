use std::collections::HashSet;

use num_bigint::{BigInt, BigUint, Sign};
use smol_str::SmolStr;

use crate::constants::{STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::types::{
    Diagnostic, DiagnosticCode, InvalidSection, Key, MapNode, Node, NodeKind, Span,
    TerminalSymbol, Token, UndefinedKind,
};

/// The outcome of parsing one document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseResult {
    /// `None` only when the document holds no value at all.
    pub root: Option<Node>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Recursive-descent parser over a token stream, with one token of lookahead.
///
/// The parser never fails: every problem becomes a [`Diagnostic`] and parsing continues.
/// Every token is visited exactly once, so each lexical diagnostic carried by a token is
/// reported exactly once, in encounter order. A parser is consumed by [`Parser::parse`].
pub struct Parser<I> {
    tokens: I,
    lookahead: Option<Token>,
    diagnostics: Vec<Diagnostic>,
    /// End of the last token pulled from the stream, background included.
    scanned_end: usize,
    /// End of the last significant token consumed.
    consumed_end: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<Item = Token, IntoIter = I>,
    {
        Self {
            tokens: tokens.into_iter(),
            lookahead: None,
            diagnostics: Vec::new(),
            scanned_end: 0,
            consumed_end: 0,
        }
    }

    pub fn parse(mut self) -> ParseResult {
        let mut root = self.parse_multi_value(DiagnosticCode::ExpectedEof);

        if let Some(extra) = self.shift() {
            self.report(DiagnosticCode::ExpectedEof, extra.span);
            // Keep visiting so that errors inside the trailing tokens still surface.
            while self.peek().is_some() {
                if !self.peek_is_value_start() {
                    self.shift();
                } else if root.is_none() {
                    root = self.parse_multi_value(DiagnosticCode::ExpectedEof);
                } else {
                    self.parse_value();
                }
            }
        }

        ParseResult {
            root,
            diagnostics: self.diagnostics,
        }
    }

    fn report(&mut self, code: DiagnosticCode, span: Span) {
        self.diagnostics.push(Diagnostic::at(code, span));
    }

    /// Next significant token. Background tokens are skipped and their errors reported.
    fn peek(&mut self) -> Option<&Token> {
        if self.lookahead.is_none() {
            for token in self.tokens.by_ref() {
                self.scanned_end = token.span.end();
                if token.is_background() {
                    self.diagnostics.extend_from_slice(token.errors());
                    continue;
                }
                self.lookahead = Some(token);
                break;
            }
        }
        self.lookahead.as_ref()
    }

    fn peek_is_value_start(&mut self) -> bool {
        self.peek().is_some_and(Token::is_value_start)
    }

    fn peek_symbol_is(&mut self, symbol: &TerminalSymbol) -> bool {
        self.peek().is_some_and(|token| &token.symbol == symbol)
    }

    fn shift(&mut self) -> Option<Token> {
        self.peek();
        let token = self.lookahead.take()?;
        self.diagnostics.extend_from_slice(token.errors());
        self.consumed_end = token.span.end();
        Some(token)
    }

    fn eof_span(&self) -> Span {
        Span::empty_at(self.scanned_end)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.consumed_end.max(start))
    }

    /// Parses one value position.
    ///
    /// Returns `None` without consuming anything when no value starts here. Further values
    /// that follow the first one without a separator are parsed and discarded, each reported
    /// with `code`.
    fn parse_multi_value(&mut self, code: DiagnosticCode) -> Option<Node> {
        if !self.peek_is_value_start() {
            return None;
        }
        let first = self.parse_value();
        while self.peek_is_value_start() {
            let idx = self.diagnostics.len();
            let extra = self.parse_value();
            self.diagnostics.insert(idx, Diagnostic::at(code, extra.span));
        }
        Some(first)
    }

    fn parse_value(&mut self) -> Node {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_value_inner())
    }

    fn parse_value_inner(&mut self) -> Node {
        let Some(token) = self.shift() else {
            return Node::missing(self.scanned_end);
        };
        let span = token.span;
        match token.symbol {
            TerminalSymbol::CurlyOpen => self.parse_object(span),
            TerminalSymbol::SquareBracketOpen => self.parse_array(span),
            TerminalSymbol::Value(text) => self.classify_value(text, span),
            TerminalSymbol::String(value) => Node::new(NodeKind::String(value), span),
            TerminalSymbol::ErrorString(_) | TerminalSymbol::UnknownSymbol { .. } => {
                Node::new(NodeKind::Undefined(UndefinedKind::Erroneous), span)
            }
            // Callers only get here through a value-start token.
            _ => Node::missing(span.start),
        }
    }

    fn classify_value(&mut self, text: SmolStr, span: Span) -> Node {
        let kind = match text.as_str() {
            "true" => NodeKind::Boolean(true),
            "false" => NodeKind::Boolean(false),
            raw => match parse_integer(raw) {
                Some(value) => NodeKind::Integer(value),
                None => {
                    self.diagnostics.push(Diagnostic::with_param(
                        DiagnosticCode::UnrecognizedValue,
                        span,
                        text.clone(),
                    ));
                    NodeKind::Undefined(UndefinedKind::Unrecognized)
                }
            },
        };
        Node::new(kind, span)
    }

    fn parse_object(&mut self, open: Span) -> Node {
        let mut map = MapNode::default();
        let mut seen = HashSet::new();

        loop {
            let key_node = self.parse_multi_value(DiagnosticCode::MultiplePropertyKeys);
            let got_key = key_node.is_some();
            let key = key_node.map(|node| self.check_key(node, &mut seen));

            let mut got_colon = false;
            let mut value = None;
            while self.peek_symbol_is(&TerminalSymbol::Colon) {
                let Some(colon) = self.shift() else {
                    break;
                };
                if got_colon {
                    self.report(DiagnosticCode::MultiplePropertyKeySections, colon.span);
                    let _ = self.parse_multi_value(DiagnosticCode::MultipleValues);
                } else {
                    got_colon = true;
                    value = self.parse_multi_value(DiagnosticCode::MultipleValues);
                }
            }

            let terminator = self.shift();
            let terminator_symbol = terminator.as_ref().map(|token| &token.symbol);
            let is_comma = terminator_symbol == Some(&TerminalSymbol::Comma);
            let is_close = terminator_symbol == Some(&TerminalSymbol::CurlyClose);
            let at = terminator
                .as_ref()
                .map_or_else(|| self.eof_span(), |token| token.span);

            // A '}' right after '{' or ',' closes the object without complaint.
            if is_comma || (is_close && (got_key || got_colon)) {
                if !got_key {
                    self.report(DiagnosticCode::MissingPropertyKey, at);
                }
                if value.is_none() {
                    self.report(DiagnosticCode::MissingValue, at);
                }
            }

            let value = got_colon.then(|| value.unwrap_or_else(|| Node::missing(at.start)));
            match (key, value) {
                (Some(Ok(key)), Some(value)) => map.pairs.push((key, value)),
                (Some(Ok(key)), None) => map.invalid.push(InvalidSection {
                    key: Node::new(NodeKind::String(key.value.to_string()), key.span),
                    value: None,
                }),
                (Some(Err(key)), value) => map.invalid.push(InvalidSection { key, value }),
                (None, _) => {}
            }

            if is_comma {
                continue;
            }
            if !is_close {
                match terminator {
                    Some(token) => self.report(DiagnosticCode::ControlSymbolInObject, token.span),
                    None => self.report(DiagnosticCode::UnexpectedEofInObject, at),
                }
            }
            return Node::new(NodeKind::Map(map), self.span_from(open.start));
        }
    }

    /// A string key becomes a [`Key`]; anything else is reported and handed back.
    fn check_key(&mut self, node: Node, seen: &mut HashSet<SmolStr>) -> Result<Key, Node> {
        let value = match node.kind {
            NodeKind::String(value) => value,
            _ => {
                self.report(DiagnosticCode::InvalidPropertyKey, node.span);
                return Err(node);
            }
        };
        let value = SmolStr::from(value);
        if !seen.insert(value.clone()) {
            self.diagnostics.push(Diagnostic::with_param(
                DiagnosticCode::PropertyKeyAlreadyExists,
                node.span,
                value.clone(),
            ));
        }
        Ok(Key {
            span: node.span,
            value,
        })
    }

    fn parse_array(&mut self, open: Span) -> Node {
        let mut items = Vec::new();

        loop {
            let item = self.parse_multi_value(DiagnosticCode::MultipleValues);
            let terminator = self.shift();

            match terminator {
                Some(Token {
                    symbol: TerminalSymbol::Comma,
                    span,
                }) => {
                    match item {
                        Some(node) => items.push(node),
                        None => {
                            self.report(DiagnosticCode::MissingValue, span);
                            items.push(Node::missing(span.start));
                        }
                    }
                    continue;
                }
                Some(Token {
                    symbol: TerminalSymbol::SquareBracketClose,
                    ..
                }) => items.extend(item),
                Some(token) => {
                    items.extend(item);
                    self.report(DiagnosticCode::ControlSymbolInArray, token.span);
                }
                None => {
                    items.extend(item);
                    let at = self.eof_span();
                    self.report(DiagnosticCode::UnexpectedEofInArray, at);
                }
            }
            return Node::new(NodeKind::List(items), self.span_from(open.start));
        }
    }
}

/// Integer literal: optional sign followed by ASCII digits, of any magnitude.
fn parse_integer(text: &str) -> Option<BigInt> {
    let (sign, digits) = match text.as_bytes().first()? {
        b'-' => (Sign::Minus, &text[1..]),
        b'+' => (Sign::Plus, &text[1..]),
        _ => (Sign::Plus, text),
    };
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10)?;
    Some(BigInt::from_biguint(sign, magnitude))
}
