use std::iter::FusedIterator;

use memchr::{memchr, memchr2, memmem};
use smol_str::SmolStr;
use tracing::trace;

use crate::text::chars::{classify, display_char, CharClass};
use crate::types::{CommentKind, Diagnostic, DiagnosticCode, Span, TerminalSymbol, Token};

/// Only one mode is active at a time. Every mode other than `Default` is entered with its
/// opening delimiter still unconsumed and hands control back to `Default` after emitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Default,
    InString,
    InSingleLineComment,
    InMultiLineComment,
}

/// Single-pass scanner producing positioned terminal symbols.
///
/// The scanner is an [`Iterator`]; the spans of the tokens it yields partition the input
/// without gaps or overlaps. It cannot be restarted: scan the text again with a new scanner.
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
    mode: Mode,
}

pub fn tokenize(input: &str) -> Scanner<'_> {
    Scanner::new(input)
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            mode: Mode::Default,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn peek(&self) -> Option<char> {
        let bytes = self.input.as_bytes();
        match bytes.get(self.position) {
            Some(&byte) if byte.is_ascii() => Some(byte as char),
            Some(_) => self.input[self.position..].chars().next(),
            None => None,
        }
    }

    fn byte_at(&self, idx: usize) -> Option<u8> {
        self.input.as_bytes().get(idx).copied()
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.position - start)
    }

    fn scan_default(&mut self) -> Option<Token> {
        let ch = self.peek()?;
        let start = self.position;
        match classify(ch) {
            CharClass::Value => {
                self.skip_run(CharClass::Value);
                let span = self.span_from(start);
                let text = SmolStr::new(span.slice(self.input));
                Some(Token::new(TerminalSymbol::Value(text), span))
            }
            CharClass::Whitespace => {
                self.skip_run(CharClass::Whitespace);
                Some(Token::new(TerminalSymbol::Whitespace, self.span_from(start)))
            }
            CharClass::Symbol => self.scan_symbol(ch, start),
        }
    }

    fn skip_run(&mut self, class: CharClass) {
        let input = self.input;
        let bytes = input.as_bytes();
        let mut idx = self.position;
        while idx < bytes.len() {
            let ch = if bytes[idx].is_ascii() {
                bytes[idx] as char
            } else {
                match input[idx..].chars().next() {
                    Some(ch) => ch,
                    None => break,
                }
            };
            if classify(ch) != class {
                break;
            }
            idx += ch.len_utf8();
        }
        self.position = idx;
    }

    fn scan_symbol(&mut self, ch: char, start: usize) -> Option<Token> {
        let symbol = match ch {
            '{' => TerminalSymbol::CurlyOpen,
            '}' => TerminalSymbol::CurlyClose,
            '[' => TerminalSymbol::SquareBracketOpen,
            ']' => TerminalSymbol::SquareBracketClose,
            ':' => TerminalSymbol::Colon,
            ',' => TerminalSymbol::Comma,
            '"' => {
                self.mode = Mode::InString;
                return None;
            }
            '/' if self.byte_at(start + 1) == Some(b'/') => {
                self.mode = Mode::InSingleLineComment;
                return None;
            }
            '/' if self.byte_at(start + 1) == Some(b'*') => {
                self.mode = Mode::InMultiLineComment;
                return None;
            }
            _ => {
                self.position += ch.len_utf8();
                let span = self.span_from(start);
                let error =
                    Diagnostic::with_param(DiagnosticCode::UnexpectedSymbol, span, display_char(ch));
                return Some(Token::new(
                    TerminalSymbol::UnknownSymbol {
                        character: ch,
                        error,
                    },
                    span,
                ));
            }
        };
        self.position += 1;
        Some(Token::new(symbol, self.span_from(start)))
    }

    fn scan_string(&mut self) -> Token {
        let input = self.input;
        let start = self.position;
        self.position += 1;

        let mut value = String::new();
        let mut errors = Vec::new();

        loop {
            let rest = &input[self.position..];
            let stop = memchr2(b'"', b'\\', rest.as_bytes()).unwrap_or(rest.len());
            push_plain(&rest[..stop], self.position, &mut value, &mut errors);
            self.position += stop;

            match self.byte_at(self.position) {
                None => {
                    let span = self.span_from(start);
                    errors.push(Diagnostic::at(DiagnosticCode::UnterminatedString, span));
                    return Token::new(TerminalSymbol::ErrorString(errors), span);
                }
                Some(b'"') => {
                    self.position += 1;
                    let span = self.span_from(start);
                    let symbol = if errors.is_empty() {
                        TerminalSymbol::String(value)
                    } else {
                        TerminalSymbol::ErrorString(errors)
                    };
                    return Token::new(symbol, span);
                }
                Some(_) => self.scan_escape(&mut value, &mut errors),
            }
        }
    }

    fn scan_escape(&mut self, value: &mut String, errors: &mut Vec<Diagnostic>) {
        let input = self.input;
        let escape_start = self.position;
        self.position += 1;

        let Some(ch) = self.peek() else {
            return;
        };
        let decoded = match ch {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{B}',
            'u' => {
                self.position += 1;
                self.scan_unicode_escape(escape_start, value, errors);
                return;
            }
            // Leave the control character to be reported on its own.
            _ if ch.is_control() => {
                errors.push(Diagnostic::with_param(
                    DiagnosticCode::UnrecognizedEscapeSequence,
                    Span::new(escape_start, 1),
                    "\\",
                ));
                return;
            }
            _ => {
                self.position += ch.len_utf8();
                let span = self.span_from(escape_start);
                errors.push(Diagnostic::with_param(
                    DiagnosticCode::UnrecognizedEscapeSequence,
                    span,
                    span.slice(input),
                ));
                return;
            }
        };
        self.position += 1;
        value.push(decoded);
    }

    fn scan_unicode_escape(
        &mut self,
        escape_start: usize,
        value: &mut String,
        errors: &mut Vec<Diagnostic>,
    ) {
        let Some(code) = self.read_hex4() else {
            let digits = self.input.as_bytes()[self.position..]
                .iter()
                .take(4)
                .take_while(|byte| byte.is_ascii_hexdigit())
                .count();
            self.position += digits;
            let span = self.span_from(escape_start);
            errors.push(Diagnostic::with_param(
                DiagnosticCode::UnrecognizedEscapeSequence,
                span,
                span.slice(self.input),
            ));
            return;
        };
        self.position += 4;

        let decoded = match code {
            0xD800..=0xDBFF => match self.peek_low_surrogate() {
                Some(low) => {
                    self.position += 6;
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER)
                }
                None => char::REPLACEMENT_CHARACTER,
            },
            _ => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
        };
        value.push(decoded);
    }

    fn read_hex4(&self) -> Option<u32> {
        read_hex4_at(self.input, self.position)
    }

    fn peek_low_surrogate(&self) -> Option<u32> {
        let bytes = self.input.as_bytes();
        if bytes.get(self.position) != Some(&b'\\') || bytes.get(self.position + 1) != Some(&b'u')
        {
            return None;
        }
        read_hex4_at(self.input, self.position + 2).filter(|low| (0xDC00..=0xDFFF).contains(low))
    }

    fn scan_single_line_comment(&mut self) -> Token {
        let start = self.position;
        let body = start + 2;
        let bytes = self.input.as_bytes();
        let mut end = match memchr(b'\n', &bytes[body..]) {
            Some(idx) => body + idx,
            None => bytes.len(),
        };
        if end > body && end < bytes.len() && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        self.position = end;
        Token::new(
            TerminalSymbol::Comment(CommentKind::SingleLine),
            self.span_from(start),
        )
    }

    fn scan_multi_line_comment(&mut self) -> Token {
        let start = self.position;
        let body = start + 2;
        let bytes = self.input.as_bytes();
        match memmem::find(&bytes[body..], b"*/") {
            Some(idx) => {
                self.position = body + idx + 2;
                Token::new(
                    TerminalSymbol::Comment(CommentKind::MultiLine),
                    self.span_from(start),
                )
            }
            None => {
                self.position = bytes.len();
                let span = self.span_from(start);
                let error = Diagnostic::at(DiagnosticCode::UnterminatedMultiLineComment, span);
                Token::new(TerminalSymbol::UnterminatedMultiLineComment(error), span)
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let token = match self.mode {
                Mode::Default => {
                    if self.position >= self.input.len() {
                        return None;
                    }
                    match self.scan_default() {
                        Some(token) => token,
                        None => continue,
                    }
                }
                Mode::InString => self.scan_string(),
                Mode::InSingleLineComment => self.scan_single_line_comment(),
                Mode::InMultiLineComment => self.scan_multi_line_comment(),
            };
            self.mode = Mode::Default;
            trace!(%token, "scanned token");
            return Some(token);
        }
    }
}

impl FusedIterator for Scanner<'_> {}

/// Copies a run of string content that holds no quote or backslash, dropping control
/// characters and reporting each one.
fn push_plain(run: &str, offset: usize, value: &mut String, errors: &mut Vec<Diagnostic>) {
    if !run.chars().any(char::is_control) {
        value.push_str(run);
        return;
    }
    for (idx, ch) in run.char_indices() {
        if ch.is_control() {
            errors.push(Diagnostic::with_param(
                DiagnosticCode::IllegalControlCharacterInString,
                Span::new(offset + idx, ch.len_utf8()),
                display_char(ch),
            ));
        } else {
            value.push(ch);
        }
    }
}

fn read_hex4_at(input: &str, idx: usize) -> Option<u32> {
    let digits = input.as_bytes().get(idx..idx + 4)?;
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let text = std::str::from_utf8(digits).ok()?;
    u32::from_str_radix(text, 16).ok()
}
