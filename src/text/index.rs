use crate::decode::tokenize;
use crate::error::Error;
use crate::types::{Diagnostic, Span, Token};
use crate::Result;

/// Gap-free sequence of tokens covering a source text from offset 0.
///
/// Lookup by offset is a binary search over token ends. Used by editors for
/// highlighting and for finding the token under the caret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextIndex {
    tokens: Vec<Token>,
    len: usize,
}

impl TextIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(source: &str) -> Self {
        // Scanner output is contiguous from 0 by construction.
        Self {
            tokens: tokenize(source).collect(),
            len: source.len(),
        }
    }

    pub fn from_tokens<I: IntoIterator<Item = Token>>(tokens: I) -> Result<Self> {
        let mut index = Self::new();
        for token in tokens {
            index.push(token)?;
        }
        Ok(index)
    }

    /// Appends a token, which must start exactly where the index currently ends.
    pub fn push(&mut self, token: Token) -> Result<()> {
        if token.span.start != self.len {
            return Err(Error::NonContiguousSpan {
                expected: self.len,
                found: token.span.start,
            });
        }
        self.len = token.span.end();
        self.tokens.push(token);
        Ok(())
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn element_at(&self, offset: usize) -> Result<&Token> {
        if offset >= self.len {
            return Err(Error::OffsetOutOfRange {
                offset,
                len: self.len,
            });
        }
        let idx = self
            .tokens
            .partition_point(|token| token.span.end() <= offset);
        self.tokens.get(idx).ok_or(Error::OffsetOutOfRange {
            offset,
            len: self.len,
        })
    }

    /// Tokens overlapping `span`. An empty span selects the token containing its start.
    pub fn elements_in(&self, span: Span) -> &[Token] {
        let first = self
            .tokens
            .partition_point(|token| token.span.end() <= span.start);
        let end = span.end().max(span.start + 1);
        let last = self.tokens.partition_point(|token| token.span.start < end);
        &self.tokens[first..last.max(first)]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.tokens.iter().flat_map(Token::errors)
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl<'a> IntoIterator for &'a TextIndex {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
