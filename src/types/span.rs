use std::ops::Range;

use serde::Serialize;

/// A contiguous region of the source, measured in UTF-8 bytes from the start of the document.
///
/// A zero-length span marks a synthesized element such as a missing value or an end-of-file
/// diagnostic. Literals always cover at least one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub const fn empty_at(offset: usize) -> Self {
        Self {
            start: offset,
            len: 0,
        }
    }

    /// Build a span from a byte range. Panics if `range.start > range.end`.
    pub fn from_range(range: Range<usize>) -> Self {
        assert!(
            range.start <= range.end,
            "span start {} is past its end {}",
            range.start,
            range.end
        );
        Self {
            start: range.start,
            len: range.end - range.start,
        }
    }

    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        Span::new(start, end - start)
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range()]
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::from_range(range)
    }
}
