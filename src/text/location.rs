use memchr::memchr_iter;
use serde::Serialize;

/// A position in the source. `line` and `column` are 1-based, `column` counts chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Maps byte offsets to line/column positions.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr_iter(b'\n', source.as_bytes()).map(|idx| idx + 1));
        Self {
            source,
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offsets past the end are clamped; offsets inside a multi-byte char snap to its start.
    pub fn location(&self, offset: usize) -> Location {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = self.source[line_start..offset].chars().count() + 1;
        Location {
            offset,
            line: line_idx + 1,
            column,
        }
    }

    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());
        Some(self.source[start..end].trim_end_matches('\r'))
    }
}

/// Converts a byte offset into the number of UTF-16 code units before it.
pub fn utf16_offset(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    source[..offset].chars().map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(0, 1, 1)]
    #[case(3, 1, 4)]
    #[case(4, 2, 1)]
    #[case(7, 2, 4)]
    #[case(99, 3, 1)]
    fn test_location(#[case] offset: usize, #[case] line: usize, #[case] column: usize) {
        let index = LineIndex::new("abc\nxyz\n");
        let location = index.location(offset);
        assert_eq!((location.line, location.column), (line, column));
    }

    #[rstest::rstest]
    fn test_columns_count_chars() {
        let index = LineIndex::new("\"ü\": 1");
        assert_eq!(index.location(4).column, 4);
        assert_eq!(index.location(2).column, 2);
    }

    #[rstest::rstest]
    fn test_line_text_strips_carriage_return() {
        let index = LineIndex::new("first\r\nsecond");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_text(1), Some("first"));
        assert_eq!(index.line_text(2), Some("second"));
        assert_eq!(index.line_text(3), None);
        assert_eq!(index.line_text(0), None);
    }

    #[rstest::rstest]
    #[case("abc", 2, 2)]
    #[case("é!", 2, 1)]
    #[case("😀x", 4, 2)]
    #[case("😀x", 5, 3)]
    fn test_utf16_offset(#[case] source: &str, #[case] offset: usize, #[case] expected: usize) {
        assert_eq!(utf16_offset(source, offset), expected);
    }
}
