use crate::constants::DEFAULT_INDENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Everything on one line, no insignificant whitespace.
    Compact,
    Spaces(usize),
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(DEFAULT_INDENT)
    }
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Sort diagnostics by `(start, length, code)` instead of encounter order.
    pub sort_diagnostics: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort_diagnostics(mut self, sort_diagnostics: bool) -> Self {
        self.sort_diagnostics = sort_diagnostics;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            sort_diagnostics: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    pub indent: Indent,
    pub trailing_newline: bool,
}

impl PrintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self::default().with_indent(Indent::Compact)
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }
}
