use std::fmt::Write as _;

use num_bigint::BigInt;

use crate::options::{Indent, PrintOptions};
use crate::text::string::escape_string_into;

pub(crate) struct Writer {
    buffer: String,
    compact: bool,
    indent_unit: String,
    indent_cache: Vec<String>,
}

impl Writer {
    pub fn new(options: &PrintOptions) -> Self {
        let (compact, indent_unit) = match options.indent {
            Indent::Compact => (true, String::new()),
            Indent::Spaces(count) => (false, " ".repeat(count)),
        };
        Self {
            buffer: String::new(),
            compact,
            indent_unit,
            indent_cache: vec![String::new()],
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn write_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    /// Line break followed by indentation for `depth`. Nothing in compact mode.
    pub fn write_line_break(&mut self, depth: usize) {
        if self.compact {
            return;
        }
        self.write_newline();
        self.write_indent(depth);
    }

    pub fn write_indent(&mut self, depth: usize) {
        if depth == 0 || self.indent_unit.is_empty() {
            return;
        }
        if depth >= self.indent_cache.len() {
            self.extend_indent_cache(depth);
        }
        self.buffer.push_str(&self.indent_cache[depth]);
    }

    pub fn write_key_separator(&mut self) {
        self.buffer
            .push_str(if self.compact { ":" } else { ": " });
    }

    pub fn write_quoted_string(&mut self, s: &str) {
        self.buffer.push('"');
        escape_string_into(&mut self.buffer, s);
        self.buffer.push('"');
    }

    pub fn write_integer(&mut self, value: &BigInt) {
        // Formatting into a String cannot fail.
        let _ = write!(self.buffer, "{value}");
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_str(if value { "true" } else { "false" });
    }

    fn extend_indent_cache(&mut self, depth: usize) {
        while self.indent_cache.len() <= depth {
            let next = match self.indent_cache.last() {
                Some(prev) => format!("{prev}{}", self.indent_unit),
                None => String::new(),
            };
            self.indent_cache.push(next);
        }
    }
}
