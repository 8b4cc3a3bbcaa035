use std::fmt::Write as _;

/// Append `value` to `out` as the contents of a JSON string literal, without the quotes.
///
/// Every control character, C1 controls included, is written as a `\uXXXX` escape.
pub fn escape_string_into(out: &mut String, value: &str) {
    let mut start = 0;
    for (idx, ch) in value.char_indices() {
        let escaped = match ch {
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\u{8}' => "\\b",
            '\u{C}' => "\\f",
            '"' => "\\\"",
            '\\' => "\\\\",
            ch if ch.is_control() => {
                out.push_str(&value[start..idx]);
                let _ = write!(out, "\\u{:04X}", ch as u32);
                start = idx + ch.len_utf8();
                continue;
            }
            _ => continue,
        };
        out.push_str(&value[start..idx]);
        out.push_str(escaped);
        start = idx + ch.len_utf8();
    }
    out.push_str(&value[start..]);
}

pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    escape_string_into(&mut out, value);
    out.push('"');
    out
}
