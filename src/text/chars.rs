use std::fmt::Write as _;

use smol_str::SmolStr;
use unicode_general_category::{get_general_category, GeneralCategory};

/// The three classes the default scanning mode sorts characters into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Letters, numbers, connector punctuation, marks, `-`, `.` and `+`.
    Value,
    /// Separators, control characters and the byte order mark.
    Whitespace,
    /// Punctuation and symbols; structural characters, quotes and comment starts live here.
    Symbol,
}

#[inline]
pub fn classify(ch: char) -> CharClass {
    if ch.is_ascii() {
        return classify_ascii(ch as u8);
    }
    if ch == '\u{FEFF}' {
        return CharClass::Whitespace;
    }
    match get_general_category(ch) {
        GeneralCategory::UppercaseLetter
        | GeneralCategory::LowercaseLetter
        | GeneralCategory::TitlecaseLetter
        | GeneralCategory::ModifierLetter
        | GeneralCategory::OtherLetter
        | GeneralCategory::DecimalNumber
        | GeneralCategory::LetterNumber
        | GeneralCategory::OtherNumber
        | GeneralCategory::ConnectorPunctuation
        | GeneralCategory::NonspacingMark
        | GeneralCategory::SpacingMark
        | GeneralCategory::EnclosingMark
        | GeneralCategory::Surrogate => CharClass::Value,
        GeneralCategory::SpaceSeparator
        | GeneralCategory::LineSeparator
        | GeneralCategory::ParagraphSeparator
        | GeneralCategory::Control => CharClass::Whitespace,
        _ => CharClass::Symbol,
    }
}

#[inline]
fn classify_ascii(byte: u8) -> CharClass {
    match byte {
        b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b'+' => CharClass::Value,
        0x00..=0x20 | 0x7F => CharClass::Whitespace,
        _ => CharClass::Symbol,
    }
}

/// Characters that cannot be shown as themselves inside a diagnostic message.
fn needs_escaped_display(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::Unassigned
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Format
            | GeneralCategory::Control
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Display form of a character for diagnostic parameters.
///
/// Printable characters are shown as-is; everything else is written as `\uXXXX`, one escape per
/// UTF-16 code unit.
pub fn display_char(ch: char) -> SmolStr {
    if !needs_escaped_display(ch) {
        let mut buf = [0u8; 4];
        return SmolStr::new(ch.encode_utf8(&mut buf));
    }
    let mut out = String::with_capacity(12);
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        let _ = write!(out, "\\u{:04X}", unit);
    }
    SmolStr::new(out)
}
