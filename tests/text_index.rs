use rstest::rstest;
use tolerant_json::text::utf16_offset;
use tolerant_json::{parse, DiagnosticCode, LineIndex, Span, TerminalSymbol, TextIndex};

const DOCUMENT: &str = "{\n  \"name\": \"日本\", // note\n  \"n\": 7$\n}";

#[rstest]
fn every_offset_resolves_to_the_covering_token() {
    let index = TextIndex::build(DOCUMENT);
    assert_eq!(index.len(), DOCUMENT.len());
    for offset in 0..DOCUMENT.len() {
        let token = index.element_at(offset).unwrap();
        assert!(token.span.contains(offset), "{token} does not cover {offset}");
    }
    assert!(index.element_at(DOCUMENT.len()).is_err());
}

#[rstest]
fn diagnostics_map_to_tokens() {
    let index = TextIndex::build(DOCUMENT);
    let result = parse(DOCUMENT);
    let unexpected = result
        .diagnostics
        .iter()
        .find(|d| d.code == DiagnosticCode::UnexpectedSymbol)
        .unwrap();
    let token = index.element_at(unexpected.span.start).unwrap();
    assert!(matches!(
        token.symbol,
        TerminalSymbol::UnknownSymbol { character: '$', .. }
    ));
    assert_eq!(index.errors().count(), 1);
}

#[rstest]
#[case(0, 1, 1)]
#[case(4, 2, 3)]
#[case(14, 2, 12)]
fn locations_count_chars(#[case] offset: usize, #[case] line: usize, #[case] column: usize) {
    let lines = LineIndex::new(DOCUMENT);
    let location = lines.location(offset);
    assert_eq!((location.line, location.column), (line, column));
}

#[rstest]
fn highlighting_range_selects_overlapping_tokens() {
    let index = TextIndex::build(DOCUMENT);
    let start = DOCUMENT.find("//").unwrap();
    let selected = index.elements_in(Span::new(start - 1, 3));
    let names: Vec<_> = selected.iter().map(|token| token.symbol.name()).collect();
    assert_eq!(names, vec!["whitespace", "comment"]);
}

#[rstest]
fn utf16_offsets_for_editors() {
    let start = DOCUMENT.find("//").unwrap();
    // Both CJK chars are one UTF-16 unit but three UTF-8 bytes.
    assert_eq!(utf16_offset(DOCUMENT, start), start - 4);
}
