use num_bigint::BigInt;
use rstest::rstest;
use tolerant_json::{
    parse, parse_with_options, tokenize, DiagnosticCode, Node, NodeKind, ParseOptions, Parser,
    Span, UndefinedKind,
};

fn codes(input: &str) -> Vec<DiagnosticCode> {
    parse(input).diagnostics.iter().map(|d| d.code).collect()
}

fn integer(value: i64) -> NodeKind {
    NodeKind::Integer(BigInt::from(value))
}

#[rstest]
#[case("")]
#[case("   \t\r\n")]
#[case("}")]
#[case("]]]]")]
#[case(",:,:")]
#[case("{{{{{{")]
#[case("[[[[[[")]
#[case("{[{[{[")]
#[case("{\"a\":[{\"b\":")]
#[case("\"")]
#[case("/*")]
#[case("{:}")]
#[case("{::::}")]
#[case("[,,,,]")]
#[case("{,,,,}")]
#[case("{\"a\" \"b\" \"c\": 1 2 3 : 4}")]
#[case("$ \\ ^ € \u{0}")]
#[case("\"\\u\" \"\\uD800\" \"\\x")]
fn parse_is_total(#[case] input: &str) {
    let result = parse(input);
    for diagnostic in &result.diagnostics {
        assert!(diagnostic.span.end() <= input.len(), "{diagnostic} outside input");
    }
    if let Some(root) = &result.root {
        assert!(root.span.end() <= input.len());
    }
}

#[rstest]
fn deeply_unterminated_nesting_reports_every_level() {
    let depth = 5_000;
    let input = "[{\"k\":".repeat(depth);
    let result = parse(&input);
    let eof_arrays = result
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::UnexpectedEofInArray)
        .count();
    let eof_objects = result
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::UnexpectedEofInObject)
        .count();
    assert_eq!(eof_arrays, depth);
    assert_eq!(eof_objects, depth);

    let mut node = result.root.unwrap();
    let mut levels = 0;
    loop {
        match node.kind {
            NodeKind::List(mut items) => match items.pop() {
                Some(inner) => node = inner,
                None => break,
            },
            NodeKind::Map(mut map) => match map.pairs.pop() {
                Some((_, inner)) => node = inner,
                None => break,
            },
            _ => break,
        }
        levels += 1;
    }
    assert_eq!(levels, depth * 2);
}

#[rstest]
fn duplicate_key_is_reported_once_at_second_key() {
    let result = parse(r#"{"a":1,"a":2}"#);
    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.code, DiagnosticCode::PropertyKeyAlreadyExists);
    assert_eq!(diagnostic.param(0), Some("a"));
    assert_eq!(diagnostic.span, Span::new(7, 3));

    let root = result.root.unwrap();
    let map = root.as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a").map(|node| &node.kind), Some(&integer(1)));
    assert_eq!(map.first_occurrences().count(), 1);
}

#[rstest]
fn third_occurrence_of_key_is_reported_too() {
    assert_eq!(
        codes(r#"{"a":1,"a":2,"a":3}"#),
        vec![
            DiagnosticCode::PropertyKeyAlreadyExists,
            DiagnosticCode::PropertyKeyAlreadyExists
        ]
    );
}

#[rstest]
fn missing_array_element_gets_placeholder_at_second_comma() {
    let result = parse("[1,,2]");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, DiagnosticCode::MissingValue);
    assert_eq!(result.diagnostics[0].span, Span::new(3, 1));

    let root = result.root.unwrap();
    let items = root.as_list().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].kind, integer(1));
    assert_eq!(items[1], Node::missing(3));
    assert_eq!(items[1].kind, NodeKind::Undefined(UndefinedKind::Missing));
    assert_eq!(items[2].kind, integer(2));
}

#[rstest]
fn extra_value_in_object_is_discarded() {
    let result = parse(r#"{"a": 1 2}"#);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, DiagnosticCode::MultipleValues);
    assert_eq!(result.diagnostics[0].span, Span::new(8, 1));

    let root = result.root.unwrap();
    let map = root.as_map().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("a").map(|node| &node.kind), Some(&integer(1)));
}

#[rstest]
fn unknown_symbol_in_object_recovers() {
    let result = parse("{$}");
    assert_eq!(
        result.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![
            DiagnosticCode::UnexpectedSymbol,
            DiagnosticCode::InvalidPropertyKey,
            DiagnosticCode::MissingValue,
        ]
    );
    let root = result.root.unwrap();
    assert_eq!(root.span, Span::new(0, 3));
    let map = root.as_map().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.keys().count(), 0);
    let section = &map.invalid[0];
    assert_eq!(section.key.kind, NodeKind::Undefined(UndefinedKind::Erroneous));
    assert_eq!(section.key.span, Span::new(1, 1));
    assert!(section.value.is_none());
}

#[rstest]
fn unknown_symbol_as_value_is_erroneous() {
    let result = parse("{\"a\": $}");
    assert_eq!(
        result.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![DiagnosticCode::UnexpectedSymbol]
    );
    let root = result.root.unwrap();
    let value = root.as_map().and_then(|map| map.get("a")).unwrap();
    assert_eq!(value.kind, NodeKind::Undefined(UndefinedKind::Erroneous));
    assert_eq!(value.span, Span::new(6, 1));
}

#[rstest]
#[case("/* comment */ 42")]
#[case("// leading\n42 // trailing")]
#[case("\u{feff}42\n")]
fn comments_and_whitespace_are_transparent(#[case] input: &str) {
    let result = parse(input);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.root.unwrap().kind, integer(42));
}

#[rstest]
fn comments_inside_containers_are_transparent() {
    let with = parse("{ /* k */ \"a\" /* : */ : // v\n [ 1 /* , */ , 2 ] }");
    let without = parse(r#"{"a":[1,2]}"#);
    assert!(with.diagnostics.is_empty());
    assert!(with.root.unwrap().same_shape(&without.root.unwrap()));
}

#[rstest]
#[case("1 2", vec![DiagnosticCode::ExpectedEof])]
#[case("1 ]", vec![DiagnosticCode::ExpectedEof])]
#[case("{} {} {}", vec![DiagnosticCode::ExpectedEof, DiagnosticCode::ExpectedEof])]
#[case("[] ] ]", vec![DiagnosticCode::ExpectedEof])]
#[case("} 1 2", vec![DiagnosticCode::ExpectedEof, DiagnosticCode::ExpectedEof])]
fn extra_root_tokens(#[case] input: &str, #[case] expected: Vec<DiagnosticCode>) {
    assert_eq!(codes(input), expected);
}

#[rstest]
#[case("true", NodeKind::Boolean(true))]
#[case("false", NodeKind::Boolean(false))]
#[case("-17", integer(-17))]
#[case("\"s\"", NodeKind::String("s".to_string()))]
fn literals(#[case] input: &str, #[case] expected: NodeKind) {
    let result = parse(input);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.root.unwrap().kind, expected);
}

#[rstest]
#[case("null")]
#[case("1.5")]
#[case("1e10")]
#[case("True")]
#[case("0x1F")]
fn unrecognized_values(#[case] input: &str) {
    let result = parse(input);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, DiagnosticCode::UnrecognizedValue);
    assert_eq!(result.diagnostics[0].param(0), Some(input));
    assert_eq!(
        result.root.unwrap().kind,
        NodeKind::Undefined(UndefinedKind::Unrecognized)
    );
}

#[rstest]
fn integers_keep_full_precision() {
    let digits = "98765432109876543210987654321098765432109876543210";
    let result = parse(digits);
    let root = result.root.unwrap();
    assert_eq!(root.as_integer().unwrap().to_string(), digits);
}

#[rstest]
fn lexical_diagnostics_surface_exactly_once() {
    let input = "[\"a\\q\", /* x */ $, \"open";
    let from_parser: Vec<_> = parse(input)
        .diagnostics
        .into_iter()
        .filter(|d| {
            matches!(
                d.code,
                DiagnosticCode::UnrecognizedEscapeSequence
                    | DiagnosticCode::UnexpectedSymbol
                    | DiagnosticCode::UnterminatedString
            )
        })
        .collect();
    let from_tokens: Vec<_> = tokenize(input)
        .flat_map(|token| token.errors().to_vec())
        .collect();
    assert_eq!(from_parser, from_tokens);
}

#[rstest]
fn parser_emits_in_encounter_order() {
    let tokens = tokenize("[1 x]");
    let result = Parser::new(tokens).parse();
    assert_eq!(
        result.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![DiagnosticCode::MultipleValues, DiagnosticCode::UnrecognizedValue]
    );

    let sorted = parse_with_options("[1 x]", &ParseOptions::default());
    assert_eq!(
        sorted.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![DiagnosticCode::UnrecognizedValue, DiagnosticCode::MultipleValues]
    );
}

#[rstest]
fn node_spans_exclude_trailing_background() {
    let result = parse("[ 1 , { \"a\" : true } /* c */ ]   ");
    let root = result.root.unwrap();
    assert_eq!(root.span, Span::new(0, 30));
    let items = root.as_list().unwrap();
    assert_eq!(items[0].span, Span::new(2, 1));
    assert_eq!(items[1].span, Span::new(6, 14));
}
