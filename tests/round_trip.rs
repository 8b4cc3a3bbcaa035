use rstest::rstest;
use serde::Deserialize;
use serde_json::json;
use tolerant_json::{
    from_str, parse, to_string, to_string_with_options, to_value, Error, Indent, Node,
    PrintOptions,
};

fn clean_root(input: &str) -> Node {
    let result = parse(input);
    assert!(result.diagnostics.is_empty(), "{input}: {:?}", result.diagnostics);
    result.root.expect("root value")
}

#[rstest]
#[case("true")]
#[case("-123456789012345678901234567890")]
#[case(r#""plain string""#)]
#[case("[]")]
#[case("{}")]
#[case("[[[[]]]]")]
#[case(r#"{"a":1,"b":[true,false,{"c":"d"}],"e":{}}"#)]
#[case(r#"[{"x":[1,2,3]},{"y":[]},"z"]"#)]
#[case(r#"{"escapes":"tab\there \"q\" \\ \u0001","unicode":"ünï €"}"#)]
#[case(r#"{"dup":1,"dup":2}"#)]
#[case(r#""a\u0085b\u009F\u007F""#)]
fn printed_output_reparses_to_same_tree(#[case] input: &str) {
    let result = parse(input);
    let original = result.root.expect("root value");
    for options in [
        PrintOptions::default(),
        PrintOptions::compact(),
        PrintOptions::new()
            .with_indent(Indent::Spaces(0))
            .with_trailing_newline(true),
    ] {
        let printed = to_string_with_options(&original, &options).unwrap();
        let reparsed = parse(&printed);
        let root = reparsed.root.expect("reparsed root");
        assert!(original.same_shape(&root), "{printed}");
        assert_eq!(reparsed.diagnostics.len(), result.diagnostics.len());
    }
}

#[rstest]
fn tolerant_input_prints_as_strict_json() {
    let root = clean_root("// settings\n{ \"depth\": 12, /* inline */ \"names\": [\"a\", \"b\",], }");
    let printed = to_string(&root).unwrap();
    let strict: serde_json::Value = serde_json::from_str(&printed).unwrap();
    assert_eq!(strict, json!({"depth": 12, "names": ["a", "b"]}));
}

#[rstest]
fn c1_controls_are_escaped_when_printed() {
    let root = clean_root(r#""a\u0085b""#);
    assert_eq!(root.as_str(), Some("a\u{85}b"));
    let printed = to_string(&root).unwrap();
    assert_eq!(printed, r#""a\u0085b""#);
    assert!(parse(&printed).is_clean());
}

#[rstest]
fn undefined_nodes_cannot_be_printed() {
    let root = parse("{\"a\": null}").root.unwrap();
    assert!(matches!(to_string(&root), Err(Error::UndefinedValue { .. })));
    assert!(matches!(to_value(&root), Err(Error::UndefinedValue { .. })));
}

#[derive(Debug, Deserialize, PartialEq)]
struct Settings {
    name: String,
    depth: u32,
    enabled: bool,
    limits: Vec<i64>,
}

#[rstest]
fn settings_deserialize_from_commented_document() {
    let input = r#"
        /* engine settings */
        {
            "name": "engine", // display name
            "depth": 20,
            "enabled": true,
            "limits": [-1, 0, 1],
        }
    "#;
    let settings: Settings = from_str(input).unwrap();
    assert_eq!(
        settings,
        Settings {
            name: "engine".to_string(),
            depth: 20,
            enabled: true,
            limits: vec![-1, 0, 1],
        }
    );
}

#[rstest]
fn deserialize_reports_first_diagnostic() {
    let err = from_str::<Settings>("{\"name\": \"x\" \"depth\": 1}").unwrap_err();
    match err {
        Error::Syntax { count, first } => {
            assert_eq!(count, 2);
            assert_eq!(first.code, tolerant_json::DiagnosticCode::MultipleValues);
        }
        other => panic!("expected a syntax error, got {other}"),
    }
}
