// SPDX-License-Identifier: Apache-2.0

// End-to-end scenarios through the public entry points

use jsonpart::{parse_f64, parse_partial, AccessError, Kind, Malformed, ParseError, Parser};

#[test]
fn test_nested_array_index() {
    let mut parser = Parser::new();
    let root = parser.parse(r#"{"a":{"b":[1,2,3]}}"#).unwrap();
    let value = root.get(&["a", "b", "1"]).unwrap();
    assert_eq!(value.kind(), Kind::Number);
    assert_eq!(value.int(), Ok(2));
    assert_eq!(root.get_int(&["a", "b", "1"]), 2);
}

#[test]
fn test_escaped_quote_in_string() {
    let mut parser = Parser::new();
    let root = parser.parse(r#"{"x":"va\"l"}"#).unwrap();
    assert_eq!(root.get_str(&["x"]), "va\"l");
}

#[test]
fn test_bool_getters() {
    let mut parser = Parser::new();
    let root = parser.parse(r#"{"t":true,"f":false,"n":null}"#).unwrap();
    assert!(root.get_bool(&["t"]));
    assert!(!root.get_bool(&["f"]));
    // Permissive default, not an error
    assert!(!root.get_bool(&["n"]));
    assert!(root.try_get_bool(&["n"]).is_err());
}

#[test]
fn test_partial_key_inside_html() {
    let html = concat!(
        "<html><head><script>var cfg = {\"theme\": \"dark\"};</script>\n",
        "<script>window.__data = {\"ctx\": {\"user\": {\"id\": 7, \"tags\": [\"a\", \"b\"]}}};",
        "</script></head><body>\"ctx\" appears here too</body></html>"
    );
    let doc = parse_partial(html, "ctx").unwrap();
    let root = doc.root();
    assert_eq!(root.kind(), Kind::Object);
    assert_eq!(root.get_i64(&["user", "id"]), 7);
    assert_eq!(root.get_str(&["user", "tags", "1"]), "b");
    assert_eq!(root.to_string(), r#"{"user":{"id":7,"tags":["a","b"]}}"#);
}

#[test]
fn test_missing_value_is_malformed() {
    let mut parser = Parser::new();
    let error = parser.parse(r#"{"a":}"#).unwrap_err();
    match &error {
        ParseError::MalformedStructure { reason, .. } => {
            assert_eq!(*reason, Malformed::UnexpectedChar('}'))
        }
        other => panic!("Expected MalformedStructure, got {other:?}"),
    }
    assert!(error.to_string().contains("'}'"));
}

#[test]
fn test_exponent_overflow_is_infinity() {
    assert_eq!(parse_f64("1e400"), Ok(f64::INFINITY));
    let mut parser = Parser::new();
    let root = parser.parse("[1e400, -1e400]").unwrap();
    assert_eq!(root.get_f64(&["0"]), f64::INFINITY);
    assert_eq!(root.get_f64(&["1"]), f64::NEG_INFINITY);
}

#[test]
fn test_special_float_tokens() {
    let mut parser = Parser::new();
    let root = parser.parse("[NaN, Inf, -inf, +INF, nan]").unwrap();
    assert!(root.get_f64(&["0"]).is_nan());
    assert_eq!(root.get_f64(&["1"]), f64::INFINITY);
    assert_eq!(root.get_f64(&["2"]), f64::NEG_INFINITY);
    assert_eq!(root.get_f64(&["3"]), f64::INFINITY);
    assert!(root.get_f64(&["4"]).is_nan());
}

#[test]
fn test_values_are_lazy_until_read() {
    let mut parser = Parser::new();
    let input = r#"{"s":"tab\there","n":"12"}"#;
    let root = parser.parse(input).unwrap();
    // Untouched strings serialize exactly as written
    assert_eq!(root.to_string(), input);
    assert_eq!(root.get_str(&["s"]), "tab\there");
    assert_eq!(root.get_int(&["n"]), 0);
    assert_eq!(
        root.try_get_int(&["n"]),
        Err(AccessError::TypeMismatch {
            expected: "number",
            found: Kind::String
        })
    );
}

#[test]
fn test_leading_whitespace_and_trailing_text() {
    let mut parser = Parser::new();
    let root = parser.parse(" \r\n\t[1, 2] ; more text").unwrap();
    assert_eq!(root.array().map(|a| a.len()), Ok(2));
}
