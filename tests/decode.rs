// tests/decode.rs
//
// The fallback decoder chain, strategy by strategy.
//
use clubfeed::core::decode::{decode, strip_escapes, unescape_template, Strategy};
use serde_json::json;

#[test]
fn plain_json_uses_direct() {
    let d = decode(r#"[{"title":"Plato"}]"#).unwrap();
    assert_eq!(d.strategy, Strategy::Direct);
    assert_eq!(d.value, json!([{ "title": "Plato" }]));
}

#[test]
fn escaped_blob_uses_template_literal() {
    let blob = r#"[{\"title\":\"Café \\\"Socrates\\\"\",\"url\":\"https:\/\/x.ch\/e\"}]"#;
    let d = decode(blob).unwrap();
    assert_eq!(d.strategy, Strategy::TemplateLiteral);
    assert_eq!(d.value[0]["title"], json!("Café \"Socrates\""));
    assert_eq!(d.value[0]["url"], json!("https://x.ch/e"));
}

#[test]
fn quoted_blob_is_unwrapped_then_parsed() {
    // A quoted string parses directly, but a bare string never counts
    let d = decode(r#""[{\"a\":1}]""#).unwrap();
    assert_eq!(d.strategy, Strategy::QuotedString);
    assert_eq!(d.value, json!([{ "a": 1 }]));
}

#[test]
fn regex_cleanup_is_last_resort() {
    // Template unescaping turns \\y into \y, which JSON rejects
    let d = decode(r#"[{\"a\":\"x\\y\"}]"#).unwrap();
    assert_eq!(d.strategy, Strategy::Regex);
    assert_eq!(d.value, json!([{ "a": "x\\y" }]));
}

#[test]
fn exhausted_chain_keeps_raw_blob() {
    let err = decode("<div>not json</div>").unwrap_err();
    assert_eq!(err.raw, "<div>not json</div>");
    let tried: Vec<Strategy> = err.attempts.iter().map(|(s, _)| *s).collect();
    assert_eq!(tried, Strategy::ORDER.to_vec());
    assert!(err.to_string().contains("template-literal"));
}

#[test]
fn scalars_never_count_as_success() {
    assert!(decode("42").is_err());
    assert!(decode("true").is_err());
}

#[test]
fn template_escapes() {
    assert_eq!(unescape_template(r"a\nb\tc").unwrap(), "a\nb\tc");
    assert_eq!(unescape_template(r"é\u{1F600}").unwrap(), "é😀");
    assert_eq!(unescape_template(r"\uD83D\uDE00").unwrap(), "😀");
    assert_eq!(unescape_template(r"\x41").unwrap(), "A");
    // Backticks and interpolation markers stay literal
    assert_eq!(unescape_template(r"`${x}` \`").unwrap(), "`${x}` `");
    assert_eq!(unescape_template(r"\xZZ"), None);
    assert_eq!(unescape_template(r"\1"), None);
    assert_eq!(unescape_template("trailing\\"), None);
}

#[test]
fn strip_escapes_handles_quotes_slashes_unicode() {
    assert_eq!(strip_escapes(r#"{\"u\":\"a\/b\u00fc\"}"#), r#"{"u":"a/bü"}"#);
}
