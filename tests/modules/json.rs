use assert_matches::assert_matches;
use bson_codec::{ErrorKind, decode, raw::JsonOptions, to_json};
use pretty_assertions::assert_eq;

use super::{document, element, string_value};

#[test]
fn renders_supported_types() {
    let list = document(&[
        element(0x10, "0", &1i32.to_le_bytes()),
        element(0x10, "1", &2i32.to_le_bytes()),
    ]);
    let bytes = document(&[
        element(0x02, "hello", &string_value("world")),
        element(0x10, "william", &5i32.to_le_bytes()),
        element(0x01, "age", &1.234f64.to_le_bytes()),
        element(0x08, "ok", &[0]),
        element(0x04, "list", &list),
    ]);

    let doc = decode(&bytes).unwrap();
    assert_eq!(
        to_json(&doc).unwrap(),
        r#"{"hello":"world","william":5,"age":1.234,"ok":false,"list":{"0":1,"1":2}}"#
    );
}

#[test]
fn escapes_strings() {
    let bytes = document(&[element(0x02, "tab\t", &string_value("line\nbreak \"quoted\""))]);
    let doc = decode(&bytes).unwrap();
    let json = to_json(&doc).unwrap();
    assert_eq!(json, r#"{"tab\t":"line\nbreak \"quoted\""}"#);

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["tab\t"], "line\nbreak \"quoted\"");
}

#[test]
fn object_id_is_unsupported() {
    let bytes = document(&[
        element(0x10, "a", &1i32.to_le_bytes()),
        element(0x07, "_id", &[7; 12]),
    ]);
    let doc = decode(&bytes).unwrap();
    let err = to_json(&doc).unwrap_err();
    assert_matches!(err.kind, ErrorKind::UnsupportedType { .. });
    assert_eq!(err.key(), Some("_id"));
}

#[test]
fn nesting_is_bounded() {
    let mut bytes = document(&[]);
    for _ in 0..1_000 {
        bytes = document(&[element(0x03, "a", &bytes)]);
    }

    let doc = decode(&bytes).unwrap();
    assert_matches!(
        to_json(&doc).unwrap_err().kind,
        ErrorKind::DepthLimitExceeded { .. }
    );

    let options = JsonOptions::builder().max_depth(20_000).build();
    assert_eq!(options.max_depth(), 20_000);
}
