use bson_codec::{
    ElementType,
    ErrorKind,
    decode,
    get_boolean,
    get_document,
    get_double,
    get_int32,
    get_int64,
    get_null,
    get_string,
    get_utc,
};
use pretty_assertions::assert_eq;

use super::{document, element, string_value};

fn sample() -> Vec<u8> {
    let inner = document(&[element(0x02, "city", &string_value("Lisbon"))]);
    document(&[
        element(0x02, "hello", &string_value("world")),
        element(0x10, "william", &5i32.to_le_bytes()),
        element(0x01, "age", &1.234f64.to_le_bytes()),
        element(0x12, "big", &(1i64 << 40).to_le_bytes()),
        element(0x08, "flag", &[1]),
        element(0x0A, "nothing", &[]),
        element(0x09, "when", &1_700_000_000_000i64.to_le_bytes()),
        element(0x03, "address", &inner),
    ])
}

#[test]
fn every_accessor_reads_its_type() {
    let doc = decode(&sample()).unwrap();

    assert_eq!(get_string(&doc, "hello").unwrap(), ("world", 5));
    assert_eq!(get_int32(&doc, "william").unwrap(), 5);
    assert_eq!(get_double(&doc, "age").unwrap(), 1.234);
    assert_eq!(get_int64(&doc, "big").unwrap(), 1 << 40);
    assert!(get_boolean(&doc, "flag").unwrap());
    get_null(&doc, "nothing").unwrap();
    assert_eq!(get_utc(&doc, "when").unwrap(), 1_700_000_000_000);

    let address = get_document(&doc, "address").unwrap();
    drop(doc);
    assert_eq!(get_string(&address, "city").unwrap(), ("Lisbon", 6));
}

#[test]
fn wrong_type_is_a_mismatch() {
    let doc = decode(&sample()).unwrap();

    let err = get_string(&doc, "william").unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err.key(), Some("william"));
    match err.kind {
        ErrorKind::TypeMismatch {
            expected, actual, ..
        } => {
            assert_eq!(expected, ElementType::String);
            assert_eq!(actual, ElementType::Int32);
        }
        other => panic!("expected a type mismatch, got {other:?}"),
    }

    assert!(get_int64(&doc, "william").unwrap_err().is_type_mismatch());
    assert!(get_utc(&doc, "big").unwrap_err().is_type_mismatch());
    assert!(get_null(&doc, "flag").unwrap_err().is_type_mismatch());
}

#[test]
fn absent_key_is_not_found() {
    let doc = decode(&sample()).unwrap();
    for err in [
        get_string(&doc, "missing").map(|_| ()).unwrap_err(),
        get_double(&doc, "missing").map(|_| ()).unwrap_err(),
        get_document(&doc, "missing").map(|_| ()).unwrap_err(),
    ] {
        assert!(err.is_not_found());
        assert_eq!(err.key(), Some("missing"));
    }
}
