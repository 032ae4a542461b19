use assert_matches::assert_matches;
use bson_codec::{
    ElementType,
    ErrorKind,
    RawDocumentBuf,
    decode,
    encode,
    raw::{next_element, value_size},
};
use pretty_assertions::assert_eq;

use super::{document, element, string_value};

#[test]
fn round_trip_is_byte_exact() {
    let bytes = document(&[
        element(0x10, "b", &2i32.to_le_bytes()),
        element(0x10, "a", &1i32.to_le_bytes()),
        element(0x10, "a", &3i32.to_le_bytes()),
    ]);

    let doc = decode(&bytes).unwrap();
    let encoded = encode(&doc);
    assert_eq!(encoded, bytes);
    assert_eq!(decode(&encoded).unwrap(), doc);
}

#[test]
fn short_buffer_is_invalid_length() {
    let bytes = document(&[element(0x02, "s", &string_value("value"))]);
    for len in 0..bytes.len() {
        assert_matches!(
            decode(&bytes[..len]).unwrap_err().kind,
            ErrorKind::InvalidLength { .. }
        );
    }
}

#[test]
fn missing_terminator_is_malformed() {
    assert_matches!(
        decode(&[0x05, 0x00, 0x00, 0x00, 0x01]).unwrap_err().kind,
        ErrorKind::MalformedDocument { .. }
    );
}

#[test]
fn owned_from_vec() {
    let bytes = document(&[element(0x08, "ok", &[1])]);
    let doc = RawDocumentBuf::try_from(bytes.clone()).unwrap();
    assert!(doc.get_bool("ok").unwrap());
    assert_eq!(Vec::from(doc), bytes);
}

#[test]
fn walker_steps_through_elements() {
    let bytes = document(&[
        element(0x0A, "n", &[]),
        element(0x01, "d", &1.5f64.to_le_bytes()),
    ]);

    let first = next_element(&bytes, 4, bytes.len()).unwrap().unwrap();
    assert_eq!(first.element_type(), ElementType::Null);
    assert_eq!(first.size(), 3);

    let second = next_element(&bytes, 4 + first.size(), bytes.len())
        .unwrap()
        .unwrap();
    assert_eq!(second.element_type(), ElementType::Double);
    assert_eq!(second.as_f64(), Some(1.5));

    let end = 4 + first.size() + second.size();
    assert!(next_element(&bytes, end, bytes.len()).unwrap().is_none());
}

#[test]
fn size_table_rejects_deprecated_tags() {
    for tag in [0x06, 0x0C, 0x0E] {
        assert_matches!(
            value_size(tag, &[0; 16], 0, 16).unwrap_err().kind,
            ErrorKind::UnsupportedType { .. }
        );
    }
}
