#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate bson_codec;
use bson_codec::{ElementType, RawDocument};

fuzz_target!(|buf: &[u8]| {
    if let Ok(doc) = RawDocument::from_bytes(buf) {
        for elem in doc.iter().flatten() {
            let key = elem.key_bytes();
            match elem.element_type() {
                ElementType::String => {
                    if let Ok(s) = doc.get_str(key) {
                        let _ = s.chars().count();
                    }
                }
                ElementType::EmbeddedDocument | ElementType::Array => {
                    if let Ok(sub) = doc.get_document(key) {
                        let _ = sub.to_json();
                    }
                }
                ElementType::Binary => {
                    let _ = doc.get_binary(key);
                }
                _ => {
                    let _ = doc.get_i32(key);
                    let _ = doc.get_bool(key);
                    let _ = doc.get_datetime(key);
                }
            }
        }
    }
});
