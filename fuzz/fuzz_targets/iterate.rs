#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate bson_codec;
use bson_codec::RawDocument;

fuzz_target!(|buf: &[u8]| {
    if let Ok(doc) = RawDocument::from_bytes(buf) {
        for _ in doc.iter() {}
    }
});
