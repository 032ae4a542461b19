#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate bson_codec;

use bson_codec::{decode, encode};

fuzz_target!(|buf: &[u8]| {
    if let Ok(doc) = decode(buf) {
        let bytes = encode(&doc);
        assert_eq!(&bytes[..], &buf[..bytes.len()]);
    }
});
