#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate bson_codec;
use bson_codec::{decode, to_json};

fuzz_target!(|buf: &[u8]| {
    if let Ok(doc) = decode(buf) {
        if let Ok(json) = to_json(&doc) {
            serde_json::from_str::<serde_json::Value>(&json).expect("rendered JSON must parse");
        }
    }
});
