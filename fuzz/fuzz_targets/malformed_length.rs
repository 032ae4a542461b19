#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate bson_codec;
use bson_codec::{RawDocument, raw::next_element};

fuzz_target!(|buf: &[u8]| {
    if buf.len() >= 4 {
        let _ = RawDocument::from_bytes(buf);

        // Walk with the declared length taken at face value.
        let declared = i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
        let mut offset = 4;
        while let Ok(Some(element)) = next_element(buf, offset, declared) {
            offset += element.size();
        }
    }
});
