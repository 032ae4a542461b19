// The MIT License (MIT)

// Copyright (c) 2015 Y. T. Chung <zonyitoo@gmail.com>

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! BSON is a binary format in which zero or more ordered key/value pairs are stored as a single
//! entity. We call this entity a document.
//!
//! This library decodes BSON bytes into a [`RawDocumentBuf`], answers keyed lookups against it
//! with type checking, hands the bytes back unchanged, and renders documents as JSON text. It
//! never builds documents value-by-value and never performs I/O: every entry point works on
//! bytes already in memory and reports malformed input as an [`Error`](error::Error).
//!
//! ## Basic usage
//!
//! ```rust
//! use bson_codec::{decode, encode, get_int32, get_string, to_json};
//!
//! let bytes = [
//!     0x16, 0x00, 0x00, 0x00, // total document size
//!     0x02, b'h', b'e', b'l', b'l', b'o', 0x00, // string element named "hello"
//!     0x06, 0x00, 0x00, 0x00, b'w', b'o', b'r', b'l', b'd', 0x00,
//!     0x00,
//! ];
//!
//! let doc = decode(&bytes)?;
//! assert_eq!(get_string(&doc, "hello")?, ("world", 5));
//! assert!(get_int32(&doc, "hello").unwrap_err().is_type_mismatch());
//! assert_eq!(to_json(&doc)?, r#"{"hello":"world"}"#);
//! assert_eq!(encode(&doc), bytes.to_vec());
//! # Ok::<(), bson_codec::error::Error>(())
//! ```
//!
//! ## Limits
//!
//! Lookups walk the document from the start on every call; when a key occurs more than once only
//! the first occurrence is visible. JSON rendering recurses into embedded documents and arrays up
//! to [`raw::DEFAULT_MAX_NESTING_DEPTH`] levels, adjustable through [`raw::JsonOptions`].

pub mod error;
pub mod raw;
pub mod spec;

pub use self::{
    error::{Error, ErrorKind, Result},
    raw::{RawDocument, RawDocumentBuf, RawElement},
    spec::ElementType,
};

/// Validates the length header of `bytes` and copies the document it describes.
pub fn decode(bytes: &[u8]) -> Result<RawDocumentBuf> {
    RawDocumentBuf::decode(bytes)
}

/// Returns a byte-exact copy of the document's buffer.
pub fn encode(doc: &RawDocument) -> Vec<u8> {
    doc.as_bytes().to_vec()
}

/// Renders the document as JSON text with the default options.
pub fn to_json(doc: &RawDocument) -> Result<String> {
    doc.to_json()
}

/// Gets the string stored under `key` together with its length in bytes, excluding the null
/// terminator.
pub fn get_string<'a>(doc: &'a RawDocument, key: &str) -> Result<(&'a str, usize)> {
    let s = doc.get_str(key)?;
    Ok((s, s.len()))
}

/// Gets the double stored under `key`.
pub fn get_double(doc: &RawDocument, key: &str) -> Result<f64> {
    doc.get_f64(key)
}

/// Gets the 32-bit integer stored under `key`.
pub fn get_int32(doc: &RawDocument, key: &str) -> Result<i32> {
    doc.get_i32(key)
}

/// Gets the 64-bit integer stored under `key`.
pub fn get_int64(doc: &RawDocument, key: &str) -> Result<i64> {
    doc.get_i64(key)
}

/// Gets the boolean stored under `key`.
pub fn get_boolean(doc: &RawDocument, key: &str) -> Result<bool> {
    doc.get_bool(key)
}

/// Succeeds if `key` holds a null.
pub fn get_null(doc: &RawDocument, key: &str) -> Result<()> {
    doc.get_null(key)
}

/// Gets the UTC datetime stored under `key` as milliseconds since the Unix epoch.
pub fn get_utc(doc: &RawDocument, key: &str) -> Result<i64> {
    doc.get_datetime(key)
}

/// Gets an independently owned copy of the embedded document stored under `key`.
pub fn get_document(doc: &RawDocument, key: &str) -> Result<RawDocumentBuf> {
    doc.get_document(key)
}
