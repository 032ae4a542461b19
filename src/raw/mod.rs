//! Bounds-checked access to BSON bytes.
//!
//! A [`RawDocumentBuf`] owns a copy of the bytes it was decoded from, and derefs to the
//! borrowed, unsized [`RawDocument`]. Only the length header and the trailing null byte are
//! validated up front; elements are parsed lazily as they are walked, so format errors can
//! surface during iteration, lookup or JSON rendering.
//!
//! ```rust
//! use bson_codec::raw::RawDocumentBuf;
//!
//! // See http://bsonspec.org/spec.html for details on the binary encoding of BSON.
//! let doc = RawDocumentBuf::decode(b"\x13\x00\x00\x00\x02hi\x00\x06\x00\x00\x00y'all\x00\x00")?;
//! assert_eq!(doc.get_str("hi")?, "y'all");
//! assert_eq!(doc.to_json()?, r#"{"hi":"y'all"}"#);
//! # Ok::<(), bson_codec::error::Error>(())
//! ```
//!
//! ### Reference types
//!
//! [`RawDocument`] is an unsized type that represents the BSON payload as a `[u8]`, similarly to
//! `[T]` and `str`. Embedded documents can be visited through it without reallocation via
//! [`RawElement::as_document`]; the typed getter [`RawDocument::get_document`] instead hands back
//! an independently owned copy.

mod document;
mod document_buf;
mod elem;
mod iter;
mod json;
mod size;

use crate::error::{Error, Result};

pub use self::{
    document::RawDocument,
    document_buf::RawDocumentBuf,
    elem::{RawBinaryRef, RawElement, Timestamp, next_element},
    iter::Iter,
    json::{JsonOptions, JsonOptionsBuilder},
    size::value_size,
};

/// The smallest possible document: a four byte length header followed by the terminating null.
pub const MIN_BSON_DOCUMENT_SIZE: usize = 5;

/// The smallest possible code-with-scope value: total length, string length, empty string's
/// null byte and an empty scope document.
pub(crate) const MIN_CODE_WITH_SCOPE_SIZE: usize = 4 + 4 + 1 + MIN_BSON_DOCUMENT_SIZE;

/// How deeply embedded documents may nest before JSON rendering gives up.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 200;

/// Copies `N` bytes starting at `offset` out of `buf`.
fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    offset
        .checked_add(N)
        .and_then(|end| buf.get(offset..end))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| Error::out_of_bounds(offset, N, buf.len()))
}

/// Reads a little-endian `i32` from the four bytes of `buf` beginning at `offset`.
pub fn i32_from_slice(buf: &[u8], offset: usize) -> Result<i32> {
    read_array(buf, offset).map(i32::from_le_bytes)
}

/// Reads a little-endian `i64` from the eight bytes of `buf` beginning at `offset`.
pub fn i64_from_slice(buf: &[u8], offset: usize) -> Result<i64> {
    read_array(buf, offset).map(i64::from_le_bytes)
}

/// Reads a little-endian `f64` from the eight bytes of `buf` beginning at `offset`.
pub fn f64_from_slice(buf: &[u8], offset: usize) -> Result<f64> {
    read_array(buf, offset).map(f64::from_le_bytes)
}

pub(crate) fn u64_from_slice(buf: &[u8], offset: usize) -> Result<u64> {
    read_array(buf, offset).map(u64::from_le_bytes)
}

pub(crate) fn checked_add(lhs: usize, rhs: usize) -> Result<usize> {
    lhs.checked_add(rhs)
        .ok_or_else(|| Error::truncated("attempted to add with overflow"))
}

/// Returns the bytes of `buf[start..end]` up to, but not including, the first null byte.
pub(crate) fn read_nullterminated(buf: &[u8], start: usize, end: usize) -> Result<&[u8]> {
    let window = buf
        .get(start..end)
        .ok_or_else(|| Error::truncated("cstring starts past the end of the document"))?;
    match window.iter().position(|b| *b == 0) {
        Some(nul) => Ok(&window[..nul]),
        None => Err(Error::truncated("expected null terminator")),
    }
}

pub(crate) fn try_to_str(data: &[u8]) -> Result<&str> {
    simdutf8::basic::from_utf8(data).map_err(|_| Error::utf8_encoding())
}
