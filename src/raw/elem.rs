use crate::{
    error::{Error, Result, try_with_key},
    spec::{BinarySubtype, ElementType},
};

use super::{
    RawDocument,
    checked_add,
    f64_from_slice,
    i32_from_slice,
    i64_from_slice,
    read_nullterminated,
    size::element_size,
    try_to_str,
    u64_from_slice,
};

/// A single element of a document, borrowed from the document's bytes.
///
/// Produced by [`next_element`] and by iterating a [`RawDocument`]. Nothing is copied: the key
/// and value slices point into the parent buffer, so anything that must outlive the walk has to
/// be copied out explicitly.
#[derive(Clone, Copy, PartialEq)]
pub struct RawElement<'a> {
    element_type: ElementType,
    key: &'a [u8],
    value: &'a [u8],
    size: usize,
}

/// A BSON binary value referencing raw bytes stored elsewhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawBinaryRef<'a> {
    /// The subtype of the binary value.
    pub subtype: BinarySubtype,

    /// The binary bytes.
    pub bytes: &'a [u8],
}

/// An internal MongoDB timestamp: a seconds counter in the high half and an ordinal in the low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    /// The number of seconds since the Unix epoch.
    pub time: u32,

    /// An incrementing value to order timestamps with the same number of seconds.
    pub increment: u32,
}

/// Parses the element beginning at `offset`.
///
/// Returns `Ok(None)` once `offset` reaches the document's terminating null byte at
/// `doc_end - 1`. Otherwise the element's tag, name and value are decoded and the whole element
/// is checked to end at or before that terminator; [`RawElement::size`] gives the distance to
/// the next one.
pub fn next_element(buf: &[u8], offset: usize, doc_end: usize) -> Result<Option<RawElement<'_>>> {
    if doc_end > buf.len() {
        return Err(Error::out_of_bounds(0, doc_end, buf.len()));
    }

    if offset.checked_add(1) == Some(doc_end) {
        return if buf[offset] == 0 {
            Ok(None)
        } else {
            Err(Error::malformed_document("document not null terminated"))
        };
    } else if offset >= doc_end {
        return Err(Error::truncated("iteration overflowed document"));
    }

    // no element may reach the document's own trailing null
    let body_end = doc_end - 1;
    let tag = buf[offset];
    let key = read_nullterminated(buf, offset + 1, body_end)?;

    try_with_key(key, || {
        let element_type = ElementType::from(tag).ok_or_else(|| Error::unsupported_type(tag))?;
        // type specifier + key + \0
        let value_start = offset + 1 + key.len() + 1;
        let value_size = element_size(element_type, buf, value_start, body_end)?;
        let value_end = checked_add(value_start, value_size)?;

        Ok(Some(RawElement {
            element_type,
            key,
            value: &buf[value_start..value_end],
            size: value_end - offset,
        }))
    })
}

impl<'a> RawElement<'a> {
    /// Gets the type of the element's value.
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// The element's name, validated as UTF-8.
    pub fn key(&self) -> Result<&'a str> {
        try_to_str(self.key)
    }

    /// The element's name as it appears on the wire, without its null terminator.
    pub fn key_bytes(&self) -> &'a [u8] {
        self.key
    }

    /// The encoded value, excluding the type tag and name.
    pub fn value_bytes(&self) -> &'a [u8] {
        self.value
    }

    /// The number of bytes the whole element occupies: tag, name, terminator and value.
    pub fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn expect_type(&self, expected: ElementType) -> Result<()> {
        if self.element_type == expected {
            Ok(())
        } else {
            Err(Error::type_mismatch(self.element_type, expected))
        }
    }

    pub(crate) fn read_str(&self) -> Result<&'a str> {
        let len = self.value.len() - 4;
        match self.value.last() {
            Some(0) => try_to_str(&self.value[4..4 + len - 1]),
            _ => Err(Error::malformed_document("string not null terminated")),
        }
    }

    pub(crate) fn read_document(&self) -> Result<&'a RawDocument> {
        RawDocument::from_bytes(self.value)
    }

    pub(crate) fn read_timestamp(&self) -> Result<Timestamp> {
        let raw = u64_from_slice(self.value, 0)?;
        Ok(Timestamp {
            time: (raw >> 32) as u32,
            increment: raw as u32,
        })
    }

    pub(crate) fn read_binary(&self) -> Result<RawBinaryRef<'a>> {
        let len = i32_from_slice(self.value, 0)? as usize;
        let subtype = BinarySubtype::from(self.value[4]);
        let data = &self.value[5..];

        if let BinarySubtype::BinaryOld = subtype {
            if len < 4 {
                return Err(Error::malformed_document(
                    "old binary subtype has no inner declared length",
                ));
            }
            let oldlength = i32_from_slice(data, 0)?;
            if usize::try_from(oldlength).ok().and_then(|l| l.checked_add(4)) != Some(len) {
                return Err(Error::malformed_document(
                    "old binary subtype has wrong inner declared length",
                ));
            }
            return Ok(RawBinaryRef {
                subtype,
                bytes: &data[4..],
            });
        }

        Ok(RawBinaryRef {
            subtype,
            bytes: data,
        })
    }

    /// Gets the string slice if this is a string element with valid UTF-8 contents.
    pub fn as_str(&self) -> Option<&'a str> {
        match self.element_type {
            ElementType::String => self.read_str().ok(),
            _ => None,
        }
    }

    /// Gets the f64 that's referenced, if this is a double.
    pub fn as_f64(&self) -> Option<f64> {
        match self.element_type {
            ElementType::Double => f64_from_slice(self.value, 0).ok(),
            _ => None,
        }
    }

    /// Gets the i32 that's referenced, if this is an int32.
    pub fn as_i32(&self) -> Option<i32> {
        match self.element_type {
            ElementType::Int32 => i32_from_slice(self.value, 0).ok(),
            _ => None,
        }
    }

    /// Gets the i64 that's referenced, if this is an int64.
    pub fn as_i64(&self) -> Option<i64> {
        match self.element_type {
            ElementType::Int64 => i64_from_slice(self.value, 0).ok(),
            _ => None,
        }
    }

    /// Gets the bool that's referenced, if this is a boolean. Any non-zero byte is `true`.
    pub fn as_bool(&self) -> Option<bool> {
        match self.element_type {
            ElementType::Boolean => self.value.first().map(|b| *b != 0),
            _ => None,
        }
    }

    /// Gets the milliseconds since the Unix epoch, if this is a UTC datetime.
    pub fn as_datetime(&self) -> Option<i64> {
        match self.element_type {
            ElementType::DateTime => i64_from_slice(self.value, 0).ok(),
            _ => None,
        }
    }

    /// Gets the timestamp that's referenced, if this is a timestamp.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self.element_type {
            ElementType::Timestamp => self.read_timestamp().ok(),
            _ => None,
        }
    }

    /// Gets the twelve ObjectId bytes, if this is an ObjectId.
    pub fn as_object_id(&self) -> Option<[u8; 12]> {
        match self.element_type {
            ElementType::ObjectId => self.value.try_into().ok(),
            _ => None,
        }
    }

    /// Gets the sixteen little-endian IEEE 754-2008 bytes, if this is a decimal128.
    pub fn as_decimal128_bytes(&self) -> Option<[u8; 16]> {
        match self.element_type {
            ElementType::Decimal128 => self.value.try_into().ok(),
            _ => None,
        }
    }

    /// Gets the binary value that's referenced, if this is binary data.
    pub fn as_binary(&self) -> Option<RawBinaryRef<'a>> {
        match self.element_type {
            ElementType::Binary => self.read_binary().ok(),
            _ => None,
        }
    }

    /// Borrows the embedded document, if this is a document.
    pub fn as_document(&self) -> Option<&'a RawDocument> {
        match self.element_type {
            ElementType::EmbeddedDocument => self.read_document().ok(),
            _ => None,
        }
    }

    /// Borrows the array's bytes as a document keyed by index, if this is an array.
    pub fn as_array(&self) -> Option<&'a RawDocument> {
        match self.element_type {
            ElementType::Array => self.read_document().ok(),
            _ => None,
        }
    }

    /// Returns `true` if this is a null element.
    pub fn is_null(&self) -> bool {
        self.element_type == ElementType::Null
    }
}

impl std::fmt::Debug for RawElement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawElement")
            .field("element_type", &self.element_type)
            .field("key", &String::from_utf8_lossy(self.key))
            .field("value", &hex::encode(self.value))
            .finish()
    }
}
