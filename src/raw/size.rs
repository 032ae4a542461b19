use crate::{
    error::{Error, Result},
    spec::ElementType,
};

use super::{
    MIN_BSON_DOCUMENT_SIZE,
    MIN_CODE_WITH_SCOPE_SIZE,
    checked_add,
    i32_from_slice,
    read_nullterminated,
};

/// Returns the encoded length of the value with type tag `tag` that begins at `value_start`.
///
/// The length excludes the tag byte and the element name. Every byte the value would occupy
/// must lie before `doc_end`; length prefixes are read before they are trusted.
pub fn value_size(tag: u8, buf: &[u8], value_start: usize, doc_end: usize) -> Result<usize> {
    let element_type = ElementType::from(tag).ok_or_else(|| Error::unsupported_type(tag))?;
    element_size(element_type, buf, value_start, doc_end)
}

pub(crate) fn element_size(
    element_type: ElementType,
    buf: &[u8],
    value_start: usize,
    doc_end: usize,
) -> Result<usize> {
    let buf = buf
        .get(..doc_end)
        .ok_or_else(|| Error::out_of_bounds(0, doc_end, buf.len()))?;

    let size = match element_type {
        ElementType::Double
        | ElementType::DateTime
        | ElementType::Timestamp
        | ElementType::Int64 => 8,
        ElementType::Int32 => 4,
        ElementType::ObjectId => 12,
        ElementType::Boolean => 1,
        ElementType::Decimal128 => 16,
        ElementType::Null | ElementType::MinKey | ElementType::MaxKey => 0,
        ElementType::String | ElementType::JavaScriptCode => {
            let len = length_prefix(buf, value_start)?;
            if len < 1 {
                return Err(Error::malformed_document(format!(
                    "string length must include its null terminator, got {len}"
                )));
            }
            checked_add(4, len)?
        }
        ElementType::EmbeddedDocument | ElementType::Array => {
            let len = length_prefix(buf, value_start)?;
            if len < MIN_BSON_DOCUMENT_SIZE {
                return Err(Error::invalid_length(format!(
                    "embedded document too small: {len} bytes"
                )));
            }
            len
        }
        ElementType::Binary => {
            let len = length_prefix(buf, value_start)?;
            checked_add(4 + 1, len)?
        }
        ElementType::RegularExpression => {
            let pattern = read_nullterminated(buf, value_start, doc_end)?;
            let options_start = value_start + pattern.len() + 1;
            let options = read_nullterminated(buf, options_start, doc_end)?;
            pattern.len() + 1 + options.len() + 1
        }
        ElementType::JavaScriptCodeWithScope => {
            let len = length_prefix(buf, value_start)?;
            if len < MIN_CODE_WITH_SCOPE_SIZE {
                return Err(Error::malformed_document(format!(
                    "code with scope length too small: {len} bytes"
                )));
            }
            len
        }
    };

    let end = checked_add(value_start, size)?;
    if end > doc_end {
        return Err(Error::truncated(format!(
            "{element_type:?} value of {size} bytes exceeds remaining length of document: {}",
            doc_end.saturating_sub(value_start)
        )));
    }

    Ok(size)
}

/// Reads a non-negative int32 length prefix that must itself fit inside `buf`.
fn length_prefix(buf: &[u8], value_start: usize) -> Result<usize> {
    let len = i32_from_slice(buf, value_start)
        .map_err(|_| Error::truncated("length prefix exceeds remaining length of document"))?;
    usize::try_from(len)
        .map_err(|_| Error::malformed_document(format!("negative length prefix: {len}")))
}
