use crate::{
    error::{Error, Result, try_with_key},
    spec::ElementType,
};

use super::{
    Iter,
    JsonOptions,
    MIN_BSON_DOCUMENT_SIZE,
    RawBinaryRef,
    RawDocumentBuf,
    RawElement,
    Timestamp,
    f64_from_slice,
    i32_from_slice,
    i64_from_slice,
    json,
};

/// A slice of a BSON document (akin to [`std::str`]). This can be created from a
/// [`RawDocumentBuf`] or any type that contains valid BSON data, including static binary literals,
/// [Vec<u8>](std::vec::Vec), or arrays.
///
/// This is an _unsized_ type, meaning that it must always be used behind a pointer like `&`. For an
/// owned version of this type, see [`RawDocumentBuf`].
///
/// Because the contents are parsed during iteration instead of at creation time, format errors
/// can happen at any time during use.
///
/// Individual elements can be accessed using [`RawDocument::get`] or any of the type-specific
/// getters, such as [`RawDocument::get_i32`] or [`RawDocument::get_str`]. Note that accessing
/// elements is an O(N) operation, as it requires iterating through the document from the
/// beginning to find the requested key. When a key occurs more than once, only its first
/// occurrence is reachable through the getters.
#[derive(PartialEq)]
#[repr(transparent)]
pub struct RawDocument {
    data: [u8],
}

impl RawDocument {
    /// Constructs a new [`RawDocument`] over the document at the start of `data`, validating
    /// _only_ the following invariants:
    ///   * the four byte length header is at least five (the minimum for a valid BSON document)
    ///   * `data` holds at least as many bytes as the header declares
    ///   * the last declared byte is a 0
    ///
    /// Bytes past the declared length are not part of the document. The internal structure of
    /// the elements is _not_ validated; method calls on the [`RawDocument`] will return errors
    /// where appropriate.
    ///
    /// ```
    /// use bson_codec::raw::RawDocument;
    ///
    /// let doc = RawDocument::from_bytes(b"\x05\0\0\0\0")?;
    /// assert_eq!(doc.declared_length(), 5);
    /// # Ok::<(), bson_codec::error::Error>(())
    /// ```
    pub fn from_bytes<D: AsRef<[u8]> + ?Sized>(data: &D) -> Result<&RawDocument> {
        let data = data.as_ref();

        let length = i32_from_slice(data, 0).map_err(|_| {
            Error::invalid_length(format!(
                "{} bytes is too short for a length header",
                data.len()
            ))
        })?;

        let length = match usize::try_from(length) {
            Ok(length) if length >= MIN_BSON_DOCUMENT_SIZE => length,
            _ => {
                return Err(Error::invalid_length(format!(
                    "document too small: {length} bytes"
                )));
            }
        };

        if length > data.len() {
            return Err(Error::invalid_length(format!(
                "declared length {length} exceeds the {} bytes supplied",
                data.len()
            )));
        }

        if data[length - 1] != 0 {
            return Err(Error::malformed_document("document not null terminated"));
        }

        Ok(RawDocument::new_unchecked(&data[..length]))
    }

    /// Creates a new `RawDocument` referencing the provided data slice.
    pub(crate) fn new_unchecked<D: AsRef<[u8]> + ?Sized>(data: &D) -> &RawDocument {
        // SAFETY:
        //
        // Dereferencing a raw pointer requires unsafe due to the potential that the pointer is
        // null, dangling, or misaligned. We know the pointer is not null or dangling due to the
        // fact that it's created by a safe reference. Converting &[u8] to *const [u8] will be
        // properly aligned due to them being references to the same type, and converting *const
        // [u8] to *const RawDocument is aligned due to the fact that the only field in a
        // RawDocument is a [u8] and it is #[repr(transparent), meaning the structs are represented
        // identically at the byte level.
        unsafe { &*(data.as_ref() as *const [u8] as *const RawDocument) }
    }

    /// Creates a new [`RawDocumentBuf`] with an owned copy of the BSON bytes.
    pub fn to_raw_document_buf(&self) -> RawDocumentBuf {
        RawDocumentBuf::from_validated(self.data.to_vec())
    }

    /// The document's total length as recorded in its header, which always equals the number
    /// of bytes it spans.
    pub fn declared_length(&self) -> usize {
        self.data.len()
    }

    /// Gets an iterator over the elements in the [`RawDocument`].
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Gets the first element whose name equals `key`, walking from the start of the document.
    ///
    /// Returns `Ok(None)` if the walk reaches the end of the document without a match, and an
    /// error if malformed bytes are encountered before the key is found.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Option<RawElement<'_>>> {
        let key = key.as_ref();
        for element in self {
            let element = element?;
            if element.key_bytes() == key {
                return Ok(Some(element));
            }
        }
        Ok(None)
    }

    /// Like [`RawDocument::get`], but an absent key is reported as
    /// [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound).
    pub fn find(&self, key: impl AsRef<[u8]>) -> Result<RawElement<'_>> {
        let key = key.as_ref();
        self.get(key)?
            .ok_or_else(|| Error::not_found().with_key(String::from_utf8_lossy(key)))
    }

    fn get_with<'a, T>(
        &'a self,
        key: impl AsRef<[u8]>,
        expected_type: ElementType,
        f: impl FnOnce(RawElement<'a>) -> Result<T>,
    ) -> Result<T> {
        let key = key.as_ref();
        let element = self.find(key)?;

        try_with_key(key, || {
            element.expect_type(expected_type)?;
            f(element)
        })
    }

    /// Gets the string value corresponding to a given key or returns an error if the key
    /// corresponds to a value which isn't a string. The returned slice excludes the null
    /// terminator, so its `len()` is one less than the encoded length prefix.
    pub fn get_str(&self, key: impl AsRef<[u8]>) -> Result<&'_ str> {
        self.get_with(key, ElementType::String, |e| e.read_str())
    }

    /// Gets the BSON double value corresponding to a given key or returns an error if the key
    /// corresponds to a value which isn't a double.
    pub fn get_f64(&self, key: impl AsRef<[u8]>) -> Result<f64> {
        self.get_with(key, ElementType::Double, |e| f64_from_slice(e.value_bytes(), 0))
    }

    /// Gets the BSON int32 value corresponding to a given key or returns an error if the key
    /// corresponds to a value which isn't a 32-bit integer.
    pub fn get_i32(&self, key: impl AsRef<[u8]>) -> Result<i32> {
        self.get_with(key, ElementType::Int32, |e| i32_from_slice(e.value_bytes(), 0))
    }

    /// Gets the BSON int64 value corresponding to a given key or returns an error if the key
    /// corresponds to a value which isn't a 64-bit integer.
    pub fn get_i64(&self, key: impl AsRef<[u8]>) -> Result<i64> {
        self.get_with(key, ElementType::Int64, |e| i64_from_slice(e.value_bytes(), 0))
    }

    /// Gets the boolean value corresponding to a given key or returns an error if the key
    /// corresponds to a value which isn't a boolean.
    pub fn get_bool(&self, key: impl AsRef<[u8]>) -> Result<bool> {
        self.get_with(key, ElementType::Boolean, |e| {
            e.value_bytes()
                .first()
                .map(|b| *b != 0)
                .ok_or_else(|| Error::truncated("boolean value has no bytes"))
        })
    }

    /// Succeeds if the key is present and its value is null.
    pub fn get_null(&self, key: impl AsRef<[u8]>) -> Result<()> {
        self.get_with(key, ElementType::Null, |_| Ok(()))
    }

    /// Gets the UTC datetime corresponding to a given key, as milliseconds since the Unix
    /// epoch, or returns an error if the key corresponds to a value which isn't a datetime.
    pub fn get_datetime(&self, key: impl AsRef<[u8]>) -> Result<i64> {
        self.get_with(key, ElementType::DateTime, |e| i64_from_slice(e.value_bytes(), 0))
    }

    /// Gets an owned copy of the embedded document corresponding to a given key or returns an
    /// error if the key corresponds to a value which isn't a document.
    pub fn get_document(&self, key: impl AsRef<[u8]>) -> Result<RawDocumentBuf> {
        self.get_with(key, ElementType::EmbeddedDocument, |e| {
            RawDocumentBuf::decode(e.value_bytes())
        })
    }

    /// Gets an owned copy of the array corresponding to a given key or returns an error if the
    /// key corresponds to a value which isn't an array. Arrays are documents keyed by index.
    pub fn get_array(&self, key: impl AsRef<[u8]>) -> Result<RawDocumentBuf> {
        self.get_with(key, ElementType::Array, |e| RawDocumentBuf::decode(e.value_bytes()))
    }

    /// Gets the binary value corresponding to a given key or returns an error if the key
    /// corresponds to a value which isn't binary data.
    pub fn get_binary(&self, key: impl AsRef<[u8]>) -> Result<RawBinaryRef<'_>> {
        self.get_with(key, ElementType::Binary, |e| e.read_binary())
    }

    /// Gets the ObjectId bytes corresponding to a given key or returns an error if the key
    /// corresponds to a value which isn't an ObjectId.
    pub fn get_object_id(&self, key: impl AsRef<[u8]>) -> Result<[u8; 12]> {
        self.get_with(key, ElementType::ObjectId, |e| {
            e.value_bytes()
                .try_into()
                .map_err(|_| Error::truncated("ObjectId must be 12 bytes"))
        })
    }

    /// Gets the timestamp corresponding to a given key or returns an error if the key
    /// corresponds to a value which isn't a timestamp.
    pub fn get_timestamp(&self, key: impl AsRef<[u8]>) -> Result<Timestamp> {
        self.get_with(key, ElementType::Timestamp, |e| e.read_timestamp())
    }

    /// Gets the raw decimal128 bytes corresponding to a given key or returns an error if the
    /// key corresponds to a value which isn't a decimal128.
    pub fn get_decimal128_bytes(&self, key: impl AsRef<[u8]>) -> Result<[u8; 16]> {
        self.get_with(key, ElementType::Decimal128, |e| {
            e.value_bytes()
                .try_into()
                .map_err(|_| Error::truncated("decimal128 must be 16 bytes"))
        })
    }

    /// Renders the document as JSON text with the default [`JsonOptions`].
    ///
    /// ```
    /// use bson_codec::raw::RawDocument;
    ///
    /// let doc = RawDocument::from_bytes(b"\x0c\0\0\0\x10n\0\x05\0\0\0\0")?;
    /// assert_eq!(doc.to_json()?, r#"{"n":5}"#);
    /// # Ok::<(), bson_codec::error::Error>(())
    /// ```
    pub fn to_json(&self) -> Result<String> {
        self.to_json_with_options(JsonOptions::default())
    }

    /// Renders the document as JSON text, honoring the provided options.
    pub fn to_json_with_options(&self, options: JsonOptions) -> Result<String> {
        json::to_string(self, &options)
    }

    /// Return a reference to the contained data as a `&[u8]`
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Debug for RawDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawDocument")
            .field("data", &hex::encode(&self.data))
            .finish()
    }
}

impl AsRef<RawDocument> for RawDocument {
    fn as_ref(&self) -> &RawDocument {
        self
    }
}

impl ToOwned for RawDocument {
    type Owned = RawDocumentBuf;

    fn to_owned(&self) -> Self::Owned {
        self.to_raw_document_buf()
    }
}

impl<'a> IntoIterator for &'a RawDocument {
    type IntoIter = Iter<'a>;
    type Item = Result<RawElement<'a>>;

    fn into_iter(self) -> Iter<'a> {
        Iter::new(self)
    }
}
