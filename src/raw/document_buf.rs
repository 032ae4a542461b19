use std::{
    borrow::{Borrow, Cow},
    ops::Deref,
};

use tracing::{debug, trace};

use crate::error::{Error, Result};

use super::{Iter, MIN_BSON_DOCUMENT_SIZE, RawDocument, RawElement};

/// An owned BSON document (akin to [`std::path::PathBuf`]), backed by a buffer of raw BSON bytes.
///
/// The buffer is never shared: [`RawDocumentBuf::decode`] copies exactly the declared number of
/// bytes out of its input, so the caller may drop or reuse its own buffer immediately.
///
/// ```
/// # use bson_codec::error::Error;
/// use bson_codec::raw::RawDocumentBuf;
///
/// let doc = RawDocumentBuf::decode(b"\x13\x00\x00\x00\x02hi\x00\x06\x00\x00\x00y'all\x00\x00")?;
/// let mut iter = doc.iter();
/// let element = iter.next().unwrap()?;
/// assert_eq!(element.key()?, "hi");
/// assert_eq!(element.as_str(), Some("y'all"));
/// assert!(iter.next().is_none());
/// # Ok::<(), Error>(())
/// ```
///
/// This type implements `Deref` to [`RawDocument`], meaning that all methods on [`RawDocument`] are
/// available on [`RawDocumentBuf`] values as well. This includes [`RawDocument::get`] or any of the
/// type-specific getters, such as [`RawDocument::get_str`].
#[derive(Clone, PartialEq)]
pub struct RawDocumentBuf {
    data: Vec<u8>,
}

impl RawDocumentBuf {
    /// An empty document: `{}`.
    pub fn empty() -> RawDocumentBuf {
        let mut data: Vec<u8> = (MIN_BSON_DOCUMENT_SIZE as i32).to_le_bytes().to_vec();
        data.push(0);
        Self { data }
    }

    /// Validates the length header and terminator at the start of `bytes` and copies the
    /// declared number of bytes into a new document.
    ///
    /// Fails with [`ErrorKind::InvalidLength`](crate::error::ErrorKind::InvalidLength) if the
    /// header is below five or larger than `bytes`, and with
    /// [`ErrorKind::MalformedDocument`](crate::error::ErrorKind::MalformedDocument) if the last
    /// declared byte is not null. Trailing bytes beyond the declared length are ignored.
    ///
    /// ```
    /// # use bson_codec::error::Error;
    /// use bson_codec::raw::RawDocumentBuf;
    ///
    /// let doc = RawDocumentBuf::decode(&[0x08, 0, 0, 0, 0x04, 0x04, 0x04, 0x00])?;
    /// assert_eq!(doc.declared_length(), 8);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn decode(bytes: &[u8]) -> Result<RawDocumentBuf> {
        match RawDocument::from_bytes(bytes) {
            Ok(doc) => {
                trace!(declared_length = doc.declared_length(), "decoded BSON document");
                Ok(doc.to_raw_document_buf())
            }
            Err(error) => {
                debug!(supplied = bytes.len(), %error, "rejected BSON buffer");
                Err(error)
            }
        }
    }

    /// Constructs a new [`RawDocumentBuf`] that takes ownership of `data`, validating it the
    /// same way as [`RawDocumentBuf::decode`]. Trailing bytes beyond the declared length are
    /// dropped.
    ///
    /// ```
    /// # use bson_codec::error::Error;
    /// use bson_codec::raw::RawDocumentBuf;
    ///
    /// let doc = RawDocumentBuf::from_vec(b"\x05\0\0\0\0".to_vec())?;
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_vec(mut data: Vec<u8>) -> Result<RawDocumentBuf> {
        let length = RawDocument::from_bytes(&data)?.declared_length();
        data.truncate(length);
        Ok(Self { data })
    }

    pub(crate) fn from_validated(data: Vec<u8>) -> RawDocumentBuf {
        Self { data }
    }

    /// Returns a byte-exact copy of the document, including any duplicate keys or unusual
    /// element ordering it was decoded with.
    ///
    /// ```
    /// # use bson_codec::error::Error;
    /// use bson_codec::raw::RawDocumentBuf;
    ///
    /// let bytes = b"\x0c\0\0\0\x10n\0\x05\0\0\0\0";
    /// let doc = RawDocumentBuf::decode(bytes)?;
    /// assert_eq!(doc.encode(), bytes.to_vec());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn encode(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Gets an iterator over the elements in the [`RawDocumentBuf`].
    ///
    /// # Note:
    ///
    /// There is no owning iterator for [`RawDocumentBuf`]. If you need ownership over
    /// elements, you must explicitly copy their bytes out yourself.
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Return the contained data as a `Vec<u8>`
    ///
    /// ```
    /// use bson_codec::raw::RawDocumentBuf;
    ///
    /// let doc = RawDocumentBuf::empty();
    /// assert_eq!(doc.into_vec(), b"\x05\x00\x00\x00\x00".to_vec());
    /// ```
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl Default for RawDocumentBuf {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<u8>> for RawDocumentBuf {
    type Error = Error;

    fn try_from(data: Vec<u8>) -> Result<RawDocumentBuf> {
        RawDocumentBuf::from_vec(data)
    }
}

impl TryFrom<&[u8]> for RawDocumentBuf {
    type Error = Error;

    fn try_from(data: &[u8]) -> Result<RawDocumentBuf> {
        RawDocumentBuf::decode(data)
    }
}

impl From<RawDocumentBuf> for Vec<u8> {
    fn from(doc: RawDocumentBuf) -> Vec<u8> {
        doc.into_vec()
    }
}

impl std::fmt::Debug for RawDocumentBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawDocumentBuf")
            .field("data", &hex::encode(&self.data))
            .finish()
    }
}

impl<'a> From<RawDocumentBuf> for Cow<'a, RawDocument> {
    fn from(rd: RawDocumentBuf) -> Self {
        Cow::Owned(rd)
    }
}

impl<'a> From<&'a RawDocumentBuf> for Cow<'a, RawDocument> {
    fn from(rd: &'a RawDocumentBuf) -> Self {
        Cow::Borrowed(rd.as_ref())
    }
}

impl<'a> IntoIterator for &'a RawDocumentBuf {
    type IntoIter = Iter<'a>;
    type Item = Result<RawElement<'a>>;

    fn into_iter(self) -> Iter<'a> {
        Iter::new(self)
    }
}

impl AsRef<RawDocument> for RawDocumentBuf {
    fn as_ref(&self) -> &RawDocument {
        RawDocument::new_unchecked(&self.data)
    }
}

impl Deref for RawDocumentBuf {
    type Target = RawDocument;

    fn deref(&self) -> &Self::Target {
        RawDocument::new_unchecked(&self.data)
    }
}

impl Borrow<RawDocument> for RawDocumentBuf {
    fn borrow(&self) -> &RawDocument {
        self.deref()
    }
}
