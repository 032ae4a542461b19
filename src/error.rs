use thiserror::Error;

use crate::spec::ElementType;

pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while decoding, walking or rendering a BSON document.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,

    /// The document key associated with the error, if any.
    pub key: Option<String>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(key) = self.key.as_deref() {
            write!(f, "Error at key \"{key}\": ")?;
        }

        write!(f, "{}", self.kind)
    }
}

/// The types of errors that can occur in this crate.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The length header was smaller than the minimum document size or larger than the
    /// buffer supplied.
    #[error("Invalid document length: {message}")]
    #[non_exhaustive]
    InvalidLength { message: String },

    /// The document was not terminated by a null byte.
    #[error("Malformed document: {message}")]
    #[non_exhaustive]
    MalformedDocument { message: String },

    /// A fixed-width read would have run past the end of the buffer.
    #[error("Read of {width} bytes at offset {offset} exceeds buffer of {len} bytes")]
    #[non_exhaustive]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    /// An element or value extended past the end of its enclosing document.
    #[error("Truncated element: {message}")]
    #[non_exhaustive]
    Truncated { message: String },

    /// An element carried a type tag this crate does not know how to size.
    #[error("Unsupported element type {tag:#04x}")]
    #[non_exhaustive]
    UnsupportedType { tag: u8 },

    /// No value for the specified key was present in the document.
    #[error("The key was not present in the document")]
    NotFound,

    /// The type of the value in the document did not match the requested type.
    #[error("Expected type {expected:?}, got type {actual:?}")]
    #[non_exhaustive]
    TypeMismatch {
        /// The expected type of the value.
        expected: ElementType,

        /// The actual type of the value.
        actual: ElementType,
    },

    /// Invalid UTF-8 bytes were encountered where a string was required.
    #[error("Invalid UTF-8")]
    Utf8Encoding,

    /// Embedded documents were nested more deeply than the configured limit.
    #[error("Documents nested deeper than the limit of {limit}")]
    #[non_exhaustive]
    DepthLimitExceeded { limit: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, key: None }
    }
}

impl Error {
    /// The key at which the error was encountered, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Attaches `key` unless a more deeply nested key has already been recorded.
    pub(crate) fn with_key(mut self, key: impl Into<String>) -> Self {
        if self.key.is_none() {
            self.key = Some(key.into());
        }
        self
    }

    pub(crate) fn invalid_length(message: impl ToString) -> Self {
        ErrorKind::InvalidLength {
            message: message.to_string(),
        }
        .into()
    }

    pub(crate) fn malformed_document(message: impl ToString) -> Self {
        ErrorKind::MalformedDocument {
            message: message.to_string(),
        }
        .into()
    }

    pub(crate) fn out_of_bounds(offset: usize, width: usize, len: usize) -> Self {
        ErrorKind::OutOfBounds { offset, width, len }.into()
    }

    pub(crate) fn truncated(message: impl ToString) -> Self {
        ErrorKind::Truncated {
            message: message.to_string(),
        }
        .into()
    }

    pub(crate) fn unsupported_type(tag: u8) -> Self {
        ErrorKind::UnsupportedType { tag }.into()
    }

    pub(crate) fn not_found() -> Self {
        ErrorKind::NotFound.into()
    }

    pub(crate) fn type_mismatch(actual: ElementType, expected: ElementType) -> Self {
        ErrorKind::TypeMismatch { expected, actual }.into()
    }

    pub(crate) fn utf8_encoding() -> Self {
        ErrorKind::Utf8Encoding.into()
    }

    pub(crate) fn depth_limit_exceeded(limit: usize) -> Self {
        ErrorKind::DepthLimitExceeded { limit }.into()
    }

    /// Whether the requested key was absent from the document.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }

    /// Whether the key was present but held a value of another type.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::TypeMismatch { .. })
    }
}

/// Execute the provided closure, attaching the provided key to the returned error (if any).
pub(crate) fn try_with_key<G, F: FnOnce() -> Result<G>>(key: &[u8], f: F) -> Result<G> {
    f().map_err(|e| e.with_key(String::from_utf8_lossy(key)))
}
