use crate::error::Result;

use super::{RawDocument, RawElement, next_element};

/// An iterator over the document's elements, in the order they appear in the bytes.
pub struct Iter<'a> {
    doc: &'a RawDocument,
    offset: usize,

    /// Whether the underlying doc is assumed to be valid or if an error has been encountered.
    /// After an error, all subsequent iterations will return None.
    valid: bool,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(doc: &'a RawDocument) -> Self {
        Self {
            doc,
            offset: 4,
            valid: true,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Result<RawElement<'a>>;

    fn next(&mut self) -> Option<Result<RawElement<'a>>> {
        if !self.valid {
            return None;
        }

        let bytes = self.doc.as_bytes();
        match next_element(bytes, self.offset, bytes.len()) {
            Ok(Some(element)) => {
                self.offset += element.size();
                Some(Ok(element))
            }
            Ok(None) => {
                self.valid = false;
                None
            }
            Err(e) => {
                self.valid = false;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Iter<'_> {}
