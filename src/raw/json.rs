use serde_json::{Number, Value};
use tracing::debug;

use crate::{
    error::{Error, Result, try_with_key},
    spec::ElementType,
};

use super::{DEFAULT_MAX_NESTING_DEPTH, RawDocument, RawElement};

/// Options used to configure JSON rendering of a [`RawDocument`].
///
/// ```
/// use bson_codec::raw::JsonOptions;
///
/// let options = JsonOptions::builder().max_depth(16).build();
/// assert_eq!(options.max_depth(), 16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct JsonOptions {
    max_depth: usize,
}

impl JsonOptions {
    /// Create a builder used to construct a new [`JsonOptions`].
    pub fn builder() -> JsonOptionsBuilder {
        JsonOptionsBuilder {
            options: Default::default(),
        }
    }

    /// How many levels of embedded documents may be rendered beneath the top-level document.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// A builder used to construct new [`JsonOptions`] structs.
#[derive(Clone, Debug)]
pub struct JsonOptionsBuilder {
    options: JsonOptions,
}

impl JsonOptionsBuilder {
    /// Set the nesting bound. Rendering a document nested more deeply fails with
    /// [`ErrorKind::DepthLimitExceeded`](crate::error::ErrorKind::DepthLimitExceeded).
    /// Defaults to [`DEFAULT_MAX_NESTING_DEPTH`].
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Consume this builder and produce a [`JsonOptions`].
    pub fn build(self) -> JsonOptions {
        self.options
    }
}

pub(crate) fn to_string(doc: &RawDocument, options: &JsonOptions) -> Result<String> {
    let mut out = String::with_capacity(doc.declared_length());
    write_document(doc, &mut out, 0, options)?;
    Ok(out)
}

fn write_document(
    doc: &RawDocument,
    out: &mut String,
    depth: usize,
    options: &JsonOptions,
) -> Result<()> {
    if depth > options.max_depth {
        debug!(limit = options.max_depth, "JSON rendering exceeded nesting limit");
        return Err(Error::depth_limit_exceeded(options.max_depth));
    }

    out.push('{');
    for (i, element) in doc.iter().enumerate() {
        let element = element?;
        if i > 0 {
            out.push(',');
        }
        try_with_key(element.key_bytes(), || {
            write_str(out, element.key()?);
            out.push(':');
            write_value(element, out, depth, options)
        })?;
    }
    out.push('}');

    Ok(())
}

fn write_value(
    element: RawElement<'_>,
    out: &mut String,
    depth: usize,
    options: &JsonOptions,
) -> Result<()> {
    match element.element_type() {
        ElementType::Double => {
            let value = super::f64_from_slice(element.value_bytes(), 0)?;
            // JSON has no spelling for NaN or the infinities.
            match Number::from_f64(value) {
                Some(n) => out.push_str(&n.to_string()),
                None => out.push_str("null"),
            }
        }
        ElementType::String => write_str(out, element.read_str()?),
        ElementType::EmbeddedDocument | ElementType::Array => {
            write_document(element.read_document()?, out, depth + 1, options)?
        }
        ElementType::Int32 => {
            let value = super::i32_from_slice(element.value_bytes(), 0)?;
            out.push_str(&value.to_string());
        }
        ElementType::Boolean => match element.value_bytes().first() {
            Some(0) => out.push_str("false"),
            Some(_) => out.push_str("true"),
            None => return Err(Error::truncated("boolean value has no bytes")),
        },
        other => {
            debug!(element_type = ?other, "JSON rendering hit an unsupported element type");
            return Err(Error::unsupported_type(other as u8));
        }
    }

    Ok(())
}

fn write_str(out: &mut String, s: &str) {
    out.push_str(&Value::from(s).to_string());
}
