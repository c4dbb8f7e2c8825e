//! A YAML codec: decode text into a dynamic element tree or a
//! schema-directed value graph, and encode values back into YAML with
//! configurable block and flow presentation.
//!
//! ## Specification compliance
//!
//! This codec covers a practical subset of YAML 1.2:
//!
//! * Block and flow mappings and sequences, plain, single-quoted and
//!   double-quoted scalars, comments, and the customary indent flexibility
//!   for sequences under mapping keys.
//! * No directives, anchors, aliases or tags; a single document per input.
//! * No literal or folded block scalars (`|`, `>`); these fail with an
//!   unsupported-feature error.
//! * Comments are discarded on decode. On encode, comments can be emitted
//!   from schema annotations.
//!
//! ## Dynamic decoding
//!
//! [`from_str`] produces an [`Element`]: a tagged tree of nulls, scalars,
//! sequences and mappings. Mapping order is preserved, and a plain `null`
//! stays distinct from the quoted string `"null"`.
//!
//! ```
//! let doc = yamlet::from_str(
//!     r"
//!     part_no: A4786
//!     price: 1.47
//!     quantity: 4
//!     ",
//! )?;
//!
//! assert_eq!(doc.get("part_no").and_then(|v| v.as_str()), Some("A4786"));
//! assert_eq!(doc.get("quantity").and_then(|v| v.as_u32()), Some(4));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Encoding
//!
//! [`to_string`] re-encodes an element tree with the default block-preferred
//! [`Config`]; [`to_string_with`] takes an explicit configuration.
//!
//! ```
//! let doc = yamlet::from_str("{ a: 1, b: [x, y] }")?;
//!
//! assert_eq!(yamlet::to_string(&doc)?, "a: 1\nb: [ x, y ]\n");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Schema-directed usage
//!
//! [`decode_with`] validates input against a caller-supplied
//! [`Descriptor`][schema::Descriptor] and forwards typed values to a
//! [`Sink`][schema::Sink]; [`encode_with`] walks a descriptor and pulls
//! values from a [`Source`][schema::Source]. See the [`schema`] module.

#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base;
mod config;
mod decode;
mod element;
mod encode;
pub mod error;
pub mod schema;
mod token;
mod writer;

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde;

#[cfg(test)]
mod tests;

pub use self::config::{Config, Layout, ListLayout, StringStyle};
pub use self::decode::Decoder;
pub use self::element::{Element, StringKind};
pub use self::encode::Encoder;
pub use self::error::Error;

use crate::error::{ErrorKind, MalformedKind};

/// Decode a YAML document into a dynamic element tree.
///
/// # Examples
///
/// ```
/// let doc = yamlet::from_str("number1: 10\nnumber2: 20")?;
/// assert_eq!(doc.get("number1").and_then(|v| v.as_u32()), Some(10));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Errors in case the document cannot be parsed as YAML.
pub fn from_str(input: &str) -> Result<Element, Error> {
    Decoder::new(input).decode()
}

/// Decode a YAML document from bytes, validating that they are UTF-8.
///
/// # Examples
///
/// ```
/// let doc = yamlet::from_slice(b"32".as_slice())?;
/// assert_eq!(doc.as_u32(), Some(32));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Errors in case the input is not UTF-8 or cannot be parsed as YAML.
pub fn from_slice<D>(input: D) -> Result<Element, Error>
where
    D: AsRef<[u8]>,
{
    let bytes = input.as_ref();

    match std::str::from_utf8(bytes) {
        Ok(input) => from_str(input),
        Err(e) => {
            let offset = e.valid_up_to();
            let location = base::Parser::new(bytes).location_of(offset..offset + 1);
            Err(Error::new(
                location,
                ErrorKind::MalformedScalar {
                    reason: MalformedKind::InvalidUtf8,
                },
            ))
        }
    }
}

/// Decode a YAML document against a schema descriptor, forwarding values to
/// the sink.
///
/// See the [`schema`] module for a worked example.
///
/// # Errors
///
/// Errors on malformed input, on keys unknown to a class descriptor, on
/// structure incompatible with the descriptor, and on scalars which do not
/// coerce to the requested primitive.
pub fn decode_with(
    input: &str,
    descriptor: &dyn schema::Descriptor,
    sink: &mut dyn schema::Sink,
) -> Result<(), Error> {
    Decoder::new(input).decode_with(descriptor, sink)
}

/// Encode an element tree with the default configuration.
///
/// # Examples
///
/// ```
/// let doc = yamlet::from_str("a: 1")?;
/// assert_eq!(yamlet::to_string(&doc)?, "a: 1\n");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Errors on values the codec refuses to represent, such as collection
/// mapping keys.
pub fn to_string(element: &Element) -> Result<String, Error> {
    to_string_with(&Config::default(), element)
}

/// Encode an element tree with the given configuration.
///
/// # Examples
///
/// ```
/// use yamlet::Config;
///
/// let doc = yamlet::from_str("a: 1\nb: 2")?;
/// let out = yamlet::to_string_with(&Config::flow(), &doc)?;
/// assert_eq!(out, "{ a: 1, b: 2 }\n");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Errors on values the codec refuses to represent, such as collection
/// mapping keys.
pub fn to_string_with(config: &Config, element: &Element) -> Result<String, Error> {
    Encoder::new(config).encode(element)
}

/// Encode a schema-described value by walking the descriptor and pulling
/// values from the source.
///
/// See the [`schema`] module for a worked example.
///
/// # Errors
///
/// Errors when the source hands back an entry incompatible with the
/// descriptor.
pub fn encode_with(
    config: &Config,
    descriptor: &dyn schema::Descriptor,
    source: &dyn schema::Source,
) -> Result<String, Error> {
    Encoder::new(config).encode_with(descriptor, source)
}
