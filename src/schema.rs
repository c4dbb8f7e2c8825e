//! The schema descriptor and value transport interfaces.
//!
//! The codec never produces descriptors of its own. A caller that wants
//! schema-directed decoding or encoding supplies a [`Descriptor`] tree
//! describing its types, a [`Sink`] to receive decoded values, and a
//! [`Source`] to enumerate values for encoding.
//!
//! # Examples
//!
//! A class with an integer and a string field, decoded into a flat event
//! list and encoded back from a source:
//!
//! ```
//! use yamlet::schema::{Descriptor, Entry, Kind, PrimitiveKind, Sink, Source};
//! use yamlet::{Config, Error};
//!
//! struct Leaf(PrimitiveKind);
//!
//! impl Descriptor for Leaf {
//!     fn kind(&self) -> Kind {
//!         Kind::Primitive(self.0)
//!     }
//! }
//!
//! const INT: Leaf = Leaf(PrimitiveKind::Int);
//! const STR: Leaf = Leaf(PrimitiveKind::Str);
//!
//! struct Account;
//!
//! impl Descriptor for Account {
//!     fn kind(&self) -> Kind {
//!         Kind::Class
//!     }
//!
//!     fn element_count(&self) -> usize {
//!         2
//!     }
//!
//!     fn element_name(&self, index: usize) -> &str {
//!         ["account", "password"][index]
//!     }
//!
//!     fn element_descriptor(&self, index: usize) -> &dyn Descriptor {
//!         match index {
//!             0 => &INT,
//!             _ => &STR,
//!         }
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Events(Vec<String>);
//!
//! impl Sink for Events {
//!     fn put_null(&mut self) -> Result<(), Error> {
//!         self.0.push("null".to_string());
//!         Ok(())
//!     }
//!
//!     fn put_bool(&mut self, value: bool) -> Result<(), Error> {
//!         self.0.push(value.to_string());
//!         Ok(())
//!     }
//!
//!     fn put_int(&mut self, value: i64) -> Result<(), Error> {
//!         self.0.push(value.to_string());
//!         Ok(())
//!     }
//!
//!     fn put_float(&mut self, value: f64) -> Result<(), Error> {
//!         self.0.push(value.to_string());
//!         Ok(())
//!     }
//!
//!     fn put_str(&mut self, value: &str) -> Result<(), Error> {
//!         self.0.push(value.to_string());
//!         Ok(())
//!     }
//!
//!     fn put_char(&mut self, value: char) -> Result<(), Error> {
//!         self.0.push(value.to_string());
//!         Ok(())
//!     }
//!
//!     fn begin_class(&mut self) -> Result<(), Error> {
//!         self.0.push("{".to_string());
//!         Ok(())
//!     }
//!
//!     fn begin_map(&mut self) -> Result<(), Error> {
//!         self.0.push("{".to_string());
//!         Ok(())
//!     }
//!
//!     fn begin_list(&mut self) -> Result<(), Error> {
//!         self.0.push("[".to_string());
//!         Ok(())
//!     }
//!
//!     fn end_composite(&mut self) -> Result<(), Error> {
//!         self.0.push("end".to_string());
//!         Ok(())
//!     }
//!
//!     fn field(&mut self, _: usize, name: &str) -> Result<(), Error> {
//!         self.0.push(format!(".{name}"));
//!         Ok(())
//!     }
//!
//!     fn key(&mut self, key: &str) -> Result<(), Error> {
//!         self.0.push(format!(".{key}"));
//!         Ok(())
//!     }
//! }
//!
//! let mut events = Events::default();
//! yamlet::decode_with("account: 123\npassword: hunter2", &Account, &mut events)?;
//! assert_eq!(events.0, ["{", ".account", "123", ".password", "hunter2", "end"]);
//!
//! struct AccountSource;
//!
//! impl Source for AccountSource {
//!     fn entry_count(&self) -> usize {
//!         2
//!     }
//!
//!     fn entry(&self, index: usize) -> Entry<'_> {
//!         match index {
//!             0 => Entry::Int(123),
//!             _ => Entry::Str("hunter2".into()),
//!         }
//!     }
//! }
//!
//! let out = yamlet::encode_with(&Config::default(), &Account, &AccountSource)?;
//! assert_eq!(out, "account: 123\npassword: hunter2\n");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::borrow::Cow;

use crate::error::Error;

/// The structural kind of a described value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A structured type with a fixed set of named fields.
    Class,
    /// An open mapping whose keys come from the stream.
    Map,
    /// A homogeneous sequence.
    List,
    /// A leaf value.
    Primitive(PrimitiveKind),
    /// One of a fixed set of named variants.
    Enum,
}

impl Kind {
    /// Whether the kind is a leaf.
    #[must_use]
    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Kind::Primitive(..) | Kind::Enum)
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Kind::Class => "class",
            Kind::Map => "map",
            Kind::List => "list",
            Kind::Primitive(PrimitiveKind::Bool) => "bool",
            Kind::Primitive(PrimitiveKind::Int) => "int",
            Kind::Primitive(PrimitiveKind::Float) => "float",
            Kind::Primitive(PrimitiveKind::Str) => "string",
            Kind::Primitive(PrimitiveKind::Char) => "char",
            Kind::Enum => "enum",
        }
    }
}

/// The kind of a leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// A boolean.
    Bool,
    /// A signed integer.
    Int,
    /// A floating point number.
    Float,
    /// A string.
    Str,
    /// A single character.
    Char,
}

/// Metadata attached to a descriptor element.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Annotation {
    /// Comment lines emitted before the element's key, `'\n'`-separated.
    Comment(String),
}

/// A description of a schema-typed value.
///
/// For a [`Kind::Class`], elements are the fields in declaration order. For
/// a [`Kind::List`], element 0 describes the items. For a [`Kind::Map`],
/// element 0 describes the keys and element 1 the values. For a
/// [`Kind::Enum`], element names are the variant names.
///
/// The element methods have panicking defaults so leaf descriptors only
/// implement [`kind`]; a composite descriptor must override every method its
/// kind implies.
///
/// [`kind`]: Descriptor::kind
pub trait Descriptor: Sync {
    /// The structural kind of the described value.
    fn kind(&self) -> Kind;

    /// Number of elements. Meaningful for classes and enums.
    fn element_count(&self) -> usize {
        0
    }

    /// Name of the element at `index`.
    fn element_name(&self, index: usize) -> &str {
        panic!("descriptor has no element {index}")
    }

    /// Descriptor of the element at `index`.
    fn element_descriptor(&self, index: usize) -> &dyn Descriptor {
        panic!("descriptor has no element {index}")
    }

    /// Annotations of the element at `index`.
    fn element_annotations(&self, index: usize) -> &[Annotation] {
        let _ = index;
        &[]
    }
}

/// Receiver for schema-directed decoding.
///
/// The decoder makes one `put_*` call per primitive and brackets composites
/// with `begin_*`/[`end_composite`]. Before each class field value it calls
/// [`field`] with the descriptor index, and before each map entry value it
/// calls [`key`] with the key read from the stream.
///
/// [`end_composite`]: Sink::end_composite
/// [`field`]: Sink::field
/// [`key`]: Sink::key
#[allow(missing_docs)]
pub trait Sink {
    fn put_null(&mut self) -> Result<(), Error>;
    fn put_bool(&mut self, value: bool) -> Result<(), Error>;
    fn put_int(&mut self, value: i64) -> Result<(), Error>;
    fn put_float(&mut self, value: f64) -> Result<(), Error>;
    fn put_str(&mut self, value: &str) -> Result<(), Error>;
    fn put_char(&mut self, value: char) -> Result<(), Error>;
    fn begin_class(&mut self) -> Result<(), Error>;
    fn begin_map(&mut self) -> Result<(), Error>;
    fn begin_list(&mut self) -> Result<(), Error>;
    fn end_composite(&mut self) -> Result<(), Error>;
    fn field(&mut self, index: usize, name: &str) -> Result<(), Error>;
    fn key(&mut self, key: &str) -> Result<(), Error>;
}

/// A single value handed to the encoder.
#[derive(Clone)]
pub enum Entry<'a> {
    /// A null value.
    Null,
    /// A boolean, emitted with the configured literals.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string, or an enum variant name.
    Str(Cow<'a, str>),
    /// A single character, emitted as a one-character string.
    Char(char),
    /// A nested composite enumerated through its own [`Source`].
    Nested(&'a dyn Source),
}

impl<'a> std::fmt::Debug for Entry<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Null => f.write_str("Null"),
            Entry::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Entry::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Entry::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Entry::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Entry::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Entry::Nested(_) => f.debug_tuple("Nested").field(&"<source>").finish(),
        }
    }
}

/// Provider for schema-directed encoding.
///
/// The encoder pulls values by index: class fields follow the descriptor's
/// declaration order, while maps and lists report their own length through
/// [`entry_count`].
///
/// [`entry_count`]: Source::entry_count
pub trait Source {
    /// Number of entries in a map or list. For a class this must equal the
    /// descriptor's element count.
    fn entry_count(&self) -> usize;

    /// Key of the map entry at `index`. Unused for classes and lists.
    fn entry_key(&self, index: usize) -> &str {
        let _ = index;
        ""
    }

    /// The value at `index`.
    fn entry(&self, index: usize) -> Entry<'_>;

    /// Whether the class field at `index` equals its declared default.
    ///
    /// Only consulted when the configuration disables
    /// [`encode_default_values`].
    ///
    /// [`encode_default_values`]: crate::Config::encode_default_values
    fn is_default(&self, index: usize) -> bool {
        let _ = index;
        false
    }
}
