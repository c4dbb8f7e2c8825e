//! The dynamic YAML element tree.

use core::fmt;

/// The kind of string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StringKind {
    /// A bare string without quotes, such as `hello-world`.
    Bare,
    /// A single-quoted string.
    SingleQuoted,
    /// A double-quoted string.
    DoubleQuoted,
}

/// A dynamically typed YAML element.
///
/// Scalars keep their decoded text together with the quoting style they were
/// read with. The style only matters for null coercion: a plain `null`
/// decodes to [`Element::Null`] while a quoted `"null"` decodes to a scalar,
/// so equality between elements ignores the style entirely.
///
/// # Examples
///
/// ```
/// let doc = yamlet::from_str("part_no: A4786")?;
/// let part = doc.get("part_no").ok_or("missing part_no")?;
/// assert_eq!(part.as_str(), Some("A4786"));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub enum Element {
    /// A null value.
    Null,
    /// A scalar with its decoded text and quoting style.
    Scalar(String, StringKind),
    /// A sequence of elements.
    Sequence(Vec<Element>),
    /// A mapping in insertion order. Keys may be any element, though in
    /// practice they are scalars.
    Mapping(Vec<(Element, Element)>),
}

macro_rules! as_number {
    ($name:ident, $ty:ty, $doc:literal, $lit:literal) => {
        #[doc = concat!("Try and get the value as a ", $doc, ".")]
        ///
        /// # Examples
        ///
        /// ```
        #[doc = concat!("let doc = yamlet::from_str(\"", stringify!($lit), "\")?;")]
        #[doc = concat!("assert_eq!(doc.", stringify!($name), "(), Some(", stringify!($lit), "));")]
        /// # Ok::<_, Box<dyn std::error::Error>>(())
        /// ```
        #[must_use]
        pub fn $name(&self) -> Option<$ty> {
            match self {
                Element::Scalar(text, ..) => lexical_core::parse(text.as_bytes()).ok(),
                _ => None,
            }
        }
    };
}

impl Element {
    /// Construct a bare scalar.
    pub fn scalar<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        Element::Scalar(text.into(), StringKind::Bare)
    }

    /// Test if the element is null.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = yamlet::from_str("~")?;
    /// assert!(doc.is_null());
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Element::Null)
    }

    /// Get the element as a string.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = yamlet::from_str("\"a double-quoted string\"")?;
    /// assert_eq!(doc.as_str(), Some("a double-quoted string"));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::Scalar(text, ..) => Some(text),
            _ => None,
        }
    }

    /// Get the element as a boolean.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = yamlet::from_str("true")?;
    /// assert_eq!(doc.as_bool(), Some(true));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Element::Scalar(text, ..) => match text.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get the element as a sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = yamlet::from_str("[1, 2, 3]")?;
    /// let items = doc.as_sequence().ok_or("expected a sequence")?;
    /// assert_eq!(items.len(), 3);
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Element]> {
        match self {
            Element::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get the element as mapping entries in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = yamlet::from_str("a: 1\nb: 2")?;
    /// let entries = doc.as_mapping().ok_or("expected a mapping")?;
    /// assert_eq!(entries.len(), 2);
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn as_mapping(&self) -> Option<&[(Element, Element)]> {
        match self {
            Element::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a value in a mapping by scalar key.
    ///
    /// Returns the first entry whose key is a scalar equal to `key`, or
    /// `None` if the element is not a mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = yamlet::from_str("number1: 10\nnumber2: 20")?;
    /// assert_eq!(doc.get("number2").and_then(|v| v.as_u32()), Some(20));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Element> {
        let Element::Mapping(entries) = self else {
            return None;
        };

        for (k, value) in entries {
            if k.as_str() == Some(key) {
                return Some(value);
            }
        }

        None
    }

    as_number!(as_f32, f32, "32-bit float", 10.42);
    as_number!(as_f64, f64, "64-bit float", 10.42);
    as_number!(as_u8, u8, "8-bit unsigned integer", 42);
    as_number!(as_i8, i8, "8-bit signed integer", -42);
    as_number!(as_u16, u16, "16-bit unsigned integer", 42);
    as_number!(as_i16, i16, "16-bit signed integer", -42);
    as_number!(as_u32, u32, "32-bit unsigned integer", 42);
    as_number!(as_i32, i32, "32-bit signed integer", -42);
    as_number!(as_u64, u64, "64-bit unsigned integer", 42);
    as_number!(as_i64, i64, "64-bit signed integer", -42);
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Element::Null, Element::Null) => true,
            (Element::Scalar(a, ..), Element::Scalar(b, ..)) => a == b,
            (Element::Sequence(a), Element::Sequence(b)) => a == b,
            (Element::Mapping(a), Element::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Element {}

impl fmt::Display for Element {
    /// Encode the element with the default configuration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
