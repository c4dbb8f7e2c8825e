//! Errors raised while decoding or encoding YAML.

use core::fmt;
use core::ops::Range;

/// A resolved input position.
///
/// Line and column are one-based; the span is a byte range into the input
/// buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// The byte range of the offending input.
    pub span: Range<usize>,
    /// One-based line number.
    pub line: usize,
    /// One-based column number.
    pub column: usize,
}

impl fmt::Display for Location {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An error raised by the codec.
///
/// # Examples
///
/// ```
/// use yamlet::from_str;
///
/// let error = from_str("key: \"unterminated").unwrap_err();
/// assert_eq!(error.location().map(|l| l.line), Some(1));
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    location: Option<Location>,
}

impl Error {
    /// Construct a new error at the given location.
    #[inline]
    pub(crate) fn new(location: Location, kind: ErrorKind) -> Self {
        Self {
            kind,
            location: Some(location),
        }
    }

    /// Construct an error without an input position, used by the encoder.
    #[inline]
    pub(crate) fn msg(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    /// Get the location of the error, if the error refers to a position in
    /// the input.
    ///
    /// Encoder errors carry no location.
    #[must_use]
    #[inline]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{} (at {location})", self.kind)
        } else {
            self.kind.fmt(f)
        }
    }
}

impl std::error::Error for Error {}

/// The kind of an error.
#[derive(Debug)]
pub(crate) enum ErrorKind {
    /// Trailing content after the root value.
    ExpectedEof,
    /// Structural parse failure.
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
    /// A scalar could not be read: bad escape, unterminated quote, or a tab
    /// used as indentation.
    MalformedScalar { reason: MalformedKind },
    /// Schema-directed decode saw a structure incompatible with the
    /// descriptor.
    SchemaMismatch {
        expected: &'static str,
        found: &'static str,
        path: String,
    },
    /// A key not present in the class descriptor.
    UnknownKey { key: String, path: String },
    /// A scalar could not be coerced to the requested primitive.
    CoercionFailure {
        text: String,
        target: &'static str,
    },
    /// A construct the codec refuses to process.
    UnsupportedFeature(&'static str),
    /// Encoder contract breach. Indicates a bug in the caller's descriptor
    /// or source.
    InvariantViolation(&'static str),
}

/// The reason a scalar failed to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MalformedKind {
    BadEscape,
    BadHexEscape,
    BadUnicodeEscape,
    UnterminatedString,
    TabInIndent,
    InvalidUtf8,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ExpectedEof => write!(f, "expected end of input"),
            ErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "unexpected token: expected {expected}, found {found}")
            }
            ErrorKind::MalformedScalar { reason } => match reason {
                MalformedKind::BadEscape => write!(f, "malformed scalar: bad escape"),
                MalformedKind::BadHexEscape => {
                    write!(f, "malformed scalar: bad hex escape")
                }
                MalformedKind::BadUnicodeEscape => {
                    write!(f, "malformed scalar: bad unicode escape")
                }
                MalformedKind::UnterminatedString => {
                    write!(f, "malformed scalar: unterminated string")
                }
                MalformedKind::TabInIndent => {
                    write!(f, "malformed scalar: tab used as indentation")
                }
                MalformedKind::InvalidUtf8 => {
                    write!(f, "malformed scalar: invalid utf-8")
                }
            },
            ErrorKind::SchemaMismatch {
                expected,
                found,
                path,
            } => {
                write!(f, "schema mismatch at `{path}`: expected {expected}, found {found}")
            }
            ErrorKind::UnknownKey { key, path } => {
                write!(f, "unknown key `{key}` in `{path}`")
            }
            ErrorKind::CoercionFailure { text, target } => {
                write!(f, "cannot coerce `{text}` to {target}")
            }
            ErrorKind::UnsupportedFeature(name) => {
                write!(f, "unsupported feature: {name}")
            }
            ErrorKind::InvariantViolation(detail) => {
                write!(f, "invariant violation: {detail}")
            }
        }
    }
}
