//! Lexing of YAML text into a token sequence.

use std::borrow::Cow;

use crate::base;
use crate::element::StringKind;
use crate::error::{Error, ErrorKind, Location, MalformedKind};

/// Inline whitespace, excluding line breaks.
macro_rules! inline_ws {
    () => {
        b' ' | b'\t' | b'\r' | b'\x0C'
    };
}

/// Bytes which may follow a structural indicator such as `:` or `-`.
macro_rules! post_indicator {
    () => {
        inline_ws!() | b'\n' | 0
    };
}

/// A single lexical token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    /// A scalar with its decoded text and quoting style.
    Scalar(Cow<'a, str>, StringKind),
    /// A bare scalar which reads as one of the null literals.
    NullScalar,
    /// `:` followed by whitespace.
    Colon,
    /// `,` separating flow entries.
    Comma,
    /// A single line break.
    LineSeparator,
    /// `-` followed by whitespace, starting a block sequence item.
    SequenceDash,
    /// `{`.
    FlowMapBegin,
    /// `}`.
    FlowMapEnd,
    /// `[`.
    FlowSequenceBegin,
    /// `]`.
    FlowSequenceEnd,
    /// End of input.
    Eof,
}

impl Token<'_> {
    /// Short name used in diagnostics.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Scalar(text, ..) => format!("scalar `{text}`"),
            Token::NullScalar => "null".to_string(),
            Token::Colon => "`:`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::LineSeparator => "line break".to_string(),
            Token::SequenceDash => "`-`".to_string(),
            Token::FlowMapBegin => "`{`".to_string(),
            Token::FlowMapEnd => "`}`".to_string(),
            Token::FlowSequenceBegin => "`[`".to_string(),
            Token::FlowSequenceEnd => "`]`".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// A single-pass token stream over a complete input buffer.
///
/// The stream offers one token of lookahead: [`push_back`] arms a reuse flag
/// which causes the next [`next`] call to return the current token again
/// without advancing.
///
/// [`push_back`]: TokenStream::push_back
/// [`next`]: TokenStream::next
pub(crate) struct TokenStream<'a> {
    input: &'a str,
    parser: base::Parser<'a>,
    scratch: Vec<u8>,
    current: Option<Token<'a>>,
    reuse: bool,
    token_start: usize,
    at_line_start: bool,
}

impl<'a> TokenStream<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            parser: base::Parser::new(input.as_bytes()),
            scratch: Vec::new(),
            current: None,
            reuse: false,
            token_start: 0,
            at_line_start: true,
        }
    }

    /// Return the current token again on the next call to [`next`].
    ///
    /// [`next`]: TokenStream::next
    pub(crate) fn push_back(&mut self) {
        self.reuse = true;
    }

    /// Column of the most recently returned token, zero-based.
    pub(crate) fn token_column(&self) -> usize {
        self.parser.column_of(self.token_start)
    }

    /// Location of the most recently returned token.
    pub(crate) fn location(&self) -> Location {
        let end = self.parser.pos().max(self.token_start + 1);
        self.parser.location_of(self.token_start..end)
    }

    /// Produce the next token.
    pub(crate) fn next(&mut self) -> Result<Token<'a>, Error> {
        if self.reuse {
            self.reuse = false;

            if let Some(token) = &self.current {
                return Ok(token.clone());
            }
        }

        loop {
            self.token_start = self.parser.pos();

            if self.parser.is_eof() {
                return Ok(self.emit(Token::Eof));
            }

            match self.parser.peek() {
                b'\t' if self.at_line_start => {
                    return Err(self.err(self.parser.pos(), MalformedKind::TabInIndent));
                }
                inline_ws!() => {
                    self.parser.bump(1);
                }
                b'\n' => {
                    self.parser.bump(1);
                    return Ok(self.emit(Token::LineSeparator));
                }
                b'#' => {
                    self.parser.find(b'\n');
                }
                b':' if matches!(self.parser.peek2().1, post_indicator!()) => {
                    self.parser.bump(1);
                    return Ok(self.emit(Token::Colon));
                }
                b',' => {
                    self.parser.bump(1);
                    return Ok(self.emit(Token::Comma));
                }
                b'[' => {
                    self.parser.bump(1);
                    return Ok(self.emit(Token::FlowSequenceBegin));
                }
                b']' => {
                    self.parser.bump(1);
                    return Ok(self.emit(Token::FlowSequenceEnd));
                }
                b'{' => {
                    self.parser.bump(1);
                    return Ok(self.emit(Token::FlowMapBegin));
                }
                b'}' => {
                    self.parser.bump(1);
                    return Ok(self.emit(Token::FlowMapEnd));
                }
                b'-' if matches!(self.parser.peek2().1, post_indicator!()) => {
                    self.parser.bump(1);
                    return Ok(self.emit(Token::SequenceDash));
                }
                b'"' => {
                    let token = self.double_quoted()?;
                    return Ok(self.emit(token));
                }
                b'\'' => {
                    let token = self.single_quoted()?;
                    return Ok(self.emit(token));
                }
                b'|' | b'>' if matches!(self.parser.peek2().1, post_indicator!() | b'+' | b'-') => {
                    let pos = self.parser.pos();
                    return Err(Error::new(
                        self.parser.location_of(pos..pos + 1),
                        ErrorKind::UnsupportedFeature("block scalars (`|`, `>`)"),
                    ));
                }
                _ => {
                    let token = self.plain();
                    return Ok(self.emit(token));
                }
            }
        }
    }

    fn emit(&mut self, token: Token<'a>) -> Token<'a> {
        self.at_line_start = matches!(token, Token::LineSeparator);
        self.current = Some(token.clone());
        token
    }

    fn err(&self, start: usize, reason: MalformedKind) -> Error {
        let end = self.parser.pos().max(start + 1);
        Error::new(
            self.parser.location_of(start..end),
            ErrorKind::MalformedScalar { reason },
        )
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.input.get(start..end).unwrap_or_default()
    }

    /// Read a plain scalar up to the next structural character, trimming
    /// trailing whitespace.
    fn plain(&mut self) -> Token<'a> {
        let start = self.parser.pos();
        let mut last_ws = false;

        loop {
            if self.parser.is_eof() {
                break;
            }

            let (b0, b1) = self.parser.peek2();

            match b0 {
                b'\n' | b',' | b']' | b'}' => break,
                b':' if matches!(b1, post_indicator!()) => break,
                b'#' if last_ws => break,
                b => {
                    last_ws = matches!(b, b' ' | b'\t');
                    self.parser.bump(1);
                }
            }
        }

        let mut end = self.parser.pos();

        while end > start && matches!(self.input.as_bytes()[end - 1], inline_ws!()) {
            end -= 1;
        }

        let text = self.slice(start, end);

        match text {
            "~" | "null" | "Null" | "NULL" => Token::NullScalar,
            _ => Token::Scalar(Cow::Borrowed(text), StringKind::Bare),
        }
    }

    /// Read a double-quoted string.
    fn double_quoted(&mut self) -> Result<Token<'a>, Error> {
        let original = self.parser.pos();
        self.parser.bump(1);
        let start = self.parser.pos();

        loop {
            if self.parser.is_eof() {
                return Err(self.err(original, MalformedKind::UnterminatedString));
            }

            match self.parser.peek() {
                b'"' => break,
                b'\\' | b'\n' => {
                    return self.double_quoted_escaped(start, original);
                }
                _ => {
                    self.parser.bump(1);
                }
            }
        }

        let text = self.slice(start, self.parser.pos());
        self.parser.bump(1);
        Ok(Token::Scalar(Cow::Borrowed(text), StringKind::DoubleQuoted))
    }

    /// Read the remainder of a double-quoted string which needs the scratch
    /// buffer, either for escapes or line folding.
    fn double_quoted_escaped(&mut self, start: usize, original: usize) -> Result<Token<'a>, Error> {
        self.scratch.clear();
        self.scratch.extend_from_slice(self.parser.string(start));

        loop {
            if self.parser.is_eof() {
                return Err(self.err(original, MalformedKind::UnterminatedString));
            }

            match self.parser.peek() {
                b'"' => {
                    self.parser.bump(1);
                    break;
                }
                b'\\' => {
                    let escape_start = self.parser.pos();
                    self.parser.bump(1);
                    self.unescape(escape_start)?;
                }
                b'\n' => {
                    self.fold_line_break();
                }
                b => {
                    self.scratch.push(b);
                    self.parser.bump(1);
                }
            }
        }

        self.take_scratch(original, StringKind::DoubleQuoted)
    }

    /// Read a single-quoted string. Only `''` escapes; line breaks fold.
    fn single_quoted(&mut self) -> Result<Token<'a>, Error> {
        let original = self.parser.pos();
        self.parser.bump(1);
        let start = self.parser.pos();

        loop {
            if self.parser.is_eof() {
                return Err(self.err(original, MalformedKind::UnterminatedString));
            }

            match self.parser.peek2() {
                (b'\'', b'\'') => {
                    return self.single_quoted_escaped(start, original);
                }
                (b'\'', _) => break,
                (b'\n', _) => {
                    return self.single_quoted_escaped(start, original);
                }
                _ => {
                    self.parser.bump(1);
                }
            }
        }

        let text = self.slice(start, self.parser.pos());
        self.parser.bump(1);
        Ok(Token::Scalar(Cow::Borrowed(text), StringKind::SingleQuoted))
    }

    fn single_quoted_escaped(&mut self, start: usize, original: usize) -> Result<Token<'a>, Error> {
        self.scratch.clear();
        self.scratch.extend_from_slice(self.parser.string(start));

        loop {
            if self.parser.is_eof() {
                return Err(self.err(original, MalformedKind::UnterminatedString));
            }

            match self.parser.peek2() {
                (b'\'', b'\'') => {
                    self.parser.bump(2);
                    self.scratch.push(b'\'');
                }
                (b'\'', _) => {
                    self.parser.bump(1);
                    break;
                }
                (b'\n', _) => {
                    self.fold_line_break();
                }
                (b, _) => {
                    self.scratch.push(b);
                    self.parser.bump(1);
                }
            }
        }

        self.take_scratch(original, StringKind::SingleQuoted)
    }

    fn take_scratch(&mut self, original: usize, kind: StringKind) -> Result<Token<'a>, Error> {
        let Ok(text) = std::str::from_utf8(&self.scratch) else {
            return Err(self.err(original, MalformedKind::InvalidUtf8));
        };

        let text = text.to_owned();
        self.scratch.clear();
        Ok(Token::Scalar(Cow::Owned(text), kind))
    }

    /// Fold a literal line break inside a quoted scalar: the break and the
    /// following indentation collapse to a single space, while additional
    /// blank lines each contribute a literal newline.
    fn fold_line_break(&mut self) {
        while matches!(self.scratch.last(), Some(inline_ws!())) {
            self.scratch.pop();
        }

        self.parser.bump(1);
        let mut blanks = 0usize;

        loop {
            while matches!(self.parser.peek(), inline_ws!()) && !self.parser.is_eof() {
                self.parser.bump(1);
            }

            if self.parser.peek() == b'\n' && !self.parser.is_eof() {
                self.parser.bump(1);
                blanks += 1;
            } else {
                break;
            }
        }

        if blanks == 0 {
            self.scratch.push(b' ');
        } else {
            for _ in 0..blanks {
                self.scratch.push(b'\n');
            }
        }
    }

    /// Unescape into the scratch buffer.
    fn unescape(&mut self, start: usize) -> Result<(), Error> {
        let b = match self.parser.peek() {
            b'\\' => b'\\',
            b'"' => b'"',
            b'/' => b'/',
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'0' => b'\x00',
            b'b' => b'\x08',
            b'f' => b'\x0c',
            b'x' => {
                self.parser.bump(1);
                return self.unescape_unicode(start, 2, MalformedKind::BadHexEscape);
            }
            b'u' => {
                self.parser.bump(1);
                return self.unescape_unicode(start, 4, MalformedKind::BadUnicodeEscape);
            }
            b'\n' => {
                // Escaped line break: the break and any leading spaces on
                // the continuation line are consumed outright.
                self.parser.bump(1);

                while matches!(self.parser.peek(), b' ') && !self.parser.is_eof() {
                    self.parser.bump(1);
                }

                return Ok(());
            }
            _ => {
                self.parser.bump(1);
                return Err(self.err(start, MalformedKind::BadEscape));
            }
        };

        self.scratch.push(b);
        self.parser.bump(1);
        Ok(())
    }

    /// Unescape a unicode character into the scratch buffer.
    fn unescape_unicode(
        &mut self,
        start: usize,
        count: usize,
        reason: MalformedKind,
    ) -> Result<(), Error> {
        let mut c: u32 = 0;

        for _ in 0..count {
            c <<= 4;

            c |= match self.parser.peek() {
                b @ b'0'..=b'9' => u32::from(b - b'0'),
                b @ b'a'..=b'f' => u32::from(b - b'a') + 0xa,
                b @ b'A'..=b'F' => u32::from(b - b'A') + 0xa,
                _ => {
                    self.parser.bump(1);
                    return Err(self.err(start, reason));
                }
            };

            self.parser.bump(1);
        }

        let Some(c) = char::from_u32(c) else {
            return Err(self.err(start, reason));
        };

        self.scratch.extend(c.encode_utf8(&mut [0; 4]).as_bytes());
        Ok(())
    }
}
