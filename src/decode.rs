//! Decoding YAML text into elements or schema-directed sink calls.

use crate::element::Element;
use crate::error::{Error, ErrorKind};
use crate::schema::{Descriptor, Kind, PrimitiveKind, Sink};
use crate::token::{Token, TokenStream};

/// A single decode operation over a complete input buffer.
///
/// A decoder is constructed per input and consumed by either [`decode`],
/// producing a dynamic [`Element`] tree, or [`decode_with`], which validates
/// the input against a [`Descriptor`] and forwards values to a [`Sink`].
///
/// [`decode`]: Decoder::decode
/// [`decode_with`]: Decoder::decode_with
pub struct Decoder<'a> {
    tokens: TokenStream<'a>,
}

impl<'a> Decoder<'a> {
    /// Construct a decoder over the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: TokenStream::new(input),
        }
    }

    /// Decode the input into a dynamic element tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlet::Decoder;
    ///
    /// let doc = Decoder::new("part_no: A4786").decode()?;
    /// assert_eq!(doc.get("part_no").and_then(|v| v.as_str()), Some("A4786"));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Errors if the input is not well-formed YAML within the supported
    /// subset.
    pub fn decode(mut self) -> Result<Element, Error> {
        let token = self.skip_separators()?;

        if matches!(token, Token::Eof) {
            return Ok(Element::Null);
        }

        let root = self.block_value(token)?;
        let token = self.skip_separators()?;

        if !matches!(token, Token::Eof) {
            return Err(Error::new(self.tokens.location(), ErrorKind::ExpectedEof));
        }

        Ok(root)
    }

    /// Decode the input against a schema descriptor, forwarding values to
    /// the sink.
    ///
    /// Structure is validated against the descriptor's kinds: every class
    /// key must name a descriptor element, and scalars are coerced to the
    /// primitive the descriptor requests.
    ///
    /// # Errors
    ///
    /// Errors on malformed input, on keys unknown to a class descriptor, on
    /// structure incompatible with the descriptor, and on scalars which do
    /// not coerce to the requested primitive.
    pub fn decode_with(
        self,
        descriptor: &dyn Descriptor,
        sink: &mut dyn Sink,
    ) -> Result<(), Error> {
        let root = self.decode()?;
        let mut path = Vec::new();
        apply(&root, descriptor, sink, &mut path)
    }

    fn unexpected(&self, expected: &'static str, found: &Token<'_>) -> Error {
        Error::new(
            self.tokens.location(),
            ErrorKind::UnexpectedToken {
                expected,
                found: found.describe(),
            },
        )
    }

    /// Produce the next token which is not a line separator.
    fn skip_separators(&mut self) -> Result<Token<'a>, Error> {
        loop {
            let token = self.tokens.next()?;

            if !matches!(token, Token::LineSeparator) {
                return Ok(token);
            }
        }
    }

    /// Decode a value beginning at the given token in block context.
    fn block_value(&mut self, token: Token<'a>) -> Result<Element, Error> {
        match token {
            Token::SequenceDash => {
                let column = self.tokens.token_column();
                self.block_sequence(column)
            }
            Token::Scalar(..) | Token::NullScalar => {
                let column = self.tokens.token_column();
                let key = into_element(token);
                let next = self.tokens.next()?;

                match next {
                    Token::Colon => self.block_mapping(key, column),
                    _ => {
                        self.tokens.push_back();
                        Ok(key)
                    }
                }
            }
            Token::FlowMapBegin => self.flow_mapping(),
            Token::FlowSequenceBegin => self.flow_sequence(),
            other => Err(self.unexpected("a value", &other)),
        }
    }

    /// Decode a block mapping whose first key has been read and whose `:`
    /// has been consumed. The mapping ends on a line indented less than the
    /// first key.
    fn block_mapping(&mut self, first_key: Element, indent: usize) -> Result<Element, Error> {
        let mut entries = Vec::new();
        let mut key = first_key;

        loop {
            let value = self.block_mapping_value(indent)?;
            entries.push((key, value));

            let token = self.skip_separators()?;

            if matches!(token, Token::Eof) {
                break;
            }

            if self.tokens.token_column() < indent {
                self.tokens.push_back();
                break;
            }

            match token {
                Token::Scalar(..) | Token::NullScalar if self.tokens.token_column() == indent => {
                    key = into_element(token);
                    let colon = self.tokens.next()?;

                    if !matches!(colon, Token::Colon) {
                        return Err(self.unexpected("`:`", &colon));
                    }
                }
                other => {
                    return Err(self.unexpected("a mapping key", &other));
                }
            }
        }

        Ok(Element::Mapping(entries))
    }

    /// Decode the value side of a block mapping entry. An empty value side
    /// decodes to null; a nested block sequence may sit at the key's own
    /// column or deeper.
    fn block_mapping_value(&mut self, key_indent: usize) -> Result<Element, Error> {
        let token = self.tokens.next()?;

        match token {
            Token::LineSeparator => {
                let next = self.skip_separators()?;

                if matches!(next, Token::Eof) {
                    return Ok(Element::Null);
                }

                let column = self.tokens.token_column();

                match next {
                    Token::SequenceDash if column >= key_indent => self.block_sequence(column),
                    _ if column > key_indent => self.block_value(next),
                    _ => {
                        self.tokens.push_back();
                        Ok(Element::Null)
                    }
                }
            }
            Token::Eof => Ok(Element::Null),
            Token::NullScalar => Ok(Element::Null),
            Token::SequenceDash => {
                let column = self.tokens.token_column();
                self.block_sequence(column)
            }
            Token::Scalar(text, style) => {
                let next = self.tokens.next()?;

                match next {
                    Token::Colon => Err(self.unexpected("a line break", &Token::Colon)),
                    _ => {
                        self.tokens.push_back();
                        Ok(Element::Scalar(text.into_owned(), style))
                    }
                }
            }
            Token::FlowMapBegin => self.flow_mapping(),
            Token::FlowSequenceBegin => self.flow_sequence(),
            other => Err(self.unexpected("a value", &other)),
        }
    }

    /// Decode a block sequence whose first `-` has been consumed at the
    /// given column. The sequence ends when a line is indented differently
    /// or does not begin with `-`.
    fn block_sequence(&mut self, indent: usize) -> Result<Element, Error> {
        let mut items = Vec::new();

        loop {
            items.push(self.block_sequence_item(indent)?);

            let token = self.skip_separators()?;

            if matches!(token, Token::Eof) {
                break;
            }

            if self.tokens.token_column() != indent || !matches!(token, Token::SequenceDash) {
                self.tokens.push_back();
                break;
            }
        }

        Ok(Element::Sequence(items))
    }

    /// Decode one block sequence item, after its `-`.
    fn block_sequence_item(&mut self, dash_indent: usize) -> Result<Element, Error> {
        let token = self.tokens.next()?;

        match token {
            Token::LineSeparator => {
                let next = self.skip_separators()?;

                if matches!(next, Token::Eof) {
                    return Ok(Element::Null);
                }

                if self.tokens.token_column() > dash_indent {
                    self.block_value(next)
                } else {
                    self.tokens.push_back();
                    Ok(Element::Null)
                }
            }
            Token::Eof => Ok(Element::Null),
            other => self.block_value(other),
        }
    }

    /// Decode a value in flow context, where line breaks are whitespace.
    fn flow_value(&mut self, token: Token<'a>) -> Result<Element, Error> {
        match token {
            Token::Scalar(..) | Token::NullScalar => Ok(into_element(token)),
            Token::FlowMapBegin => self.flow_mapping(),
            Token::FlowSequenceBegin => self.flow_sequence(),
            other => Err(self.unexpected("a value", &other)),
        }
    }

    /// Decode a flow sequence, after its `[`.
    fn flow_sequence(&mut self) -> Result<Element, Error> {
        let mut items = Vec::new();

        loop {
            let token = self.skip_separators()?;

            if matches!(token, Token::FlowSequenceEnd) {
                break;
            }

            items.push(self.flow_value(token)?);

            let separator = self.skip_separators()?;

            match separator {
                Token::Comma => {}
                Token::FlowSequenceEnd => break,
                other => return Err(self.unexpected("`,` or `]`", &other)),
            }
        }

        Ok(Element::Sequence(items))
    }

    /// Decode a flow mapping, after its `{`.
    fn flow_mapping(&mut self) -> Result<Element, Error> {
        let mut entries = Vec::new();

        loop {
            let token = self.skip_separators()?;

            let key = match token {
                Token::FlowMapEnd => break,
                Token::Scalar(..) | Token::NullScalar => into_element(token),
                other => return Err(self.unexpected("a key or `}`", &other)),
            };

            let colon = self.skip_separators()?;

            if !matches!(colon, Token::Colon) {
                return Err(self.unexpected("`:`", &colon));
            }

            let token = self.skip_separators()?;

            let value = match token {
                Token::Comma | Token::FlowMapEnd => {
                    self.tokens.push_back();
                    Element::Null
                }
                other => self.flow_value(other)?,
            };

            entries.push((key, value));

            let separator = self.skip_separators()?;

            match separator {
                Token::Comma => {}
                Token::FlowMapEnd => break,
                other => return Err(self.unexpected("`,` or `}`", &other)),
            }
        }

        Ok(Element::Mapping(entries))
    }
}

fn into_element(token: Token<'_>) -> Element {
    match token {
        Token::Scalar(text, style) => Element::Scalar(text.into_owned(), style),
        _ => Element::Null,
    }
}

fn describe(element: &Element) -> &'static str {
    match element {
        Element::Null => "null",
        Element::Scalar(..) => "scalar",
        Element::Sequence(..) => "sequence",
        Element::Mapping(..) => "mapping",
    }
}

fn path_string(path: &[String]) -> String {
    if path.is_empty() {
        ".".to_string()
    } else {
        path.join(".")
    }
}

fn mismatch(expected: &'static str, element: &Element, path: &[String]) -> Error {
    Error::msg(ErrorKind::SchemaMismatch {
        expected,
        found: describe(element),
        path: path_string(path),
    })
}

fn coercion(text: &str, target: &'static str) -> Error {
    Error::msg(ErrorKind::CoercionFailure {
        text: text.to_string(),
        target,
    })
}

/// Project a decoded element onto a descriptor, forwarding values to the
/// sink. Null passes through regardless of the described kind so nullable
/// fields of any shape decode cleanly.
fn apply(
    element: &Element,
    descriptor: &dyn Descriptor,
    sink: &mut dyn Sink,
    path: &mut Vec<String>,
) -> Result<(), Error> {
    if element.is_null() {
        return sink.put_null();
    }

    match descriptor.kind() {
        Kind::Class => {
            let Element::Mapping(entries) = element else {
                return Err(mismatch("class", element, path));
            };

            sink.begin_class()?;

            for (key, value) in entries {
                let Some(name) = key.as_str() else {
                    return Err(mismatch("string key", key, path));
                };

                let Some(index) =
                    (0..descriptor.element_count()).find(|&i| descriptor.element_name(i) == name)
                else {
                    return Err(Error::msg(ErrorKind::UnknownKey {
                        key: name.to_string(),
                        path: path_string(path),
                    }));
                };

                sink.field(index, name)?;
                path.push(name.to_string());
                apply(value, descriptor.element_descriptor(index), sink, path)?;
                path.pop();
            }

            sink.end_composite()
        }
        Kind::Map => {
            let Element::Mapping(entries) = element else {
                return Err(mismatch("map", element, path));
            };

            sink.begin_map()?;

            for (key, value) in entries {
                let Some(name) = key.as_str() else {
                    return Err(mismatch("string key", key, path));
                };

                sink.key(name)?;
                path.push(name.to_string());
                apply(value, descriptor.element_descriptor(1), sink, path)?;
                path.pop();
            }

            sink.end_composite()
        }
        Kind::List => {
            let Element::Sequence(items) = element else {
                return Err(mismatch("list", element, path));
            };

            sink.begin_list()?;

            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                apply(item, descriptor.element_descriptor(0), sink, path)?;
                path.pop();
            }

            sink.end_composite()
        }
        Kind::Primitive(primitive) => {
            let Element::Scalar(text, ..) = element else {
                return Err(mismatch(
                    Kind::Primitive(primitive).describe(),
                    element,
                    path,
                ));
            };

            match primitive {
                PrimitiveKind::Bool => match coerce_bool(text) {
                    Some(value) => sink.put_bool(value),
                    None => Err(coercion(text, "bool")),
                },
                PrimitiveKind::Int => match lexical_core::parse(text.as_bytes()) {
                    Ok(value) => sink.put_int(value),
                    Err(..) => Err(coercion(text, "int")),
                },
                PrimitiveKind::Float => match lexical_core::parse(text.as_bytes()) {
                    Ok(value) => sink.put_float(value),
                    Err(..) => Err(coercion(text, "float")),
                },
                PrimitiveKind::Str => sink.put_str(text),
                PrimitiveKind::Char => {
                    let mut chars = text.chars();

                    match (chars.next(), chars.next()) {
                        (Some(c), None) => sink.put_char(c),
                        _ => Err(coercion(text, "char")),
                    }
                }
            }
        }
        Kind::Enum => {
            let Element::Scalar(text, ..) = element else {
                return Err(mismatch("enum", element, path));
            };

            let known = (0..descriptor.element_count())
                .any(|i| descriptor.element_name(i) == text.as_str());

            if !known {
                return Err(coercion(text, "enum"));
            }

            sink.put_str(text)
        }
    }
}

/// Recognized boolean literals.
fn coerce_bool(text: &str) -> Option<bool> {
    for literal in ["true", "yes", "on"] {
        if text.eq_ignore_ascii_case(literal) {
            return Some(true);
        }
    }

    for literal in ["false", "no", "off"] {
        if text.eq_ignore_ascii_case(literal) {
            return Some(false);
        }
    }

    None
}
