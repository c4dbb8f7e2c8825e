//! Encoding elements or schema-described values into YAML text.

use crate::config::{Config, Layout, ListLayout, StringStyle};
use crate::element::{Element, StringKind};
use crate::error::{Error, ErrorKind};
use crate::schema::{Annotation, Descriptor, Entry, Kind, Source};
use crate::writer::Writer;

/// Per-composite encoder state.
///
/// Pushing a frame always increments the writer level and popping always
/// decrements it. The single exception is a block sequence opened as the
/// value of a block mapping entry: its items belong at the key's own column,
/// so the open decrements the level once more and flags the close to restore
/// it.
enum Frame {
    BlockMapOrClass { any: bool },
    BlockSequence { any: bool, increase_back_level: bool },
    FlowMapOrClass { any: bool },
    FlowSequence { any: bool },
    EmptySequence,
}

/// The position a value is being written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    /// The top level of the document.
    Root,
    /// After `key:` in a mapping, block or flow.
    MapValue,
    /// After `- ` or a flow item separator.
    SeqItem,
}

/// A single encode operation.
///
/// An encoder borrows a configuration, owns its writer for the duration of
/// the operation and is consumed by [`encode`] or [`encode_with`].
///
/// [`encode`]: Encoder::encode
/// [`encode_with`]: Encoder::encode_with
pub struct Encoder<'a> {
    config: &'a Config,
    writer: Writer,
    frames: Vec<Frame>,
}

impl<'a> Encoder<'a> {
    /// Construct an encoder against the given configuration.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            writer: Writer::new(config.indent_width),
            frames: Vec::new(),
        }
    }

    /// Encode a dynamic element tree.
    ///
    /// A trailing newline is appended when the root is a composite and
    /// omitted for a bare scalar or null.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlet::{Config, Encoder};
    ///
    /// let doc = yamlet::from_str("a: 1")?;
    /// let out = Encoder::new(&Config::default()).encode(&doc)?;
    /// assert_eq!(out, "a: 1\n");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Errors on values the codec refuses to represent, such as collection
    /// mapping keys.
    pub fn encode(mut self, element: &Element) -> Result<String, Error> {
        let composite = matches!(element, Element::Sequence(..) | Element::Mapping(..));
        self.element_value(element, Parent::Root)?;

        if composite {
            self.writer.writeln();
        }

        Ok(self.writer.into_string())
    }

    /// Encode a schema-described value by walking the descriptor and asking
    /// the source for each entry.
    ///
    /// # Errors
    ///
    /// Errors when the source hands back an entry incompatible with the
    /// descriptor.
    pub fn encode_with(
        mut self,
        descriptor: &dyn Descriptor,
        source: &dyn Source,
    ) -> Result<String, Error> {
        if descriptor.kind().is_primitive() {
            self.typed_value(descriptor, source.entry(0), Parent::Root)?;
        } else {
            self.typed_composite(descriptor, source, Parent::Root)?;
            self.writer.writeln();
        }

        Ok(self.writer.into_string())
    }

    fn open_frame(&mut self, frame: Frame) {
        self.writer.level_increase();

        if let Frame::BlockSequence {
            increase_back_level: true,
            ..
        } = frame
        {
            self.writer.level_decrease();
        }

        self.frames.push(frame);
    }

    fn close_frame(&mut self) -> Result<(), Error> {
        let Some(frame) = self.frames.pop() else {
            return Err(Error::msg(ErrorKind::InvariantViolation(
                "frame stack underflow",
            )));
        };

        match frame {
            Frame::BlockMapOrClass { any } => {
                // An empty mapping has no block form.
                if !any {
                    self.writer.push_str("{}");
                }
            }
            Frame::BlockSequence {
                increase_back_level,
                ..
            } => {
                if increase_back_level {
                    self.writer.level_increase();
                }
            }
            Frame::FlowMapOrClass { any } => {
                self.writer.push_str(if any { " }" } else { "}" });
            }
            Frame::FlowSequence { any } => {
                self.writer.push_str(if any { " ]" } else { "]" });
            }
            Frame::EmptySequence => {
                self.writer.push_str("[]");
            }
        }

        self.writer.level_decrease();
        Ok(())
    }

    /// Mark the current frame as holding at least one entry, returning
    /// whether it already did.
    fn frame_any(&mut self) -> bool {
        match self.frames.last_mut() {
            Some(
                Frame::BlockMapOrClass { any }
                | Frame::BlockSequence { any, .. }
                | Frame::FlowMapOrClass { any }
                | Frame::FlowSequence { any },
            ) => std::mem::replace(any, true),
            _ => false,
        }
    }

    fn in_flow(&self) -> bool {
        matches!(
            self.frames.last(),
            Some(Frame::FlowMapOrClass { .. } | Frame::FlowSequence { .. })
        )
    }

    /// The space between `key:` and an inline value. Block composites write
    /// their own leading line break instead.
    fn leading_space(&mut self, parent: Parent) {
        if parent == Parent::MapValue {
            self.writer.push(' ');
        }
    }

    /// Position the writer for a block mapping key: the line break before
    /// the entry, any comment lines, and the indent.
    fn block_map_key_head(&mut self, parent: Parent, annotations: &[Annotation]) {
        let first = !self.frame_any();

        if !first || parent == Parent::MapValue {
            self.writer.writeln();
        }

        for annotation in annotations {
            let Annotation::Comment(text) = annotation;

            for line in text.lines() {
                self.writer.write_indent_smart();
                self.writer.push_str("# ");
                self.writer.push_str(line);
                self.writer.writeln();
            }
        }

        self.writer.write_indent_smart();
    }

    fn block_sequence_frame(
        &mut self,
        parent: Parent,
        count: usize,
        mut item: impl FnMut(&mut Self, usize) -> Result<(), Error>,
    ) -> Result<(), Error> {
        self.open_frame(Frame::BlockSequence {
            any: false,
            increase_back_level: parent == Parent::MapValue,
        });

        for index in 0..count {
            let first = !self.frame_any();

            if !first || parent == Parent::MapValue {
                self.writer.writeln();
            }

            self.writer.write_indented_smart("- ");
            item(self, index)?;
        }

        self.close_frame()
    }

    fn flow_sequence_frame(
        &mut self,
        count: usize,
        mut item: impl FnMut(&mut Self, usize) -> Result<(), Error>,
    ) -> Result<(), Error> {
        self.open_frame(Frame::FlowSequence { any: false });
        self.writer.push('[');

        for index in 0..count {
            let first = !self.frame_any();
            self.writer.push_str(if first { " " } else { ", " });
            item(self, index)?;
        }

        self.close_frame()
    }

    fn empty_sequence(&mut self) -> Result<(), Error> {
        self.open_frame(Frame::EmptySequence);
        self.close_frame()
    }

    fn empty_mapping(&mut self) -> Result<(), Error> {
        self.open_frame(Frame::BlockMapOrClass { any: false });
        self.close_frame()
    }

    // Dynamic surface.

    fn element_value(&mut self, element: &Element, parent: Parent) -> Result<(), Error> {
        match element {
            Element::Null => {
                self.null_value(parent);
                Ok(())
            }
            Element::Scalar(text, style) => {
                self.leading_space(parent);
                self.dynamic_string(text, *style);
                Ok(())
            }
            Element::Sequence(items) => {
                if items.is_empty() {
                    self.leading_space(parent);
                    return self.empty_sequence();
                }

                let flow = self.in_flow()
                    || match self.config.list_layout {
                        ListLayout::Block => false,
                        ListLayout::Flow => true,
                        ListLayout::Auto => items
                            .iter()
                            .all(|item| matches!(item, Element::Null | Element::Scalar(..))),
                    };

                if flow {
                    self.leading_space(parent);
                    self.flow_sequence_frame(items.len(), |this, index| {
                        this.element_value(&items[index], Parent::SeqItem)
                    })
                } else {
                    self.block_sequence_frame(parent, items.len(), |this, index| {
                        this.element_value(&items[index], Parent::SeqItem)
                    })
                }
            }
            Element::Mapping(entries) => {
                if entries.is_empty() {
                    self.leading_space(parent);
                    return self.empty_mapping();
                }

                let flow = self.in_flow() || matches!(self.config.map_layout, Layout::Flow);

                if flow {
                    self.leading_space(parent);
                    self.open_frame(Frame::FlowMapOrClass { any: false });
                    self.writer.push('{');

                    for (key, value) in entries {
                        let first = !self.frame_any();
                        self.writer.push_str(if first { " " } else { ", " });
                        self.dynamic_key(key)?;
                        self.writer.push(':');
                        self.element_value(value, Parent::MapValue)?;
                    }

                    self.close_frame()
                } else {
                    self.open_frame(Frame::BlockMapOrClass { any: false });

                    for (key, value) in entries {
                        self.block_map_key_head(parent, &[]);
                        self.dynamic_key(key)?;
                        self.writer.push(':');
                        self.element_value(value, Parent::MapValue)?;
                    }

                    self.close_frame()
                }
            }
        }
    }

    fn dynamic_key(&mut self, key: &Element) -> Result<(), Error> {
        match key {
            Element::Scalar(text, style) => {
                self.dynamic_string(text, *style);
                Ok(())
            }
            Element::Null => {
                self.writer.push_str(&self.config.null_literal);
                Ok(())
            }
            _ => Err(Error::msg(ErrorKind::UnsupportedFeature(
                "collection mapping keys",
            ))),
        }
    }

    /// Write a dynamic scalar. With the automatic style, the retained
    /// quoting kind is honored so a tree re-encodes to what it was decoded
    /// from: bare scalars stay plain unless their content would lex
    /// differently, quoted scalars stay quoted.
    fn dynamic_string(&mut self, text: &str, style: StringKind) {
        match self.config.string_style {
            StringStyle::DoubleQuoted => self.writer.write_double_quoted(text),
            StringStyle::SingleQuoted => self.writer.write_single_quoted(text),
            StringStyle::Auto => match style {
                StringKind::DoubleQuoted => self.writer.write_double_quoted(text),
                StringKind::SingleQuoted => self.writer.write_single_quoted(text),
                StringKind::Bare => {
                    // A bare scalar whose text is a null literal would not
                    // read back as a string.
                    if needs_quoting(text) || matches!(text, "~" | "null" | "Null" | "NULL") {
                        self.writer.write_double_quoted(text);
                    } else {
                        self.writer.push_str(text);
                    }
                }
            },
        }
    }

    /// Write a schema-sourced string. With the automatic style the value is
    /// plain unless its content is reserved, reads as another scalar type,
    /// or would lex differently.
    fn typed_string(&mut self, text: &str) {
        match self.config.string_style {
            StringStyle::DoubleQuoted => self.writer.write_double_quoted(text),
            StringStyle::SingleQuoted => self.writer.write_single_quoted(text),
            StringStyle::Auto => {
                if needs_quoting(text) || reserved_scalar(text) {
                    self.writer.write_double_quoted(text);
                } else {
                    self.writer.push_str(text);
                }
            }
        }
    }

    fn null_value(&mut self, parent: Parent) {
        if self.config.null_literal.is_empty() {
            return;
        }

        self.leading_space(parent);
        self.writer.push_str(&self.config.null_literal);
    }

    // Schema-directed surface.

    fn typed_value(
        &mut self,
        descriptor: &dyn Descriptor,
        entry: Entry<'_>,
        parent: Parent,
    ) -> Result<(), Error> {
        match entry {
            Entry::Null => {
                self.null_value(parent);
                Ok(())
            }
            Entry::Bool(value) => {
                self.leading_space(parent);
                let literal = if value {
                    &self.config.true_literal
                } else {
                    &self.config.false_literal
                };
                self.writer.push_str(literal);
                Ok(())
            }
            Entry::Int(value) => {
                self.leading_space(parent);
                self.writer.push_display(value);
                Ok(())
            }
            Entry::Float(value) => {
                self.leading_space(parent);
                self.writer.push_display(value);
                Ok(())
            }
            Entry::Str(text) => {
                self.leading_space(parent);
                self.typed_string(&text);
                Ok(())
            }
            Entry::Char(c) => {
                self.leading_space(parent);
                self.typed_string(c.encode_utf8(&mut [0; 4]));
                Ok(())
            }
            Entry::Nested(source) => self.typed_composite(descriptor, source, parent),
        }
    }

    fn typed_composite(
        &mut self,
        descriptor: &dyn Descriptor,
        source: &dyn Source,
        parent: Parent,
    ) -> Result<(), Error> {
        match descriptor.kind() {
            Kind::Class => {
                let indices: Vec<usize> = (0..descriptor.element_count())
                    .filter(|&index| {
                        self.config.encode_default_values || !source.is_default(index)
                    })
                    .collect();

                if indices.is_empty() {
                    self.leading_space(parent);
                    return self.empty_mapping();
                }

                let flow = self.in_flow() || matches!(self.config.class_layout, Layout::Flow);

                if flow {
                    self.leading_space(parent);
                    self.open_frame(Frame::FlowMapOrClass { any: false });
                    self.writer.push('{');

                    for index in indices {
                        let first = !self.frame_any();
                        self.writer.push_str(if first { " " } else { ", " });
                        self.typed_string(descriptor.element_name(index));
                        self.writer.push(':');
                        self.typed_value(
                            descriptor.element_descriptor(index),
                            source.entry(index),
                            Parent::MapValue,
                        )?;
                    }

                    self.close_frame()
                } else {
                    self.open_frame(Frame::BlockMapOrClass { any: false });

                    for index in indices {
                        self.block_map_key_head(parent, descriptor.element_annotations(index));
                        self.typed_string(descriptor.element_name(index));
                        self.writer.push(':');
                        self.typed_value(
                            descriptor.element_descriptor(index),
                            source.entry(index),
                            Parent::MapValue,
                        )?;
                    }

                    self.close_frame()
                }
            }
            Kind::Map => {
                let count = source.entry_count();

                if count == 0 {
                    self.leading_space(parent);
                    return self.empty_mapping();
                }

                let flow = self.in_flow() || matches!(self.config.map_layout, Layout::Flow);

                if flow {
                    self.leading_space(parent);
                    self.open_frame(Frame::FlowMapOrClass { any: false });
                    self.writer.push('{');

                    for index in 0..count {
                        let first = !self.frame_any();
                        self.writer.push_str(if first { " " } else { ", " });
                        self.typed_string(source.entry_key(index));
                        self.writer.push(':');
                        self.typed_value(
                            descriptor.element_descriptor(1),
                            source.entry(index),
                            Parent::MapValue,
                        )?;
                    }

                    self.close_frame()
                } else {
                    self.open_frame(Frame::BlockMapOrClass { any: false });

                    for index in 0..count {
                        self.block_map_key_head(parent, &[]);
                        self.typed_string(source.entry_key(index));
                        self.writer.push(':');
                        self.typed_value(
                            descriptor.element_descriptor(1),
                            source.entry(index),
                            Parent::MapValue,
                        )?;
                    }

                    self.close_frame()
                }
            }
            Kind::List => {
                let count = source.entry_count();

                if count == 0 {
                    self.leading_space(parent);
                    return self.empty_sequence();
                }

                let flow = self.in_flow()
                    || match self.config.list_layout {
                        ListLayout::Block => false,
                        ListLayout::Flow => true,
                        ListLayout::Auto => descriptor.element_descriptor(0).kind().is_primitive(),
                    };

                if flow {
                    self.leading_space(parent);
                    self.flow_sequence_frame(count, |this, index| {
                        this.typed_value(
                            descriptor.element_descriptor(0),
                            source.entry(index),
                            Parent::SeqItem,
                        )
                    })
                } else {
                    self.block_sequence_frame(parent, count, |this, index| {
                        this.typed_value(
                            descriptor.element_descriptor(0),
                            source.entry(index),
                            Parent::SeqItem,
                        )
                    })
                }
            }
            Kind::Primitive(..) | Kind::Enum => Err(Error::msg(ErrorKind::InvariantViolation(
                "nested value for a primitive descriptor",
            ))),
        }
    }
}

/// Whether a scalar's content would lex differently when written plain.
fn needs_quoting(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }

    if text.starts_with([' ', '\t']) || text.ends_with([' ', '\t']) {
        return true;
    }

    if text
        .chars()
        .any(|c| matches!(c, ':' | '#' | ',' | '[' | ']' | '{' | '}' | '"' | '\'' | '\n' | '\r' | '\t') || c.is_control())
    {
        return true;
    }

    if text.starts_with(['?', '*', '&', '!', '|', '>', '%', '@', '`']) {
        return true;
    }

    // A leading dash only lexes as a sequence item when followed by space.
    text == "-" || text.starts_with("- ")
}

/// Whether a plain rendition would read back as another scalar type.
fn reserved_scalar(text: &str) -> bool {
    if matches!(
        text,
        "true" | "false" | "yes" | "no" | "on" | "off" | "null" | "Null" | "NULL" | "~"
            | "True" | "False" | "Yes" | "No" | "On" | "Off"
    ) {
        return true;
    }

    lexical_core::parse::<i64>(text.as_bytes()).is_ok()
        || lexical_core::parse::<f64>(text.as_bytes()).is_ok()
}
