//! The buffered output sink driven by the encoder.

use core::fmt;

/// A buffered sink with indentation bookkeeping.
///
/// The indentation level starts at -1 so that the root frame, which always
/// increments on open, writes at column zero. Indentation is emitted at most
/// once per line regardless of how many write calls occur before the next
/// line break.
pub(crate) struct Writer {
    out: String,
    level: i32,
    indent_width: usize,
    indented: bool,
    scratch: String,
}

impl Writer {
    pub(crate) fn new(indent_width: usize) -> Self {
        Self {
            out: String::new(),
            level: -1,
            indent_width,
            indented: false,
            scratch: String::new(),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, c: char) {
        self.out.push(c);
    }

    #[inline]
    pub(crate) fn push_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Emit a line break and arm the pending indent.
    #[inline]
    pub(crate) fn writeln(&mut self) {
        self.out.push('\n');
        self.indented = false;
    }

    #[inline]
    pub(crate) fn level_increase(&mut self) {
        self.level += 1;
    }

    #[inline]
    pub(crate) fn level_decrease(&mut self) {
        self.level -= 1;
    }

    /// Emit the current indent once for the current line.
    pub(crate) fn write_indent_smart(&mut self) {
        if self.indented {
            return;
        }

        let count = usize::try_from(self.level).unwrap_or_default() * self.indent_width;

        for _ in 0..count {
            self.out.push(' ');
        }

        self.indented = true;
    }

    /// Smart-indent, then write.
    pub(crate) fn write_indented_smart(&mut self, s: &str) {
        self.write_indent_smart();
        self.push_str(s);
    }

    /// Write `text` as a double-quoted scalar, quotes included.
    ///
    /// Escape output mirrors the set recognized on decode, with remaining
    /// control characters hex-escaped.
    pub(crate) fn write_double_quoted(&mut self, text: &str) {
        let mut buf = std::mem::take(&mut self.scratch);
        buf.clear();
        buf.push('"');

        for c in text.chars() {
            match c {
                '\\' => buf.push_str("\\\\"),
                '"' => buf.push_str("\\\""),
                '\n' => buf.push_str("\\n"),
                '\t' => buf.push_str("\\t"),
                '\r' => buf.push_str("\\r"),
                '\u{0000}' => buf.push_str("\\0"),
                '\u{0008}' => buf.push_str("\\b"),
                '\u{000c}' => buf.push_str("\\f"),
                c if c.is_control() => {
                    if (c as u32) < 0x100 {
                        let _ = fmt::Write::write_fmt(&mut buf, format_args!("\\x{:02x}", c as u32));
                    } else {
                        let _ = fmt::Write::write_fmt(&mut buf, format_args!("\\u{:04x}", c as u32));
                    }
                }
                c => buf.push(c),
            }
        }

        buf.push('"');
        self.out.push_str(&buf);
        self.scratch = buf;
    }

    /// Write `text` as a single-quoted scalar with `'` doubled.
    pub(crate) fn write_single_quoted(&mut self, text: &str) {
        let mut buf = std::mem::take(&mut self.scratch);
        buf.clear();
        buf.push('\'');

        for c in text.chars() {
            match c {
                '\'' => buf.push_str("''"),
                c => buf.push(c),
            }
        }

        buf.push('\'');
        self.out.push_str(&buf);
        self.scratch = buf;
    }

    /// Write a value through its display form, such as a number.
    pub(crate) fn push_display(&mut self, value: impl fmt::Display) {
        use core::fmt::Write;

        let _ = write!(self, "{value}");
    }

    /// Extract the buffered output, consuming the writer.
    pub(crate) fn into_string(self) -> String {
        self.out
    }
}

impl fmt::Write for Writer {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.push_str(s);
        Ok(())
    }
}
