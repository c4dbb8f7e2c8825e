use std::ops::Range;

use crate::error::Location;

#[derive(Clone)]
pub(crate) struct Parser<'a> {
    input: &'a [u8],
    n: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self { input, n: 0 }
    }

    /// Bump `n` bytes of input.
    #[inline]
    pub(crate) fn bump(&mut self, n: usize) {
        self.n = self.n.wrapping_add(n).min(self.input.len());
    }

    /// Get a string from the given starting position to current cursor
    /// location.
    #[inline]
    pub(crate) fn string(&self, start: usize) -> &'a [u8] {
        self.input.get(start..self.n).unwrap_or_default()
    }

    /// Test if eof.
    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.n == self.input.len()
    }

    /// Advance the cursor to the next occurrence of the given character, or
    /// to the end of input.
    pub(crate) fn find(&mut self, a: u8) {
        let input = self.input.get(self.n..).unwrap_or_default();

        if let Some(n) = memchr::memchr(a, input) {
            self.bump(n);
        } else {
            self.n = self.input.len();
        }
    }

    /// Peek the next value.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        let Some(&b) = self.input.get(self.n) else {
            return 0;
        };

        b
    }

    /// Peek the next next value.
    #[inline]
    pub(crate) fn peek2(&self) -> (u8, u8) {
        let b0 = self.peek();

        let Some(&b) = self.input.get(self.n.wrapping_add(1)) else {
            return (b0, 0);
        };

        (b0, b)
    }

    /// Get the given position.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.n
    }

    /// Column of the given offset, counted from the start of its line.
    pub(crate) fn column_of(&self, offset: usize) -> usize {
        let before = self.input.get(..offset).unwrap_or_default();
        offset - memchr::memrchr(b'\n', before).map_or(0, |n| n + 1)
    }

    /// Resolve a byte span into a one-based line and column.
    pub(crate) fn location_of(&self, span: Range<usize>) -> Location {
        let before = self.input.get(..span.start).unwrap_or_default();
        let line = memchr::memchr_iter(b'\n', before).count() + 1;
        let column = self.column_of(span.start) + 1;
        Location { span, line, column }
    }
}
