//! Byte cursor for line-oriented scanning.
//!
//! All markers this crate recognizes are ASCII, so scanning works on bytes
//! and every split point falls on a UTF-8 character boundary.

use crate::Range;

/// A cursor over an input buffer.
///
/// Cursors are `Copy`: scanners probe ahead on a copy and only commit by
/// assigning it back, so a failed probe never moves the real position.
///
/// # Example
/// ```
/// use deflist::cursor::Cursor;
///
/// let mut cursor = Cursor::new(b"  ; Term");
/// assert_eq!(cursor.skip_spaces(), 2);
/// assert!(cursor.eat(b';'));
/// assert_eq!(cursor.peek(), Some(b' '));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Create a cursor starting at an offset.
    #[inline]
    pub fn new_at(input: &'a [u8], offset: usize) -> Self {
        debug_assert!(offset <= input.len());
        Self { input, pos: offset }
    }

    /// Current offset from the start of input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos = (self.pos + n).min(self.input.len());
    }

    #[inline]
    pub fn bump(&mut self) {
        self.advance(1);
    }

    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    /// Consume a specific byte if present.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.at(b) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a byte sequence if present.
    #[inline]
    pub fn eat_bytes(&mut self, bytes: &[u8]) -> bool {
        if self.remaining_slice().starts_with(bytes) {
            self.advance(bytes.len());
            true
        } else {
            false
        }
    }

    /// Skip while predicate is true, returning the number of bytes skipped.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    #[inline]
    pub fn skip_spaces(&mut self) -> usize {
        self.skip_while(|b| b == b' ')
    }

    #[inline]
    pub fn skip_tabs(&mut self) -> usize {
        self.skip_while(|b| b == b'\t')
    }

    #[inline]
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Find the next occurrence of a byte, relative to the cursor.
    #[inline]
    pub fn find(&self, needle: u8) -> Option<usize> {
        memchr::memchr(needle, self.remaining_slice())
    }

    #[inline]
    pub fn find_newline(&self) -> Option<usize> {
        self.find(b'\n')
    }

    /// Consume one line, returning its range without the newline.
    #[inline]
    pub fn consume_line(&mut self) -> Range {
        let start = self.pos;
        match self.find_newline() {
            Some(len) => {
                self.pos = start + len + 1;
                Range::from_usize(start, start + len)
            }
            None => {
                self.pos = self.input.len();
                Range::from_usize(start, self.pos)
            }
        }
    }
}
