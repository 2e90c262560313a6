//! Compact byte ranges into the source document.
//!
//! Events never copy text; they point back into the input with `u32`
//! offsets, so a document may be at most 4GB.

/// Compact range into an input buffer.
///
/// # Example
/// ```
/// use deflist::Range;
///
/// let input = b"  ; Term";
/// let range = Range::new(4, 8);
/// assert_eq!(range.slice(input), b"Term");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

const _: () = assert!(std::mem::size_of::<Range>() == 8);

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a range from usize offsets.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    /// Empty range at a position.
    #[inline]
    pub const fn empty_at(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        &input[self.start as usize..self.end as usize]
    }

    /// The range as text, or `None` if it does not hold valid UTF-8.
    #[inline]
    pub fn as_str<'a>(&self, input: &'a [u8]) -> Option<&'a str> {
        std::str::from_utf8(self.slice(input)).ok()
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn start_usize(&self) -> usize {
        self.start as usize
    }

    #[inline]
    pub const fn end_usize(&self) -> usize {
        self.end as usize
    }

    /// Drop leading spaces and tabs.
    pub fn trim_start(&self, input: &[u8]) -> Self {
        let mut start = self.start_usize();
        let end = self.end_usize();
        while start < end && is_blank(input[start]) {
            start += 1;
        }
        Self::from_usize(start, end)
    }

    /// Drop trailing spaces, tabs and carriage returns.
    pub fn trim_end(&self, input: &[u8]) -> Self {
        let start = self.start_usize();
        let mut end = self.end_usize();
        while end > start && (is_blank(input[end - 1]) || input[end - 1] == b'\r') {
            end -= 1;
        }
        Self::from_usize(start, end)
    }

    pub fn trim(&self, input: &[u8]) -> Self {
        self.trim_start(input).trim_end(input)
    }
}

#[inline]
fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

impl From<std::ops::Range<usize>> for Range {
    #[inline]
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::from_usize(r.start, r.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    #[inline]
    fn from(r: Range) -> Self {
        r.start_usize()..r.end_usize()
    }
}
