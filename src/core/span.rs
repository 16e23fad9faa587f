//! Span - offset and length into original input
//!
//! Zero-copy reference to a portion of the input document.
//! Used for tokens, attribute values, text content and unparsed regions.

/// A span referencing a portion of the input document.
///
/// A zero length span is a valid "present but empty" token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    /// Byte offset into the original input
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
}

impl Span {
    /// Create a new span
    #[inline]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Create a span covering `start..end`
    #[inline]
    pub const fn between(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            len: end.saturating_sub(start),
        }
    }

    /// Create an empty span at `offset`
    #[inline]
    pub const fn empty(offset: usize) -> Self {
        Self { offset, len: 0 }
    }

    /// Check if this span is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the end offset (exclusive)
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.len)
    }

    /// Extract the byte slice from input
    #[inline]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        input.get(self.offset..self.end()).unwrap_or(&[])
    }

    /// Extract as UTF-8 string from input
    #[inline]
    pub fn as_str<'a>(&self, input: &'a [u8]) -> Option<&'a str> {
        std::str::from_utf8(self.slice(input)).ok()
    }
}
