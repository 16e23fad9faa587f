//! SIMD-accelerated markup scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)
//!
//! The scanner never reads past its end bound. The end bound is the first NUL
//! byte of the input, or its length if there is none, so a buffer handed over
//! with a trailing terminator behaves exactly like one without.

use memchr::memchr;

use super::span::Span;

/// Bounds-checked cursor over the input buffer
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a [u8],
    end: usize,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        let end = memchr(0, input).unwrap_or(input.len());
        Scanner { input, end, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position, clamped to the end bound
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.end);
    }

    /// Offset of the end bound
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.end
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        let at = self.pos.checked_add(offset)?;
        if at < self.end {
            Some(self.input[at])
        } else {
            None
        }
    }

    /// Read the current byte and advance past it
    #[inline]
    pub fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Advance by n bytes, stopping at the end bound
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.end);
    }

    /// Skip whitespace characters (the C `isspace` set)
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !is_space(c) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Bytes from the current position up to the end bound
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..self.end]
    }

    /// Get the bytes covered by a span
    #[inline]
    pub fn slice(&self, span: Span) -> &'a [u8] {
        span.slice(self.input)
    }

    /// Check if the input continues with `needle` at the current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.remaining().starts_with(needle)
    }

    /// Like [`Scanner::starts_with`], ignoring ASCII case
    #[inline]
    pub fn starts_with_ignore_case(&self, needle: &[u8]) -> bool {
        self.remaining()
            .get(..needle.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(needle))
    }

    /// Find next occurrence of a specific byte
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, self.remaining()).map(|i| self.pos + i)
    }

    /// Find the next occurrence of a multi-byte marker such as `-->` or `?>`
    ///
    /// Returns the absolute position of the first byte of the marker.
    pub fn find_marker(&self, marker: &[u8]) -> Option<usize> {
        let (&first, _) = marker.split_first()?;
        let haystack = self.remaining();
        let mut from = 0;
        while let Some(i) = memchr(first, &haystack[from..]) {
            let at = from + i;
            if haystack[at..].starts_with(marker) {
                return Some(self.pos + at);
            }
            from = at + 1;
        }
        None
    }
}

/// Whitespace as classified by C `isspace` in the "C" locale
#[inline]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// True if every byte of `bytes` is whitespace
#[inline]
pub fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|&c| is_space(c))
}
