//! Directory - bounded element path
//!
//! The directory is the synthetic, slash separated path of the elements that
//! enclose the current position (`/html/body/a`), or just the current tag
//! name in HTML mode. It never grows beyond its capacity: bytes that do not
//! fit are dropped, which may cut a name in the middle.

/// Default capacity in bytes
pub const DEFAULT_DIRECTORY_CAPACITY: usize = 255;

/// Bounded path buffer shared by all nesting levels of one parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    buf: Vec<u8>,
    capacity: usize,
}

impl Directory {
    /// Create an empty directory holding at most `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Directory {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Current length in bytes
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// Maximum length in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The path bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a child element name, adding a `/` separator unless the path
    /// already ends with one
    pub fn push_segment(&mut self, name: &[u8]) {
        if self.buf.last() != Some(&b'/') {
            self.extend_bounded(b"/");
        }
        self.extend_bounded(name);
    }

    /// Replace the whole path with `name`
    pub fn replace(&mut self, name: &[u8]) {
        self.buf.clear();
        self.extend_bounded(name);
    }

    /// Restore an earlier length
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Append as much of `bytes` as fits; returns false if anything was cut
    pub fn extend_bounded(&mut self, bytes: &[u8]) -> bool {
        let room = self.capacity.saturating_sub(self.buf.len());
        let take = bytes.len().min(room);
        self.buf.extend_from_slice(&bytes[..take]);
        take == bytes.len()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_DIRECTORY_CAPACITY)
    }
}
