//! Dialects
//!
//! XML and HTML differ in a handful of places only. The dialect is chosen once
//! per parse from the [`Hints`] and answers each of those questions:
//! - how an element name enters the directory
//! - what the directory of the top level is
//! - what `>` leads to (descent, script raw text, or nothing)
//! - what an end tag reports and whether it ascends

use bitflags::bitflags;

use super::directory::Directory;

bitflags! {
    /// Mode flags passed by the caller
    pub struct Hints: u32 {
        /// Drop CONTENT/COMMENT/PROCESSING/SPECIAL events that are only whitespace
        const REMOVE_EMPTY_CONTENT = 1 << 0;
        /// Tolerant HTML parsing
        const HTML = 1 << 1;
    }
}

impl Default for Hints {
    fn default() -> Self {
        Hints::empty()
    }
}

/// What follows the `>` of a start tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementBody {
    /// Parse children one nesting level deeper
    Descend,
    /// Scan `<script>` raw text
    ScriptText,
    /// Stay on the current level
    Flat,
}

/// Markup dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Hierarchical paths, strict nesting: an end tag ascends one level
    #[default]
    Xml,
    /// Flat paths, tolerant of unbalanced tags, `<script>` raw text
    Html,
}

impl Dialect {
    /// Select the dialect for a parse
    pub fn from_hints(hints: Hints) -> Self {
        if hints.contains(Hints::HTML) {
            Dialect::Html
        } else {
            Dialect::Xml
        }
    }

    /// Directory of the top level
    pub fn root(self) -> &'static [u8] {
        match self {
            Dialect::Xml => b"/",
            Dialect::Html => b"",
        }
    }

    /// Record a start tag's name in the directory
    pub fn enter(self, directory: &mut Directory, name: &[u8]) {
        match self {
            Dialect::Xml => directory.push_segment(name),
            Dialect::Html => directory.replace(name),
        }
    }

    /// What the content of an element with this name is
    pub fn body(self, name: &[u8]) -> ElementBody {
        match self {
            Dialect::Xml => ElementBody::Descend,
            Dialect::Html if name.eq_ignore_ascii_case(b"script") => ElementBody::ScriptText,
            Dialect::Html => ElementBody::Flat,
        }
    }

    /// Directory reported for an end tag: the path in XML, the end tag's own
    /// name in HTML
    pub fn end_tag_directory<'d>(self, directory: &'d [u8], name: &'d [u8]) -> &'d [u8] {
        match self {
            Dialect::Xml => directory,
            Dialect::Html => name,
        }
    }

    /// Whether an end tag closes the current nesting level
    pub fn end_tag_ascends(self) -> bool {
        matches!(self, Dialect::Xml)
    }
}
