//! Markup Event Types
//!
//! Defines the events emitted during parsing and the sink that receives them.
//!
//! Events borrow from the input buffer and from the parser's directory. They
//! are only valid for the duration of the handler call; copy them (see
//! [`OwnedEvent`](super::collector::OwnedEvent)) to keep them longer.

use std::borrow::Cow;

use bitflags::bitflags;

use crate::core::span::Span;

bitflags! {
    /// Kind of an event. Several kinds combine, e.g. `BEGIN | CLOSE` for
    /// `<a>` or `BEGIN | END` for `<a/>`.
    pub struct EventFlags: u8 {
        /// `<name`: first event of an element
        const BEGIN = 1 << 0;
        /// `>`: end of the start tag
        const CLOSE = 1 << 1;
        /// `</name>` or `/>`
        const END = 1 << 2;
        /// `name="value"`
        const ATTRIBUTE = 1 << 3;
        /// Text between tags
        const CONTENT = 1 << 4;
        /// `<!-- ... -->`
        const COMMENT = 1 << 5;
        /// `<? ... ?>`
        const PROCESSING = 1 << 6;
        /// `<! ... >`, e.g. `<!DOCTYPE html>`
        const SPECIAL = 1 << 7;
    }
}

/// A single parse event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a> {
    /// Event kind
    pub flags: EventFlags,
    /// Element path (XML) or tag name (HTML)
    pub directory: &'a [u8],
    /// Attribute name, for ATTRIBUTE events
    pub attribute: Option<&'a [u8]>,
    /// Value bytes: attribute value, text, comment body...
    pub value: Option<&'a [u8]>,
    /// Byte offset of `value` from the start of the buffer, 0 without value
    pub offset: usize,
}

impl<'a> Event<'a> {
    /// Length of the value in bytes
    #[inline]
    pub fn value_len(&self) -> usize {
        self.value.map_or(0, <[u8]>::len)
    }

    /// Location of the value in the input buffer
    #[inline]
    pub fn value_span(&self) -> Option<Span> {
        self.value.map(|v| Span::new(self.offset, v.len()))
    }

    /// Get the directory as a string
    pub fn directory_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.directory)
    }

    /// Get the attribute name as a string
    pub fn attribute_str(&self) -> Option<Cow<'a, str>> {
        self.attribute.map(String::from_utf8_lossy)
    }

    /// Get the value as a string
    pub fn value_str(&self) -> Option<Cow<'a, str>> {
        self.value.map(String::from_utf8_lossy)
    }

    /// Check whether all of `flags` are set
    #[inline]
    pub fn is(&self, flags: EventFlags) -> bool {
        self.flags.contains(flags)
    }
}

/// Receiver of parse events
///
/// Called synchronously, possibly from deep inside the recursive descent.
/// Any closure taking `&Event` is a handler.
pub trait MarkupHandler {
    /// Called once per recognized construct
    fn event(&mut self, event: &Event<'_>);
}

impl<F> MarkupHandler for F
where
    F: FnMut(&Event<'_>),
{
    #[inline]
    fn event(&mut self, event: &Event<'_>) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values() {
        assert_eq!(EventFlags::BEGIN.bits(), 1);
        assert_eq!(EventFlags::CLOSE.bits(), 2);
        assert_eq!(EventFlags::END.bits(), 4);
        assert_eq!(EventFlags::ATTRIBUTE.bits(), 8);
        assert_eq!(EventFlags::CONTENT.bits(), 16);
        assert_eq!(EventFlags::COMMENT.bits(), 32);
        assert_eq!(EventFlags::PROCESSING.bits(), 64);
        assert_eq!(EventFlags::SPECIAL.bits(), 128);
    }

    #[test]
    fn test_event_accessors() {
        let event = Event {
            flags: EventFlags::BEGIN | EventFlags::ATTRIBUTE,
            directory: b"/a",
            attribute: Some(b"href"),
            value: Some(b"x.html"),
            offset: 9,
        };
        assert!(event.is(EventFlags::ATTRIBUTE));
        assert!(!event.is(EventFlags::CLOSE));
        assert_eq!(event.value_len(), 6);
        assert_eq!(event.value_span(), Some(Span::new(9, 6)));
        assert_eq!(event.directory_str(), "/a");
        assert_eq!(event.attribute_str().as_deref(), Some("href"));
    }

    #[test]
    fn test_closure_is_handler() {
        let mut count = 0;
        let mut handler = |_: &Event<'_>| count += 1;
        let event = Event {
            flags: EventFlags::END,
            directory: b"/",
            attribute: None,
            value: None,
            offset: 0,
        };
        handler.event(&event);
        handler.event(&event);
        assert_eq!(count, 2);
        assert_eq!(event.value_len(), 0);
        assert_eq!(event.value_span(), None);
    }
}
