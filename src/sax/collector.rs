//! Event Collector
//!
//! Implements MarkupHandler to copy events out of the parser for batch use.

use super::events::{Event, EventFlags, MarkupHandler};
use crate::config::ParserConfig;
use crate::core::parser::Parser;
use crate::core::span::Span;

/// Owned copy of an [`Event`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedEvent {
    pub flags: EventFlags,
    pub directory: Vec<u8>,
    pub attribute: Option<Vec<u8>>,
    pub value: Option<Vec<u8>>,
    pub offset: usize,
}

impl OwnedEvent {
    /// Borrow this event in the form handlers receive
    pub fn as_event(&self) -> Event<'_> {
        Event {
            flags: self.flags,
            directory: &self.directory,
            attribute: self.attribute.as_deref(),
            value: self.value.as_deref(),
            offset: self.offset,
        }
    }

    /// Location of the value in the input buffer
    pub fn value_span(&self) -> Option<Span> {
        self.as_event().value_span()
    }
}

impl From<&Event<'_>> for OwnedEvent {
    fn from(event: &Event<'_>) -> Self {
        OwnedEvent {
            flags: event.flags,
            directory: event.directory.to_vec(),
            attribute: event.attribute.map(<[u8]>::to_vec),
            value: event.value.map(<[u8]>::to_vec),
            offset: event.offset,
        }
    }
}

/// Collector that gathers events during parsing
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<OwnedEvent>,
}

impl EventCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(64),
        }
    }

    /// Take the collected events
    pub fn take_events(&mut self) -> Vec<OwnedEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get the collected events as a slice
    pub fn events(&self) -> &[OwnedEvent] {
        &self.events
    }

    /// Get number of collected events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

impl MarkupHandler for EventCollector {
    fn event(&mut self, event: &Event<'_>) {
        self.events.push(OwnedEvent::from(event));
    }
}

/// Parse input with `config` and return the owned events
///
/// Events recognized before a depth limit stop are returned as well.
pub fn collect_events(input: &[u8], config: &ParserConfig) -> Vec<OwnedEvent> {
    let mut collector = EventCollector::new();
    if let Err(err) = Parser::new(input, config).parse(&mut collector) {
        log::warn!("{err}");
    }
    collector.take_events()
}

/// Parse input as XML and return the owned events
pub fn parse_events(input: &[u8]) -> Vec<OwnedEvent> {
    collect_events(input, &ParserConfig::default())
}

/// Parse input as HTML and return the owned events
pub fn parse_html_events(input: &[u8]) -> Vec<OwnedEvent> {
    collect_events(input, &ParserConfig::html())
}
