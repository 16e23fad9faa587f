//! Event API
//!
//! The parser pushes one [`Event`] per recognized construct into a
//! [`MarkupHandler`]:
//!
//! ```text
//! Tokenizer ---> Parser ---> MarkupHandler (closure, EventCollector, ...)
//!                                 |
//!                                 v
//!                            OwnedEvent[]
//! ```
//!
//! ## Event Kinds
//!
//! - `BEGIN` - first event of a start tag
//! - `ATTRIBUTE` - one per attribute, with name and optional value
//! - `CLOSE` / `END` - `>` of a start tag, `/>` or an end tag
//! - `CONTENT` - text between tags, `<script>` raw text in HTML
//! - `COMMENT`, `PROCESSING`, `SPECIAL` - unparsed regions
//!
//! ## Memory Efficiency
//!
//! Values borrow the input buffer and carry their byte offset; nothing is
//! copied unless the handler asks for it.

pub mod collector;
pub mod events;

pub use collector::{collect_events, parse_events, parse_html_events, EventCollector, OwnedEvent};
pub use events::{Event, EventFlags, MarkupHandler};
