//! tagscan - single-pass XML/HTML event scanner
//!
//! Walks a markup buffer once and reports begin/attribute/close/end tags,
//! text content, comments, processing instructions and declarations to a
//! handler, together with a synthetic element path (`/html/body/a` in XML
//! mode, the tag name in HTML mode). Made for pulling links and metadata out
//! of documents that may be arbitrarily broken.
//!
//! Entry points:
//! - Buffer: [`parse_buffer`], [`parse_html_buffer`]
//! - File or stdin: [`parse_file`], [`parse_html_file`], [`try_parse_file`]
//! - Configured: [`Parser`] with a [`ParserConfig`]
//! - Many sources: [`strategy::parse_sources_parallel`]
//!
//! ```
//! use tagscan::{parse_html_buffer, Event, EventFlags, Hints};
//!
//! let mut links = Vec::new();
//! parse_html_buffer(b"<a href='/next'>more</a>", &mut |event: &Event<'_>| {
//!     if event.is(EventFlags::ATTRIBUTE) && event.attribute == Some(&b"href"[..]) {
//!         links.extend(event.value_str().map(|v| v.into_owned()));
//!     }
//! }, Hints::empty());
//! assert_eq!(links, ["/next"]);
//! ```

#![forbid(unsafe_code)]

use std::path::Path;

pub mod config;
pub mod core;
pub mod error;
pub mod reader;
pub mod sax;
pub mod strategy;

pub use crate::config::{ParserConfig, DEFAULT_MAX_DEPTH};
pub use crate::core::dialect::{Dialect, Hints};
pub use crate::core::directory::{Directory, DEFAULT_DIRECTORY_CAPACITY};
pub use crate::core::parser::Parser;
pub use crate::core::span::Span;
pub use crate::error::{Error, Result};
pub use crate::reader::Source;
pub use crate::sax::{
    collect_events, parse_events, parse_html_events, Event, EventCollector, EventFlags,
    MarkupHandler, OwnedEvent,
};

// ============================================================================
// Buffer Entry Points
// ============================================================================

/// Parse a buffer, reporting every event to `handler`
///
/// The buffer ends at its first NUL byte, if any. Malformed markup stops the
/// parse quietly; a nesting limit stop is logged.
pub fn parse_buffer<H: MarkupHandler>(input: &[u8], handler: &mut H, hints: Hints) {
    run(input, handler, &ParserConfig::with_hints(hints));
}

/// Like [`parse_buffer`] with [`Hints::HTML`] forced on
pub fn parse_html_buffer<H: MarkupHandler>(input: &[u8], handler: &mut H, hints: Hints) {
    run(input, handler, &ParserConfig::with_hints(hints | Hints::HTML));
}

fn run<H: MarkupHandler>(input: &[u8], handler: &mut H, config: &ParserConfig) {
    if let Err(err) = Parser::new(input, config).parse(handler) {
        log::warn!("{err}");
    }
}

// ============================================================================
// File Entry Points
// ============================================================================

/// Read `path` (`-` for standard input) and parse it
///
/// A source that cannot be read is logged and nothing is reported.
pub fn parse_file<H: MarkupHandler>(path: impl AsRef<Path>, handler: &mut H, hints: Hints) {
    parse_file_with(path.as_ref(), handler, &ParserConfig::with_hints(hints));
}

/// Like [`parse_file`] with [`Hints::HTML`] forced on
pub fn parse_html_file<H: MarkupHandler>(path: impl AsRef<Path>, handler: &mut H, hints: Hints) {
    parse_file_with(
        path.as_ref(),
        handler,
        &ParserConfig::with_hints(hints | Hints::HTML),
    );
}

fn parse_file_with<H: MarkupHandler>(path: &Path, handler: &mut H, config: &ParserConfig) {
    match Source::from_arg(path).read() {
        Ok(input) => run(&input, handler, config),
        Err(err) => log::error!("{err}"),
    }
}

/// Read `path` (`-` for standard input) and parse it with `config`
///
/// Unlike [`parse_file`], acquisition failures and a nesting limit stop are
/// returned to the caller.
pub fn try_parse_file<H: MarkupHandler>(
    path: impl AsRef<Path>,
    handler: &mut H,
    config: &ParserConfig,
) -> Result<()> {
    let input = Source::from_arg(path).read()?;
    Parser::new(&input, config).parse(handler)
}
