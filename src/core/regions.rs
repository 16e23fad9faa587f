//! Region scanners
//!
//! Scan stretches of input that are not tokenized:
//! - Plain text content up to the next `<`
//! - Unparsed regions closed by a fixed marker (comments, processing
//!   instructions, declarations)
//! - Raw `<script>` text, closed by `</script` outside of `<!-- -->`

use super::scanner::Scanner;
use super::span::Span;
use crate::sax::EventFlags;

/// Region that is skipped verbatim up to its closing marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unparsed {
    /// `<!-- ... -->`
    Comment,
    /// `<? ... ?>`
    Processing,
    /// `<! ... >`, e.g. `<!DOCTYPE html>`
    Declaration,
}

impl Unparsed {
    /// Marker that closes the region
    #[inline]
    pub fn terminator(self) -> &'static [u8] {
        match self {
            Unparsed::Comment => b"-->",
            Unparsed::Processing => b"?>",
            Unparsed::Declaration => b">",
        }
    }

    /// Event kind reported for the region
    #[inline]
    pub fn flags(self) -> EventFlags {
        match self {
            Unparsed::Comment => EventFlags::COMMENT,
            Unparsed::Processing => EventFlags::PROCESSING,
            Unparsed::Declaration => EventFlags::SPECIAL,
        }
    }
}

/// Scan text content up to (not including) the next `<`
///
/// The returned span may be empty.
pub fn content(scanner: &mut Scanner<'_>) -> Span {
    let start = scanner.position();
    let end = scanner.find_byte(b'<').unwrap_or_else(|| scanner.end());
    scanner.set_position(end);
    Span::between(start, end)
}

/// Scan an unparsed region, leaving the cursor past its terminator
///
/// An unterminated region still reports what was accumulated; None means the
/// input ended without a single byte of content.
pub fn unparsed(scanner: &mut Scanner<'_>, kind: Unparsed) -> Option<Span> {
    let start = scanner.position();
    let terminator = kind.terminator();

    match scanner.find_marker(terminator) {
        Some(at) => {
            scanner.set_position(at + terminator.len());
            Some(Span::between(start, at))
        }
        None => {
            let end = scanner.end();
            scanner.set_position(end);
            (end > start).then(|| Span::between(start, end))
        }
    }
}

/// Scan the raw text of a `<script>` element
///
/// Content ends at the first `</script` that is not inside `<!-- -->`. The
/// closing marker, trailing whitespace and a `>` (if present) are consumed.
/// Without a closing marker the rest of the input is the content; None means
/// there was nothing at all.
pub fn script(scanner: &mut Scanner<'_>) -> Option<Span> {
    const CLOSE: &[u8] = b"</script";

    let start = scanner.position();
    let mut in_comment = false;
    let mut content_end = None;

    loop {
        if in_comment {
            match scanner.find_marker(b"-->") {
                Some(at) => {
                    scanner.set_position(at + 3);
                    in_comment = false;
                    continue;
                }
                None => break,
            }
        }

        let Some(lt) = scanner.find_byte(b'<') else {
            break;
        };
        scanner.set_position(lt);

        if scanner.starts_with(b"<!--") {
            scanner.advance(4);
            in_comment = true;
        } else if scanner.starts_with_ignore_case(CLOSE) {
            content_end = Some(lt);
            scanner.advance(CLOSE.len());
            scanner.skip_whitespace();
            if scanner.peek() == Some(b'>') {
                scanner.advance(1);
                // `<script></script>` still reports its empty content
                return Some(Span::between(start, lt));
            }
        } else {
            scanner.advance(1);
        }
    }

    let end = scanner.end();
    scanner.set_position(end);
    match content_end {
        Some(at) => Some(Span::between(start, at)),
        None => (end > start).then(|| Span::between(start, end)),
    }
}
