//! Recursive-descent driver
//!
//! Reads content and tokens, keeps the [`Directory`] up to date and reports
//! every recognized construct to a [`MarkupHandler`]. One call frame per
//! nesting level in XML mode; HTML stays on the top level.
//!
//! A missing token (end of input, `/` without `>`, unterminated quote...)
//! stops the whole parse. Only what was recognized up to then is reported.

use log::{debug, trace, warn};

use super::dialect::{Dialect, ElementBody, Hints};
use super::directory::Directory;
use super::regions::{self, Unparsed};
use super::scanner::is_blank;
use super::span::Span;
use super::tokenizer::{AttributeValue, TokenKind, Tokenizer};
use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::sax::{Event, EventFlags, MarkupHandler};

/// Directory reported for `<script>` raw text
const SCRIPT_DIRECTORY: &[u8] = b"script";

/// Parser state for one buffer
pub struct Parser<'a> {
    input: &'a [u8],
    tokenizer: Tokenizer<'a>,
    dialect: Dialect,
    hints: Hints,
    directory: Directory,
    max_depth: usize,
    /// Offset where the depth guard stopped the parse
    depth_exceeded: Option<usize>,
}

impl<'a> Parser<'a> {
    /// Create a parser over `input`
    pub fn new(input: &'a [u8], config: &ParserConfig) -> Self {
        let dialect = config.dialect();
        let mut directory = Directory::with_capacity(config.directory_capacity);
        directory.extend_bounded(dialect.root());

        Parser {
            input,
            tokenizer: Tokenizer::new(input),
            dialect,
            hints: config.hints,
            directory,
            max_depth: config.max_depth,
            depth_exceeded: None,
        }
    }

    /// Run the parse to completion, reporting events to `handler`
    ///
    /// Malformed input is not an error; the only error is hitting the
    /// nesting limit, after which no further events are reported.
    pub fn parse<H: MarkupHandler>(mut self, handler: &mut H) -> Result<()> {
        if self.level(handler, 0).is_none() {
            trace!("parse stopped at offset {}", self.tokenizer.position());
        }

        match self.depth_exceeded {
            Some(offset) => Err(Error::DepthLimit {
                limit: self.max_depth,
                offset,
            }),
            None => Ok(()),
        }
    }

    /// One nesting level: content, markup, content... until an end tag
    /// (XML) or until the input stops
    fn level<H: MarkupHandler>(&mut self, handler: &mut H, depth: usize) -> Option<()> {
        let base = self.directory.len();

        loop {
            let text = regions::content(self.tokenizer.scanner());
            if !text.is_empty() {
                self.emit_region(handler, EventFlags::CONTENT, text);
            }

            let token = self.tokenizer.next_token()?;
            match token.kind {
                TokenKind::TagOpen => {
                    self.element(handler, depth)?;
                    self.directory.truncate(base);
                }
                TokenKind::EndTagOpen => {
                    let name = self.tokenizer.next_token()?;
                    let name = self.tokenizer.text(&name);
                    handler.event(&Event {
                        flags: EventFlags::END,
                        directory: self
                            .dialect
                            .end_tag_directory(self.directory.as_bytes(), name),
                        attribute: None,
                        value: None,
                        offset: 0,
                    });

                    // trailing '>'
                    self.tokenizer.next_token()?;
                    if self.dialect.end_tag_ascends() {
                        return Some(());
                    }
                }
                TokenKind::ProcessingOpen => self.unparsed(handler, Unparsed::Processing),
                TokenKind::DeclarationOpen => self.unparsed(handler, Unparsed::Declaration),
                TokenKind::CommentOpen => self.unparsed(handler, Unparsed::Comment),
                _ => {}
            }
        }
    }

    /// Start tag after its `<`: name, attributes, then `/>` or `>`
    fn element<H: MarkupHandler>(&mut self, handler: &mut H, depth: usize) -> Option<()> {
        let name = self.tokenizer.next_token()?;
        let name = self.tokenizer.text(&name);
        self.dialect.enter(&mut self.directory, name);

        // only the first event of an element carries BEGIN
        let mut flags = EventFlags::BEGIN;

        loop {
            let token = self.tokenizer.next_token()?;
            match token.kind {
                TokenKind::SelfClose => {
                    self.emit_tag(handler, flags | EventFlags::END, None, None);
                    return Some(());
                }
                TokenKind::TagClose => {
                    self.emit_tag(handler, flags | EventFlags::CLOSE, None, None);
                    return match self.dialect.body(name) {
                        ElementBody::Descend => self.descend(handler, depth + 1),
                        ElementBody::ScriptText => {
                            self.script(handler);
                            Some(())
                        }
                        ElementBody::Flat => Some(()),
                    };
                }
                _ => {
                    let attribute = self.tokenizer.text(&token);
                    let value = match self.tokenizer.read_value()? {
                        AttributeValue::Value(value) => Some(value.span),
                        AttributeValue::Missing => None,
                    };
                    self.emit_tag(handler, flags | EventFlags::ATTRIBUTE, Some(attribute), value);
                    flags.remove(EventFlags::BEGIN);
                }
            }
        }
    }

    fn descend<H: MarkupHandler>(&mut self, handler: &mut H, depth: usize) -> Option<()> {
        if depth > self.max_depth {
            let offset = self.tokenizer.position();
            warn!(
                "nesting deeper than {} levels at offset {}, stopping",
                self.max_depth, offset
            );
            self.depth_exceeded = Some(offset);
            return None;
        }
        self.level(handler, depth)
    }

    fn script<H: MarkupHandler>(&mut self, handler: &mut H) {
        debug!("<script> raw text at offset {}", self.tokenizer.position());

        if let Some(span) = regions::script(self.tokenizer.scanner()) {
            handler.event(&Event {
                flags: EventFlags::CONTENT | EventFlags::END,
                directory: SCRIPT_DIRECTORY,
                attribute: None,
                value: Some(span.slice(self.input)),
                offset: span.offset,
            });
        }
    }

    fn unparsed<H: MarkupHandler>(&mut self, handler: &mut H, kind: Unparsed) {
        if let Some(span) = regions::unparsed(self.tokenizer.scanner(), kind) {
            self.emit_region(handler, kind.flags(), span);
        }
    }

    /// Tag boundary or attribute event under the current directory
    fn emit_tag<H: MarkupHandler>(
        &self,
        handler: &mut H,
        flags: EventFlags,
        attribute: Option<&[u8]>,
        value: Option<Span>,
    ) {
        handler.event(&Event {
            flags,
            directory: self.directory.as_bytes(),
            attribute,
            value: value.map(|span| span.slice(self.input)),
            offset: value.map_or(0, |span| span.offset),
        });
    }

    /// Text-like region under the current directory
    fn emit_region<H: MarkupHandler>(&self, handler: &mut H, flags: EventFlags, span: Span) {
        let value = span.slice(self.input);
        if self.hints.contains(Hints::REMOVE_EMPTY_CONTENT) && is_blank(value) {
            return;
        }

        trace!(
            "{}={}",
            String::from_utf8_lossy(self.directory.as_bytes()),
            String::from_utf8_lossy(value)
        );
        handler.event(&Event {
            flags,
            directory: self.directory.as_bytes(),
            attribute: None,
            value: Some(value),
            offset: span.offset,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sax::OwnedEvent;
    use test_case::test_case;

    type Row = (EventFlags, String, Option<String>, Option<String>);

    fn rows(input: &[u8], config: &ParserConfig) -> Vec<Row> {
        let mut out = Vec::new();
        let mut handler = |event: &Event<'_>| {
            out.push((
                event.flags,
                event.directory_str().into_owned(),
                event.attribute_str().map(|a| a.into_owned()),
                event.value_str().map(|v| v.into_owned()),
            ));
        };
        Parser::new(input, config).parse(&mut handler).unwrap();
        out
    }

    fn xml(input: &[u8]) -> Vec<Row> {
        rows(input, &ParserConfig::default())
    }

    fn html(input: &[u8]) -> Vec<Row> {
        rows(input, &ParserConfig::html())
    }

    fn row(flags: EventFlags, dir: &str, attr: Option<&str>, value: Option<&str>) -> Row {
        (flags, dir.into(), attr.map(Into::into), value.map(Into::into))
    }

    const BEGIN: EventFlags = EventFlags::BEGIN;
    const CLOSE: EventFlags = EventFlags::CLOSE;
    const END: EventFlags = EventFlags::END;
    const ATTRIBUTE: EventFlags = EventFlags::ATTRIBUTE;
    const CONTENT: EventFlags = EventFlags::CONTENT;

    #[test]
    fn test_nested_elements() {
        assert_eq!(
            xml(b"<a><b>text</b></a>"),
            vec![
                row(BEGIN | CLOSE, "/a", None, None),
                row(BEGIN | CLOSE, "/a/b", None, None),
                row(CONTENT, "/a/b", None, Some("text")),
                row(END, "/a/b", None, None),
                row(END, "/a", None, None),
            ]
        );
    }

    #[test]
    fn test_self_closing_does_not_descend() {
        assert_eq!(
            xml(b"<a/>tail"),
            vec![
                row(BEGIN | END, "/a", None, None),
                row(CONTENT, "/", None, Some("tail")),
            ]
        );
    }

    #[test]
    fn test_attributes_only_first_carries_begin() {
        assert_eq!(
            xml(b"<a x=\"1\" y>"),
            vec![
                row(BEGIN | ATTRIBUTE, "/a", Some("x"), Some("1")),
                row(ATTRIBUTE, "/a", Some("y"), None),
                row(CLOSE, "/a", None, None),
            ]
        );
    }

    #[test]
    fn test_attribute_offsets() {
        let input = b"<a href='x.html' id=main/>";
        let mut events = Vec::new();
        let mut handler = |event: &Event<'_>| events.push(OwnedEvent::from(event));
        Parser::new(input, &ParserConfig::default())
            .parse(&mut handler)
            .unwrap();

        assert_eq!(events[0].value_span(), Some(Span::new(9, 6)));
        assert_eq!(events[1].value_span(), Some(Span::new(20, 4)));
        assert_eq!(events[2].offset, 0);
        assert_eq!(events[2].flags, END);
    }

    #[test_case(b"<a x=a/b>" => vec![
        row(BEGIN | ATTRIBUTE, "/a", Some("x"), Some("a/b")),
        row(CLOSE, "/a", None, None),
    ] ; "inner slash")]
    #[test_case(b"<a x=a/>" => vec![
        row(BEGIN | ATTRIBUTE, "/a", Some("x"), Some("a/")),
        row(CLOSE, "/a", None, None),
    ] ; "trailing slash belongs to the value")]
    #[test_case(b"<a x/>" => vec![
        row(BEGIN | ATTRIBUTE, "/a", Some("x"), None),
        row(END, "/a", None, None),
    ] ; "attribute without value self closes")]
    #[test_case(b"<a x=1 />" => vec![
        row(BEGIN | ATTRIBUTE, "/a", Some("x"), Some("1")),
        row(END, "/a", None, None),
    ] ; "space before self close")]
    #[test_case(b"<a x=/abs>" => Vec::<Row>::new() ; "stray slash stops the parse")]
    fn test_unquoted_values(input: &[u8]) -> Vec<Row> {
        xml(input)
    }

    #[test]
    fn test_html_unquoted_url_with_trailing_slash() {
        assert_eq!(
            html(b"<a href=http://x/>link</a>"),
            vec![
                row(BEGIN | ATTRIBUTE, "a", Some("href"), Some("http://x/")),
                row(CLOSE, "a", None, None),
                row(CONTENT, "", None, Some("link")),
                row(END, "a", None, None),
            ]
        );
    }

    #[test]
    fn test_xml_unquoted_slash_value_keeps_nesting() {
        assert_eq!(
            xml(b"<r><a href=x/>t</a><b/></r>"),
            vec![
                row(BEGIN | CLOSE, "/r", None, None),
                row(BEGIN | ATTRIBUTE, "/r/a", Some("href"), Some("x/")),
                row(CLOSE, "/r/a", None, None),
                row(CONTENT, "/r/a", None, Some("t")),
                row(END, "/r/a", None, None),
                row(BEGIN | END, "/r/b", None, None),
                row(END, "/r", None, None),
            ]
        );
    }

    #[test]
    fn test_empty_quoted_value_is_present() {
        assert_eq!(
            xml(b"<a x=''/>"),
            vec![
                row(BEGIN | ATTRIBUTE, "/a", Some("x"), Some("")),
                row(END, "/a", None, None),
            ]
        );
    }

    #[test]
    fn test_comment_then_content() {
        assert_eq!(
            xml(b"<!-- a --> <p>ok</p>"),
            vec![
                row(EventFlags::COMMENT, "/", None, Some(" a ")),
                row(CONTENT, "/", None, Some(" ")),
                row(BEGIN | CLOSE, "/p", None, None),
                row(CONTENT, "/p", None, Some("ok")),
                row(END, "/p", None, None),
            ]
        );
    }

    #[test]
    fn test_processing_and_declaration() {
        assert_eq!(
            xml(b"<?xml version=\"1.0\"?><!DOCTYPE r><r/>"),
            vec![
                row(EventFlags::PROCESSING, "/", None, Some("xml version=\"1.0\"")),
                row(EventFlags::SPECIAL, "/", None, Some("DOCTYPE r")),
                row(BEGIN | END, "/r", None, None),
            ]
        );
    }

    #[test]
    fn test_comment_directory_is_current_path() {
        assert_eq!(
            xml(b"<a><!--c--></a>"),
            vec![
                row(BEGIN | CLOSE, "/a", None, None),
                row(EventFlags::COMMENT, "/a", None, Some("c")),
                row(END, "/a", None, None),
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_stops_parse() {
        assert_eq!(xml(b"<a x=\"unterminated"), vec![]);
        assert_eq!(
            xml(b"<r>t<a x=\"unterminated"),
            vec![
                row(BEGIN | CLOSE, "/r", None, None),
                row(CONTENT, "/r", None, Some("t")),
            ]
        );
    }

    #[test]
    fn test_syntax_error_stops_all_levels() {
        // '/' without '>' ends the parse, the outer level does not resume
        assert_eq!(xml(b"<a><b / x>in</b>out</a>"), vec![row(BEGIN | CLOSE, "/a", None, None)]);
    }

    #[test]
    fn test_xml_end_tag_name_is_ignored() {
        assert_eq!(
            xml(b"<a>1</zzz>2"),
            vec![
                row(BEGIN | CLOSE, "/a", None, None),
                row(CONTENT, "/a", None, Some("1")),
                row(END, "/a", None, None),
                row(CONTENT, "/", None, Some("2")),
            ]
        );
    }

    #[test]
    fn test_xml_top_level_end_tag_finishes() {
        assert_eq!(xml(b"</x><a/>"), vec![row(END, "/", None, None)]);
    }

    #[test]
    fn test_html_flat_directory_and_tolerant_end_tags() {
        assert_eq!(
            html(b"<p class=x>hi</b></p>bye"),
            vec![
                row(BEGIN | ATTRIBUTE, "p", Some("class"), Some("x")),
                row(CLOSE, "p", None, None),
                row(CONTENT, "", None, Some("hi")),
                row(END, "b", None, None),
                row(END, "p", None, None),
                row(CONTENT, "", None, Some("bye")),
            ]
        );
    }

    #[test]
    fn test_html_script_raw_text() {
        assert_eq!(
            html(b"<script>if (a<b) {}</script><p>x"),
            vec![
                row(BEGIN | CLOSE, "script", None, None),
                row(CONTENT | END, "script", None, Some("if (a<b) {}")),
                row(BEGIN | CLOSE, "p", None, None),
                row(CONTENT, "", None, Some("x")),
            ]
        );
    }

    #[test]
    fn test_html_script_with_attributes_and_upper_case() {
        assert_eq!(
            html(b"<SCRIPT type=\"text/javascript\">a()</SCRIPT>"),
            vec![
                row(BEGIN | ATTRIBUTE, "SCRIPT", Some("type"), Some("text/javascript")),
                row(CLOSE, "SCRIPT", None, None),
                row(CONTENT | END, "script", None, Some("a()")),
            ]
        );
    }

    #[test]
    fn test_xml_script_is_ordinary_element() {
        assert_eq!(
            xml(b"<script>a<b/></script>"),
            vec![
                row(BEGIN | CLOSE, "/script", None, None),
                row(CONTENT, "/script", None, Some("a")),
                row(BEGIN | END, "/script/b", None, None),
                row(END, "/script", None, None),
            ]
        );
    }

    #[test]
    fn test_remove_empty_content_hint() {
        let config = ParserConfig::with_hints(Hints::REMOVE_EMPTY_CONTENT);
        assert_eq!(
            rows(b"<a>\n  <b> x </b>\n</a><!-- -->", &config),
            vec![
                row(BEGIN | CLOSE, "/a", None, None),
                row(BEGIN | CLOSE, "/a/b", None, None),
                row(CONTENT, "/a/b", None, Some(" x ")),
                row(END, "/a/b", None, None),
                row(END, "/a", None, None),
            ]
        );
    }

    #[test]
    fn test_directory_is_truncated() {
        let config = ParserConfig {
            directory_capacity: 6,
            ..Default::default()
        };
        assert_eq!(
            rows(b"<abc><defg/></abc>", &config),
            vec![
                row(BEGIN | CLOSE, "/abc", None, None),
                row(BEGIN | END, "/abc/d", None, None),
                row(END, "/abc", None, None),
            ]
        );
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig {
            max_depth: 2,
            ..Default::default()
        };
        let mut count = 0;
        let mut handler = |_: &Event<'_>| count += 1;
        let result = Parser::new(b"<a><b><c>deep</c></b></a>", &config).parse(&mut handler);

        match result {
            Err(Error::DepthLimit { limit, offset }) => {
                assert_eq!(limit, 2);
                assert_eq!(offset, 9);
            }
            other => panic!("unexpected {other:?}"),
        }
        // begin a, begin b, begin c; nothing after the limit
        assert_eq!(count, 3);
    }

    #[test]
    fn test_depth_limit_allows_exact_depth() {
        let config = ParserConfig {
            max_depth: 2,
            ..Default::default()
        };
        let mut handler = |_: &Event<'_>| {};
        assert!(Parser::new(b"<a><b>x</b></a>", &config)
            .parse(&mut handler)
            .is_ok());
    }

    #[test]
    fn test_html_ignores_depth_limit() {
        let config = ParserConfig {
            hints: Hints::HTML,
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(rows(b"<a><b><c>", &config).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(xml(b"").is_empty());
        assert!(html(b"").is_empty());
    }

    #[test]
    fn test_nul_terminates_input() {
        assert_eq!(xml(b"<a/>\0<b/>"), vec![row(BEGIN | END, "/a", None, None)]);
    }
}
