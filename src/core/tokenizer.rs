//! Markup Tokenizer
//!
//! Lexes the next syntactic token from the current scan position:
//! - Element and attribute names, bare words
//! - Quoted values (no escape processing)
//! - Markup openers: `<`, `</`, `<?`, `<!`, `<!--`
//! - Delimiters: `>`, `/>`, `=`, `?>`
//!
//! Every token is a [`Span`] into the input; nothing is copied. Reaching the
//! end of input inside a token yields no token at all, so callers never see a
//! partial one.

use super::scanner::{is_space, Scanner};
use super::span::Span;

/// Type of markup token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element or attribute name: starts with a letter or `_`
    Name,
    /// Any other run of non-whitespace
    Bare,
    /// Quoted value, span excludes the quotes
    Quoted,
    /// `<`
    TagOpen,
    /// `</`
    EndTagOpen,
    /// `<?`
    ProcessingOpen,
    /// `<!` not followed by `--`
    DeclarationOpen,
    /// `<!--`
    CommentOpen,
    /// `>`
    TagClose,
    /// `/>`
    SelfClose,
    /// `=`
    Equals,
    /// `?>`
    ProcessingClose,
}

/// A token recognized by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    fn new(kind: TokenKind, start: usize, len: usize) -> Self {
        Token {
            kind,
            span: Span::new(start, len),
        }
    }
}

/// Result of reading what follows an attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue {
    /// `name=value`, the value token (quoted or bare)
    Value(Token),
    /// No `=` follows
    Missing,
}

/// Tokenizer over a single input buffer
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
        }
    }

    /// The underlying scanner, for the region scanners
    #[inline]
    pub fn scanner(&mut self) -> &mut Scanner<'a> {
        &mut self.scanner
    }

    /// Get the current position in the input
    #[inline]
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Bytes of a token, borrowed from the input
    #[inline]
    pub fn text(&self, token: &Token) -> &'a [u8] {
        self.scanner.slice(token.span)
    }

    /// Get the next token, or None at end of input or on a syntax error
    pub fn next_token(&mut self) -> Option<Token> {
        self.lex(true)
    }

    /// Token after `name=`. A name run here keeps a trailing `/`, so
    /// `href=http://x/>` reads as `http://x/` followed by `>`.
    fn next_value_token(&mut self) -> Option<Token> {
        self.lex(false)
    }

    fn lex(&mut self, stop_at_self_close: bool) -> Option<Token> {
        self.scanner.skip_whitespace();
        let start = self.scanner.position();
        let c = self.scanner.bump()?;

        match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.name(start, stop_at_self_close),
            b'/' => match self.scanner.bump()? {
                b'>' => Some(Token::new(TokenKind::SelfClose, start, 2)),
                // stray '/' is a syntax error
                _ => None,
            },
            b'"' | b'\'' => {
                let close = self.scanner.find_byte(c)?;
                self.scanner.set_position(close + 1);
                Some(Token::new(TokenKind::Quoted, start + 1, close - start - 1))
            }
            b'<' => self.markup_open(start),
            b'>' => Some(Token::new(TokenKind::TagClose, start, 1)),
            b'=' => Some(Token::new(TokenKind::Equals, start, 1)),
            b'?' if self.scanner.peek() == Some(b'>') => {
                self.scanner.advance(1);
                Some(Token::new(TokenKind::ProcessingClose, start, 2))
            }
            _ => self.bare(start),
        }
    }

    /// Read what follows an attribute name
    ///
    /// Returns None when the input ends before anything else is found, or
    /// when the value after `=` is not a complete token.
    pub fn read_value(&mut self) -> Option<AttributeValue> {
        self.scanner.skip_whitespace();
        match self.scanner.peek()? {
            b'=' => {
                self.scanner.advance(1);
                self.next_value_token().map(AttributeValue::Value)
            }
            _ => Some(AttributeValue::Missing),
        }
    }

    /// Name run: stops at whitespace, `>`, `=`, and optionally a `/>` pair
    fn name(&mut self, start: usize, stop_at_self_close: bool) -> Option<Token> {
        loop {
            match self.scanner.peek()? {
                c if is_space(c) || c == b'>' || c == b'=' => break,
                b'/' if stop_at_self_close && self.scanner.peek_at(1) == Some(b'>') => break,
                _ => self.scanner.advance(1),
            }
        }
        let len = self.scanner.position() - start;
        Some(Token::new(TokenKind::Name, start, len))
    }

    /// Generic run of non-whitespace
    fn bare(&mut self, start: usize) -> Option<Token> {
        while !is_space(self.scanner.peek()?) {
            self.scanner.advance(1);
        }
        let len = self.scanner.position() - start;
        Some(Token::new(TokenKind::Bare, start, len))
    }

    /// Classify `<`, `</`, `<?`, `<!` and `<!--`
    fn markup_open(&mut self, start: usize) -> Option<Token> {
        match self.scanner.bump()? {
            b'?' => Some(Token::new(TokenKind::ProcessingOpen, start, 2)),
            b'/' => Some(Token::new(TokenKind::EndTagOpen, start, 2)),
            b'!' => {
                if self.scanner.bump()? == b'-' && self.scanner.bump()? == b'-' {
                    return Some(Token::new(TokenKind::CommentOpen, start, 4));
                }
                self.scanner.set_position(start + 2);
                Some(Token::new(TokenKind::DeclarationOpen, start, 2))
            }
            _ => {
                self.scanner.set_position(start + 1);
                Some(Token::new(TokenKind::TagOpen, start, 1))
            }
        }
    }
}
