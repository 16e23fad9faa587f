//! Core markup parsing primitives
//!
//! This module contains the building blocks of the event parser:
//! - Span: offset + length into the input
//! - Scanner: bounded cursor with memchr-accelerated searching
//! - Tokenizer: next markup token from the current position
//! - Regions: content, comments, processing instructions, script text
//! - Directory: bounded element path
//! - Dialect: XML vs HTML behaviour
//! - Parser: recursive-descent driver emitting events

pub mod dialect;
pub mod directory;
pub mod parser;
pub mod regions;
pub mod scanner;
pub mod span;
pub mod tokenizer;
