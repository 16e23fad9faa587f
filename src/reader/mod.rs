//! Input Module
//!
//! Turns file paths and standard input into complete in-memory buffers.

pub mod source;

pub use source::{read_all, Source, STDIN_ARG};
