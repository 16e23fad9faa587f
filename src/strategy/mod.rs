//! Parsing Strategy Module
//!
//! - Single buffer: `Parser` driven directly (see `core::parser`)
//! - Many sources: one parser per source, run in parallel with Rayon

pub mod parallel;

pub use parallel::{parse_buffers_parallel, parse_source, parse_sources_parallel, ParsedSource};
