//! Parallel source parsing
//!
//! Uses Rayon to parse several documents at once. Every source gets its own
//! buffer and parser, so nothing is shared between the workers.

use rayon::prelude::*;

use crate::config::ParserConfig;
use crate::core::parser::Parser;
use crate::error::{Error, Result};
use crate::reader::Source;
use crate::sax::{EventCollector, OwnedEvent};

/// Events of one source, with the depth-limit error if the parse was cut
#[derive(Debug)]
pub struct ParsedSource {
    pub events: Vec<OwnedEvent>,
    pub stopped: Option<Error>,
}

/// Read and parse a single source
pub fn parse_source(source: &Source, config: &ParserConfig) -> Result<ParsedSource> {
    let input = source.read()?;
    Ok(parse_buffer_owned(&input, config))
}

/// Parse a buffer, keeping the events seen before any depth-limit stop
pub fn parse_buffer_owned(input: &[u8], config: &ParserConfig) -> ParsedSource {
    let mut collector = EventCollector::new();
    let stopped = Parser::new(input, config).parse(&mut collector).err();
    ParsedSource {
        events: collector.take_events(),
        stopped,
    }
}

/// Parse multiple sources in parallel
///
/// Results are in the order of `sources`.
pub fn parse_sources_parallel(
    sources: &[Source],
    config: &ParserConfig,
) -> Vec<Result<ParsedSource>> {
    sources
        .par_iter()
        .map(|source| parse_source(source, config))
        .collect()
}

/// Parse multiple in-memory buffers in parallel
pub fn parse_buffers_parallel(
    buffers: &[&[u8]],
    config: &ParserConfig,
) -> Vec<Vec<OwnedEvent>> {
    buffers
        .par_iter()
        .map(|input| parse_buffer_owned(input, config).events)
        .collect()
}
