#![no_main]
use libfuzzer_sys::fuzz_target;
use tagscan::{Event, Hints, Parser, ParserConfig};

/// Inputs are cut to this length, deep nesting is covered by the depth guard
const MAX_LEN: usize = 256;

fn run(data: &[u8]) {
    let data = &data[..data.len().min(MAX_LEN)];
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());

    for hints in [Hints::empty(), Hints::HTML, Hints::HTML | Hints::REMOVE_EMPTY_CONTENT] {
        let mut check = |event: &Event<'_>| {
            if let Some(span) = event.value_span() {
                assert!(span.end() <= end, "value past end of input: {span:?}");
            } else {
                assert_eq!(event.offset, 0);
            }
        };
        let _ = Parser::new(data, &ParserConfig::with_hints(hints)).parse(&mut check);
    }
}

fuzz_target!(|data: &[u8]| {
    run(data);
});
