use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use tagscan::strategy::{parse_sources_parallel, ParsedSource};
use tagscan::{EventFlags, Hints, OwnedEvent, ParserConfig, Source, DEFAULT_MAX_DEPTH};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Flag names in bit order
const FLAG_NAMES: [(EventFlags, &str); 8] = [
    (EventFlags::BEGIN, "BEGIN"),
    (EventFlags::CLOSE, "CLOSE"),
    (EventFlags::END, "END"),
    (EventFlags::ATTRIBUTE, "ATTRIBUTE"),
    (EventFlags::CONTENT, "CONTENT"),
    (EventFlags::COMMENT, "COMMENT"),
    (EventFlags::PROCESSING, "PROCESSING"),
    (EventFlags::SPECIAL, "SPECIAL"),
];

#[derive(Debug, Parser)]
#[clap(name = "tagscan", version, about = "Dump XML/HTML parse events")]
struct Cli {
    /// Files to parse, `-` for standard input
    #[clap(value_name = "FILE")]
    files: Vec<String>,

    /// Tolerant HTML mode: flat tag names, <script> raw text
    #[clap(long)]
    html: bool,

    /// Drop whitespace-only text, comments and declarations
    #[clap(long)]
    strip_empty: bool,

    /// Maximum element nesting followed in XML mode
    #[clap(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

impl Cli {
    fn config(&self) -> ParserConfig {
        let mut hints = Hints::empty();
        hints.set(Hints::HTML, self.html);
        hints.set(Hints::REMOVE_EMPTY_CONTENT, self.strip_empty);

        ParserConfig {
            hints,
            max_depth: self.max_depth,
            ..Default::default()
        }
    }

    fn sources(&self) -> Vec<Source> {
        if self.files.is_empty() {
            return vec![Source::Stdin];
        }
        self.files.iter().map(Source::from_arg).collect()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("tagscan: cannot install logger: {err}");
    }

    let sources = cli.sources();
    let results = parse_sources_parallel(&sources, &cli.config());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failed = false;

    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(parsed) => {
                if let Err(err) = print_source(&mut out, source, &parsed, sources.len() > 1) {
                    // stdout closed, e.g. piped into `head`
                    if err.kind() == io::ErrorKind::BrokenPipe {
                        return ExitCode::SUCCESS;
                    }
                    log::error!("write failed: {err}");
                    return ExitCode::FAILURE;
                }
                if let Some(err) = parsed.stopped {
                    log::warn!("{}: {err}", source.display_name());
                }
            }
            Err(err) => {
                log::error!("{err}");
                failed = true;
            }
        }
    }

    if let Err(err) = out.flush() {
        if err.kind() != io::ErrorKind::BrokenPipe {
            log::error!("write failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_source<W: Write>(
    out: &mut W,
    source: &Source,
    parsed: &ParsedSource,
    with_header: bool,
) -> io::Result<()> {
    if with_header {
        writeln!(out, "# {}", source.display_name())?;
    }
    for event in &parsed.events {
        print_event(out, event)?;
    }
    Ok(())
}

/// `<flags> <directory> [@<attribute>] [="<value>"] [+<offset>]`
fn print_event<W: Write>(out: &mut W, event: &OwnedEvent) -> io::Result<()> {
    let flags: Vec<&str> = FLAG_NAMES
        .iter()
        .filter(|(flag, _)| event.flags.contains(*flag))
        .map(|(_, name)| *name)
        .collect();

    write!(
        out,
        "{} {}",
        flags.join("|"),
        String::from_utf8_lossy(&event.directory)
    )?;
    if let Some(attribute) = &event.attribute {
        write!(out, " @{}", String::from_utf8_lossy(attribute))?;
    }
    if let Some(value) = &event.value {
        write!(out, " =\"{}\" +{}", value.escape_ascii(), event.offset)?;
    }
    writeln!(out)
}
