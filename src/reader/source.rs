//! Source acquisition
//!
//! Reads a whole document into memory from a file or from standard input.
//! The parser works on complete buffers only.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Chunk size for reading unsized streams
const CHUNK_SIZE: usize = 4096;

/// Argument that selects standard input
pub const STDIN_ARG: &str = "-";

/// Where a document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input, read to its end
    Stdin,
    /// A file on disk
    Path(PathBuf),
}

impl Source {
    /// Interpret a command line argument; `-` means standard input
    pub fn from_arg(arg: impl AsRef<Path>) -> Self {
        let arg = arg.as_ref();
        if arg.as_os_str() == STDIN_ARG {
            Source::Stdin
        } else {
            Source::Path(arg.to_path_buf())
        }
    }

    /// Read the whole document
    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            Source::Stdin => read_all(io::stdin().lock()).map_err(Error::Stdin),
            Source::Path(path) => fs::read(path).map_err(|source| Error::Open {
                path: path.clone(),
                source,
            }),
        }
    }

    /// Name used in log messages and CLI output
    pub fn display_name(&self) -> String {
        match self {
            Source::Stdin => STDIN_ARG.to_string(),
            Source::Path(path) => path.display().to_string(),
        }
    }
}

/// Read a stream to its end, growing the buffer one chunk at a time
pub fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(CHUNK_SIZE);
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => return Ok(buffer),
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}
