//! Error results that can be returned by the parser and the source readers
//!
//! Malformed markup is never an error: the parse stops and the caller sees
//! fewer events. Errors cover acquiring the input and the depth guard.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while acquiring or parsing a document
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read standard input: {0}")]
    Stdin(#[source] io::Error),

    #[error("nesting deeper than {limit} levels at offset {offset}, parse stopped")]
    DepthLimit { limit: usize, offset: usize },
}

/// Result that can be returned which holds either T or an Error
pub type Result<T> = std::result::Result<T, Error>;
