// crates/todo_parser/src/error.rs

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the parse of a single file.
///
/// No partial results accompany either variant: the caller gets the error
/// and nothing else for that file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The line source could not produce the file's lines.
    #[error("could not read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A header matched the grammar but its estimate does not fit in `u32`.
    #[error("invalid estimate '{}' at {}:{}", .value, .path.display(), .line)]
    Estimate {
        path: PathBuf,
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Matcher-level estimate failure; the tracker adds path and line.
#[derive(Error, Debug)]
#[error("invalid estimate '{value}'")]
pub struct InvalidEstimate {
    pub value: String,
    #[source]
    pub source: ParseIntError,
}
