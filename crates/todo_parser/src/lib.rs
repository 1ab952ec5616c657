// crates/todo_parser/src/lib.rs

//! Extracts `@todo`/`TODO`/`@fixme`/`FIXME` annotations from source files.
//!
//! An annotation opens on a line with a keyword followed by a
//! `#<ticket>:<minutes>` header, and continues over the following lines
//! whose text stays aligned with the keyword. See [`ContinuationTracker`]
//! for the alignment rule.

mod builder;
mod error;
mod matcher;
mod record;
mod tracker;

use std::path::Path;

pub use builder::TodoBuilder;
pub use error::{InvalidEstimate, ParseError};
pub use line_source::{FileLines, GitBlameLines, LineMode, LineSource};
pub use matcher::{content_of, expand_tabs, match_line, split_attribution, Attribution, TodoMatch};
pub use record::{todo_id, Todo};
pub use tracker::ContinuationTracker;

/// Parses already-loaded `lines` of `path`, in file order.
///
/// Tabs are expanded before any column is measured. On error nothing is
/// returned for the file.
pub fn parse_lines<S: AsRef<str>>(
    path: &Path,
    lines: &[S],
    mode: LineMode,
) -> Result<Vec<Todo>, ParseError> {
    let mut tracker = ContinuationTracker::new(path, mode);
    let mut todos = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let line = expand_tabs(line.as_ref());
        if let Some(todo) = tracker.advance(idx + 1, &line)? {
            todos.push(todo);
        }
    }
    todos.extend(tracker.finish());
    Ok(todos)
}

/// File-level parser bound to one [`LineSource`].
///
/// Holds no per-file state, so one instance can be shared across threads.
pub struct TodoParser {
    source: Box<dyn LineSource>,
}

impl TodoParser {
    pub fn new(source: Box<dyn LineSource>) -> Self {
        Self { source }
    }

    /// Reads files as they are on disk.
    pub fn plain() -> Self {
        Self::new(Box::new(FileLines))
    }

    /// Reads files through `git blame` and records author and timestamp.
    pub fn with_blame() -> Self {
        Self::new(Box::new(GitBlameLines))
    }

    pub fn mode(&self) -> LineMode {
        self.source.mode()
    }

    /// Returns every annotation in `path`, ordered by start line.
    pub fn parse(&self, path: &Path) -> Result<Vec<Todo>, ParseError> {
        let lines = self.source.read_lines(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read {} lines from {}", lines.len(), path.display());
        let todos = parse_lines(path, &lines, self.source.mode())?;
        log::debug!("Found {} annotations in {}", todos.len(), path.display());
        Ok(todos)
    }
}
