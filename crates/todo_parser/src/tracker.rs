// crates/todo_parser/src/tracker.rs

//! Column-alignment state machine deciding where an annotation ends.
//!
//! Once an annotation is open, a following line extends its body when its
//! text is aligned at the anchor column:
//!
//! ```text
//! /** @todo #187:30min         <- opens, anchor = column 3
//!  *  To have multiple images  <- whitespace at column 3, continues
//!  *  for filtering.           <- continues
//!  */                          <- too short, closes
//! ```
//!
//! The same rule covers `//`, `#` and `*`-aligned block comments because all
//! of them present the body at a fixed column on every line.
//!
//! When a line repeats the opener's comment leader, its text must also be
//! indented past the keyword column, otherwise it is an ordinary comment:
//!
//! ```text
//! # TODO #1:30min multiline    <- opens, anchor = column 1
//! #  for python.               <- column 2 blank too, continues
//! # This is a normal comment.  <- column 2 is text, closes
//! ```

use std::path::{Path, PathBuf};

use line_source::LineMode;

use crate::builder::TodoBuilder;
use crate::error::ParseError;
use crate::matcher::{content_of, match_line, TodoMatch};
use crate::record::Todo;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Anchor {
    column: usize,
    /// Opener's text left of `column`, trimmed.
    leader: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Open(Anchor),
}

/// Drives one file's lines through matcher and builder.
///
/// Feed lines in order with [`ContinuationTracker::advance`], then call
/// [`ContinuationTracker::finish`] once the input is exhausted.
pub struct ContinuationTracker {
    path: PathBuf,
    mode: LineMode,
    state: State,
    builder: TodoBuilder,
}

impl ContinuationTracker {
    pub fn new(path: &Path, mode: LineMode) -> Self {
        let mut builder = TodoBuilder::new();
        builder.path(path);
        Self {
            path: path.to_path_buf(),
            mode,
            state: State::Idle,
            builder,
        }
    }

    /// Whether an annotation is currently open.
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Consumes line `number` (1-based, tabs already expanded).
    ///
    /// Returns the annotation this line closed, if any. A line that does not
    /// continue the open annotation closes it as of the previous line and is
    /// then evaluated again as a potential opener.
    pub fn advance(&mut self, number: usize, line: &str) -> Result<Option<Todo>, ParseError> {
        let opened = match_line(line, self.mode).map_err(|err| ParseError::Estimate {
            path: self.path.clone(),
            line: number,
            value: err.value,
            source: err.source,
        })?;

        let mut closed = None;
        if let State::Open(anchor) = &self.state {
            if opened.is_none() {
                if let Some(fragment) = continuation(line, self.mode, anchor) {
                    self.builder.push_fragment(fragment).end(number);
                    return Ok(None);
                }
            }
            closed = self.close();
        }

        if let Some(todo_match) = opened {
            self.open(number, todo_match);
        }
        Ok(closed)
    }

    /// Closes an annotation still open at end of input.
    pub fn finish(&mut self) -> Option<Todo> {
        match self.state {
            State::Open(_) => self.close(),
            State::Idle => None,
        }
    }

    fn open(&mut self, number: usize, todo_match: TodoMatch) {
        let (author, timestamp) = match todo_match.attribution {
            Some(a) => (Some(a.author), Some(a.timestamp)),
            None => (None, None),
        };
        self.builder
            .start(number)
            .end(number)
            .ticket_id(todo_match.ticket_id)
            .estimated_minutes(todo_match.estimated_minutes)
            .body(todo_match.first_fragment)
            .author(author)
            .timestamp(timestamp);
        self.state = State::Open(Anchor {
            column: todo_match.anchor,
            leader: todo_match.leader,
        });
    }

    fn close(&mut self) -> Option<Todo> {
        self.state = State::Idle;
        self.builder.build()
    }
}

/// Returns the body text `line` contributes, or `None` if it does not
/// continue the annotation anchored at `anchor`.
fn continuation<'a>(line: &'a str, mode: LineMode, anchor: &Anchor) -> Option<&'a str> {
    let content = content_of(line, mode)?;
    let mut chars = content.char_indices().skip(anchor.column);
    let (offset, at_anchor) = chars.next()?;
    if !at_anchor.is_whitespace() {
        return None;
    }

    // Only comment punctuation may sit left of the anchor, and it must have
    // the same shape as the opener's: code lines after a `//` annotation
    // have a blank leader and stop it.
    let leader = content[..offset].trim();
    if leader.chars().any(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    if leader.is_empty() != anchor.leader.is_empty() {
        return None;
    }

    // Same leader as the opener: the text must be indented past the keyword
    // column, or it is a sibling comment such as `// Returns ...`.
    if leader == anchor.leader && !chars.next().map_or(false, |(_, c)| c.is_whitespace()) {
        return None;
    }

    let fragment = content[offset..].trim();
    if fragment.is_empty() {
        None
    } else {
        Some(fragment)
    }
}
