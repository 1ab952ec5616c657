// crates/todo_parser/src/matcher.rs

//! Recognizes the line that opens an annotation.
//!
//! All functions here are pure; the compiled patterns are immutable statics.

use std::borrow::Cow;

use line_source::LineMode;
use once_cell::sync::Lazy;
use regex::Regex;
use todo_marker::{markers_alternation, ATTRIBUTION_PATTERN, HEADER_PATTERN, TAB_WIDTH};

use crate::error::InvalidEstimate;

static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(&markers_alternation()).unwrap());

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(HEADER_PATTERN).unwrap());

static ATTRIBUTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(ATTRIBUTION_PATTERN).unwrap());

/// Author and timestamp taken from a `git blame` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub author: String,
    pub timestamp: String,
}

/// Everything the tracker needs from an opening line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoMatch {
    /// The keyword as written, e.g. `@todo`.
    pub keyword: String,
    pub ticket_id: String,
    pub estimated_minutes: u32,
    /// Character column just left of the keyword. Continuation lines need
    /// whitespace here and their text starts from it.
    pub anchor: usize,
    /// Text left of the anchor on the opening line, trimmed: `//`, `*`, `/**`
    /// or empty when the keyword is only indented.
    pub leader: String,
    /// Text following the header on the opening line, trimmed.
    pub first_fragment: String,
    pub attribution: Option<Attribution>,
}

/// Replaces every tab with [`TAB_WIDTH`] spaces.
pub fn expand_tabs(line: &str) -> Cow<'_, str> {
    if line.contains('\t') {
        Cow::Owned(line.replace('\t', &" ".repeat(TAB_WIDTH)))
    } else {
        Cow::Borrowed(line)
    }
}

/// Splits a `git blame` line into its attribution and the file content.
/// Returns `None` when the line does not carry the expected prefix.
pub fn split_attribution(line: &str) -> Option<(Attribution, &str)> {
    let caps = ATTRIBUTION_RE.captures(line)?;
    let prefix = caps.get(0)?;
    let attribution = Attribution {
        author: caps[1].trim().to_string(),
        timestamp: caps[2].to_string(),
    };
    Some((attribution, &line[prefix.end()..]))
}

/// Returns the file content of `line` for the given mode, or `None` for an
/// attributed line without a valid prefix.
pub fn content_of(line: &str, mode: LineMode) -> Option<&str> {
    match mode {
        LineMode::Plain => Some(line),
        LineMode::Attributed => split_attribution(line).map(|(_, content)| content),
    }
}

/// Decides whether `line` opens an annotation.
///
/// Only the first keyword on the line is considered; if its header is
/// malformed the line is ordinary content, even when a later keyword would
/// have a valid one.
pub fn match_line(line: &str, mode: LineMode) -> Result<Option<TodoMatch>, InvalidEstimate> {
    let (attribution, content) = match mode {
        LineMode::Plain => (None, line),
        LineMode::Attributed => match split_attribution(line) {
            Some((attribution, content)) => (Some(attribution), content),
            None => return Ok(None),
        },
    };

    let marker = match MARKER_RE.find(content) {
        Some(m) => m,
        None => return Ok(None),
    };
    let after_marker = &content[marker.end()..];
    let header = match HEADER_RE.captures(after_marker) {
        Some(caps) => caps,
        None => return Ok(None),
    };

    let digits = &header[2];
    let estimated_minutes = digits.parse::<u32>().map_err(|source| InvalidEstimate {
        value: digits.to_string(),
        source,
    })?;

    let marker_column = content[..marker.start()].chars().count();
    let anchor = marker_column.saturating_sub(1);
    let leader: String = content.chars().take(anchor).collect();
    let header_end = header.get(0).map_or(0, |m| m.end());

    Ok(Some(TodoMatch {
        keyword: marker.as_str().to_string(),
        ticket_id: header[1].to_string(),
        estimated_minutes,
        anchor,
        leader: leader.trim().to_string(),
        first_fragment: after_marker[header_end..].trim().to_string(),
        attribution,
    }))
}
