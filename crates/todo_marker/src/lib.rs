// crates/todo_marker/src/lib.rs

//! Marker keywords and header grammar shared by the parser and its tests.
//!
//! Everything here is plain data; compiled regexes live next to the code
//! that uses them (`todo_parser::matcher`).

/// Keywords that may open an annotation, in no particular priority: the
/// parser takes whichever occurs first on the line.
pub const MARKERS: [&str; 4] = ["@todo", "TODO", "@fixme", "FIXME"];

/// Header that must follow a marker, e.g. `#153:30min`.
///
/// Groups: 1 = ticket id including `#`, 2 = estimate digits.
/// The unit is optional and limited to `m`, `min`, `mins`.
pub const HEADER_PATTERN: &str = r"^\W*(#\d+):(\d+)(?:mins|min|m)?\b";

/// Prefix `git blame` puts in front of every line:
/// `<sha> (<author> <yyyy-mm-dd hh:mm:ss +hhmm> <lineno>) `.
///
/// Groups: 1 = author (padded), 2 = timestamp.
/// The leading `.*?` is lazy so a `(` in the code never shifts the match.
pub const ATTRIBUTION_PATTERN: &str =
    r"^.*?\((.+?)\s+(\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}\s[+-]\d{4})\s+\d+\)\s";

/// Bodies starting with this are tool boilerplate and never reported.
pub const AUTOGENERATED_MARKER: &str = "Autogenerated";

/// Tabs are expanded to this many spaces before any column arithmetic.
pub const TAB_WIDTH: usize = 4;

/// Returns the marker regex alternation, e.g. `@todo|TODO|@fixme|FIXME`.
pub fn markers_alternation() -> String {
    MARKERS
        .iter()
        .map(|m| regex_escape(m))
        .collect::<Vec<_>>()
        .join("|")
}

// The markers only contain `@` and letters; keep this crate free of deps.
fn regex_escape(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            if c.is_ascii_alphanumeric() || c == '@' || c == '_' {
                vec![c]
            } else {
                vec!['\\', c]
            }
        })
        .collect()
}
