// crates/todo_parser/src/builder.rs

use std::path::Path;

use todo_marker::AUTOGENERATED_MARKER;

use crate::record::Todo;

/// Accumulates one annotation and turns it into a [`Todo`].
///
/// The builder is reusable: [`TodoBuilder::build`] clears everything but the
/// path, so one instance serves every annotation of a file.
#[derive(Debug, Default)]
pub struct TodoBuilder {
    start: usize,
    end: usize,
    ticket_id: String,
    estimated_minutes: u32,
    fragments: Vec<String>,
    path: String,
    author: Option<String>,
    timestamp: Option<String>,
}

impl TodoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, line: usize) -> &mut Self {
        self.start = line;
        self
    }

    pub fn end(&mut self, line: usize) -> &mut Self {
        self.end = line;
        self
    }

    pub fn ticket_id(&mut self, ticket_id: impl Into<String>) -> &mut Self {
        self.ticket_id = ticket_id.into();
        self
    }

    pub fn estimated_minutes(&mut self, minutes: u32) -> &mut Self {
        self.estimated_minutes = minutes;
        self
    }

    /// Replaces the body collected so far.
    pub fn body(&mut self, body: impl Into<String>) -> &mut Self {
        self.fragments.clear();
        self.fragments.push(body.into());
        self
    }

    /// Appends a continuation line's text to the body.
    pub fn push_fragment(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.fragments.push(fragment.into());
        self
    }

    /// Sets the source path; a leading `./` is dropped.
    pub fn path(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref().to_string_lossy();
        self.path = path.strip_prefix("./").unwrap_or(&path[..]).to_string();
        self
    }

    pub fn author(&mut self, author: Option<String>) -> &mut Self {
        self.author = author;
        self
    }

    pub fn timestamp(&mut self, timestamp: Option<String>) -> &mut Self {
        self.timestamp = timestamp;
        self
    }

    /// Finalizes the current annotation and resets the builder.
    ///
    /// Returns `None` for a blank body or a body starting with
    /// `Autogenerated`.
    pub fn build(&mut self) -> Option<Todo> {
        let body = normalize_body(&self.fragments);
        let start = self.start;
        let end = self.end.max(start);
        let ticket_id = std::mem::take(&mut self.ticket_id);
        let estimated_minutes = self.estimated_minutes;
        let author = self.author.take();
        let timestamp = self.timestamp.take();
        self.reset();

        if body.is_empty() || body.starts_with(AUTOGENERATED_MARKER) {
            log::debug!(
                "Skipping {} at {}:{}: empty or autogenerated body",
                ticket_id,
                self.path,
                start
            );
            return None;
        }
        if ticket_id.is_empty() {
            log::warn!("Skipping annotation without ticket at {}:{}", self.path, start);
            return None;
        }

        Some(Todo::new(
            start,
            end,
            ticket_id,
            estimated_minutes,
            body,
            self.path.clone(),
            author,
            timestamp,
        ))
    }

    fn reset(&mut self) {
        self.start = 0;
        self.end = 0;
        self.ticket_id.clear();
        self.estimated_minutes = 0;
        self.fragments.clear();
        self.author = None;
        self.timestamp = None;
    }
}

/// Joins the fragments with single spaces, collapsing whitespace runs.
fn normalize_body(fragments: &[String]) -> String {
    fragments
        .iter()
        .flat_map(|fragment| fragment.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(builder: &mut TodoBuilder) -> &mut TodoBuilder {
        builder
            .path("./src/Main.java")
            .start(3)
            .end(5)
            .ticket_id("#12")
            .estimated_minutes(45)
    }

    #[test]
    fn test_build_joins_and_normalizes_fragments() {
        let mut builder = TodoBuilder::new();
        filled(&mut builder)
            .body("  first   part ")
            .push_fragment("second\tpart")
            .push_fragment("");
        let todo = builder.build().unwrap();
        assert_eq!(todo.body(), "first part second part");
        assert_eq!(todo.start(), 3);
        assert_eq!(todo.end(), 5);
        assert_eq!(todo.ticket_id(), "#12");
        assert_eq!(todo.estimated_minutes(), 45);
        assert_eq!(todo.path(), "src/Main.java");
        assert!(todo.author().is_none());
        assert!(todo.timestamp().is_none());
    }

    #[test]
    fn test_blank_body_is_discarded() {
        let mut builder = TodoBuilder::new();
        filled(&mut builder).body("   ");
        assert!(builder.build().is_none());
    }

    #[test]
    fn test_autogenerated_body_is_discarded() {
        let mut builder = TodoBuilder::new();
        filled(&mut builder).body("Autogenerated method stub");
        assert!(builder.build().is_none());
    }

    #[test]
    fn test_builder_resets_but_keeps_path() {
        let mut builder = TodoBuilder::new();
        filled(&mut builder)
            .body("first")
            .author(Some("Jane".to_string()))
            .timestamp(Some("2021-01-18 12:29:17 +0200".to_string()));
        let first = builder.build().unwrap();
        assert_eq!(first.author(), Some("Jane"));

        builder.start(9).end(9).ticket_id("#13").body("second");
        let second = builder.build().unwrap();
        assert_eq!(second.path(), "src/Main.java");
        assert_eq!(second.body(), "second");
        assert_eq!(second.estimated_minutes(), 0);
        assert!(second.author().is_none());
    }

    #[test]
    fn test_discarded_build_still_resets() {
        let mut builder = TodoBuilder::new();
        filled(&mut builder).body("Autogenerated");
        assert!(builder.build().is_none());

        builder.start(7).end(7).ticket_id("#2").push_fragment("kept");
        let todo = builder.build().unwrap();
        assert_eq!(todo.body(), "kept");
        assert_eq!(todo.start(), 7);
    }

    #[test]
    fn test_end_never_precedes_start() {
        let mut builder = TodoBuilder::new();
        builder.path("A.java").start(4).ticket_id("#1").body("x");
        let todo = builder.build().unwrap();
        assert_eq!(todo.end(), 4);
    }

    #[test]
    fn test_path_without_dot_slash_is_kept() {
        let mut builder = TodoBuilder::new();
        builder.path("lib/x.rs").start(1).end(1).ticket_id("#1").body("x");
        assert_eq!(builder.build().unwrap().path(), "lib/x.rs");
    }
}
