// crates/todos_serializer/src/lib.rs

//! Collects parsed annotations from many workers and writes them out once.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use todo_parser::Todo;

/// Sink for finished annotations.
///
/// `add_all` may be called concurrently from worker threads; `serialize` is
/// called once after all workers are done.
pub trait TodosSerializer: Send + Sync {
    fn add_all(&self, todos: Vec<Todo>);

    /// Writes everything added so far and returns where it went.
    fn serialize(&self) -> Result<PathBuf>;
}

/// Wire shape of one annotation in `todos.json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonTodo<'a> {
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
    start: usize,
    end: usize,
    originating_ticket: &'a str,
    estimated_time: u32,
    body: &'a str,
    file: &'a str,
}

impl<'a> From<&'a Todo> for JsonTodo<'a> {
    fn from(todo: &'a Todo) -> Self {
        Self {
            id: todo.id(),
            author: todo.author(),
            timestamp: todo.timestamp(),
            start: todo.start(),
            end: todo.end(),
            originating_ticket: todo.ticket_id(),
            estimated_time: todo.estimated_minutes(),
            body: todo.body(),
            file: todo.path(),
        }
    }
}

/// Writes a pretty-printed JSON array, replacing any previous file.
pub struct JsonTodosSerializer {
    output: PathBuf,
    todos: Mutex<Vec<Todo>>,
}

impl JsonTodosSerializer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            todos: Mutex::new(Vec::new()),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Number of annotations collected so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A worker that panicked mid-push leaves the vector intact, so a
    // poisoned lock is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Todo>> {
        self.todos.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TodosSerializer for JsonTodosSerializer {
    fn add_all(&self, todos: Vec<Todo>) {
        if !todos.is_empty() {
            self.lock().extend(todos);
        }
    }

    fn serialize(&self) -> Result<PathBuf> {
        let mut todos = self.lock().clone();
        todos.sort_by(|a, b| a.path().cmp(b.path()).then(a.start().cmp(&b.start())));
        let records: Vec<JsonTodo<'_>> = todos.iter().map(JsonTodo::from).collect();

        if self.output.exists() {
            fs::remove_file(&self.output).with_context(|| {
                format!("Existing {} could not be deleted", self.output.display())
            })?;
        }

        let file = fs::File::create(&self.output)
            .with_context(|| format!("Failed to create {}", self.output.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &records)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        log::info!("Serialized {} TODOs to {}", records.len(), self.output.display());
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_parser::{parse_lines, LineMode};

    #[test]
    fn test_json_todo_field_names() {
        let todos = parse_lines(
            Path::new("./src/A.java"),
            &["// @todo #153:30min Add tests."],
            LineMode::Plain,
        )
        .unwrap();
        let value = serde_json::to_value(JsonTodo::from(&todos[0])).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["body", "end", "estimatedTime", "file", "id", "originatingTicket", "start"]
        );
        assert_eq!(object["originatingTicket"], "#153");
        assert_eq!(object["estimatedTime"], 30);
        assert_eq!(object["file"], "src/A.java");
        assert_eq!(object["id"], todos[0].id());
    }

    #[test]
    fn test_add_all_accumulates() {
        let serializer = JsonTodosSerializer::new("unused.json");
        assert_eq!(serializer.output(), Path::new("unused.json"));
        assert!(serializer.is_empty());
        let todos = parse_lines(
            Path::new("A.java"),
            &["// TODO #1:5m one", "// TODO #2:5m two"],
            LineMode::Plain,
        )
        .unwrap();
        serializer.add_all(todos);
        serializer.add_all(Vec::new());
        assert_eq!(serializer.len(), 2);
    }
}
