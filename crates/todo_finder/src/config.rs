// crates/todo_finder/src/config.rs

use std::path::PathBuf;

use find_source_files::FileFilter;

/// Output file used when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "todos.json";

/// Runtime configuration composed from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub root: PathBuf,
    pub blame: bool,
    pub output: PathBuf,
    pub extensions: Vec<String>, // empty == defaults
    pub excludes: Vec<String>,
    pub jobs: Option<usize>, // None == one worker per core
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            blame: false,
            output: PathBuf::from(DEFAULT_OUTPUT),
            extensions: Vec::new(),
            excludes: Vec::new(),
            jobs: None,
            verbose: false,
        }
    }
}

impl AppConfig {
    pub fn file_filter(&self) -> FileFilter {
        FileFilter::default()
            .with_extensions(&self.extensions)
            .excluding(&self.excludes)
    }
}
