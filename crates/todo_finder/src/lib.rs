// crates/todo_finder/src/lib.rs

//! Scans a source tree for annotations and writes them to a JSON file.

pub mod config;

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fmt;
use std::path::PathBuf;

use find_source_files::find_source_files;
use todo_parser::{Todo, TodoParser};
use todos_serializer::{JsonTodosSerializer, TodosSerializer};

pub use config::AppConfig;

/// Annotations found in one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub todos: Vec<Todo>,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Found {} TODOs in {}:", self.todos.len(), self.path.display())?;
        for todo in &self.todos {
            write!(f, "\n{}", todo)?;
        }
        Ok(())
    }
}

/// Outcome of a whole scan.
#[derive(Debug)]
pub struct ScanReport {
    pub files_scanned: usize,
    /// Only files with at least one annotation, in path order.
    pub files: Vec<FileReport>,
    pub output: PathBuf,
}

impl ScanReport {
    pub fn total(&self) -> usize {
        self.files.iter().map(|f| f.todos.len()).sum()
    }
}

/// Discovers, parses and serializes according to `config`.
///
/// Files are parsed on a rayon pool. The first file that fails aborts the
/// scan; the sink only sees records once every file has parsed, so nothing
/// is written on failure.
pub fn run(config: &AppConfig) -> Result<ScanReport> {
    let files = find_source_files(&config.root, &config.file_filter())
        .with_context(|| format!("Failed to scan {}", config.root.display()))?;
    log::info!("Scanning {} files under {}", files.len(), config.root.display());

    let parser = if config.blame {
        TodoParser::with_blame()
    } else {
        TodoParser::plain()
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs.unwrap_or(0))
        .build()
        .context("Failed to build worker pool")?;

    let parsed: Vec<FileReport> = pool.install(|| {
        files
            .par_iter()
            .map(|path| -> Result<FileReport> {
                let todos = parser
                    .parse(path)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                Ok(FileReport {
                    path: path.clone(),
                    todos,
                })
            })
            .collect::<Result<Vec<_>>>()
    })?;

    let reports: Vec<FileReport> = parsed.into_iter().filter(|r| !r.todos.is_empty()).collect();
    let serializer = JsonTodosSerializer::new(&config.output);
    for report in &reports {
        serializer.add_all(report.todos.clone());
    }
    let output = serializer
        .serialize()
        .with_context(|| format!("Failed to write {}", serializer.output().display()))?;

    Ok(ScanReport {
        files_scanned: files.len(),
        files: reports,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_for(root: &std::path::Path, output: PathBuf) -> AppConfig {
        AppConfig {
            root: root.to_path_buf(),
            output,
            jobs: Some(2),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_run_collects_reports_in_path_order() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("B.java"), "// @todo #2:10min second\n").unwrap();
        fs::write(src.join("A.java"), "// @todo #1:5min first\n// TODO #3:5m third\n").unwrap();
        fs::write(src.join("C.java"), "class C {}\n").unwrap();
        let output = dir.path().join("out.json");

        let report = run(&config_for(&src, output.clone())).unwrap();
        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.total(), 3);
        assert_eq!(report.output, output);
        let paths: Vec<PathBuf> = report.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![src.join("A.java"), src.join("B.java")]);
        assert!(output.is_file());
    }

    #[test]
    fn test_each_record_is_serialized_once() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("A.java"), "// @todo #1:5min a\nint x;\n// @todo #2:5min b\n").unwrap();
        fs::write(dir.path().join("B.py"), "# FIXME #3:10m c\n").unwrap();
        let output = dir.path().join("out.json");

        let report = run(&config_for(dir.path(), output.clone())).unwrap();
        let written: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(report.total(), 3);
        assert_eq!(written.len(), report.total());
    }

    #[test]
    fn test_file_report_display() {
        let report = FileReport {
            path: PathBuf::from("src/A.java"),
            todos: todo_parser::parse_lines(
                std::path::Path::new("src/A.java"),
                &["// @todo #1:5min first"],
                todo_parser::LineMode::Plain,
            )
            .unwrap(),
        };
        assert_eq!(
            report.to_string(),
            "Found 1 TODOs in src/A.java:\n\
             TODO [Line: 1, TicketID: #1, Estimated Time: 5, Body: 'first', Path: 'src/A.java']"
        );
    }

    #[test]
    fn test_parse_failure_aborts_without_output() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Ok.java"), "// @todo #1:5min fine\n").unwrap();
        fs::write(dir.path().join("Bad.java"), "// @todo #1:99999999999min broken\n").unwrap();
        let output = dir.path().join("out.json");

        let err = run(&config_for(dir.path(), output.clone())).unwrap_err();
        assert!(format!("{:#}", err).contains("Bad.java"));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempdir().unwrap();
        let config = config_for(&dir.path().join("missing"), dir.path().join("out.json"));
        assert!(run(&config).is_err());
    }
}
