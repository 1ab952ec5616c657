// crates/find_source_files/src/lib.rs

use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extensions scanned when none are given.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "java", "js", "py", "rs", "ts", "kt", "go", "c", "h", "cpp", "swift", "m", "rb", "sh",
    "scala", "groovy",
];

/// Directory names never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", "target", "node_modules", "build", ".idea"];

/// Which files a scan picks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    extensions: Vec<String>,
    excluded_dirs: Vec<String>,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FileFilter {
    /// Replaces the allowed extensions. A leading dot is ignored, so `.rs`
    /// and `rs` are the same. An empty list keeps the defaults.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Adds directory names to skip on top of the current ones.
    pub fn excluding<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for dir in dirs {
            let dir = dir.as_ref().trim_end_matches('/');
            if !dir.is_empty() && !self.excluded_dirs.iter().any(|d| d == dir) {
                self.excluded_dirs.push(dir.to_string());
            }
        }
        self
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn excluded_dirs(&self) -> &[String] {
        &self.excluded_dirs
    }

    /// Extension comparison ignores ASCII case.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .excluded_dirs
                .iter()
                .any(|d| entry.file_name().to_string_lossy() == d.as_str())
    }
}

/// Walks `root` and returns the files `filter` accepts, sorted by path.
///
/// `root` may itself be a single file. Unreadable entries below the root are
/// skipped with a debug log; a missing root is an error.
pub fn find_source_files(root: &Path, filter: &FileFilter) -> io::Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("No such file or directory: {}", root.display()),
        ));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !filter.is_excluded_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
        .filter(|path| filter.accepts(path))
        .collect();
    files.sort();

    log::debug!("Found {} source files under {}", files.len(), root.display());
    Ok(files)
}
