// crates/line_source/src/lib.rs

//! Where the parser gets its lines from.
//!
//! The parser never touches the file system or spawns processes itself: it
//! asks a [`LineSource`] for the lines of a path. `FileLines` reads the file
//! as-is; `GitBlameLines` returns `git blame` output, where every line carries
//! the author and timestamp of its last change in front of the content.

use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Whether lines come with a `git blame` attribution prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    Plain,
    Attributed,
}

/// Supplies the ordered lines of a file.
pub trait LineSource: Send + Sync {
    /// The shape of the lines returned by [`LineSource::read_lines`].
    fn mode(&self) -> LineMode;

    /// Returns every line of `path`, without line terminators.
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Plain read of the file content.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLines;

impl LineSource for FileLines {
    fn mode(&self) -> LineMode {
        LineMode::Plain
    }

    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let bytes = fs::read(path)?;
        Ok(split_lines(&String::from_utf8_lossy(&bytes)))
    }
}

/// Attributed read via `git blame`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitBlameLines;

impl LineSource for GitBlameLines {
    fn mode(&self) -> LineMode {
        LineMode::Attributed
    }

    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Not a file path: {}", path.display()),
            )
        })?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        // Run from the file's directory so nested repositories resolve correctly.
        let output = Command::new("git")
            .args(["blame", "--date=iso", "--"])
            .arg(file_name)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                io::Error::new(e.kind(), format!("Error executing git blame: {}", e))
            })?;

        if !output.status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "git blame failed for {}: {}",
                    path.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        log::debug!("git blame returned attribution for {}", path.display());
        Ok(split_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Splits text into lines, dropping `\n` / `\r\n` terminators.
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}
