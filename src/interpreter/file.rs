//! File interpretation.
//!
//! [`FileInterpreter`] discharges [`FileOperation`] nodes against a
//! [`FileSystem`]. [`StdFileSystem`] uses the real file system;
//! [`InMemoryFileSystem`] keeps files in a map and has the same line
//! semantics.

use crate::effect::{
    Discharge, FileOperation, Files, InterpretError, Interpreter, Outcome, PureFileIO,
};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Whole-file reads and appends.
pub trait FileSystem {
    /// Reads every line of `path` in order, terminators (`\n` or `\r\n`)
    /// stripped. A final terminator does not produce an extra empty line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be opened or read.
    fn read_lines(&mut self, path: &Path) -> io::Result<Vec<String>>;

    /// Appends `text` to `path` exactly as given, creating the file if it
    /// does not exist. The write is complete when this returns.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be opened or
    /// written.
    fn append(&mut self, path: &Path, text: &str) -> io::Result<()>;
}

/// The operating system's file system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_lines(&mut self, path: &Path) -> io::Result<Vec<String>> {
        BufReader::new(File::open(path)?).lines().collect()
    }

    fn append(&mut self, path: &Path, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).create(true).open(path)?;
        file.write_all(text.as_bytes())
    }
}

/// A file system held in memory, keyed by path.
///
/// # Examples
///
/// ```rust
/// use pureio::interpreter::{FileSystem, InMemoryFileSystem};
/// use std::path::Path;
///
/// let mut files = InMemoryFileSystem::new().with_file("notes.txt", "one\r\ntwo\n");
/// assert_eq!(files.read_lines(Path::new("notes.txt")).unwrap(), ["one", "two"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryFileSystem {
    files: BTreeMap<PathBuf, String>,
}

impl InMemoryFileSystem {
    /// Creates an empty file system.
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a file with the given contents.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// The full contents of `path`, if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read_lines(&mut self, path: &Path) -> io::Result<Vec<String>> {
        self.files
            .get(path)
            .map(|contents| contents.lines().map(str::to_owned).collect())
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn append(&mut self, path: &Path, text: &str) -> io::Result<()> {
        self.files.entry(path.to_path_buf()).or_default().push_str(text);
        Ok(())
    }
}

/// Discharges file effects against a [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct FileInterpreter<S> {
    file_system: S,
}

impl<S: FileSystem> FileInterpreter<S> {
    /// Creates an interpreter over `file_system`.
    pub const fn new(file_system: S) -> Self {
        Self { file_system }
    }

    /// The file system this interpreter drives.
    pub const fn file_system(&self) -> &S {
        &self.file_system
    }

    /// Returns the file system.
    pub fn into_inner(self) -> S {
        self.file_system
    }
}

impl<S: FileSystem> Interpreter<Files> for FileInterpreter<S> {
    fn discharge<Next: Clone + 'static>(
        &mut self,
        operation: FileOperation<Next>,
    ) -> Result<Discharge<Next>, InterpretError> {
        match operation {
            FileOperation::ReadLines { path, resume } => {
                tracing::trace!(effect = "ReadLines", path = %path.display(), "discharging");
                match self.file_system.read_lines(&path) {
                    Ok(lines) => {
                        tracing::trace!(lines = lines.len(), "file read");
                        Ok(Discharge::Resume(resume(lines)))
                    }
                    Err(source) => {
                        tracing::warn!(path = %path.display(), error = %source, "file read failed");
                        Err(InterpretError::ReadFile { path, source })
                    }
                }
            }
            FileOperation::AppendText { path, text, next } => {
                tracing::trace!(
                    effect = "AppendText",
                    path = %path.display(),
                    bytes = text.len(),
                    "discharging"
                );
                if let Err(source) = self.file_system.append(&path, &text) {
                    tracing::warn!(path = %path.display(), error = %source, "file append failed");
                    return Err(InterpretError::AppendFile { path, source });
                }
                Ok(Discharge::Resume(next))
            }
        }
    }
}

/// Runs `program` against the operating system's file system.
///
/// # Errors
///
/// Returns the first [`InterpretError`] raised while discharging.
pub fn run_files<A: Clone + 'static>(program: PureFileIO<A>) -> Result<Outcome<A>, InterpretError> {
    program.interpret(&mut FileInterpreter::new(StdFileSystem))
}
