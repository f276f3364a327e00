//! The file vocabulary: read a whole file as lines, append text.

use super::algebra::EffectAlgebra;
use super::program::Program;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

/// One file effect node whose continuation position holds `Next`.
pub enum FileOperation<Next> {
    /// Read every line of `path` in order and continue with `resume(lines)`.
    ReadLines {
        /// The file to read.
        path: PathBuf,
        /// Builds what follows from the lines that were read.
        resume: Rc<dyn Fn(Vec<String>) -> Next>,
    },
    /// Append `text` verbatim to `path`, creating it if absent, then continue
    /// with `next`.
    AppendText {
        /// The file to append to.
        path: PathBuf,
        /// The text to append. No terminator is added.
        text: String,
        /// What follows the append.
        next: Next,
    },
}

impl<Next> FileOperation<Next> {
    /// Builds a [`ReadLines`](FileOperation::ReadLines) node.
    pub fn read_lines<F>(path: impl Into<PathBuf>, resume: F) -> Self
    where
        F: Fn(Vec<String>) -> Next + 'static,
    {
        Self::ReadLines {
            path: path.into(),
            resume: Rc::new(resume),
        }
    }

    /// Builds an [`AppendText`](FileOperation::AppendText) node.
    pub fn append_text(path: impl Into<PathBuf>, text: impl Into<String>, next: Next) -> Self {
        Self::AppendText {
            path: path.into(),
            text: text.into(),
            next,
        }
    }

    /// The name of the active alternative, for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReadLines { .. } => "ReadLines",
            Self::AppendText { .. } => "AppendText",
        }
    }
}

impl<Next: 'static> FileOperation<Next> {
    /// Applies `function` to the continuation position, keeping `path` and
    /// `text` as they are.
    pub fn map<Mapped, F>(self, function: F) -> FileOperation<Mapped>
    where
        F: Fn(Next) -> Mapped + 'static,
    {
        match self {
            Self::ReadLines { path, resume } => FileOperation::ReadLines {
                path,
                resume: Rc::new(move |lines| function(resume(lines))),
            },
            Self::AppendText { path, text, next } => FileOperation::AppendText {
                path,
                text,
                next: function(next),
            },
        }
    }
}

impl<Next: Clone + 'static> FileOperation<Next> {
    /// Lifts this node into a one-effect program.
    pub fn lift(self) -> PureFileIO<Next> {
        Program::lift(self)
    }
}

impl<Next: Clone> Clone for FileOperation<Next> {
    fn clone(&self) -> Self {
        match self {
            Self::ReadLines { path, resume } => Self::ReadLines {
                path: path.clone(),
                resume: Rc::clone(resume),
            },
            Self::AppendText { path, text, next } => Self::AppendText {
                path: path.clone(),
                text: text.clone(),
                next: next.clone(),
            },
        }
    }
}

impl<Next> fmt::Debug for FileOperation<Next> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadLines { path, .. } => formatter
                .debug_struct("ReadLines")
                .field("path", path)
                .finish_non_exhaustive(),
            Self::AppendText { path, text, .. } => formatter
                .debug_struct("AppendText")
                .field("path", path)
                .field("text", text)
                .finish_non_exhaustive(),
        }
    }
}

/// The file effect vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Files {}

impl EffectAlgebra for Files {
    const NAME: &'static str = "Files";

    type Operation<Next: Clone + 'static> = FileOperation<Next>;

    fn map<Next, Mapped, F>(operation: FileOperation<Next>, function: F) -> FileOperation<Mapped>
    where
        Next: Clone + 'static,
        Mapped: Clone + 'static,
        F: Fn(Next) -> Mapped + 'static,
    {
        operation.map(function)
    }
}

/// A program over the file vocabulary.
pub type PureFileIO<A> = Program<Files, A>;

/// A program that reads every line of `path`, terminators stripped.
///
/// # Examples
///
/// ```rust
/// use pureio::effect::{append_text, read_lines, PureFileIO};
///
/// let copy: PureFileIO<()> = read_lines("in.txt").flat_map(|lines| {
///     append_text("out.txt", lines.iter().map(|line| format!("{line}\n")).collect::<String>())
/// });
/// # let _ = copy;
/// ```
pub fn read_lines(path: impl Into<PathBuf>) -> PureFileIO<Vec<String>> {
    FileOperation::read_lines(path, |lines| lines).lift()
}

/// A program that appends `text` to `path` exactly as given.
pub fn append_text(path: impl Into<PathBuf>, text: impl Into<String>) -> PureFileIO<()> {
    FileOperation::append_text(path, text, ()).lift()
}
