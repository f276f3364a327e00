//! Error types for effect interpretation.
//!
//! Building and sequencing programs cannot fail. Only an interpreter that
//! performs a real action can, and when it does the failure aborts
//! interpretation: the program is not resumed and never sees the error.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A failure of a real action performed while discharging an effect node.
///
/// # Examples
///
/// ```rust
/// use pureio::effect::InterpretError;
/// use std::io;
/// use std::path::PathBuf;
///
/// let error = InterpretError::ReadFile {
///     path: PathBuf::from("missing.txt"),
///     source: io::Error::from(io::ErrorKind::NotFound),
/// };
/// assert!(error.to_string().starts_with("failed to read `missing.txt`"));
/// ```
#[derive(Debug, Error)]
pub enum InterpretError {
    /// Emitting a line to the terminal failed.
    #[error("failed to write line to terminal: {0}")]
    WriteLine(#[source] io::Error),

    /// Reading a line from the terminal failed.
    #[error("failed to read line from terminal: {0}")]
    ReadLine(#[source] io::Error),

    /// A line was requested but the input stream was exhausted.
    #[error("end of input reached while a line was requested")]
    EndOfInput,

    /// Reading a file failed.
    #[error("failed to read `{}`: {source}", .path.display())]
    ReadFile {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Appending to a file failed.
    #[error("failed to append to `{}`: {source}", .path.display())]
    AppendFile {
        /// The file that was being appended to.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl InterpretError {
    /// Returns the underlying I/O error kind, if any.
    ///
    /// [`EndOfInput`](InterpretError::EndOfInput) reports
    /// [`io::ErrorKind::UnexpectedEof`].
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::WriteLine(source)
            | Self::ReadLine(source)
            | Self::ReadFile { source, .. }
            | Self::AppendFile { source, .. } => source.kind(),
            Self::EndOfInput => io::ErrorKind::UnexpectedEof,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error as _;

    #[rstest]
    fn test_display_names_the_path() {
        let error = InterpretError::AppendFile {
            path: PathBuf::from("/tmp/out.log"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(error.to_string().contains("`/tmp/out.log`"));
    }

    #[rstest]
    fn test_source_is_preserved() {
        let error = InterpretError::WriteLine(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(error.source().is_some());
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
    }

    #[rstest]
    fn test_end_of_input_kind() {
        assert!(InterpretError::EndOfInput.source().is_none());
        assert_eq!(
            InterpretError::EndOfInput.kind(),
            io::ErrorKind::UnexpectedEof
        );
    }
}
