//! Interpreters that perform effects for real (or against test doubles).
//!
//! - [`ConsoleInterpreter`]: Console effects over a [`Terminal`]
//! - [`FileInterpreter`]: File effects over a [`FileSystem`]
//!
//! Each interpreter is constructed over a capability value, so the same
//! program can run against the process's streams and files or against
//! [`ScriptedTerminal`] / [`InMemoryFileSystem`] in tests.

#[cfg(feature = "console")]
mod console;
#[cfg(feature = "file")]
mod file;

#[cfg(feature = "console")]
pub use console::{run_console, ConsoleInterpreter, ScriptedTerminal, StdTerminal, Terminal};
#[cfg(feature = "file")]
pub use file::{run_files, FileInterpreter, FileSystem, InMemoryFileSystem, StdFileSystem};
