//! Effect descriptions as data.
//!
//! This module provides the free-program layer of the runtime:
//!
//! - [`EffectAlgebra`]: The abstraction over an effect vocabulary
//! - [`Program`]: A program over a vocabulary, sequenced by a trampoline
//! - [`TerminalOperation`] / [`Console`]: Emit a line, read a line, terminate
//! - [`FileOperation`] / [`Files`]: Read a file as lines, append text
//! - [`Interpreter`]: The contract for discharging effect nodes
//! - [`InterpretError`]: Failures of real actions
//!
//! Programs are built from the smart constructors ([`put_str_ln`],
//! [`read_line`], [`exit`], [`read_lines`], [`append_text`]) and composed
//! with `flat_map`. Nothing runs until a program is handed to an
//! interpreter.
//!
//! # Examples
//!
//! ```rust
//! use pureio::effect::{exit, put_str_ln, read_line, PureIO};
//!
//! let program: PureIO<()> = put_str_ln("hello")
//!     .flat_map(|()| read_line())
//!     .flat_map(|line| put_str_ln(line))
//!     .flat_map(|()| exit(0));
//! # let _ = program;
//! ```

mod algebra;
mod error;
mod file;
mod interpret;
mod program;
mod terminal;

pub use algebra::EffectAlgebra;
pub use error::InterpretError;
pub use file::{append_text, read_lines, FileOperation, Files, PureFileIO};
pub use interpret::{Discharge, Interpreter, Outcome};
pub use program::Program;
pub use terminal::{exit, put_str_ln, read_line, Console, PureIO, TerminalOperation};
