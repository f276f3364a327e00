//! Console interpretation.
//!
//! [`ConsoleInterpreter`] discharges [`TerminalOperation`] nodes against a
//! [`Terminal`]. The terminal is a capability: [`StdTerminal`] talks to real
//! streams, [`ScriptedTerminal`] replays canned input and records output.
//!
//! # Examples
//!
//! ```rust
//! use pureio::effect::{exit, put_str_ln, read_line, Outcome};
//! use pureio::interpreter::{ConsoleInterpreter, ScriptedTerminal};
//!
//! let program = put_str_ln("hello")
//!     .flat_map(|()| read_line())
//!     .flat_map(|line| put_str_ln(line))
//!     .flat_map(|()| exit(0));
//!
//! let mut interpreter = ConsoleInterpreter::new(ScriptedTerminal::new(["world"]));
//! let outcome = program.interpret(&mut interpreter)?;
//!
//! assert_eq!(outcome, Outcome::Terminated(0));
//! assert_eq!(interpreter.terminal().output(), ["hello", "world"]);
//! # Ok::<(), pureio::effect::InterpretError>(())
//! ```

use crate::effect::{
    Console, Discharge, InterpretError, Interpreter, Outcome, PureIO, TerminalOperation,
};
use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-oriented access to a terminal.
pub trait Terminal {
    /// Writes `text` followed by a line terminator.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the line cannot be written.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Reads the next line with its terminator (`\n` or `\r\n`) stripped.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if reading fails.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Ends the process with `code`.
    ///
    /// A real terminal never returns from this call. Test doubles may
    /// return, in which case the interpreter stops without resuming.
    fn exit(&mut self, code: i32);
}

/// A terminal over arbitrary buffered input and output streams.
#[derive(Debug)]
pub struct StdTerminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdTerminal<R, W> {
    /// Binds a terminal to the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl StdTerminal<StdinLock<'static>, Stdout> {
    /// Binds a terminal to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal for StdTerminal<R, W> {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn exit(&mut self, code: i32) {
        if let Err(error) = self.output.flush() {
            tracing::warn!(%error, "failed to flush terminal output before exit");
        }
        std::process::exit(code)
    }
}

/// A terminal that replays scripted input lines and records everything
/// written to it.
///
/// `exit` records the requested status and returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedTerminal {
    input: VecDeque<String>,
    output: Vec<String>,
    exit_code: Option<i32>,
}

impl ScriptedTerminal {
    /// Creates a terminal that will answer line requests with `lines`, in
    /// order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            exit_code: None,
        }
    }

    /// Lines written so far, terminators excluded.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Number of scripted lines not yet consumed.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    /// The status passed to `exit`, if it was called.
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }
}

impl Terminal for ScriptedTerminal {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.output.push(text.to_owned());
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

/// Discharges console effects against a [`Terminal`].
#[derive(Debug, Clone, Default)]
pub struct ConsoleInterpreter<T> {
    terminal: T,
}

impl<T: Terminal> ConsoleInterpreter<T> {
    /// Creates an interpreter over `terminal`.
    pub const fn new(terminal: T) -> Self {
        Self { terminal }
    }

    /// The terminal this interpreter drives.
    pub const fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Returns the terminal.
    pub fn into_inner(self) -> T {
        self.terminal
    }
}

impl ConsoleInterpreter<StdTerminal<StdinLock<'static>, Stdout>> {
    /// Creates an interpreter over the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(StdTerminal::stdio())
    }
}

impl<T: Terminal> Interpreter<Console> for ConsoleInterpreter<T> {
    fn discharge<Next: Clone + 'static>(
        &mut self,
        operation: TerminalOperation<Next>,
    ) -> Result<Discharge<Next>, InterpretError> {
        tracing::trace!(effect = operation.name(), "discharging");

        match operation {
            TerminalOperation::PutStrLn { text, next } => {
                self.terminal.write_line(&text).map_err(|error| {
                    tracing::warn!(%error, bytes = text.len(), "terminal write failed");
                    InterpretError::WriteLine(error)
                })?;
                Ok(Discharge::Resume(next))
            }
            TerminalOperation::ReadLine { resume } => match self.terminal.read_line() {
                Ok(Some(line)) => {
                    tracing::trace!(bytes = line.len(), "line read");
                    Ok(Discharge::Resume(resume(line)))
                }
                Ok(None) => {
                    tracing::warn!("input exhausted while a line was requested");
                    Err(InterpretError::EndOfInput)
                }
                Err(error) => {
                    tracing::warn!(%error, "terminal read failed");
                    Err(InterpretError::ReadLine(error))
                }
            },
            TerminalOperation::Exit { code, .. } => {
                tracing::debug!(code, "exit requested");
                self.terminal.exit(code);
                Ok(Discharge::Terminate(code))
            }
        }
    }
}

/// Runs `program` against the process's standard input and output.
///
/// An exit effect ends the process, so this returns only when the program
/// completes or a terminal action fails.
///
/// # Errors
///
/// Returns the first [`InterpretError`] raised while discharging.
pub fn run_console<A: Clone + 'static>(program: PureIO<A>) -> Result<Outcome<A>, InterpretError> {
    program.interpret(&mut ConsoleInterpreter::stdio())
}
