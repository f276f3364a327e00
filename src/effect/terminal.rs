//! The console vocabulary: emit a line, read a line, terminate.
//!
//! # Examples
//!
//! ```rust
//! use pureio::effect::{put_str_ln, read_line, PureIO};
//!
//! let greet: PureIO<()> = put_str_ln("name?")
//!     .flat_map(|()| read_line())
//!     .flat_map(|name| put_str_ln(format!("hello, {name}")));
//! # let _ = greet;
//! ```

use super::algebra::EffectAlgebra;
use super::program::Program;
use std::fmt;
use std::rc::Rc;

/// One console effect node whose continuation position holds `Next`.
pub enum TerminalOperation<Next> {
    /// Emit `text` followed by a line terminator, then continue with `next`.
    PutStrLn {
        /// The text to emit, without its terminator.
        text: String,
        /// What follows the emission.
        next: Next,
    },
    /// Read one line (terminator stripped) and continue with `resume(line)`.
    ReadLine {
        /// Builds what follows from the line that was read.
        resume: Rc<dyn Fn(String) -> Next>,
    },
    /// End the process with `code`. `next` exists only to keep the node
    /// mappable and is never reached.
    Exit {
        /// The exit status.
        code: i32,
        /// Unreachable continuation.
        next: Next,
    },
}

impl<Next> TerminalOperation<Next> {
    /// Builds a [`PutStrLn`](TerminalOperation::PutStrLn) node.
    pub fn put_str_ln(text: impl Into<String>, next: Next) -> Self {
        Self::PutStrLn {
            text: text.into(),
            next,
        }
    }

    /// Builds a [`ReadLine`](TerminalOperation::ReadLine) node.
    pub fn read_line<F>(resume: F) -> Self
    where
        F: Fn(String) -> Next + 'static,
    {
        Self::ReadLine {
            resume: Rc::new(resume),
        }
    }

    /// Builds an [`Exit`](TerminalOperation::Exit) node.
    pub const fn exit(code: i32, next: Next) -> Self {
        Self::Exit { code, next }
    }

    /// The name of the active alternative, for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PutStrLn { .. } => "PutStrLn",
            Self::ReadLine { .. } => "ReadLine",
            Self::Exit { .. } => "Exit",
        }
    }
}

impl<Next: 'static> TerminalOperation<Next> {
    /// Applies `function` to the continuation position.
    ///
    /// Payloads (`text`, `code`) are untouched. For `ReadLine` the resume
    /// function is post-composed with `function`; nothing is read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::effect::TerminalOperation;
    ///
    /// let node = TerminalOperation::read_line(|line: String| line.len()).map(|n| n * 2);
    /// match node {
    ///     TerminalOperation::ReadLine { resume } => assert_eq!(resume("abc".to_string()), 6),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn map<Mapped, F>(self, function: F) -> TerminalOperation<Mapped>
    where
        F: Fn(Next) -> Mapped + 'static,
    {
        match self {
            Self::PutStrLn { text, next } => TerminalOperation::PutStrLn {
                text,
                next: function(next),
            },
            Self::ReadLine { resume } => TerminalOperation::ReadLine {
                resume: Rc::new(move |line| function(resume(line))),
            },
            Self::Exit { code, next } => TerminalOperation::Exit {
                code,
                next: function(next),
            },
        }
    }
}

impl<Next: Clone + 'static> TerminalOperation<Next> {
    /// Lifts this node into a one-effect program.
    pub fn lift(self) -> PureIO<Next> {
        Program::lift(self)
    }
}

impl<Next: Clone> Clone for TerminalOperation<Next> {
    fn clone(&self) -> Self {
        match self {
            Self::PutStrLn { text, next } => Self::PutStrLn {
                text: text.clone(),
                next: next.clone(),
            },
            Self::ReadLine { resume } => Self::ReadLine {
                resume: Rc::clone(resume),
            },
            Self::Exit { code, next } => Self::Exit {
                code: *code,
                next: next.clone(),
            },
        }
    }
}

impl<Next> fmt::Debug for TerminalOperation<Next> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PutStrLn { text, .. } => formatter
                .debug_struct("PutStrLn")
                .field("text", text)
                .finish_non_exhaustive(),
            Self::ReadLine { .. } => formatter.debug_struct("ReadLine").finish_non_exhaustive(),
            Self::Exit { code, .. } => formatter
                .debug_struct("Exit")
                .field("code", code)
                .finish_non_exhaustive(),
        }
    }
}

/// The console effect vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Console {}

impl EffectAlgebra for Console {
    const NAME: &'static str = "Console";

    type Operation<Next: Clone + 'static> = TerminalOperation<Next>;

    fn map<Next, Mapped, F>(operation: TerminalOperation<Next>, function: F) -> TerminalOperation<Mapped>
    where
        Next: Clone + 'static,
        Mapped: Clone + 'static,
        F: Fn(Next) -> Mapped + 'static,
    {
        operation.map(function)
    }
}

/// A program over the console vocabulary.
pub type PureIO<A> = Program<Console, A>;

/// A program that emits `text` as one line.
pub fn put_str_ln(text: impl Into<String>) -> PureIO<()> {
    TerminalOperation::put_str_ln(text, ()).lift()
}

/// A program that reads one line and yields it without its terminator.
pub fn read_line() -> PureIO<String> {
    TerminalOperation::read_line(|line| line).lift()
}

/// A program that ends the process with `code`.
///
/// Anything sequenced after it is never performed.
pub fn exit(code: i32) -> PureIO<()> {
    TerminalOperation::exit(code, ()).lift()
}

static_assertions::assert_impl_all!(PureIO<()>: Clone);
static_assertions::assert_not_impl_any!(PureIO<()>: Send, Sync);
