//! Free programs over an effect algebra.
//!
//! A [`Program<V, A>`] describes a sequence of effect nodes from vocabulary
//! `V` that eventually produces an `A`. Building one performs no action.
//!
//! Sequencing uses the same codensity shape as [`Trampoline`]: binds applied
//! to a program are queued next to its first sub-program instead of being
//! pushed into the effect node, so an effect node is mapped exactly once,
//! when [`Program::resume`] reaches it, whatever the number of binds built on
//! top of it. Resuming uses constant stack however the program was composed.
//!
//! # Examples
//!
//! ```rust
//! use pureio::control::Either;
//! use pureio::effect::{put_str_ln, PureIO, TerminalOperation};
//!
//! let program: PureIO<u32> = put_str_ln("hello").map(|()| 42);
//!
//! match program.resume() {
//!     Either::Left(TerminalOperation::PutStrLn { text, next }) => {
//!         assert_eq!(text, "hello");
//!         assert!(matches!(next.resume(), Either::Right(42)));
//!     }
//!     _ => unreachable!("the first node is the put"),
//! }
//! ```
//!
//! [`Trampoline`]: crate::control::Trampoline

use super::algebra::EffectAlgebra;
use super::error::InterpretError;
use super::interpret::{Discharge, Interpreter, Outcome};
use crate::control::{erase, recover, Arrow, ContinuationQueue, Either, Erased, Identity};
use std::fmt;
use std::rc::Rc;

type Rebind<V, A, B> = Rc<dyn Fn(A) -> Program<V, B>>;

/// A program over effect vocabulary `V` with result type `A`.
///
/// Programs are immutable descriptions. Cloning one is cheap and
/// interpreting a clone leaves the original untouched, so the same program
/// can be run several times against different interpreters.
///
/// # Laws
///
/// - **Left Identity**: `Program::pure(a).flat_map(f)` behaves as `f(a)`
/// - **Right Identity**: `m.flat_map(Program::pure)` behaves as `m`
/// - **Associativity**: `m.flat_map(f).flat_map(g)` behaves as `m.flat_map(|x| f(x).flat_map(g))`
///
/// "Behaves as" means: interpreted against the same scripted environment,
/// both perform the same actions in the same order and yield the same outcome.
pub struct Program<V: EffectAlgebra, A: Clone + 'static> {
    node: Box<Node<V, A>>,
}

enum Node<V: EffectAlgebra, A: Clone + 'static> {
    Pure(A),
    Defer(Identity<Program<V, A>>),
    Effect(V::Operation<Program<V, A>>),
    Bind(Bound<V, A>),
}

/// A sub-program of hidden result type, the binds waiting on it, and the
/// final typed continuation.
struct Bound<V: EffectAlgebra, A: Clone + 'static> {
    sub: Sub<V>,
    continuations: ContinuationQueue<Program<V, Erased>>,
    last: Arrow<Program<V, A>>,
}

/// The alternatives a bound sub-program may take; never another bind.
enum Sub<V: EffectAlgebra> {
    Pure(Erased),
    Defer(Identity<Program<V, Erased>>),
    Effect(V::Operation<Program<V, Erased>>),
}

impl<V: EffectAlgebra, A: Clone + 'static> Program<V, A> {
    fn from_node(node: Node<V, A>) -> Self {
        Self {
            node: Box::new(node),
        }
    }

    /// A program that performs no effect and yields `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Either;
    /// use pureio::effect::PureIO;
    ///
    /// assert!(matches!(PureIO::pure(5).resume(), Either::Right(5)));
    /// ```
    pub fn pure(value: A) -> Self {
        Self::from_node(Node::Pure(value))
    }

    /// Lifts a single effect node into a program that performs it and
    /// yields whatever the node's continuation position yields.
    pub fn lift(operation: V::Operation<A>) -> Self {
        Self::from_node(Node::Effect(V::map(operation, Self::pure)))
    }

    /// Defers building a program until it is resumed.
    ///
    /// Recursive programs (loops) use this so that constructing them does
    /// not recurse eagerly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::effect::{put_str_ln, PureIO};
    ///
    /// fn forever() -> PureIO<()> {
    ///     put_str_ln("y").flat_map(|()| PureIO::defer(forever))
    /// }
    ///
    /// let _never_run = forever();
    /// ```
    pub fn defer<F>(thunk: F) -> Self
    where
        F: Fn() -> Self + 'static,
    {
        Self::from_node(Node::Defer(Identity::new(thunk)))
    }

    /// Sequences `function` after this program (monadic bind).
    ///
    /// Construction is constant time and never touches the effect nodes
    /// already in the program.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Either;
    /// use pureio::effect::PureIO;
    ///
    /// let program = PureIO::pure(20).flat_map(|x| PureIO::pure(x + 22));
    /// assert!(matches!(program.resume(), Either::Right(42)));
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Program<V, B>
    where
        F: Fn(A) -> Program<V, B> + 'static,
        B: Clone + 'static,
    {
        self.bind(Rc::new(function))
    }

    /// Alias for `flat_map`.
    #[inline]
    pub fn and_then<B, F>(self, function: F) -> Program<V, B>
    where
        F: Fn(A) -> Program<V, B> + 'static,
        B: Clone + 'static,
    {
        self.flat_map(function)
    }

    /// Applies `function` to the final value.
    pub fn map<B, F>(self, function: F) -> Program<V, B>
    where
        F: Fn(A) -> B + 'static,
        B: Clone + 'static,
    {
        self.flat_map(move |value| Program::pure(function(value)))
    }

    /// Sequences `next` after this program, discarding this result.
    pub fn then<B: Clone + 'static>(self, next: Program<V, B>) -> Program<V, B> {
        self.flat_map(move |_| next.clone())
    }

    fn bind<B: Clone + 'static>(self, function: Rebind<V, A, B>) -> Program<V, B> {
        let last: Arrow<Program<V, B>> =
            Rc::new(move |value: Erased| function(recover::<A>(&value)));

        let (sub, continuations) = match *self.node {
            Node::Pure(value) => (Sub::Pure(erase(value)), ContinuationQueue::new()),
            Node::Defer(thunk) => (Sub::Defer(thunk.map(Self::erased)), ContinuationQueue::new()),
            Node::Effect(operation) => (
                Sub::Effect(V::map(operation, Self::erased)),
                ContinuationQueue::new(),
            ),
            Node::Bind(Bound {
                sub,
                continuations,
                last: previous,
            }) => (
                sub,
                continuations.push(Rc::new(move |value: Erased| previous(value).erased())),
            ),
        };

        Program::from_node(Node::Bind(Bound {
            sub,
            continuations,
            last,
        }))
    }

    /// Hides the result type without forcing anything.
    fn erased(self) -> Program<V, Erased> {
        Program::from_node(match *self.node {
            Node::Pure(value) => Node::Pure(erase(value)),
            Node::Defer(thunk) => Node::Defer(thunk.map(Self::erased)),
            Node::Effect(operation) => Node::Effect(V::map(operation, Self::erased)),
            Node::Bind(Bound {
                sub,
                continuations,
                last,
            }) => Node::Bind(Bound {
                sub,
                continuations,
                last: Rc::new(move |value: Erased| last(value).erased()),
            }),
        })
    }

    /// Makes `program` the new sub-program. A bound `program` is merged: its
    /// own continuations run before the ones already waiting.
    fn attach(
        program: Program<V, Erased>,
        continuations: ContinuationQueue<Program<V, Erased>>,
        last: Arrow<Self>,
    ) -> Self {
        let (sub, continuations) = match *program.node {
            Node::Pure(value) => (Sub::Pure(value), continuations),
            Node::Defer(thunk) => (Sub::Defer(thunk), continuations),
            Node::Effect(operation) => (Sub::Effect(operation), continuations),
            Node::Bind(Bound {
                sub,
                continuations: inner,
                last: inner_last,
            }) => (sub, inner.push(inner_last).concat(continuations)),
        };

        Self::from_node(Node::Bind(Bound {
            sub,
            continuations,
            last,
        }))
    }

    /// Runs the pure sequencing up to the next effect node.
    ///
    /// Returns `Left(node)` when an effect must be performed (the node's
    /// continuation is the rest of the program) or `Right(value)` when the
    /// program has finished. No action is performed.
    pub fn resume(self) -> Either<V::Operation<Self>, A> {
        let mut current = self;

        loop {
            current = match *current.node {
                Node::Pure(value) => return Either::Right(value),
                Node::Effect(operation) => return Either::Left(operation),
                Node::Defer(thunk) => thunk.run(),
                Node::Bind(Bound {
                    sub,
                    continuations,
                    last,
                }) => match sub {
                    Sub::Pure(value) => match continuations.pop() {
                        None => last(value),
                        Some((first, rest)) => Self::attach(first(value), rest, last),
                    },
                    Sub::Defer(thunk) => Self::attach(thunk.run(), continuations, last),
                    Sub::Effect(operation) => {
                        return Either::Left(V::map(operation, move |next: Program<V, Erased>| {
                            Self::attach(next, continuations.clone(), Rc::clone(&last))
                        }));
                    }
                },
            };
        }
    }

    /// Runs this program against `interpreter` until it completes or a node
    /// terminates it.
    ///
    /// Each iteration resumes to the next node and lets the interpreter
    /// discharge it, so the stack stays flat for programs of any length.
    ///
    /// # Errors
    ///
    /// Returns the first [`InterpretError`] raised by the interpreter; the
    /// rest of the program is abandoned.
    #[tracing::instrument(level = "debug", skip_all, fields(algebra = V::NAME))]
    pub fn interpret<I>(self, interpreter: &mut I) -> Result<Outcome<A>, InterpretError>
    where
        I: Interpreter<V>,
    {
        let mut current = self;
        let mut discharged: u64 = 0;

        loop {
            match current.resume() {
                Either::Right(value) => {
                    tracing::debug!(discharged, "program completed");
                    return Ok(Outcome::Completed(value));
                }
                Either::Left(operation) => match interpreter.discharge(operation)? {
                    Discharge::Resume(next) => {
                        discharged += 1;
                        current = next;
                    }
                    Discharge::Terminate(code) => {
                        tracing::debug!(discharged, code, "program terminated");
                        return Ok(Outcome::Terminated(code));
                    }
                },
            }
        }
    }
}

impl<V: EffectAlgebra, A: Clone + 'static> Clone for Program<V, A> {
    fn clone(&self) -> Self {
        Self::from_node(match &*self.node {
            Node::Pure(value) => Node::Pure(value.clone()),
            Node::Defer(thunk) => Node::Defer(thunk.clone()),
            Node::Effect(operation) => Node::Effect(operation.clone()),
            Node::Bind(Bound {
                sub,
                continuations,
                last,
            }) => Node::Bind(Bound {
                sub: sub.clone(),
                continuations: continuations.clone(),
                last: Rc::clone(last),
            }),
        })
    }
}

impl<V: EffectAlgebra> Clone for Sub<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Pure(value) => Self::Pure(Rc::clone(value)),
            Self::Defer(thunk) => Self::Defer(thunk.clone()),
            Self::Effect(operation) => Self::Effect(operation.clone()),
        }
    }
}

impl<V: EffectAlgebra, A: Clone + 'static> fmt::Debug for Program<V, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Program")
            .field("algebra", &V::NAME)
            .finish_non_exhaustive()
    }
}
