//! Stack-safe sequencing via trampolining.
//!
//! This module provides the `Trampoline<A>` type for describing sequential
//! computations as data. A driver loop advances the description one step at
//! a time, so neither deep recursion nor long chains of `flat_map` grow the
//! call stack.
//!
//! # Motivation
//!
//! Rust does not guarantee tail call optimization. A trampoline that only
//! knows `Pure` and `Suspend` fixes direct recursion, but binds nested to the
//! left (`((m >>= f) >>= g) >>= h ...`) still make every step recurse once
//! per accumulated bind. The third alternative, [`Codensity`], holds a
//! sub-computation together with the queue of binds waiting on it. A bind
//! applied to an existing codensity node is appended to that queue
//! (`(m >>= f) >>= g` becomes `m >>= (f; g)`) instead of nesting, and a
//! codensity node never wraps another codensity node. Each step therefore
//! uses constant stack however the trampoline was built, and dropping an
//! unrun chain of binds does not recurse either.
//!
//! # Examples
//!
//! ## Factorial
//!
//! ```rust
//! use pureio::control::Trampoline;
//!
//! fn factorial(n: u64) -> Trampoline<u64> {
//!     factorial_helper(n, 1)
//! }
//!
//! fn factorial_helper(n: u64, accumulator: u64) -> Trampoline<u64> {
//!     if n <= 1 {
//!         Trampoline::done(accumulator)
//!     } else {
//!         Trampoline::suspend(move || factorial_helper(n - 1, n * accumulator))
//!     }
//! }
//!
//! assert_eq!(factorial(20).run(), 2_432_902_008_176_640_000);
//! ```
//!
//! ## Left-nested binds
//!
//! ```rust
//! use pureio::control::Trampoline;
//!
//! let mut counter = Trampoline::pure(0_u64);
//! for _ in 0..100_000 {
//!     counter = counter.flat_map(|n| Trampoline::pure(n + 1));
//! }
//! assert_eq!(counter.run(), 100_000);
//! ```

use super::continuation_queue::{erase, recover, Arrow, ContinuationQueue, Erased};
use super::either::Either;
use super::identity::Identity;
use std::fmt;
use std::rc::Rc;

type Continuation<A, B> = Rc<dyn Fn(A) -> Trampoline<B>>;

/// A data structure for stack-safe sequencing.
///
/// `Trampoline<A>` describes a computation that eventually produces an `A`.
/// Nothing runs until [`run`](Trampoline::run) (or step by step through
/// [`resume`](Trampoline::resume)) is called.
///
/// # Design
///
/// 1. `Pure(A)` - the computation has finished with value `A`
/// 2. `Suspend(...)` - a deferred next step
/// 3. `Codensity(...)` - an unresolved `flat_map` (internal shape, opaque)
///
/// Values bound through `flat_map` must be `Clone + 'static`: every step is a
/// re-runnable [`Identity`], so a trampoline can be cloned and run again.
///
/// # Laws
///
/// - **Left Identity**: `Trampoline::pure(a).flat_map(f).run() == f(a).run()`
/// - **Right Identity**: `m.flat_map(Trampoline::pure).run() == m.run()`
/// - **Associativity**: `m.flat_map(f).flat_map(g).run() == m.flat_map(|x| f(x).flat_map(g)).run()`
///
/// # Examples
///
/// ```rust
/// use pureio::control::Trampoline;
///
/// let result = Trampoline::suspend(|| Trampoline::done(21))
///     .map(|x| x * 2)
///     .run();
/// assert_eq!(result, 42);
/// ```
#[derive(Clone)]
pub enum Trampoline<A> {
    /// The computation has completed with value `A`.
    Pure(A),
    /// A deferred step; forcing it yields the next trampoline.
    Suspend(Identity<Trampoline<A>>),
    /// A sub-computation paired with the continuation to run once it
    /// completes. Only `flat_map` builds this alternative.
    Codensity(Codensity<A>),
}

/// The opaque payload of [`Trampoline::Codensity`].
///
/// Holds a sub-computation of some hidden type together with every bind
/// waiting on it: a queue of erased continuations followed by the final,
/// typed continuation into `Trampoline<A>`. The sub-computation can only be
/// `Pure` or `Suspend`.
#[doc(hidden)]
pub struct Codensity<A> {
    sub: Normal,
    continuations: ContinuationQueue<Trampoline<Erased>>,
    last: Arrow<Trampoline<A>>,
}

/// A trampoline restricted to the two alternatives a codensity node may wrap.
enum Normal {
    Pure(Erased),
    Suspend(Identity<Trampoline<Erased>>),
}

impl<A> Trampoline<A> {
    /// Creates a completed trampoline with the given value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Trampoline;
    ///
    /// assert_eq!(Trampoline::done(42).run(), 42);
    /// ```
    #[inline]
    pub const fn done(value: A) -> Self {
        Self::Pure(value)
    }

    /// Alias for `done`. Lifts a value into the trampoline.
    #[inline]
    pub const fn pure(value: A) -> Self {
        Self::done(value)
    }

    /// Creates a suspended trampoline that continues with `thunk`.
    ///
    /// The thunk is not evaluated until the trampoline is run. It may be
    /// evaluated more than once if the trampoline is cloned and both copies
    /// are run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Trampoline;
    ///
    /// let trampoline = Trampoline::suspend(|| Trampoline::done(42));
    /// assert_eq!(trampoline.run(), 42);
    /// ```
    #[inline]
    pub fn suspend<F>(thunk: F) -> Self
    where
        F: Fn() -> Self + 'static,
    {
        Self::Suspend(Identity::new(thunk))
    }

    /// Returns `true` if the computation has already finished.
    #[inline]
    pub const fn is_pure(&self) -> bool {
        matches!(self, Self::Pure(_))
    }
}

impl<A: 'static> Trampoline<A> {
    /// Advances exactly one logical step.
    ///
    /// Returns `Right(value)` when the computation has finished, or
    /// `Left(next)` with the deferred next trampoline otherwise. Each call
    /// uses a bounded amount of stack regardless of how the trampoline was
    /// composed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::{Either, Trampoline};
    ///
    /// let trampoline = Trampoline::suspend(|| Trampoline::done(42));
    ///
    /// match trampoline.resume() {
    ///     Either::Left(next) => assert!(matches!(next.run().resume(), Either::Right(42))),
    ///     Either::Right(_) => unreachable!("a suspended trampoline needs one more step"),
    /// }
    /// ```
    pub fn resume(self) -> Either<Identity<Self>, A> {
        match self {
            Self::Pure(value) => Either::Right(value),
            Self::Suspend(next) => Either::Left(next),
            Self::Codensity(codensity) => Either::Left(codensity.resume()),
        }
    }

    /// Runs the trampoline to completion and returns the final value.
    ///
    /// Drives [`resume`](Trampoline::resume) in a flat loop, so the stack
    /// depth is constant for any number of steps.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Trampoline;
    ///
    /// fn count_down(n: u64) -> Trampoline<u64> {
    ///     if n == 0 {
    ///         Trampoline::done(0)
    ///     } else {
    ///         Trampoline::suspend(move || count_down(n - 1))
    ///     }
    /// }
    ///
    /// assert_eq!(count_down(100_000).run(), 0);
    /// ```
    pub fn run(self) -> A {
        let mut current = self;

        loop {
            match current.resume() {
                Either::Left(next) => current = next.run(),
                Either::Right(value) => return value,
            }
        }
    }
}

impl<A: Clone + 'static> Trampoline<A> {
    /// Sequences `function` after this computation (monadic bind).
    ///
    /// Construction is constant time. Binding onto a codensity node appends
    /// the previous continuation to its queue rather than nesting, so
    /// building `n` chained binds before running never recurses `n` deep.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Trampoline;
    ///
    /// let result = Trampoline::done(21).flat_map(|x| Trampoline::done(x * 2));
    /// assert_eq!(result.run(), 42);
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Trampoline<B>
    where
        F: Fn(A) -> Trampoline<B> + 'static,
        B: 'static,
    {
        self.bind(Rc::new(function))
    }

    /// Alias for `flat_map`.
    #[inline]
    pub fn and_then<B, F>(self, function: F) -> Trampoline<B>
    where
        F: Fn(A) -> Trampoline<B> + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Applies `function` to the final value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Trampoline;
    ///
    /// assert_eq!(Trampoline::done(21).map(|x| x * 2).run(), 42);
    /// ```
    pub fn map<B, F>(self, function: F) -> Trampoline<B>
    where
        F: Fn(A) -> B + 'static,
        B: 'static,
    {
        self.flat_map(move |value| Trampoline::Pure(function(value)))
    }

    /// Sequences `next` after this computation, discarding this result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Trampoline;
    ///
    /// let result = Trampoline::done("ignored").then(Trampoline::done(42));
    /// assert_eq!(result.run(), 42);
    /// ```
    pub fn then<B: Clone + 'static>(self, next: Trampoline<B>) -> Trampoline<B> {
        self.flat_map(move |_| next.clone())
    }

    fn bind<B: 'static>(self, continuation: Continuation<A, B>) -> Trampoline<B> {
        let last: Arrow<Trampoline<B>> =
            Rc::new(move |value: Erased| continuation(recover::<A>(&value)));

        let (sub, continuations) = match self {
            Self::Pure(value) => (Normal::Pure(erase(value)), ContinuationQueue::new()),
            Self::Suspend(next) => (Normal::Suspend(next.map(Self::erased)), ContinuationQueue::new()),
            Self::Codensity(Codensity {
                sub,
                continuations,
                last: previous,
            }) => (
                sub,
                continuations.push(Rc::new(move |value: Erased| previous(value).erased())),
            ),
        };

        Trampoline::Codensity(Codensity {
            sub,
            continuations,
            last,
        })
    }
}

impl<A: 'static> Trampoline<A> {
    /// Hides the result type without forcing anything.
    fn erased(self) -> Trampoline<Erased> {
        match self {
            Self::Pure(value) => Trampoline::Pure(erase(value)),
            Self::Suspend(next) => Trampoline::Suspend(next.map(Self::erased)),
            Self::Codensity(Codensity {
                sub,
                continuations,
                last,
            }) => Trampoline::Codensity(Codensity {
                sub,
                continuations,
                last: Rc::new(move |value: Erased| last(value).erased()),
            }),
        }
    }
}

impl<A: 'static> Codensity<A> {
    /// One step of `sub >>= continuations >>= last`.
    fn resume(self) -> Identity<Trampoline<A>> {
        let Self {
            sub,
            continuations,
            last,
        } = self;

        match sub {
            Normal::Pure(value) => Identity::new(move || {
                Self::feed(Rc::clone(&value), continuations.clone(), Rc::clone(&last))
            }),
            Normal::Suspend(next) => next.map(move |step| {
                Self::attach(step, continuations.clone(), Rc::clone(&last))
            }),
        }
    }

    /// Applies the oldest waiting continuation to a finished sub-computation.
    fn feed(
        value: Erased,
        continuations: ContinuationQueue<Trampoline<Erased>>,
        last: Arrow<Trampoline<A>>,
    ) -> Trampoline<A> {
        match continuations.pop() {
            None => last(value),
            Some((first, rest)) => Self::attach(first(value), rest, last),
        }
    }

    /// Makes `step` the new sub-computation. A codensity `step` is merged:
    /// its own continuations run before the ones already waiting.
    fn attach(
        step: Trampoline<Erased>,
        continuations: ContinuationQueue<Trampoline<Erased>>,
        last: Arrow<Trampoline<A>>,
    ) -> Trampoline<A> {
        let (sub, continuations) = match step {
            Trampoline::Pure(value) => (Normal::Pure(value), continuations),
            Trampoline::Suspend(next) => (Normal::Suspend(next), continuations),
            Trampoline::Codensity(Codensity {
                sub,
                continuations: inner,
                last: inner_last,
            }) => (sub, inner.push(inner_last).concat(continuations)),
        };

        Trampoline::Codensity(Self {
            sub,
            continuations,
            last,
        })
    }
}

impl<A> Clone for Codensity<A> {
    fn clone(&self) -> Self {
        Self {
            sub: self.sub.clone(),
            continuations: self.continuations.clone(),
            last: Rc::clone(&self.last),
        }
    }
}

impl Clone for Normal {
    fn clone(&self) -> Self {
        match self {
            Self::Pure(value) => Self::Pure(Rc::clone(value)),
            Self::Suspend(next) => Self::Suspend(next.clone()),
        }
    }
}

// =============================================================================
// Debug Implementation
// =============================================================================

impl<A: fmt::Debug> fmt::Debug for Trampoline<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pure(value) => formatter.debug_tuple("Pure").field(value).finish(),
            Self::Suspend(_) => formatter.debug_tuple("Suspend").field(&"<thunk>").finish(),
            Self::Codensity(_) => formatter
                .debug_tuple("Codensity")
                .field(&"<continuation>")
                .finish(),
        }
    }
}

static_assertions::assert_impl_all!(Trampoline<i32>: Clone);
static_assertions::assert_not_impl_any!(Trampoline<i32>: Send, Sync);
