//! Deferred values.
//!
//! This module provides [`Identity<T>`], a zero-argument thunk that produces
//! a value on demand. It is the suspension functor of [`Trampoline`]: every
//! step that must be built without being forced is wrapped in an `Identity`.
//!
//! An `Identity` is re-runnable. Each call to [`Identity::run`] evaluates the
//! thunk afresh; nothing is memoized and no call may assume a previous one
//! happened.
//!
//! # Examples
//!
//! ```rust
//! use pureio::control::Identity;
//!
//! let deferred = Identity::new(|| 21).map(|x| x * 2);
//! assert_eq!(deferred.run(), 42);
//! assert_eq!(deferred.run(), 42);
//! ```
//!
//! [`Trampoline`]: super::Trampoline

use std::fmt;
use std::rc::Rc;

/// A deferred value, recomputed on every [`run`](Identity::run).
///
/// Cloning an `Identity` shares the underlying thunk; it does not evaluate it.
///
/// # Laws
///
/// - **Functor Identity**: `identity.map(|x| x).run() == identity.run()`
/// - **Functor Composition**: `identity.map(f).map(g).run() == identity.map(|x| g(f(x))).run()`
/// - **Comonad Left Identity**: `identity.duplicate().run().run() == identity.run()`
///
/// # Examples
///
/// ```rust
/// use pureio::control::Identity;
///
/// let deferred = Identity::new(|| "hello".to_string());
/// let copy = deferred.clone();
/// assert_eq!(deferred.run(), copy.run());
/// ```
pub struct Identity<T> {
    thunk: Rc<dyn Fn() -> T>,
}

impl<T> Identity<T> {
    /// Wraps a thunk without evaluating it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Identity;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let calls = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&calls);
    /// let deferred = Identity::new(move || {
    ///     counter.set(counter.get() + 1);
    ///     counter.get()
    /// });
    /// assert_eq!(calls.get(), 0);
    /// assert_eq!(deferred.run(), 1);
    /// assert_eq!(deferred.run(), 2);
    /// ```
    #[inline]
    pub fn new<F>(thunk: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self {
            thunk: Rc::new(thunk),
        }
    }

    /// Evaluates the thunk and returns its result.
    ///
    /// This is the comonadic `extract`. Every call re-evaluates.
    #[inline]
    pub fn run(&self) -> T {
        (self.thunk)()
    }
}

impl<T: Clone + 'static> Identity<T> {
    /// Wraps an already computed value. Each run hands out a clone.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Identity;
    ///
    /// assert_eq!(Identity::now(7).run(), 7);
    /// ```
    #[inline]
    pub fn now(value: T) -> Self {
        Self::new(move || value.clone())
    }
}

impl<T: 'static> Identity<T> {
    /// Defers `function` over the result of this thunk.
    ///
    /// Nothing is forced: the returned `Identity` runs the receiver and then
    /// `function` each time it is itself run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Identity;
    ///
    /// let length = Identity::new(|| "four".to_string()).map(|s| s.len());
    /// assert_eq!(length.run(), 4);
    /// ```
    pub fn map<U, F>(self, function: F) -> Identity<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        Identity::new(move || function(self.run()))
    }

    /// Monadic bind. Strict in the receiver.
    ///
    /// The receiver is run immediately and its result handed to `function`;
    /// only the `Identity` returned by `function` stays deferred.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Identity;
    ///
    /// let chained = Identity::now(20).flat_map(|x| Identity::new(move || x + 22));
    /// assert_eq!(chained.run(), 42);
    /// ```
    pub fn flat_map<U, F>(&self, function: F) -> Identity<U>
    where
        F: FnOnce(T) -> Identity<U>,
    {
        function(self.run())
    }

    /// Applicative apply: runs the deferred `function` on the deferred value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Identity;
    ///
    /// let add_one = Identity::new(|| |x: i32| x + 1);
    /// assert_eq!(Identity::now(41).apply(add_one).run(), 42);
    /// ```
    pub fn apply<U, F>(self, function: Identity<F>) -> Identity<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        Identity::new(move || (function.run())(self.run()))
    }

    /// Wraps this thunk in one more layer of deferral without forcing it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Identity;
    ///
    /// let nested = Identity::now(3).duplicate();
    /// assert_eq!(nested.run().run(), 3);
    /// ```
    pub fn duplicate(&self) -> Identity<Self> {
        let this = self.clone();
        Identity::new(move || this.clone())
    }

    /// Observes this thunk in context: `function` receives the whole
    /// `Identity`, not its value, and decides when (or whether) to force it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Identity;
    ///
    /// let twice = Identity::now(5).extend(|inner| inner.run() + inner.run());
    /// assert_eq!(twice.run(), 10);
    /// ```
    pub fn extend<U, F>(&self, function: F) -> Identity<U>
    where
        F: Fn(Self) -> U + 'static,
        U: 'static,
    {
        self.duplicate().map(function)
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self {
            thunk: Rc::clone(&self.thunk),
        }
    }
}

impl<T> fmt::Debug for Identity<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Identity").field(&"<thunk>").finish()
    }
}
