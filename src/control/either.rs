//! Binary sum type.
//!
//! [`Either<L, R>`] tags a value as exactly one of two alternatives. The
//! trampoline uses it as its step result: `Left` carries the deferred next
//! step, `Right` carries the finished value.
//!
//! # Examples
//!
//! ```rust
//! use pureio::control::Either;
//!
//! let step: Either<&str, i32> = Either::Right(42);
//! let described = step.fold(|pending| format!("pending: {pending}"), |done| format!("done: {done}"));
//! assert_eq!(described, "done: 42");
//! ```

use std::fmt;

/// A value that is either `Left(L)` or `Right(R)`, never both.
///
/// Elimination is total: [`fold`](Either::fold) runs exactly one of its two
/// branches. The accessors that can be called on the wrong alternative
/// ([`unwrap_left`](Either::unwrap_left), [`unwrap_right`](Either::unwrap_right))
/// panic rather than invent a default.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Either<L, R> {
    /// The left alternative. For trampoline steps: more work remains.
    Left(L),
    /// The right alternative. For trampoline steps: the final value.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Converts into `Some(l)` for `Left(l)`, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Either;
    ///
    /// let left: Either<i32, String> = Either::Left(42);
    /// assert_eq!(left.left(), Some(42));
    /// ```
    #[inline]
    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Converts into `Some(r)` for `Right(r)`, `None` otherwise.
    #[inline]
    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Applies `function` to a `Left` value, leaving `Right` untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Either;
    ///
    /// let left: Either<i32, String> = Either::Left(21);
    /// assert_eq!(left.map_left(|x| x * 2), Either::Left(42));
    /// ```
    #[inline]
    pub fn map_left<T, F>(self, function: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(function(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Applies `function` to a `Right` value, leaving `Left` untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Either;
    ///
    /// let right: Either<i32, String> = Either::Right("hello".to_string());
    /// assert_eq!(right.map_right(|s| s.len()), Either::Right(5));
    /// ```
    #[inline]
    pub fn map_right<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Eliminates the `Either` by applying exactly one of two functions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pureio::control::Either;
    ///
    /// let left: Either<i32, String> = Either::Left(42);
    /// assert_eq!(left.fold(|x| x.to_string(), |s| s), "42");
    ///
    /// let right: Either<i32, String> = Either::Right("hello".to_string());
    /// assert_eq!(right.fold(|x: i32| x.to_string(), |s| s), "hello");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, left_function: F, right_function: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => left_function(value),
            Self::Right(value) => right_function(value),
        }
    }

    /// Swaps the alternatives.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }

    /// Returns the left value.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Right` value.
    #[inline]
    #[track_caller]
    pub fn unwrap_left(self) -> L {
        match self {
            Self::Left(value) => value,
            Self::Right(_) => panic!("called `Either::unwrap_left()` on a `Right` value"),
        }
    }

    /// Returns the right value.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Left` value.
    #[inline]
    #[track_caller]
    pub fn unwrap_right(self) -> R {
        match self {
            Self::Left(_) => panic!("called `Either::unwrap_right()` on a `Left` value"),
            Self::Right(value) => value,
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    /// `Ok(r)` becomes `Right(r)`, `Err(e)` becomes `Left(e)`.
    #[inline]
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    /// `Right(r)` becomes `Ok(r)`, `Left(l)` becomes `Err(l)`.
    #[inline]
    fn from(either: Either<L, R>) -> Self {
        match either {
            Either::Left(value) => Err(value),
            Either::Right(value) => Ok(value),
        }
    }
}
