//! Control structures for stack-safe sequencing.
//!
//! This module provides the building blocks the effect runtime is driven by:
//!
//! - [`Identity`]: A re-runnable deferred value (the suspension functor)
//! - [`Either`]: A value that can be one of two types (used by Trampoline)
//! - [`Trampoline`]: Stack-safe sequencing with codensity-based bind
//!
//! # Examples
//!
//! ## Stack-Safe Recursion
//!
//! ```rust
//! use pureio::control::Trampoline;
//!
//! fn is_even(n: u64) -> Trampoline<bool> {
//!     if n == 0 {
//!         Trampoline::done(true)
//!     } else {
//!         Trampoline::suspend(move || is_odd(n - 1))
//!     }
//! }
//!
//! fn is_odd(n: u64) -> Trampoline<bool> {
//!     if n == 0 {
//!         Trampoline::done(false)
//!     } else {
//!         Trampoline::suspend(move || is_even(n - 1))
//!     }
//! }
//!
//! assert!(is_even(1_000_000).run());
//! ```

mod continuation_queue;
mod either;
mod identity;
mod trampoline;

pub(crate) use continuation_queue::{erase, recover, Arrow, ContinuationQueue, Erased};
pub use either::Either;
pub use identity::Identity;
#[doc(hidden)]
pub use trampoline::Codensity;
pub use trampoline::Trampoline;
