//! # pureio
//!
//! A stack-safe effect-interpretation runtime.
//!
//! ## Overview
//!
//! Programs that talk to the outside world are described as data and run by
//! an interpreter chosen at the edge:
//!
//! - **Control**: `Identity` thunks, `Either`, and a `Trampoline` whose
//!   codensity-based bind keeps left-nested sequencing stack-safe
//! - **Effect**: Effect vocabularies (console, files), free programs over
//!   them, and the interpreter contract
//! - **Interpreter**: Console and file interpreters over swappable
//!   capabilities, with in-memory doubles for tests
//!
//! ## Feature Flags
//!
//! - `control`: Sequencing primitives (Identity, Either, Trampoline)
//! - `effect`: Effect vocabularies and free programs
//! - `console`: Console interpreter
//! - `file`: File interpreter
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use pureio::prelude::*;
//!
//! let program = put_str_ln("what is your name?")
//!     .flat_map(|()| read_line())
//!     .flat_map(|name| put_str_ln(format!("hello, {name}")));
//!
//! let mut interpreter = ConsoleInterpreter::new(ScriptedTerminal::new(["ferris"]));
//! let outcome = program.interpret(&mut interpreter)?;
//!
//! assert_eq!(outcome, Outcome::Completed(()));
//! assert_eq!(
//!     interpreter.terminal().output(),
//!     ["what is your name?", "hello, ferris"]
//! );
//! # Ok::<(), InterpretError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use pureio::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;

    #[cfg(any(feature = "console", feature = "file"))]
    pub use crate::interpreter::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "effect")]
pub mod effect;

#[cfg(any(feature = "console", feature = "file"))]
pub mod interpreter;
