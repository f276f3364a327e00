//! The effect algebra abstraction.
//!
//! An effect algebra is a closed vocabulary of external actions. Each action
//! is a node that also carries what to do next: either a ready next value or
//! a function from the action's result to the next value. The only structure
//! the rest of the runtime needs from a vocabulary is a functor `map` over
//! that "next" position.
//!
//! # Examples
//!
//! Adding a vocabulary takes an operation enum and an uninhabited marker type:
//!
//! ```rust
//! use pureio::effect::{EffectAlgebra, Program};
//!
//! #[derive(Clone)]
//! enum Beep<Next> {
//!     Beep { times: u8, next: Next },
//! }
//!
//! enum Speaker {}
//!
//! impl EffectAlgebra for Speaker {
//!     const NAME: &'static str = "Speaker";
//!
//!     type Operation<Next: Clone + 'static> = Beep<Next>;
//!
//!     fn map<Next, Mapped, F>(operation: Beep<Next>, function: F) -> Beep<Mapped>
//!     where
//!         Next: Clone + 'static,
//!         Mapped: Clone + 'static,
//!         F: Fn(Next) -> Mapped + 'static,
//!     {
//!         match operation {
//!             Beep::Beep { times, next } => Beep::Beep { times, next: function(next) },
//!         }
//!     }
//! }
//!
//! let program: Program<Speaker, ()> = Program::lift(Beep::Beep { times: 2, next: () });
//! assert!(program.resume().is_left());
//! ```

/// A vocabulary of effect nodes, parameterized by their continuation type.
///
/// Implementors are marker types (usually uninhabited enums); the nodes
/// themselves are values of [`Operation`](EffectAlgebra::Operation).
///
/// # Laws
///
/// `map` must preserve the active alternative and its payload, touching only
/// the continuation position:
///
/// - **Functor Identity**: `map(operation, |x| x)` is observationally `operation`
/// - **Functor Composition**: `map(map(operation, f), g)` is observationally
///   `map(operation, |x| g(f(x)))`
pub trait EffectAlgebra: 'static {
    /// The name of this vocabulary (for logging and error messages).
    const NAME: &'static str;

    /// One effect node whose continuation position holds `Next`.
    type Operation<Next: Clone + 'static>: Clone + 'static;

    /// Applies `function` to the continuation position of `operation`.
    ///
    /// For nodes whose continuation is a function of the action's result,
    /// the result is post-composed with `function` and nothing is forced.
    fn map<Next, Mapped, F>(
        operation: Self::Operation<Next>,
        function: F,
    ) -> Self::Operation<Mapped>
    where
        Next: Clone + 'static,
        Mapped: Clone + 'static,
        F: Fn(Next) -> Mapped + 'static;
}
