//! The contract between programs and the interpreters that run them.

use super::algebra::EffectAlgebra;
use super::error::InterpretError;

/// What an interpreter decided after performing one effect node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discharge<Next> {
    /// The action completed; continue with the resumption.
    Resume(Next),
    /// The action ends the program with the given status. The continuation
    /// carried by the node is never touched.
    Terminate(i32),
}

/// How interpreting a program ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A> {
    /// The program ran to its final value.
    Completed(A),
    /// A terminate effect stopped the program with this status.
    Terminated(i32),
}

impl<A> Outcome<A> {
    /// Returns the final value, or `None` if the program was terminated.
    pub fn completed(self) -> Option<A> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Terminated(_) => None,
        }
    }

    /// Returns the exit status, or `None` if the program completed.
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Completed(_) => None,
            Self::Terminated(code) => Some(*code),
        }
    }
}

/// Discharges effect nodes of vocabulary `V` against some environment.
///
/// An interpreter performs exactly the action a node describes, then
/// produces the node's resumption: the ready next value for nodes that
/// carry one, or the node's function applied to the action's result.
/// Sequencing is not its concern; [`Program::interpret`] drives it in a
/// flat loop.
///
/// # Examples
///
/// ```rust
/// use pureio::effect::{
///     put_str_ln, Console, Discharge, InterpretError, Interpreter, Outcome, TerminalOperation,
/// };
///
/// struct Silent;
///
/// impl Interpreter<Console> for Silent {
///     fn discharge<Next: Clone + 'static>(
///         &mut self,
///         operation: TerminalOperation<Next>,
///     ) -> Result<Discharge<Next>, InterpretError> {
///         Ok(match operation {
///             TerminalOperation::PutStrLn { next, .. } => Discharge::Resume(next),
///             TerminalOperation::ReadLine { resume } => Discharge::Resume(resume(String::new())),
///             TerminalOperation::Exit { code, .. } => Discharge::Terminate(code),
///         })
///     }
/// }
///
/// let outcome = put_str_ln("ignored").map(|()| 7).interpret(&mut Silent)?;
/// assert_eq!(outcome, Outcome::Completed(7));
/// # Ok::<(), InterpretError>(())
/// ```
///
/// [`Program::interpret`]: super::Program::interpret
pub trait Interpreter<V: EffectAlgebra> {
    /// Performs `operation` and returns how to continue.
    ///
    /// # Errors
    ///
    /// Returns an [`InterpretError`] when the real action fails. The
    /// program is not resumed afterwards.
    fn discharge<Next: Clone + 'static>(
        &mut self,
        operation: V::Operation<Next>,
    ) -> Result<Discharge<Next>, InterpretError>;
}
