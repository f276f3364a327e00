//! Persistent queue of type-erased continuations.
//!
//! Codensity nodes keep every bind that waits on their sub-computation in a
//! [`ContinuationQueue`] ("reflection without remorse"). Pushing a bind and
//! concatenating two queues are O(1); popping the oldest continuation is
//! amortized O(1). Queues are shared through `Rc`, so cloning a trampoline
//! or a program never copies its continuations.
//!
//! # Invariants
//!
//! - **FIFO Order**: continuations pop in the order they were pushed
//! - **No Empty Halves**: a `Joined` node never holds an empty side
//! - **Flat Teardown**: dropping a queue of any length uses constant stack

use std::any::Any;
use std::mem;
use std::rc::Rc;

/// A value whose concrete type is known only to the continuation consuming it.
pub(crate) type Erased = Rc<dyn Any>;

/// A continuation from an erased value to some monadic result `M`.
pub(crate) type Arrow<M> = Rc<dyn Fn(Erased) -> M>;

const ERASED_TYPE_MISMATCH: &str = "continuation applied to a value of another type";

/// Hides the type of `value`.
pub(crate) fn erase<X: 'static>(value: X) -> Erased {
    Rc::new(value)
}

/// Recovers a value hidden by [`erase`].
///
/// Only the continuation built next to an erased value recovers it, so the
/// type always matches.
///
/// # Panics
///
/// Panics if `X` is not the erased type. This is an internal invariant
/// violation, never a user error.
pub(crate) fn recover<X: Clone + 'static>(erased: &Erased) -> X {
    erased
        .downcast_ref::<X>()
        .expect(ERASED_TYPE_MISMATCH)
        .clone()
}

/// A persistent catenable queue of [`Arrow`]s.
pub(crate) enum ContinuationQueue<M> {
    Empty,
    Single(Arrow<M>),
    Joined(Rc<Joined<M>>),
}

pub(crate) struct Joined<M> {
    front: ContinuationQueue<M>,
    back: ContinuationQueue<M>,
}

impl<M> ContinuationQueue<M> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self::Empty
    }

    /// Appends `arrow` after every continuation already queued.
    #[inline]
    pub(crate) fn push(self, arrow: Arrow<M>) -> Self {
        self.concat(Self::Single(arrow))
    }

    /// Queues all of `back` after all of `self`.
    pub(crate) fn concat(self, back: Self) -> Self {
        match (self, back) {
            (Self::Empty, back) => back,
            (front, Self::Empty) => front,
            (front, back) => Self::Joined(Rc::new(Joined { front, back })),
        }
    }

    /// Removes the oldest continuation.
    ///
    /// A left-leaning spine is rotated to the right as it is walked, so the
    /// rotation cost is paid once per pushed continuation.
    pub(crate) fn pop(self) -> Option<(Arrow<M>, Self)> {
        let mut current = self;

        loop {
            match current {
                Self::Empty => return None,
                Self::Single(arrow) => return Some((arrow, Self::Empty)),
                Self::Joined(joined) => {
                    let (front, back) = Joined::split(joined);
                    match front {
                        Self::Empty => current = back,
                        Self::Single(arrow) => return Some((arrow, back)),
                        Self::Joined(inner) => {
                            let (inner_front, inner_back) = Joined::split(inner);
                            current = inner_front.concat(inner_back.concat(back));
                        }
                    }
                }
            }
        }
    }
}

impl<M> Joined<M> {
    fn split(joined: Rc<Self>) -> (ContinuationQueue<M>, ContinuationQueue<M>) {
        match Rc::try_unwrap(joined) {
            Ok(mut owned) => (mem::take(&mut owned.front), mem::take(&mut owned.back)),
            Err(shared) => (shared.front.clone(), shared.back.clone()),
        }
    }

    fn detach_into(&mut self, pending: &mut Vec<Rc<Self>>) {
        for side in [&mut self.front, &mut self.back] {
            if let ContinuationQueue::Joined(joined) = mem::take(side) {
                pending.push(joined);
            }
        }
    }
}

impl<M> Drop for Joined<M> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_into(&mut pending);

        while let Some(joined) = pending.pop() {
            if let Ok(mut owned) = Rc::try_unwrap(joined) {
                owned.detach_into(&mut pending);
            }
        }
    }
}

impl<M> Clone for ContinuationQueue<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Single(arrow) => Self::Single(Rc::clone(arrow)),
            Self::Joined(joined) => Self::Joined(Rc::clone(joined)),
        }
    }
}

impl<M> Default for ContinuationQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}
