//! Memoized deferred computations.
//!
//! A [`Lazy`] runs its computation at most once, on first [`Lazy::force`],
//! and caches the outcome (success or error). Forcing is the only suspension
//! point in the engine. A computation that forces itself again while running
//! fails with [`EvaluationError::CyclicForce`] instead of recursing forever.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::EvaluationError;

type Thunk<T> = Box<dyn FnOnce() -> Result<T, EvaluationError>>;

enum State<T> {
    Pending(Thunk<T>),
    Forcing,
    Done(Result<T, EvaluationError>),
}

/// Shared handle to a deferred computation. Clones share the cached result.
pub struct Lazy<T>(Rc<RefCell<State<T>>>);

impl<T> Clone for Lazy<T> {
    fn clone(&self) -> Self {
        Lazy(Rc::clone(&self.0))
    }
}

impl<T: Clone + 'static> Lazy<T> {
    pub fn new(thunk: impl FnOnce() -> Result<T, EvaluationError> + 'static) -> Self {
        Lazy(Rc::new(RefCell::new(State::Pending(Box::new(thunk)))))
    }

    /// An already-computed value.
    pub fn ready(value: T) -> Self {
        Lazy(Rc::new(RefCell::new(State::Done(Ok(value)))))
    }

    pub fn failed(error: EvaluationError) -> Self {
        Lazy(Rc::new(RefCell::new(State::Done(Err(error)))))
    }

    pub fn force(&self) -> Result<T, EvaluationError> {
        let thunk = {
            let mut state = self.0.borrow_mut();
            match std::mem::replace(&mut *state, State::Forcing) {
                State::Pending(thunk) => thunk,
                State::Forcing => return Err(EvaluationError::CyclicForce),
                State::Done(result) => {
                    *state = State::Done(result.clone());
                    return result;
                }
            }
        };
        let result = thunk();
        *self.0.borrow_mut() = State::Done(result.clone());
        result
    }

    /// Whether the computation has already run.
    pub fn is_evaluated(&self) -> bool {
        matches!(*self.0.borrow(), State::Done(_))
    }

    /// Whether two handles share one computation.
    pub fn ptr_eq(&self, other: &Lazy<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Lazy<T> {
    /// Move the cached value out when this is the only handle left. The
    /// handle is unusable afterwards, so this is only for teardown.
    pub(crate) fn take_unique(&mut self) -> Option<T> {
        let state = Rc::get_mut(&mut self.0)?.get_mut();
        match std::mem::replace(state, State::Forcing) {
            State::Done(Ok(value)) => Some(value),
            other => {
                *state = other;
                None
            }
        }
    }
}

impl<T> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match *self.0.borrow() {
            State::Pending(_) => "pending",
            State::Forcing => "forcing",
            State::Done(Ok(_)) => "done",
            State::Done(Err(_)) => "failed",
        };
        write!(f, "Lazy({state})")
    }
}
