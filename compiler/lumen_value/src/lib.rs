//! Lumen values.
//!
//! One data model serves both run-time values and types. Everything is built
//! from [`Lazy`] thunks: a value is computed the first time it is forced and
//! cached from then on.
//!
//! - [`Lazy`] / [`LazyValue`]: memoized deferred computations
//! - [`LazyList`]: possibly infinite cons streams
//! - [`Value`]: the closed sum of literals, variables, aggregates,
//!   applications and callables
//! - [`EvaluationError`]: fatal evaluation failures

pub mod errors;
mod lazy;
mod list;
mod value;

pub use errors::{EvalResult, EvaluationError};
pub use lazy::Lazy;
pub use list::{LazyList, ListCell, ListIter};
pub use value::{
    Callable, Lambda, LazyValue, NativeBody, NativeLambda, PartialApplication, TypeVariable,
    Value, FUNCTION_LITERAL, LIST_DISPLAY_LIMIT,
};
