//! Lumen evaluator.
//!
//! Runs a [`MonoExpression`](lumen_types::MonoExpression) lazily: every node
//! becomes a [`LazyValue`](lumen_value::LazyValue) thunk and nothing is
//! computed until a consumer forces it.
//!
//! - [`Scope`]: parent-linked name to thunk bindings
//! - [`evaluate`]: builds the thunk for an expression
//! - [`apply`]: curried, arity-aware application with placeholder holes

mod apply;
mod closure;
mod eval;
mod scope;

pub use apply::{apply, call};
pub use eval::evaluate;
pub use scope::Scope;
