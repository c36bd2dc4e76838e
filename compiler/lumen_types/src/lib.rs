//! Lumen type engine.
//!
//! Types are [`lumen_value::Value`]s: inference, convergence and
//! substitution all operate on lazily evaluated values.
//!
//! - [`converge`]: unification of two type values
//! - [`apply_substitutions`]: lazy rewriting by solved variables
//! - [`type_expression`]: inference over an untyped tree
//! - [`resolve_implicits`]: dictionary selection for constrained identifiers
//! - [`monotize`]: the evaluable tree, with interface members dispatched

mod converge;
mod fresh;
mod implicit;
mod infer;
mod mono;
mod scope;
mod substitution;
mod traverse;
mod ty;
mod typed;

#[cfg(test)]
mod testing;

pub use converge::{converge, Convergence};
pub use fresh::{name_prefix, FreeVariableGenerator};
pub use implicit::{find_implementation, resolve_implicits, ResolvedImplicit};
pub use infer::{resolve_type, type_expression};
pub use mono::{monotize, MonoExpression, MonoKind};
pub use scope::{EntryKind, TypeEntry, TypeImplementation, TypeInterface, TypeScope};
pub use substitution::{apply_substitutions, VariableSubstitution, VariableSubstitutions};
pub use traverse::{has_variables, occurs, variables, variables_of, TypeFolder};
pub use ty::{
    boolean, float, function_of, function_shape, implementation_key, implicit_key, integer,
    is_nothing, list_element, list_of, named, same_type, string, type_key, FunctionShape, Type,
    TypeConstraint, BOOLEAN, FLOAT, INTEGER, LIST, STRING,
};
pub use typed::{TypedExpression, TypedKind, TypedParameter};
