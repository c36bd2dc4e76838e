//! Lumen compiler driver.
//!
//! Ties the phases together: [`compile`] turns source text into a
//! monomorphic expression, [`evaluate`] runs it, and [`execute`] does both.
//! Programs start from an [`Environment`] built out of a [`Library`],
//! usually the [`prelude`].

pub mod commands;
mod library;
mod pipeline;
mod prelude;

pub use library::{
    Definition, Environment, Library, LibraryError, LibraryImplementation, LibraryInterface,
    LibraryValue, Signature,
};
pub use pipeline::{
    compile, evaluate, execute, CompilationResult, EvaluationResult, ExecutionResult,
};
pub use prelude::prelude;
