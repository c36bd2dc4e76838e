//! Fatal evaluation errors.
//!
//! A well-typed program never produces these; they signal a broken engine
//! invariant or a failing native. They are values, not panics, so callers can
//! report them.

use thiserror::Error;

use crate::Value;

pub type EvalResult = Result<Value, EvaluationError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("{value} is not callable")]
    NotCallable { value: String },

    #[error("{name} takes {arity} argument(s) but was given {given}")]
    ArityExceeded {
        name: String,
        arity: usize,
        given: usize,
    },

    #[error("unresolved identifier {name}")]
    UnresolvedIdentifier { name: String },

    #[error("expression of type {ty} was not resolved before evaluation")]
    UnresolvedType { ty: String },

    #[error("no implementation of {interface} for {ty}")]
    MissingImplementation { interface: String, ty: String },

    #[error("{message}")]
    Native { message: String },

    #[error("value depends on itself")]
    CyclicForce,
}

#[cold]
pub fn not_callable(value: &Value) -> EvaluationError {
    EvaluationError::NotCallable {
        value: value.to_string(),
    }
}

#[cold]
pub fn arity_exceeded(name: &str, arity: usize, given: usize) -> EvaluationError {
    EvaluationError::ArityExceeded {
        name: name.to_string(),
        arity,
        given,
    }
}

#[cold]
pub fn unresolved_identifier(name: &str) -> EvaluationError {
    EvaluationError::UnresolvedIdentifier {
        name: name.to_string(),
    }
}

#[cold]
pub fn unresolved_type(ty: impl Into<String>) -> EvaluationError {
    EvaluationError::UnresolvedType { ty: ty.into() }
}

#[cold]
pub fn missing_implementation(interface: &str, ty: &str) -> EvaluationError {
    EvaluationError::MissingImplementation {
        interface: interface.to_string(),
        ty: ty.to_string(),
    }
}

#[cold]
pub fn native(message: impl Into<String>) -> EvaluationError {
    EvaluationError::Native {
        message: message.into(),
    }
}

/// A native received an argument of the wrong shape.
#[cold]
pub fn expected_argument(function: &str, expected: &str, got: &Value) -> EvaluationError {
    native(format!("{function} expected {expected}, got {got}"))
}
