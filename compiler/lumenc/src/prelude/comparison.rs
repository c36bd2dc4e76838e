//! `Equatable` and `Comparable`.

use std::cmp::Ordering;

use lumen_value::errors::expected_argument;
use lumen_value::{EvalResult, EvaluationError, LazyValue, Value};

use crate::library::{Library, LibraryImplementation};

pub(super) fn library() -> Library {
    let mut library = Library::new()
        .interface(
            "Equatable",
            &["T"],
            &[("==", "(T, T) -> Boolean"), ("!=", "(T, T) -> Boolean")],
        )
        .interface(
            "Comparable",
            &["T"],
            &[
                ("<", "(T, T) -> Boolean"),
                ("<=", "(T, T) -> Boolean"),
                (">", "(T, T) -> Boolean"),
                (">=", "(T, T) -> Boolean"),
            ],
        );

    for ty in ["Integer", "Float", "String", "Boolean"] {
        library = library.implementation(
            LibraryImplementation::new("Equatable", &[ty])
                .native("==", 2, |arguments| {
                    equal("==", arguments).map(Value::Boolean)
                })
                .native("!=", 2, |arguments| {
                    equal("!=", arguments).map(|equal| Value::Boolean(!equal))
                }),
        );
    }
    for ty in ["Integer", "Float", "String"] {
        library = library.implementation(
            LibraryImplementation::new("Comparable", &[ty])
                .native("<", 2, |arguments| compare("<", arguments, Ordering::is_lt))
                .native("<=", 2, |arguments| compare("<=", arguments, Ordering::is_le))
                .native(">", 2, |arguments| compare(">", arguments, Ordering::is_gt))
                .native(">=", 2, |arguments| compare(">=", arguments, Ordering::is_ge)),
        );
    }
    library
}

#[allow(clippy::float_cmp)]
fn equal(function: &str, arguments: &[LazyValue]) -> Result<bool, EvaluationError> {
    Ok(match (arguments[0].force()?, arguments[1].force()?) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (left, _) => return Err(expected_argument(function, "two values of one type", &left)),
    })
}

/// NaN is unordered, so every comparison with it is false.
fn compare(function: &str, arguments: &[LazyValue], test: fn(Ordering) -> bool) -> EvalResult {
    let ordering = match (arguments[0].force()?, arguments[1].force()?) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(&b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(&b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(&b)),
        (left, _) => return Err(expected_argument(function, "two ordered values", &left)),
    };
    Ok(Value::Boolean(ordering.is_some_and(test)))
}
