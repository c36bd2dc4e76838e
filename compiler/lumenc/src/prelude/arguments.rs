//! Argument extraction for natives.

use lumen_value::errors::expected_argument;
use lumen_value::{EvaluationError, LazyList, LazyValue, Value};

pub(super) fn integer(function: &str, argument: &LazyValue) -> Result<i64, EvaluationError> {
    match argument.force()? {
        Value::Integer(n) => Ok(n),
        other => Err(expected_argument(function, "an integer", &other)),
    }
}

pub(super) fn float(function: &str, argument: &LazyValue) -> Result<f64, EvaluationError> {
    match argument.force()? {
        Value::Float(x) => Ok(x),
        other => Err(expected_argument(function, "a float", &other)),
    }
}

pub(super) fn list(function: &str, argument: &LazyValue) -> Result<LazyList, EvaluationError> {
    match argument.force()? {
        Value::List(list) => Ok(list),
        other => Err(expected_argument(function, "a list", &other)),
    }
}

/// A count or position into a list.
pub(super) fn index(function: &str, argument: &LazyValue) -> Result<usize, EvaluationError> {
    let n = integer(function, argument)?;
    usize::try_from(n)
        .map_err(|_| expected_argument(function, "a non-negative integer", &Value::Integer(n)))
}
