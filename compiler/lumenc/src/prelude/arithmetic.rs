//! `Numeric` and its Integer and Float implementations, plus `%`.
//!
//! Integer arithmetic is checked: overflow and division by zero are
//! evaluation errors, not wrapped or panicking results.

use lumen_value::errors::native;
use lumen_value::{EvalResult, EvaluationError, LazyValue, Value};

use super::arguments::{float, integer};
use crate::library::{Library, LibraryImplementation, Signature};

pub(super) fn library() -> Library {
    Library::new()
        .interface(
            "Numeric",
            &["T"],
            &[
                ("+", "(T, T) -> T"),
                ("-", "(T, T) -> T"),
                ("*", "(T, T) -> T"),
                ("/", "(T, T) -> T"),
                ("negate", "(T) -> T"),
                ("fromInteger", "(Integer) -> T"),
            ],
        )
        .implementation(
            LibraryImplementation::new("Numeric", &["Integer"])
                .native("+", 2, |arguments| checked("+", arguments, i64::checked_add))
                .native("-", 2, |arguments| checked("-", arguments, i64::checked_sub))
                .native("*", 2, |arguments| checked("*", arguments, i64::checked_mul))
                .native("/", 2, integer_division)
                .native("negate", 1, |arguments| {
                    let n = integer("negate", &arguments[0])?;
                    n.checked_neg().map(Value::Integer).ok_or_else(overflow)
                })
                .native("fromInteger", 1, |arguments| {
                    Ok(Value::Integer(integer("fromInteger", &arguments[0])?))
                }),
        )
        .implementation(
            LibraryImplementation::new("Numeric", &["Float"])
                .native("+", 2, |arguments| floating("+", arguments, |a, b| a + b))
                .native("-", 2, |arguments| floating("-", arguments, |a, b| a - b))
                .native("*", 2, |arguments| floating("*", arguments, |a, b| a * b))
                .native("/", 2, |arguments| floating("/", arguments, |a, b| a / b))
                .native("negate", 1, |arguments| {
                    Ok(Value::Float(-float("negate", &arguments[0])?))
                })
                .native("fromInteger", 1, |arguments| {
                    Ok(Value::Float(to_float(integer("fromInteger", &arguments[0])?)))
                }),
        )
        .native(
            "%",
            Signature::of("(Integer, Integer) -> Integer"),
            2,
            remainder,
        )
}

#[cold]
fn overflow() -> EvaluationError {
    native("Integer overflow.")
}

fn checked(
    function: &str,
    arguments: &[LazyValue],
    operation: fn(i64, i64) -> Option<i64>,
) -> EvalResult {
    let left = integer(function, &arguments[0])?;
    let right = integer(function, &arguments[1])?;
    operation(left, right).map(Value::Integer).ok_or_else(overflow)
}

fn floating(function: &str, arguments: &[LazyValue], operation: fn(f64, f64) -> f64) -> EvalResult {
    let left = float(function, &arguments[0])?;
    let right = float(function, &arguments[1])?;
    Ok(Value::Float(operation(left, right)))
}

fn integer_division(arguments: &[LazyValue]) -> EvalResult {
    let left = integer("/", &arguments[0])?;
    let right = integer("/", &arguments[1])?;
    if right == 0 {
        return Err(native("Division by zero."));
    }
    left.checked_div(right).map(Value::Integer).ok_or_else(overflow)
}

fn remainder(arguments: &[LazyValue]) -> EvalResult {
    let left = integer("%", &arguments[0])?;
    let right = integer("%", &arguments[1])?;
    if right == 0 {
        return Err(native("Modulo by zero."));
    }
    left.checked_rem(right).map(Value::Integer).ok_or_else(overflow)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "large integers round to the nearest Float"
)]
pub(super) fn to_float(n: i64) -> f64 {
    n as f64
}
