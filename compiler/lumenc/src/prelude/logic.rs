//! Truthiness-based logic and `if`.
//!
//! `false`, zero, the empty string and `Nothing` are false; everything else
//! is true. The branches and the right operand of `&&` and `||` are only
//! forced when they decide the result.

use lumen_value::Value;

use crate::library::{Library, Signature};

pub(super) fn library() -> Library {
    Library::new()
        .native(
            "not",
            Signature::generic(&["C"], "(C) -> Boolean"),
            1,
            |arguments| Ok(Value::Boolean(!arguments[0].force()?.is_truthy())),
        )
        .native(
            "&&",
            Signature::generic(&["A", "B"], "(A, B) -> Boolean"),
            2,
            |arguments| {
                if !arguments[0].force()?.is_truthy() {
                    return Ok(Value::Boolean(false));
                }
                Ok(Value::Boolean(arguments[1].force()?.is_truthy()))
            },
        )
        .native(
            "||",
            Signature::generic(&["A", "B"], "(A, B) -> Boolean"),
            2,
            |arguments| {
                if arguments[0].force()?.is_truthy() {
                    return Ok(Value::Boolean(true));
                }
                Ok(Value::Boolean(arguments[1].force()?.is_truthy()))
            },
        )
        .native(
            "if",
            Signature::generic(&["C", "A"], "(C, A, A) -> A"),
            3,
            |arguments| {
                if arguments[0].force()?.is_truthy() {
                    arguments[1].force()
                } else {
                    arguments[2].force()
                }
            },
        )
}
