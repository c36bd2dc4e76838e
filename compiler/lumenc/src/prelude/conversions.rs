//! Conversions and small helpers.

use lumen_value::Value;

use super::arguments::integer;
use super::arithmetic::to_float;
use crate::library::{Library, Signature};

pub(super) fn library() -> Library {
    Library::new()
        .native(
            "toFloat",
            Signature::of("(Integer) -> Float"),
            1,
            |arguments| Ok(Value::Float(to_float(integer("toFloat", &arguments[0])?))),
        )
        .native(
            "toString",
            Signature::generic(&["A"], "(A) -> String"),
            1,
            |arguments| {
                Ok(match arguments[0].force()? {
                    text @ Value::String(_) => text,
                    other => Value::string(&other.to_string()),
                })
            },
        )
        .lambda(
            "identity",
            Signature::generic(&["A"], "(A) -> A"),
            &["x"],
            "x",
        )
}
