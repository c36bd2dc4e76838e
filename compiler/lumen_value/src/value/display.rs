//! Rendering of values and types.
//!
//! Lazy components are forced while rendering. A component that fails to
//! evaluate renders as `<error>`; lists stop after [`LIST_DISPLAY_LIMIT`]
//! elements so infinite lists can be printed.

use std::fmt;

use super::{LazyValue, Value};

pub const LIST_DISPLAY_LIMIT: usize = 100;

/// Name of the literal that heads curried function types.
pub const FUNCTION_LITERAL: &str = "function";

struct Forced<'a>(&'a LazyValue);

impl fmt::Display for Forced<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.force() {
            Ok(value) => write!(f, "{value}"),
            Err(_) => write!(f, "<error>"),
        }
    }
}

fn write_separated<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a LazyValue>,
) -> fmt::Result {
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", Forced(item))?;
    }
    Ok(())
}

/// Uncurry `function(A, function(B, R))` into `([A, B], R)`.
fn function_parts(value: &Value) -> Option<(Vec<LazyValue>, LazyValue)> {
    let Value::Application { callee, parameters } = value else {
        return None;
    };
    let is_function = matches!(
        callee.force(),
        Ok(Value::UserDefinedLiteral(name)) if &*name == FUNCTION_LITERAL
    );
    if !is_function {
        return None;
    }
    match parameters.as_slice() {
        [result] => Some((Vec::new(), result.clone())),
        [parameter, rest] => {
            let mut collected = vec![parameter.clone()];
            let result = match rest.force().ok().as_ref().and_then(function_parts) {
                Some((more, result)) if !more.is_empty() => {
                    collected.extend(more);
                    result
                }
                _ => rest.clone(),
            };
            Some((collected, result))
        }
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Anything => write!(f, "Anything"),
            Value::Nothing => write!(f, "Nothing"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::UserDefinedLiteral(name) => write!(f, "{name}"),
            Value::UnboundVariable(variable) | Value::BoundVariable(variable) => {
                write!(f, "{}", variable.name)
            }
            Value::List(list) => {
                write!(f, "[")?;
                for (index, item) in list.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    if index == LIST_DISPLAY_LIMIT {
                        write!(f, "...")?;
                        break;
                    }
                    match item {
                        Ok(item) => write!(f, "{}", Forced(&item))?,
                        Err(_) => write!(f, "<error>")?,
                    }
                }
                write!(f, "]")
            }
            Value::Record(fields) => {
                write!(f, "{{")?;
                for (index, (name, value)) in fields.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {}", Forced(value))?;
                }
                write!(f, "}}")
            }
            Value::Application { callee, parameters } => {
                if let Some((arguments, result)) = function_parts(self) {
                    write!(f, "(")?;
                    write_separated(f, &arguments)?;
                    write!(f, ") -> ")?;
                    return write!(f, "{}", Forced(&result));
                }
                write!(f, "{}<", Forced(callee))?;
                write_separated(f, parameters)?;
                write!(f, ">")
            }
            Value::Lambda(lambda) => write!(f, "<lambda/{}>", lambda.arity()),
            Value::NativeLambda(native) => write!(f, "<native {}/{}>", native.name, native.arity),
            Value::PartialApplication(partial) => {
                write!(f, "<partial {}/{}>", partial.callee, partial.remaining_arity)
            }
        }
    }
}
