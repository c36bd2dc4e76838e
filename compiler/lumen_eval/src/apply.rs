//! Curried, arity-aware application.
//!
//! Applying fewer arguments than a callable needs returns a
//! [`PartialApplication`]. A `None` argument is a placeholder: its slot stays
//! open and is filled, in order, by later applications before any new
//! parameter is reached. Arguments beyond the arity are applied to the
//! result of the call.

use std::rc::Rc;

use lumen_value::errors::{arity_exceeded, not_callable};
use lumen_value::{EvalResult, LazyValue, PartialApplication, Value};

use lumen_stack::ensure_sufficient_stack;

/// Apply `callee` to `arguments`.
///
/// With no arguments at all, a nullary callable runs and anything else is
/// returned unchanged.
pub fn apply(callee: Value, arguments: Vec<Option<LazyValue>>) -> EvalResult {
    ensure_sufficient_stack(|| apply_inner(callee, arguments))
}

/// Apply `callee` to fully-supplied arguments.
pub fn call(callee: &Value, arguments: Vec<LazyValue>) -> EvalResult {
    apply(callee.clone(), arguments.into_iter().map(Some).collect())
}

fn apply_inner(callee: Value, arguments: Vec<Option<LazyValue>>) -> EvalResult {
    let Some(arity) = callee.arity() else {
        return Err(not_callable(&callee));
    };
    if arguments.is_empty() {
        return if arity == 0 {
            invoke(&callee, Vec::new())
        } else {
            Ok(callee)
        };
    }

    let (base, mut captured) = match callee {
        Value::PartialApplication(partial) => (partial.callee, partial.captured),
        other => (Rc::new(other), Vec::new()),
    };
    let arity = base.arity().unwrap_or(0);
    let mut arguments = arguments.into_iter();

    for slot in &mut captured {
        if slot.is_none() {
            match arguments.next() {
                Some(argument) => *slot = argument,
                None => break,
            }
        }
    }
    while captured.len() < arity {
        match arguments.next() {
            Some(argument) => captured.push(argument),
            None => break,
        }
    }
    let excess: Vec<Option<LazyValue>> = arguments.collect();

    let open = arity - captured.len() + captured.iter().filter(|slot| slot.is_none()).count();
    if open > 0 {
        if !excess.is_empty() {
            return Err(arity_exceeded(&callee_name(&base), arity, arity + excess.len()));
        }
        tracing::trace!(callee = %base, remaining = open, "partial application");
        return Ok(Value::PartialApplication(PartialApplication {
            callee: base,
            captured,
            remaining_arity: open,
        }));
    }

    let result = invoke(&base, captured.into_iter().flatten().collect())?;
    if excess.is_empty() {
        return Ok(result);
    }
    if !result.is_callable() {
        return Err(arity_exceeded(&callee_name(&base), arity, arity + excess.len()));
    }
    apply(result, excess)
}

/// Run the body of a callable with exactly its arguments.
fn invoke(callee: &Value, arguments: Vec<LazyValue>) -> EvalResult {
    match callee {
        Value::Lambda(lambda) => lambda.body.call(arguments),
        Value::NativeLambda(native) => (native.body)(&arguments),
        other => Err(not_callable(other)),
    }
}

fn callee_name(callee: &Value) -> String {
    match callee {
        Value::NativeLambda(native) => native.name.to_string(),
        other => other.to_string(),
    }
}
