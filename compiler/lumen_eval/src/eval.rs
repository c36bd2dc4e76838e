//! Thunk construction.
//!
//! [`evaluate`] walks the tree once and returns the thunk of its root. Child
//! thunks are captured by their parents; nothing is forced here. Function
//! bodies are walked again each time the function is called, in the scope
//! that binds its arguments.

use std::rc::Rc;

use lumen_types::{MonoExpression, MonoKind};
use lumen_value::errors::{native, unresolved_identifier, unresolved_type};
use lumen_value::{Lazy, LazyList, LazyValue, Value};

use crate::apply::apply;
use crate::closure::{Closure, ImplicitClosure};
use crate::scope::Scope;
use lumen_stack::ensure_sufficient_stack;

/// Build the thunk computing `expression` in `scope`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn evaluate(scope: &Scope, expression: &MonoExpression) -> LazyValue {
    ensure_sufficient_stack(|| evaluate_inner(scope, expression))
}

fn evaluate_inner(scope: &Scope, expression: &MonoExpression) -> LazyValue {
    match &expression.kind {
        MonoKind::Integer(n) => Value::Integer(*n).into_lazy(),
        MonoKind::Float(x) => Value::Float(*x).into_lazy(),
        MonoKind::String(text) => Value::String(Rc::clone(text)).into_lazy(),
        MonoKind::Boolean(b) => Value::Boolean(*b).into_lazy(),
        MonoKind::Identifier { name, dictionaries } => {
            evaluate_identifier(scope, name, dictionaries)
        }
        MonoKind::Member { dictionary, member } => evaluate_member(scope, dictionary, member),
        MonoKind::Array(elements) => {
            let elements: Vec<LazyValue> = elements
                .iter()
                .map(|element| evaluate(scope, element))
                .collect();
            Value::List(LazyList::from_values(elements)).into_lazy()
        }
        MonoKind::Function {
            implicit_parameters,
            parameters,
            body,
        } => {
            let parameters: Rc<[String]> = parameters.iter().cloned().collect();
            let value = if implicit_parameters.is_empty() {
                Closure {
                    scope: scope.clone(),
                    parameters,
                    body: Rc::clone(body),
                }
                .into_value()
            } else {
                ImplicitClosure {
                    scope: scope.clone(),
                    implicit_parameters: implicit_parameters.iter().cloned().collect(),
                    parameters,
                    body: Rc::clone(body),
                }
                .into_value()
            };
            value.into_lazy()
        }
        MonoKind::Call { callee, arguments } => {
            let callee = evaluate(scope, callee);
            let arguments: Vec<Option<LazyValue>> = arguments
                .iter()
                .map(|argument| argument.as_ref().map(|argument| evaluate(scope, argument)))
                .collect();
            Lazy::new(move || apply(callee.force()?, arguments))
        }
        MonoKind::Binding { name, value, body } => {
            let value = evaluate(scope, value);
            evaluate(&scope.with(name.clone(), value), body)
        }
        MonoKind::Implementation {
            dictionary,
            members,
            body,
        } => {
            let record = Value::record(
                members
                    .iter()
                    .map(|(name, member)| (name.clone(), evaluate(scope, member))),
            );
            tracing::trace!(dictionary = %dictionary, "binding implementation");
            evaluate(&scope.with(dictionary.clone(), record.into_lazy()), body)
        }
        MonoKind::Unrecognized => {
            let ty = expression
                .ty
                .force()
                .map_or_else(|_| "<error>".to_string(), |ty| ty.to_string());
            Lazy::failed(unresolved_type(ty))
        }
    }
}

/// One lookup; dictionaries are applied lazily when there are any.
fn evaluate_identifier(scope: &Scope, name: &str, dictionaries: &[String]) -> LazyValue {
    let Some(value) = scope.lookup(name) else {
        tracing::debug!(name, "unresolved identifier");
        return Lazy::failed(unresolved_identifier(name));
    };
    if dictionaries.is_empty() {
        return value.clone();
    }

    let mut arguments = Vec::with_capacity(dictionaries.len());
    for key in dictionaries {
        let Some(dictionary) = scope.lookup(key) else {
            tracing::debug!(name, key = %key, "unresolved dictionary");
            return Lazy::failed(unresolved_identifier(key));
        };
        arguments.push(Some(dictionary.clone()));
    }
    let value = value.clone();
    Lazy::new(move || apply(value.force()?, arguments))
}

fn evaluate_member(scope: &Scope, dictionary: &str, member: &str) -> LazyValue {
    let Some(record) = scope.lookup(dictionary) else {
        return Lazy::failed(unresolved_identifier(dictionary));
    };
    let record = record.clone();
    let dictionary = dictionary.to_string();
    let member = member.to_string();
    Lazy::new(move || match record.force()? {
        Value::Record(fields) => match fields.get(&member) {
            Some(value) => value.force(),
            None => Err(native(format!("{dictionary} has no member {member}"))),
        },
        other => Err(native(format!(
            "{dictionary} is {}, not a dictionary",
            other.kind_name()
        ))),
    })
}

#[cfg(test)]
mod tests;
