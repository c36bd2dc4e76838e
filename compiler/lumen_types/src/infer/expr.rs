//! Literals, identifiers, arrays and calls.

use std::rc::Rc;

use lumen_ir::{ExpressionKind, SourceSpan, UntypedExpression};
use lumen_value::{EvaluationError, LazyValue, Value};

use super::declaration::{infer_implementation, infer_interface};
use super::function::{infer_binding, infer_function};
use super::Inference;
use crate::scope::{EntryKind, TypeScope};
use lumen_stack::ensure_sufficient_stack;
use crate::ty::{
    boolean, float, function_of, function_shape, integer, is_nothing, list_of, string,
    FunctionShape, Type,
};
use crate::typed::{TypedExpression, TypedKind};

/// Infer one node. Never fails: problems are logged and the node is typed
/// `Nothing`.
pub(crate) fn infer_expression(
    inference: &mut Inference,
    scope: &TypeScope,
    expression: &UntypedExpression,
) -> TypedExpression {
    ensure_sufficient_stack(|| infer_expression_inner(inference, scope, expression))
}

fn infer_expression_inner(
    inference: &mut Inference,
    scope: &TypeScope,
    expression: &UntypedExpression,
) -> TypedExpression {
    let node = |kind, ty| TypedExpression::new(kind, ty, expression.tokens, expression.span);

    match &expression.kind {
        ExpressionKind::Integer(n) => node(TypedKind::Integer(*n), Type::new(integer())),
        ExpressionKind::Float(x) => node(TypedKind::Float(*x), Type::new(float())),
        ExpressionKind::String(text) => node(
            TypedKind::String(Rc::from(text.as_str())),
            Type::new(string()),
        ),
        ExpressionKind::Boolean(b) => node(TypedKind::Boolean(*b), Type::new(boolean())),
        ExpressionKind::Identifier(name) => infer_identifier(inference, scope, name, expression),
        ExpressionKind::Array(elements) => infer_array(inference, scope, elements, expression),
        ExpressionKind::Function { parameters, body } => {
            infer_function(inference, scope, parameters, body, expression)
        }
        ExpressionKind::FunctionCall { callee, arguments } => {
            infer_call(inference, scope, callee, arguments, expression)
        }
        ExpressionKind::Binding { name, value, body } => {
            infer_binding(inference, scope, name, value, body, expression)
        }
        ExpressionKind::Interface {
            name,
            parameters,
            members,
            body,
        } => infer_interface(inference, scope, name, parameters, members, body, expression),
        ExpressionKind::Implementation {
            interface,
            arguments,
            members,
            body,
        } => infer_implementation(
            inference, scope, interface, arguments, members, body, expression,
        ),
        ExpressionKind::Unrecognized => {
            inference
                .log
                .error("Expression could not be parsed.", expression.span);
            node(TypedKind::Unrecognized, Type::nothing())
        }
    }
}

fn infer_identifier(
    inference: &mut Inference,
    scope: &TypeScope,
    name: &str,
    expression: &UntypedExpression,
) -> TypedExpression {
    let node = |kind, ty| TypedExpression::new(kind, ty, expression.tokens, expression.span);
    let identifier = || TypedKind::Identifier {
        name: name.to_string(),
        implicits: Vec::new(),
    };

    let Some(entry) = scope.lookup(name) else {
        inference
            .log
            .error(format!("Unrecognized identifier {name}"), expression.span);
        return node(identifier(), Type::nothing());
    };

    let ty = match inference.instantiate(entry) {
        Ok(ty) => ty,
        Err(error) => {
            inference.report(&error, expression.span);
            return node(identifier(), Type::nothing());
        }
    };
    inference.constrain(&ty.constraints);

    let kind = match &entry.kind {
        EntryKind::Method { interface } => TypedKind::Method {
            interface: Rc::clone(interface),
            member: name.to_string(),
            resolved: None,
        },
        EntryKind::Value | EntryKind::Parameter => identifier(),
    };
    node(kind, ty)
}

fn infer_array(
    inference: &mut Inference,
    scope: &TypeScope,
    elements: &[UntypedExpression],
    expression: &UntypedExpression,
) -> TypedExpression {
    let element_type = inference.fresh_unbound("T");
    let mut typed = Vec::with_capacity(elements.len());
    for element in elements {
        let element = infer_expression(inference, scope, element);
        if !is_nothing(&element.ty.value)
            && !inference.unify_at(&element_type, &element.ty.value, element.span)
        {
            inference
                .log
                .error("Array elements have incompatible types.", element.span);
        }
        typed.push(element);
    }
    TypedExpression::new(
        TypedKind::Array(typed),
        Type::new(list_of(element_type)),
        expression.tokens,
        expression.span,
    )
}

/// Walk the curried callee type one argument at a time.
fn infer_call(
    inference: &mut Inference,
    scope: &TypeScope,
    callee: &UntypedExpression,
    arguments: &[Option<UntypedExpression>],
    expression: &UntypedExpression,
) -> TypedExpression {
    let callee = infer_expression(inference, scope, callee);
    let arguments: Vec<Option<TypedExpression>> = arguments
        .iter()
        .map(|argument| {
            argument
                .as_ref()
                .map(|argument| infer_expression(inference, scope, argument))
        })
        .collect();

    let result = match call_type(inference, &callee, &arguments) {
        Ok(result) => result,
        Err(error) => {
            inference.report(&error, expression.span);
            Value::Nothing.into_lazy()
        }
    };

    TypedExpression::new(
        TypedKind::FunctionCall {
            callee: Box::new(callee),
            arguments,
        },
        Type::new(result),
        expression.tokens,
        expression.span,
    )
}

fn call_type(
    inference: &mut Inference,
    callee: &TypedExpression,
    arguments: &[Option<TypedExpression>],
) -> Result<LazyValue, EvaluationError> {
    let mut current = inference.resolve(&callee.ty.value)?;
    if is_nothing(&current) {
        return Ok(current);
    }

    if arguments.is_empty() {
        return nullary_call_type(inference, callee, &current);
    }

    let mut holes = Vec::new();
    for (index, argument) in arguments.iter().enumerate() {
        current = skip_nullary_layers(inference, &current)?;
        let forced = current.force()?;
        match function_shape(&forced)? {
            Some(FunctionShape::Unary { parameter, rest }) => {
                match argument {
                    None => holes.push(parameter),
                    Some(argument) => check_argument(inference, &parameter, argument),
                }
                current = rest;
            }
            Some(FunctionShape::Nullary(_)) => {
                // Removed by skip_nullary_layers.
                return Ok(Value::Nothing.into_lazy());
            }
            None if forced.is_variable() => {
                let parameter = match argument {
                    Some(argument) => argument.ty.value.clone(),
                    None => {
                        let parameter = inference.fresh_unbound("T");
                        holes.push(parameter.clone());
                        parameter
                    }
                };
                let result = inference.fresh_unbound("T");
                let expected = function_of(vec![parameter], result.clone());
                if !inference.unify_at(&current, &expected, callee.span) {
                    inference
                        .log
                        .error("Expression is not a function.", callee.span);
                    return Ok(Value::Nothing.into_lazy());
                }
                current = result;
            }
            None if index == 0 => {
                inference
                    .log
                    .error("Expression is not a function.", callee.span);
                return Ok(Value::Nothing.into_lazy());
            }
            None => {
                let span = excess_span(&arguments[index..]).unwrap_or(callee.span);
                inference.log.error("Too many arguments.", span);
                return Ok(Value::Nothing.into_lazy());
            }
        }
    }

    Ok(if holes.is_empty() {
        current
    } else {
        function_of(holes, current)
    })
}

/// `f()`: a nullary function yields its result, any other function is
/// returned unchanged.
fn nullary_call_type(
    inference: &mut Inference,
    callee: &TypedExpression,
    current: &LazyValue,
) -> Result<LazyValue, EvaluationError> {
    let forced = current.force()?;
    match function_shape(&forced)? {
        Some(FunctionShape::Nullary(result)) => Ok(result),
        Some(FunctionShape::Unary { .. }) => Ok(current.clone()),
        None if forced.is_variable() => {
            let result = inference.fresh_unbound("T");
            if inference.unify_at(current, &function_of(Vec::new(), result.clone()), callee.span) {
                Ok(result)
            } else {
                inference
                    .log
                    .error("Expression is not a function.", callee.span);
                Ok(Value::Nothing.into_lazy())
            }
        }
        None => {
            inference
                .log
                .error("Expression is not a function.", callee.span);
            Ok(Value::Nothing.into_lazy())
        }
    }
}

/// Arguments passed to a nullary function are applied to its result.
fn skip_nullary_layers(
    inference: &Inference,
    current: &LazyValue,
) -> Result<LazyValue, EvaluationError> {
    let mut current = inference.resolve(current)?;
    while let Some(FunctionShape::Nullary(result)) = function_shape(&current.force()?)? {
        current = inference.resolve(&result)?;
    }
    Ok(current)
}

fn check_argument(inference: &mut Inference, parameter: &LazyValue, argument: &TypedExpression) {
    if is_nothing(&argument.ty.value) {
        return;
    }
    if !inference.unify_at(parameter, &argument.ty.value, argument.span) {
        inference
            .log
            .error("Argument has an incorrect type.", argument.span);
    }
}

fn excess_span(arguments: &[Option<TypedExpression>]) -> Option<SourceSpan> {
    arguments
        .iter()
        .flatten()
        .map(|argument| argument.span)
        .reduce(SourceSpan::merge)
}
