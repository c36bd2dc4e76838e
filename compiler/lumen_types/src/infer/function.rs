//! Function literals and `let`.
//!
//! A function's parameters are bound variables. When the body is done, the
//! variables of the function type that no enclosing name mentions are the
//! ones it is generic over, and the constraints collected from its body that
//! concern only those variables become its implicit parameters. Everything
//! else is handed to the enclosing function.
//!
//! Only a `let` whose value is a function literal is generic; any other
//! `let` is monomorphic.

use lumen_ir::{Token, UntypedExpression};
use lumen_value::{EvaluationError, LazyValue, TypeVariable, Value};

use super::expr::infer_expression;
use super::Inference;
use crate::scope::{TypeEntry, TypeScope};
use crate::traverse::{variables, variables_of};
use crate::ty::{function_of, implicit_key, Type, TypeConstraint};
use crate::typed::{TypedExpression, TypedKind, TypedParameter};

pub(super) fn infer_function(
    inference: &mut Inference,
    scope: &TypeScope,
    parameters: &[Token],
    body: &UntypedExpression,
    expression: &UntypedExpression,
) -> TypedExpression {
    let environment_depth = inference.environment.len();
    let mut child = scope.child();
    let mut typed_parameters = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let variable = inference.fresh_variable(&format!("{}T", parameter.value));
        let ty = Value::BoundVariable(variable).into_lazy();
        child.bind(
            parameter.value.clone(),
            TypeEntry::parameter(ty.clone()).declared_at(parameter.source_span()),
        );
        inference.environment.push(ty.clone());
        typed_parameters.push(TypedParameter {
            name: parameter.value.clone(),
            ty,
        });
    }

    inference.enter_frame();
    let body = infer_expression(inference, &child, body);
    let frame = inference.leave_frame();
    inference.environment.truncate(environment_depth);

    let finished = finish_function(inference, &typed_parameters, &body, frame);
    let (ty, generalized, implicit_parameters) = match finished {
        Ok(finished) => finished,
        Err(error) => {
            inference.report(&error, expression.span);
            (Type::nothing(), Vec::new(), Vec::new())
        }
    };

    TypedExpression::new(
        TypedKind::Function {
            parameters: typed_parameters,
            body: Box::new(body),
            generalized,
            implicit_parameters,
        },
        ty,
        expression.tokens,
        expression.span,
    )
}

/// Resolve the function type, generalize it and lift its constraints.
fn finish_function(
    inference: &mut Inference,
    parameters: &[TypedParameter],
    body: &TypedExpression,
    frame: Vec<TypeConstraint>,
) -> Result<(Type, Vec<TypeVariable>, Vec<String>), EvaluationError> {
    // A parameter the body never constrained is an ordinary variable from
    // here on. Parameters of enclosing functions stay bound.
    let own: Vec<TypeVariable> = parameters
        .iter()
        .filter_map(|parameter| match parameter.ty.force() {
            Ok(Value::BoundVariable(variable)) => Some(variable),
            _ => None,
        })
        .collect();
    for parameter in parameters {
        if let Value::BoundVariable(variable) = inference.resolve(&parameter.ty)?.force()? {
            if !own.contains(&variable) {
                continue;
            }
            let unbound = Value::UnboundVariable(TypeVariable::fresh(variable.name.clone()));
            inference.assign(&variable, &unbound.into_lazy())?;
        }
    }

    let function_type = inference.resolve(&function_of(
        parameters.iter().map(|parameter| parameter.ty.clone()).collect(),
        body.ty.value.clone(),
    ))?;

    let environment = inference
        .environment
        .iter()
        .map(|ty| inference.resolve(ty))
        .collect::<Result<Vec<LazyValue>, _>>()?;
    let fixed = variables_of(&environment)?;
    let generalized: Vec<TypeVariable> = variables(&function_type)?
        .into_iter()
        .filter(|variable| !fixed.contains(variable))
        .collect();

    let mut lifted = Vec::new();
    let mut keys: Vec<String> = Vec::new();
    let mut outer = Vec::new();
    for constraint in frame {
        let resolved = constraint.try_map(|side| inference.resolve(side))?;
        let child_variables = variables(&resolved.child)?;
        let owned = !child_variables.is_empty()
            && child_variables
                .iter()
                .all(|variable| generalized.contains(variable));
        if owned {
            let key = implicit_key(&resolved)?;
            if !keys.contains(&key) {
                keys.push(key);
                lifted.push(resolved);
            }
        } else {
            outer.push(constraint);
        }
    }
    inference.constrain(&outer);

    Ok((
        Type::new(function_type).with_constraints(lifted),
        generalized,
        keys,
    ))
}

pub(super) fn infer_binding(
    inference: &mut Inference,
    scope: &TypeScope,
    name: &Token,
    value: &UntypedExpression,
    body: &UntypedExpression,
    expression: &UntypedExpression,
) -> TypedExpression {
    let value = infer_expression(inference, scope, value);
    let environment_depth = inference.environment.len();

    let entry = match &value.kind {
        TypedKind::Function { generalized, .. } => {
            TypeEntry::with_generics(value.ty.clone(), generalized.clone())
        }
        _ => {
            inference.environment.push(value.ty.value.clone());
            TypeEntry::value(Type::new(value.ty.value.clone()))
        }
    };
    let child = scope.with(name.value.clone(), entry.declared_at(name.source_span()));
    let body = infer_expression(inference, &child, body);
    inference.environment.truncate(environment_depth);

    let ty = Type::new(body.ty.value.clone());
    TypedExpression::new(
        TypedKind::Binding {
            name: name.value.clone(),
            value: Box::new(value),
            body: Box::new(body),
        },
        ty,
        expression.tokens,
        expression.span,
    )
}
