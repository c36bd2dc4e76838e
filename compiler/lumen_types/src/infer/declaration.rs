//! Interfaces, implementations and type syntax.

use std::rc::Rc;

use lumen_diagnostic::Log;
use lumen_ir::{
    ImplementationMember, InterfaceMember, Token, TypeExpression, TypeExpressionKind,
    UntypedExpression,
};
use lumen_value::{LazyValue, Value};
use rustc_hash::FxHashMap;

use super::expr::infer_expression;
use super::Inference;
use crate::scope::{TypeEntry, TypeImplementation, TypeInterface, TypeScope};
use lumen_stack::ensure_sufficient_stack;
use crate::ty::{function_of, is_nothing, list_of, named, Type, BOOLEAN, FLOAT, INTEGER, LIST, STRING};
use crate::typed::{TypedExpression, TypedKind};

/// Type syntax to a type value. `variables` maps names to the variables
/// they stand for; any other name must be a known type.
pub fn resolve_type(
    expression: &TypeExpression,
    variables: &FxHashMap<String, LazyValue>,
) -> (Log, LazyValue) {
    let mut log = Log::new();
    let value = type_from_syntax(&mut log, expression, variables);
    (log, value)
}

fn type_from_syntax(
    log: &mut Log,
    expression: &TypeExpression,
    variables: &FxHashMap<String, LazyValue>,
) -> LazyValue {
    ensure_sufficient_stack(|| match &expression.kind {
        TypeExpressionKind::Named { name, arguments } => {
            if let Some(variable) = variables.get(name) {
                if arguments.is_empty() {
                    return variable.clone();
                }
                log.error(
                    format!("Type {name} expects 0 type argument(s)."),
                    expression.span,
                );
                return Value::Nothing.into_lazy();
            }
            let expected = match name.as_str() {
                INTEGER | FLOAT | STRING | BOOLEAN | "Anything" | "Nothing" => 0,
                LIST => 1,
                _ => {
                    log.error(format!("Unknown type {name}"), expression.span);
                    return Value::Nothing.into_lazy();
                }
            };
            if arguments.len() != expected {
                log.error(
                    format!("Type {name} expects {expected} type argument(s)."),
                    expression.span,
                );
                return Value::Nothing.into_lazy();
            }
            match name.as_str() {
                "Anything" => Value::Anything.into_lazy(),
                "Nothing" => Value::Nothing.into_lazy(),
                LIST => list_of(
                    arguments
                        .first()
                        .map(|argument| type_from_syntax(log, argument, variables))
                        .unwrap_or_else(|| Value::Nothing.into_lazy()),
                ),
                _ => named(name),
            }
        }
        TypeExpressionKind::Function { parameters, result } => {
            let parameters = parameters
                .iter()
                .map(|parameter| type_from_syntax(log, parameter, variables))
                .collect();
            function_of(parameters, type_from_syntax(log, result, variables))
        }
        // Already reported by the parser.
        TypeExpressionKind::Unrecognized => Value::Nothing.into_lazy(),
    })
}

pub(super) fn infer_interface(
    inference: &mut Inference,
    scope: &TypeScope,
    name: &Token,
    parameters: &[Token],
    members: &[InterfaceMember],
    body: &UntypedExpression,
    expression: &UntypedExpression,
) -> TypedExpression {
    if parameters.is_empty() {
        inference.log.error(
            format!("Interface {} needs a type parameter.", name.value),
            name.source_span(),
        );
    }

    let parameter_variables: Vec<_> = parameters
        .iter()
        .map(|parameter| inference.fresh_variable(&parameter.value))
        .collect();
    let variables: FxHashMap<String, LazyValue> = parameters
        .iter()
        .zip(&parameter_variables)
        .map(|(parameter, variable)| {
            (
                parameter.value.clone(),
                Value::UnboundVariable(variable.clone()).into_lazy(),
            )
        })
        .collect();

    let signatures: Vec<(String, LazyValue)> = members
        .iter()
        .map(|member| {
            (
                member.name.value.clone(),
                type_from_syntax(&mut inference.log, &member.signature, &variables),
            )
        })
        .collect();

    let interface = Rc::new(TypeInterface {
        name: Rc::from(name.value.as_str()),
        parameters: parameter_variables,
        members: signatures,
    });

    let mut child = scope.child();
    child.declare_interface(Rc::clone(&interface));
    for (member, (member_name, signature)) in members.iter().zip(&interface.members) {
        let entry = if interface.parameters.is_empty() {
            TypeEntry::value(Type::new(signature.clone()))
        } else {
            interface.member_entry(signature)
        };
        child.bind(member_name.clone(), entry.declared_at(member.name.source_span()));
    }

    let body = infer_expression(inference, &child, body);
    let ty = Type::new(body.ty.value.clone());
    TypedExpression::new(
        TypedKind::Interface {
            interface,
            body: Box::new(body),
        },
        ty,
        expression.tokens,
        expression.span,
    )
}

/// Members are typed in the enclosing scope: an implementation cannot use
/// itself.
pub(super) fn infer_implementation(
    inference: &mut Inference,
    scope: &TypeScope,
    interface_name: &Token,
    arguments: &[TypeExpression],
    members: &[ImplementationMember],
    body: &UntypedExpression,
    expression: &UntypedExpression,
) -> TypedExpression {
    let name = interface_name.value.as_str();
    let span = interface_name.source_span();
    let no_variables = FxHashMap::default();
    let argument_types: Vec<LazyValue> = arguments
        .iter()
        .map(|argument| type_from_syntax(&mut inference.log, argument, &no_variables))
        .collect();

    let interface = scope.interface(name);
    match &interface {
        None => inference.log.error(format!("Unknown interface {name}"), span),
        Some(interface) if interface.parameters.len() != argument_types.len() => {
            inference.log.error(
                format!(
                    "Interface {name} expects {} type argument(s).",
                    interface.parameters.len()
                ),
                span,
            );
        }
        Some(_) => {}
    }

    let mut typed_members = Vec::with_capacity(members.len());
    for member in members {
        let member_name = member.name.value.as_str();
        let value = infer_expression(inference, scope, &member.value);
        if let Some(interface) = &interface {
            check_member(inference, interface, &argument_types, member_name, &member.name, &value);
        }
        typed_members.push((member_name.to_string(), value));
    }
    if let Some(interface) = &interface {
        for (member_name, _) in &interface.members {
            if !members.iter().any(|member| &member.name.value == member_name) {
                inference
                    .log
                    .error(format!("Missing implementation of member {member_name}"), span);
            }
        }
    }

    let implementation = match TypeImplementation::new(name, argument_types) {
        Ok(implementation) => Rc::new(implementation),
        Err(error) => {
            inference.report(&error, span);
            Rc::new(TypeImplementation {
                interface: Rc::from(name),
                arguments: Vec::new(),
                key: name.to_string(),
            })
        }
    };
    let mut child = scope.child();
    child.declare_implementation(Rc::clone(&implementation));

    let body = infer_expression(inference, &child, body);
    let ty = Type::new(body.ty.value.clone());
    TypedExpression::new(
        TypedKind::Implementation {
            implementation,
            members: typed_members,
            body: Box::new(body),
        },
        ty,
        expression.tokens,
        expression.span,
    )
}

fn check_member(
    inference: &mut Inference,
    interface: &TypeInterface,
    arguments: &[LazyValue],
    member_name: &str,
    member_token: &Token,
    value: &TypedExpression,
) {
    if interface.parameters.len() != arguments.len() {
        return;
    }
    let expected = match interface.instantiate_member(member_name, arguments) {
        Ok(expected) => expected,
        Err(error) => {
            inference.report(&error, member_token.source_span());
            return;
        }
    };
    let Some(expected) = expected else {
        inference.log.error(
            format!("{member_name} is not a member of {}", interface.name),
            member_token.source_span(),
        );
        return;
    };
    if is_nothing(&value.ty.value) {
        return;
    }
    if !inference.unify_at(&expected, &value.ty.value, value.span) {
        inference.log.error(
            format!("Implementation member {member_name} has an incorrect type."),
            value.span,
        );
    }
}
