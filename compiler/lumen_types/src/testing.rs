//! Test helpers: small type shapes, `proptest` strategies over them, and a
//! scope with a few interfaces and functions to type programs against.

#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use lumen_value::{LazyList, LazyValue, TypeVariable, Value};
use proptest::prelude::*;

use crate::infer::type_expression;
use crate::scope::{TypeEntry, TypeImplementation, TypeInterface, TypeScope};
use crate::ty::{float, function_of, integer, list_of, string, Type, TypeConstraint};
use crate::typed::TypedExpression;

pub fn unbound(name: &str, id: u32) -> LazyValue {
    Value::UnboundVariable(TypeVariable::new(name, id)).into_lazy()
}

pub fn bound(name: &str, id: u32) -> LazyValue {
    Value::BoundVariable(TypeVariable::new(name, id)).into_lazy()
}

pub fn pair(first: LazyValue, second: LazyValue) -> LazyValue {
    Value::Application {
        callee: Value::literal("Pair").into_lazy(),
        parameters: vec![first, second],
    }
    .into_lazy()
}

pub fn render(value: &LazyValue) -> String {
    match value.force() {
        Ok(value) => value.to_string(),
        Err(error) => format!("<{error}>"),
    }
}

/// Debuggable description of a type value.
#[derive(Clone, Debug)]
pub enum Shape {
    Integer,
    Float,
    Unbound(u32),
    Bound(u32),
    List(Box<Shape>),
    Pair(Box<Shape>, Box<Shape>),
    Function(Box<Shape>, Box<Shape>),
    Tuple(Vec<Shape>),
}

impl Shape {
    pub fn build(&self) -> LazyValue {
        match self {
            Shape::Integer => integer(),
            Shape::Float => float(),
            Shape::Unbound(id) => unbound(&format!("T{id}"), *id),
            Shape::Bound(id) => bound(&format!("B{id}"), *id),
            Shape::List(element) => list_of(element.build()),
            Shape::Pair(first, second) => pair(first.build(), second.build()),
            Shape::Function(parameter, result) => {
                function_of(vec![parameter.build()], result.build())
            }
            Shape::Tuple(items) => {
                Value::List(LazyList::from_values(items.iter().map(Shape::build))).into_lazy()
            }
        }
    }
}

/// Shapes whose unbound variables have ids in `unbound` and bound variables
/// ids in `bound` (either range may be empty).
pub fn shapes(
    unbound: std::ops::Range<u32>,
    bound: std::ops::Range<u32>,
) -> impl Strategy<Value = Shape> {
    let mut leaves: Vec<BoxedStrategy<Shape>> =
        vec![Just(Shape::Integer).boxed(), Just(Shape::Float).boxed()];
    if !unbound.is_empty() {
        leaves.push(unbound.prop_map(Shape::Unbound).boxed());
    }
    if !bound.is_empty() {
        leaves.push(bound.prop_map(Shape::Bound).boxed());
    }
    proptest::strategy::Union::new(leaves).prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|element| Shape::List(Box::new(element))),
            (inner.clone(), inner.clone())
                .prop_map(|(first, second)| Shape::Pair(Box::new(first), Box::new(second))),
            (inner.clone(), inner.clone()).prop_map(|(parameter, result)| {
                Shape::Function(Box::new(parameter), Box::new(result))
            }),
            proptest::collection::vec(inner, 0..3).prop_map(Shape::Tuple),
        ]
    })
}

/// `Numeric<T>` with `+` and `negate`, implemented for `Integer` and
/// `Float`; `Show<T>` implemented for `Integer` only; and `if`, `length`,
/// `sum` and `toFloat`.
pub fn test_scope() -> TypeScope {
    let mut scope = TypeScope::new();

    let t = TypeVariable::new("T", 9_000_001);
    let tv = Value::UnboundVariable(t.clone()).into_lazy();
    declare(
        &mut scope,
        "Numeric",
        t,
        vec![
            ("+", function_of(vec![tv.clone(), tv.clone()], tv.clone())),
            ("negate", function_of(vec![tv.clone()], tv)),
        ],
        &[integer(), float()],
    );

    let s = TypeVariable::new("S", 9_000_002);
    let sv = Value::UnboundVariable(s.clone()).into_lazy();
    declare(
        &mut scope,
        "Show",
        s,
        vec![("show", function_of(vec![sv], string()))],
        &[integer()],
    );

    let c = unbound("C", 9_000_003);
    let a = unbound("A", 9_000_004);
    bind_generic(&mut scope, "if", Type::new(function_of(vec![c, a.clone(), a.clone()], a)));

    let e = unbound("E", 9_000_005);
    bind_generic(&mut scope, "length", Type::new(function_of(vec![list_of(e)], integer())));

    let n = unbound("N", 9_000_006);
    bind_generic(
        &mut scope,
        "sum",
        Type::new(function_of(vec![list_of(n.clone())], n.clone()))
            .with_constraints(vec![TypeConstraint::new("Numeric", n, Vec::new())]),
    );

    scope.bind(
        "toFloat",
        TypeEntry::value(Type::new(function_of(vec![integer()], float()))),
    );
    scope
}

fn declare(
    scope: &mut TypeScope,
    name: &str,
    parameter: TypeVariable,
    members: Vec<(&str, LazyValue)>,
    implemented_for: &[LazyValue],
) {
    let interface = Rc::new(TypeInterface {
        name: Rc::from(name),
        parameters: vec![parameter],
        members: members
            .into_iter()
            .map(|(member, signature)| (member.to_string(), signature))
            .collect(),
    });
    for (member, signature) in &interface.members {
        scope.bind(member.clone(), interface.member_entry(signature));
    }
    scope.declare_interface(Rc::clone(&interface));
    for argument in implemented_for {
        let implementation = TypeImplementation::new(name, vec![argument.clone()]).unwrap();
        scope.declare_implementation(Rc::new(implementation));
    }
}

fn bind_generic(scope: &mut TypeScope, name: &str, ty: Type) {
    scope.bind(name, TypeEntry::generic(ty).unwrap());
}

/// Parse `source` (which must be clean) and type it against [`test_scope`].
pub fn infer_source(source: &str) -> (Vec<String>, TypedExpression) {
    let tokens = lumen_lexer::tokenize(source).tokens;
    let parsed = lumen_parse::interpret_syntax_tree(&tokens);
    assert!(
        parsed.messages.is_empty(),
        "unexpected parse diagnostics: {:?}",
        parsed.messages
    );
    assert_eq!(parsed.expressions.len(), 1, "expected one expression");
    let (log, typed) = type_expression(&test_scope(), &parsed.expressions[0]);
    let messages = log.iter().map(|message| message.text.clone()).collect();
    (messages, typed)
}
