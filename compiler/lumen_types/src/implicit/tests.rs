#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::testing::{infer_source, unbound};
use crate::ty::{float, integer, string};

/// Resolution of every method node, in tree order.
fn methods(typed: &TypedExpression) -> Vec<Option<ResolvedImplicit>> {
    let mut found = Vec::new();
    typed.walk(&mut |node| {
        if let TypedKind::Method { resolved, .. } = &node.kind {
            found.push(resolved.clone());
        }
    });
    found
}

/// Implicits of every identifier named `name`, in tree order.
fn identifier_implicits(typed: &TypedExpression, name: &str) -> Vec<Vec<ResolvedImplicit>> {
    let mut found = Vec::new();
    typed.walk(&mut |node| {
        if let TypedKind::Identifier {
            name: identifier,
            implicits,
        } = &node.kind
        {
            if identifier == name {
                found.push(implicits.clone());
            }
        }
    });
    found
}

fn clean(source: &str) -> TypedExpression {
    let (messages, typed) = infer_source(source);
    assert!(messages.is_empty(), "unexpected diagnostics: {messages:?}");
    typed
}

#[test]
fn test_concrete_methods_are_left_to_monotization() {
    assert_eq!(methods(&clean("1 + 2")), [None]);
}

#[test]
fn test_generic_methods_use_the_enclosing_parameter() {
    let typed = clean("let double = (x) => x + x; double(1)");
    let resolved = methods(&typed);
    assert_eq!(resolved.len(), 1);
    let Some(ResolvedImplicit::Parameter { key }) = &resolved[0] else {
        panic!("expected an implicit parameter, got {resolved:?}");
    };
    assert!(key.starts_with("Numeric<"));
    assert_eq!(
        identifier_implicits(&typed, "double"),
        [vec![ResolvedImplicit::Implementation {
            key: "Numeric<Integer>".to_string()
        }]]
    );
}

#[test]
fn test_constrained_calls_inside_generic_functions_forward_the_parameter() {
    let typed = clean("let total = (xs) => sum(xs); total([1.5])");
    let sums = identifier_implicits(&typed, "sum");
    assert_eq!(sums.len(), 1);
    assert!(matches!(
        sums[0].as_slice(),
        [ResolvedImplicit::Parameter { .. }]
    ));
    assert_eq!(
        identifier_implicits(&typed, "total"),
        [vec![ResolvedImplicit::Implementation {
            key: "Numeric<Float>".to_string()
        }]]
    );
}

#[test]
fn test_program_implementations_are_in_scope_for_the_body() {
    let typed = clean(
        "interface Describe<T> { describe: (T) -> String }; \
         implement Describe<Boolean> { describe = (b) => \"bool\" }; \
         let say = (x) => describe(x); say(true)",
    );
    assert_eq!(
        identifier_implicits(&typed, "say"),
        [vec![ResolvedImplicit::Implementation {
            key: "Describe<Boolean>".to_string()
        }]]
    );
}

#[test]
fn test_find_implementation_prefers_the_innermost_scope() {
    let mut root = TypeScope::new();
    root.declare_implementation(Rc::new(
        TypeImplementation::new("Show", vec![integer()]).unwrap(),
    ));
    let mut child = root.child();
    child.declare_implementation(Rc::new(
        TypeImplementation::new("Show", vec![float()]).unwrap(),
    ));

    let on_float = TypeConstraint::new("Show", float(), Vec::new());
    let on_string = TypeConstraint::new("Show", string(), Vec::new());
    let on_variable = TypeConstraint::new("Show", unbound("T", 7_000_001), Vec::new());

    assert_eq!(
        find_implementation(&child, &on_float).unwrap().unwrap().key,
        "Show<Float>"
    );
    assert!(find_implementation(&child, &on_string).unwrap().is_none());
    // A variable converges with anything; the innermost candidate wins.
    assert_eq!(
        find_implementation(&child, &on_variable).unwrap().unwrap().key,
        "Show<Float>"
    );
    assert!(find_implementation(&root, &on_float).unwrap().is_none());
}
