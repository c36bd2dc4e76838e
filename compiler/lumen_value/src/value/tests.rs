#![allow(clippy::unwrap_used)]

use super::*;
use crate::EvaluationError;
use pretty_assertions::assert_eq;

fn literal(name: &str) -> Value {
    Value::literal(name)
}

fn function_type(parameter: Value, result: Value) -> Value {
    Value::application(literal(FUNCTION_LITERAL), vec![parameter, result])
}

#[test]
fn test_display_scalars() {
    assert_eq!(Value::Integer(-3).to_string(), "-3");
    assert_eq!(Value::Float(4.0).to_string(), "4.0");
    assert_eq!(Value::Float(0.5).to_string(), "0.5");
    assert_eq!(Value::string("a\"b").to_string(), "\"a\\\"b\"");
    assert_eq!(Value::Boolean(true).to_string(), "true");
    assert_eq!(Value::Nothing.to_string(), "Nothing");
}

#[test]
fn test_display_type_application() {
    let list = Value::application(literal("List"), vec![literal("Integer")]);
    assert_eq!(list.to_string(), "List<Integer>");

    let variable = Value::UnboundVariable(TypeVariable::new("T", 3));
    let nested = Value::application(literal("Pair"), vec![variable, literal("String")]);
    assert_eq!(nested.to_string(), "Pair<T, String>");
}

#[test]
fn test_display_uncurries_function_types() {
    let binary = function_type(
        literal("Integer"),
        function_type(literal("Float"), literal("String")),
    );
    assert_eq!(binary.to_string(), "(Integer, Float) -> String");

    let nullary = Value::application(literal(FUNCTION_LITERAL), vec![literal("Integer")]);
    assert_eq!(nullary.to_string(), "() -> Integer");

    let returns_nullary = function_type(literal("Integer"), nullary);
    assert_eq!(returns_nullary.to_string(), "(Integer) -> () -> Integer");
}

#[test]
fn test_display_truncates_long_lists() {
    let list = LazyList::unfold(0i64, |n| Ok(Some((Lazy::ready(Value::Integer(*n)), n + 1))));
    let text = Value::List(list).to_string();
    assert!(text.starts_with("[0, 1, 2"));
    assert!(text.ends_with("98, 99, ...]"));
}

#[test]
fn test_display_failed_component() {
    let list = Value::List(LazyList::from_values(vec![
        Lazy::ready(Value::Integer(1)),
        Lazy::failed(EvaluationError::CyclicForce),
    ]));
    assert_eq!(list.to_string(), "[1, <error>]");
}

#[test]
fn test_display_record() {
    let record = Value::record([
        ("b".to_string(), Value::Integer(2).into_lazy()),
        ("a".to_string(), Value::string("x").into_lazy()),
    ]);
    assert_eq!(record.to_string(), "{a: \"x\", b: 2}");
}

#[test]
fn test_truthiness() {
    assert!(Value::Integer(2).is_truthy());
    assert!(!Value::Integer(0).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(!Value::string("").is_truthy());
    assert!(Value::string("no").is_truthy());
    assert!(!Value::Boolean(false).is_truthy());
    assert!(!Value::Nothing.is_truthy());
    assert!(Value::list(Vec::new()).is_truthy());
}

#[test]
fn test_arity_of_callables() {
    let native = Value::native("pair", 2, |arguments| arguments[0].force());
    assert_eq!(native.arity(), Some(2));
    assert!(native.is_callable());

    let partial = Value::PartialApplication(PartialApplication {
        callee: Rc::new(native.clone()),
        captured: vec![None],
        remaining_arity: 2,
    });
    assert_eq!(partial.arity(), Some(2));
    assert_eq!(partial.to_string(), "<partial <native pair/2>/2>");

    assert_eq!(Value::Integer(1).arity(), None);
    assert!(!Value::Integer(1).is_callable());
}

#[test]
fn test_type_variables_compare_by_id() {
    assert_eq!(TypeVariable::new("T", 1), TypeVariable::new("U", 1));
    assert_ne!(TypeVariable::new("T", 1), TypeVariable::new("T", 2));
    let bound = Value::BoundVariable(TypeVariable::new("A", 9));
    assert!(bound.is_variable());
    assert_eq!(bound.to_string(), "A");
}

#[test]
fn test_fresh_variables_are_distinct() {
    let first = TypeVariable::fresh("T");
    let second = TypeVariable::fresh("T");
    assert_ne!(first, second);
}
