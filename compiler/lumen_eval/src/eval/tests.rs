#![allow(clippy::unwrap_used)]

use std::cell::Cell;

use lumen_ir::SourceSpan;
use lumen_types::{
    function_of, integer, list_of, monotize, type_expression, Type, TypeEntry, TypeScope,
};
use lumen_value::errors::{expected_argument, native};
use lumen_value::{EvalResult, EvaluationError, TypeVariable};
use pretty_assertions::assert_eq;

use super::*;

// ========================================
// Fixtures
// ========================================

fn generic(name: &str) -> LazyValue {
    Value::UnboundVariable(TypeVariable::fresh(name)).into_lazy()
}

fn integer_argument(function: &str, argument: &LazyValue) -> Result<i64, EvaluationError> {
    match argument.force()? {
        Value::Integer(n) => Ok(n),
        other => Err(expected_argument(function, "an integer", &other)),
    }
}

/// A few natives: `add`, `if`, `take`, the infinite `naturals` and `boom`,
/// which fails when forced.
fn environment() -> (TypeScope, Scope) {
    let mut types = TypeScope::new();
    let mut values = Scope::new();

    types.bind(
        "add",
        TypeEntry::value(Type::new(function_of(vec![integer(), integer()], integer()))),
    );
    values.bind(
        "add",
        Value::native("add", 2, |arguments| {
            let left = integer_argument("add", &arguments[0])?;
            let right = integer_argument("add", &arguments[1])?;
            Ok(Value::Integer(left + right))
        })
        .into_lazy(),
    );

    let (c, a) = (generic("C"), generic("A"));
    types.bind(
        "if",
        TypeEntry::generic(Type::new(function_of(vec![c, a.clone(), a.clone()], a))).unwrap(),
    );
    values.bind(
        "if",
        Value::native("if", 3, |arguments| {
            if arguments[0].force()?.is_truthy() {
                arguments[1].force()
            } else {
                arguments[2].force()
            }
        })
        .into_lazy(),
    );

    let e = generic("E");
    types.bind(
        "take",
        TypeEntry::generic(Type::new(function_of(
            vec![integer(), list_of(e.clone())],
            list_of(e),
        )))
        .unwrap(),
    );
    values.bind(
        "take",
        Value::native("take", 2, |arguments| {
            let count = integer_argument("take", &arguments[0])?;
            match arguments[1].force()? {
                Value::List(list) => {
                    Ok(Value::List(list.take(usize::try_from(count).unwrap_or(0))))
                }
                other => Err(expected_argument("take", "a list", &other)),
            }
        })
        .into_lazy(),
    );

    types.bind("naturals", TypeEntry::value(Type::new(list_of(integer()))));
    values.bind(
        "naturals",
        Value::List(LazyList::unfold(0_i64, |n| {
            Ok(Some((Value::Integer(*n).into_lazy(), n + 1)))
        }))
        .into_lazy(),
    );

    types.bind("boom", TypeEntry::value(Type::new(integer())));
    values.bind("boom", Lazy::failed(native("boom")));

    (types, values)
}

fn run(source: &str) -> EvalResult {
    let tokens = lumen_lexer::tokenize(source).tokens;
    let parsed = lumen_parse::interpret_syntax_tree(&tokens);
    assert!(parsed.messages.is_empty(), "{:?}", parsed.messages);
    assert_eq!(parsed.expressions.len(), 1);

    let (types, values) = environment();
    let (log, typed) = type_expression(&types, &parsed.expressions[0]);
    let messages: Vec<_> = log.iter().map(|message| message.text.clone()).collect();
    assert!(messages.is_empty(), "unexpected diagnostics: {messages:?}");
    let (log, mono) = monotize(&types, &typed, &typed.ty.value);
    assert!(log.is_empty(), "unexpected diagnostics");

    evaluate(&values, &mono).force()
}

fn shown(source: &str) -> String {
    run(source).unwrap().to_string()
}

fn node(kind: MonoKind) -> MonoExpression {
    MonoExpression {
        kind,
        ty: Value::Anything.into_lazy(),
        span: SourceSpan::default(),
    }
}

fn identifier(name: &str) -> MonoExpression {
    node(MonoKind::Identifier {
        name: name.to_string(),
        dictionaries: Vec::new(),
    })
}

// ========================================
// Programs
// ========================================

#[test]
fn test_literals() {
    assert_eq!(shown("1"), "1");
    assert_eq!(shown("2.5"), "2.5");
    assert_eq!(shown("\"text\""), "\"text\"");
    assert_eq!(shown("false"), "false");
    assert_eq!(shown("[1, 2]"), "[1, 2]");
}

#[test]
fn test_calls() {
    assert_eq!(shown("add(1, 2)"), "3");
    assert_eq!(shown("add(add(1, 2), 3)"), "6");
}

#[test]
fn test_curried_calls() {
    assert_eq!(shown("if(1)(2)(3)"), "2");
    assert_eq!(shown("if(0)(2, 3)"), "3");
    assert_eq!(shown("let increment = add(1); increment(41)"), "42");
}

#[test]
fn test_placeholders() {
    assert_eq!(shown("let pick = if(_, 1, 2); pick(false)"), "2");
    assert_eq!(shown("add(_, 10)(5)"), "15");
}

#[test]
fn test_closures_capture_their_scope() {
    assert_eq!(shown("let k = (x) => (y) => x; k(1)(2)"), "1");
    assert_eq!(shown("let x = 1; let f = () => x; let x = 2; f()"), "1");
    assert_eq!(shown("((a, b) => add(a, b))(2, 3)"), "5");
}

#[test]
fn test_unused_arguments_are_never_forced() {
    assert_eq!(shown("if(true, 1, boom)"), "1");
    assert_eq!(shown("let unused = boom; 7"), "7");
    assert_eq!(run("add(boom, 1)").unwrap_err(), native("boom"));
}

#[test]
fn test_infinite_lists() {
    assert_eq!(shown("take(3, naturals)"), "[0, 1, 2]");
    assert_eq!(shown("[take(2, naturals)]"), "[[0, 1]]");
}

#[test]
fn test_program_implementations() {
    let declarations = "interface Twice<T> { twice: (T) -> T }; \
                        implement Twice<Integer> { twice = (x) => add(x, x) }; ";
    assert_eq!(shown(&format!("{declarations}twice(5)")), "10");
    assert_eq!(
        shown(&format!(
            "{declarations}let quad = (x) => twice(twice(x)); quad(3)"
        )),
        "12"
    );
}

// ========================================
// Hand-built trees
// ========================================

#[test]
fn test_unresolved_identifier_is_fatal() {
    let value = evaluate(&Scope::new(), &identifier("missing"));
    let expected = EvaluationError::UnresolvedIdentifier {
        name: "missing".to_string(),
    };
    assert_eq!(value.force().unwrap_err(), expected);
    // The failure is cached, not retried.
    assert_eq!(value.force().unwrap_err(), expected);
}

#[test]
fn test_unrecognized_nodes_fail() {
    let value = evaluate(&Scope::new(), &node(MonoKind::Unrecognized));
    assert!(matches!(
        value.force(),
        Err(EvaluationError::UnresolvedType { .. })
    ));
}

#[test]
fn test_bound_values_are_computed_once() {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    let scope = Scope::new().with(
        "tick",
        Value::native("tick", 0, move |_| {
            counter.set(counter.get() + 1);
            Ok(Value::Integer(counter.get()))
        })
        .into_lazy(),
    );
    let program = node(MonoKind::Binding {
        name: "x".to_string(),
        value: Box::new(node(MonoKind::Call {
            callee: Box::new(identifier("tick")),
            arguments: Vec::new(),
        })),
        body: Box::new(node(MonoKind::Array(vec![identifier("x"), identifier("x")]))),
    });

    let value = evaluate(&scope, &program).force().unwrap();
    assert_eq!(count.get(), 0);
    assert_eq!(value.to_string(), "[1, 1]");
    assert_eq!(count.get(), 1);
}

#[test]
fn test_dictionaries_are_applied_before_arguments() {
    let dictionary = Value::record([(
        "double".to_string(),
        Value::native("double", 1, |arguments| {
            Ok(Value::Integer(2 * integer_argument("double", &arguments[0])?))
        })
        .into_lazy(),
    )]);
    // (fn [D | x] (D.double x))
    let function = node(MonoKind::Function {
        implicit_parameters: vec!["D".to_string()],
        parameters: vec!["x".to_string()],
        body: Rc::new(node(MonoKind::Call {
            callee: Box::new(node(MonoKind::Member {
                dictionary: "D".to_string(),
                member: "double".to_string(),
            })),
            arguments: vec![Some(identifier("x"))],
        })),
    });
    let program = node(MonoKind::Binding {
        name: "f".to_string(),
        value: Box::new(function),
        body: Box::new(node(MonoKind::Call {
            callee: Box::new(node(MonoKind::Identifier {
                name: "f".to_string(),
                dictionaries: vec!["Double<Integer>".to_string()],
            })),
            arguments: vec![Some(node(MonoKind::Integer(21)))],
        })),
    });

    let scope = Scope::new().with("Double<Integer>", dictionary.into_lazy());
    assert_eq!(evaluate(&scope, &program).force().unwrap().to_string(), "42");
}

#[test]
fn test_missing_dictionary_member() {
    let scope = Scope::new().with("D", Value::record(Vec::new()).into_lazy());
    let member = node(MonoKind::Member {
        dictionary: "D".to_string(),
        member: "show".to_string(),
    });
    assert_eq!(
        evaluate(&scope, &member).force().unwrap_err(),
        native("D has no member show")
    );
}
