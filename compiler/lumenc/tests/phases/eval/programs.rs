use pretty_assertions::assert_eq;

use crate::common::{run, value_of};

#[test]
fn test_literal() {
    assert_eq!(value_of("1"), "1");
}

#[test]
fn test_integer_addition() {
    assert_eq!(value_of("1 + 1"), "2");
    assert_eq!(value_of("1 + 2"), "3");
}

#[test]
fn test_float_addition_keeps_floats() {
    assert_eq!(value_of("1.5 + 2.5"), "4.0");
}

#[test]
fn test_curried_if() {
    assert_eq!(value_of("if(1)(2)(3)"), "2");
    assert_eq!(value_of("if(0)(2)(3)"), "3");
}

#[test]
fn test_let_and_functions() {
    assert_eq!(value_of("let x = 2; let y = x * 10; y + 1"), "21");
    assert_eq!(value_of("let add = (a, b) => a + b; add(1)(2)"), "3");
    assert_eq!(value_of("let id = (x) => x; let a = id(1); id(\"s\")"), "\"s\"");
    assert_eq!(value_of("(() => 7)()"), "7");
}

#[test]
fn test_closures_capture_their_scope() {
    assert_eq!(
        value_of("let adder = (n) => (x) => x + n; let add5 = adder(5); add5(1) + add5(2)"),
        "13"
    );
}

#[test]
fn test_strings_and_lists() {
    assert_eq!(value_of("\"a \\\"quoted\\\" word\""), "\"a \\\"quoted\\\" word\"");
    assert_eq!(value_of("[[1], [], [2, 3]]"), "[[1], [], [2, 3]]");
    assert_eq!(value_of("take(map(1.., (n) => n * 2), 4)"), "[2, 4, 6, 8]");
}

#[test]
fn test_laziness_skips_unused_failures() {
    assert_eq!(value_of("let boom = 1 / 0; 5"), "5");
    assert_eq!(value_of("if(true, 1, head(drop([1], 1)))"), "1");
}

#[test]
fn test_runtime_failure_is_reported_apart_from_diagnostics() {
    let executed = run("let boom = 1 / 0; boom + 1");
    assert!(executed.compiled);
    assert!(!executed.evaluated);
    assert!(executed.messages.is_empty());
    assert_eq!(executed.error.unwrap().to_string(), "Division by zero.");
}

#[test]
fn test_comments_between_tokens() {
    assert_eq!(value_of("1 /* one */ + /** a * b **/ 1"), "2");
    assert_eq!(value_of("// leading\nlet x = 2; /* multi\n line */ x * x"), "4");
}

#[test]
fn test_long_lists_are_consumed_and_released() {
    assert_eq!(value_of("length(range(0, 1000000))"), "1000000");
    assert_eq!(value_of("sum(range(0, 100000))"), "4999950000");
    assert_eq!(value_of("length(take(map(0.., (n) => n + 1), 500000))"), "500000");
}
