#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::prelude;
use crate::library::Environment;
use crate::pipeline::execute;
use lumen_value::Value;

fn environment() -> Environment {
    prelude().environment().unwrap()
}

/// Rendered value of a program that must compile and evaluate.
fn eval(source: &str) -> String {
    let executed = execute(source, &environment());
    assert!(
        executed.messages.is_empty(),
        "unexpected diagnostics for {source}: {:?}",
        executed.messages
    );
    match (executed.result, executed.error) {
        (Some(value), None) => value.to_string(),
        (_, error) => panic!("{source} failed to evaluate: {error:?}"),
    }
}

/// Message of a program that compiles but fails while evaluating.
fn failure(source: &str) -> String {
    let executed = execute(source, &environment());
    assert!(executed.compiled, "{source}: {:?}", executed.messages);
    executed.error.unwrap().to_string()
}

#[test]
fn test_prelude_builds() {
    let environment = environment();
    for name in ["%", "if", "rangeFrom", "sum", "identity"] {
        assert!(environment.values.contains(name), "{name} is missing");
    }
    for (dictionary, member) in [
        ("Numeric<Integer>", "+"),
        ("Equatable<Integer>", "=="),
        ("Comparable<String>", "<"),
    ] {
        let record = environment.values.lookup(dictionary).unwrap().force().unwrap();
        match record {
            Value::Record(fields) => assert!(fields.contains_key(member), "{dictionary}.{member}"),
            other => panic!("{dictionary} is {other}"),
        }
    }
}

#[test]
fn test_integer_arithmetic() {
    assert_eq!(eval("1 + 2 * 3"), "7");
    assert_eq!(eval("(1 + 2) * 3"), "9");
    assert_eq!(eval("7 / 2"), "3");
    assert_eq!(eval("7 % 3"), "1");
    assert_eq!(eval("-(2 - 5)"), "3");
}

#[test]
fn test_float_arithmetic() {
    assert_eq!(eval("1.5 + 2.5"), "4.0");
    assert_eq!(eval("1.0 / 4.0"), "0.25");
    assert_eq!(eval("toFloat(3) * 0.5"), "1.5");
}

#[test]
fn test_arithmetic_failures() {
    assert_eq!(failure("1 / 0"), "Division by zero.");
    assert_eq!(failure("1 % 0"), "Modulo by zero.");
    assert_eq!(failure("9223372036854775807 + 1"), "Integer overflow.");
}

#[test]
fn test_comparison() {
    assert_eq!(eval("1 == 1"), "true");
    assert_eq!(eval("\"a\" != \"b\""), "true");
    assert_eq!(eval("true == false"), "false");
    assert_eq!(eval("2 < 1"), "false");
    assert_eq!(eval("1.5 >= 1.5"), "true");
    assert_eq!(eval("\"apple\" < \"banana\""), "true");
}

#[test]
fn test_comparison_requires_matching_types() {
    let executed = execute("1 < 1.5", &environment());
    assert!(!executed.compiled);
    assert_eq!(executed.messages.len(), 1);
}

#[test]
fn test_logic_uses_truthiness() {
    assert_eq!(eval("not(0)"), "true");
    assert_eq!(eval("!true"), "false");
    assert_eq!(eval("1 && \"\""), "false");
    assert_eq!(eval("0 || [1]"), "true");
    assert_eq!(eval("if(\"yes\", 1, 2)"), "1");
    assert_eq!(eval("if(0.0, 1, 2)"), "2");
}

#[test]
fn test_short_circuit_skips_the_right_operand() {
    assert_eq!(eval("false && 1 / 0 == 1"), "false");
    assert_eq!(eval("true || 1 / 0 == 1"), "true");
    assert_eq!(eval("if(true, 1, 1 / 0)"), "1");
}

#[test]
fn test_ranges_and_indexing() {
    assert_eq!(eval("range(1, 4)"), "[1, 2, 3]");
    assert_eq!(eval("1..4"), "[1, 2, 3]");
    assert_eq!(eval("range(3, 3)"), "[]");
    assert_eq!(eval("[10, 20, 30][1]"), "20");
    assert_eq!(eval("[10, 20, 30][1:]"), "[20, 30]");
    assert_eq!(eval("[10, 20, 30][:2]"), "[10, 20]");
    assert_eq!(eval("(0..10)[2:5]"), "[2, 3, 4]");
    assert_eq!(failure("[1, 2][5]"), "Index 5 is out of bounds.");
}

#[test]
fn test_infinite_lists_stay_lazy() {
    assert_eq!(eval("take(rangeFrom(5), 3)"), "[5, 6, 7]");
    assert_eq!(eval("(0..)[1000]"), "1000");
    assert_eq!(
        eval("take(filter(map(0.., (n) => n * n), (n) => n % 2 == 1), 3)"),
        "[1, 9, 25]"
    );
    assert_eq!(eval("head(tail(rangeFrom(0)))"), "1");
}

#[test]
fn test_list_functions() {
    assert_eq!(eval("length([1, 2, 3])"), "3");
    assert_eq!(eval("length([])"), "0");
    assert_eq!(eval("map([1, 2], (x) => x + 1)"), "[2, 3]");
    assert_eq!(eval("fold([1, 2, 3], 10, (acc, x) => acc - x)"), "4");
    assert_eq!(eval("drop([1, 2, 3], 5)"), "[]");
    assert_eq!(failure("head(drop([1], 1))"), "head of an empty list");
}

#[test]
fn test_lazy_elements_are_not_forced() {
    assert_eq!(eval("length([1 / 0, 2])"), "2");
    assert_eq!(eval("[1 / 0, 2][1]"), "2");
}

#[test]
fn test_sum_dispatches_on_the_element_type() {
    assert_eq!(eval("sum([1, 2, 3])"), "6");
    assert_eq!(eval("sum([0.5, 0.25])"), "0.75");
    assert_eq!(eval("sum(range(0, 0))"), "0");

    let executed = execute("sum([\"a\"])", &environment());
    assert!(!executed.compiled);
    let texts: Vec<_> = executed.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["No implementation of Numeric for String"]);
}

#[test]
fn test_generic_program_functions_use_prelude_dictionaries() {
    assert_eq!(eval("let double = (x) => x + x; double(2.5)"), "5.0");
    assert_eq!(eval("let total = (xs) => sum(xs); total([1, 2])"), "3");
}

#[test]
fn test_conversions() {
    assert_eq!(eval("toFloat(2)"), "2.0");
    assert_eq!(eval("toString(42)"), "\"42\"");
    assert_eq!(eval("toString(\"text\")"), "\"text\"");
    assert_eq!(eval("toString([1, 2])"), "\"[1, 2]\"");
    assert_eq!(eval("identity(true)"), "true");
    assert_eq!(eval("identity(\"a\")"), "\"a\"");
}

#[test]
fn test_placeholders_make_functions() {
    assert_eq!(
        eval("map([0, 2, 0], if(_, \"y\", \"n\"))"),
        "[\"n\", \"y\", \"n\"]"
    );
    assert_eq!(eval("let halve = (x) => x / 2; map([9, 4], halve)"), "[4, 2]");
}
