use lumen_ir::{ExpressionKind, Position, TokenRange};
use pretty_assertions::assert_eq;

use super::{messages, parse, render};

fn rendered(source: &str) -> Vec<String> {
    parse(source).expressions.iter().map(render).collect()
}

#[test]
fn test_empty_input_is_one_unrecognized_node() {
    let parsed = parse("");
    assert_eq!(parsed.expressions.len(), 1);
    assert!(parsed.expressions[0].is_unrecognized());
    assert_eq!(parsed.expressions[0].tokens, TokenRange::empty(0));
    assert_eq!(messages(""), ["Expected an expression"]);
}

#[test]
fn test_missing_closing_paren_in_call() {
    assert_eq!(messages("f(1, 2"), ["Expected \")\""]);
    assert_eq!(rendered("f(1, 2"), ["(f 1 2)"]);
}

#[test]
fn test_missing_separator_in_array() {
    assert_eq!(messages("[1 2]"), ["Expected \",\""]);
    assert_eq!(rendered("[1 2]"), ["[1, 2]"]);
}

#[test]
fn test_missing_operand() {
    assert_eq!(messages("1 +"), ["Expected an expression"]);
    assert_eq!(rendered("1 +"), ["(+ 1 ?)"]);
}

#[test]
fn test_let_missing_semicolon_and_equals() {
    assert_eq!(messages("let x 1; x"), ["Expected \"=\""]);
    assert_eq!(rendered("let x 1; x"), ["(let x 1 x)"]);
    assert_eq!(messages("let x = 1 x"), ["Expected \";\""]);
    assert_eq!(rendered("let x = 1 x"), ["(let x 1 x)"]);
}

#[test]
fn test_let_missing_body() {
    assert_eq!(messages("let x = 1;"), ["Expected an expression"]);
    let parsed = parse("let x = 1;");
    let ExpressionKind::Binding { body, .. } = &parsed.expressions[0].kind else {
        panic!("expected a binding");
    };
    assert!(body.is_unrecognized());
    assert!(body.tokens.is_empty());
    assert_eq!(body.span.begin, Position::new(0, 10));
}

#[test]
fn test_let_missing_name() {
    assert_eq!(messages("let = 1"), ["Expected an identifier", "Unexpected \"=\""]);
    assert_eq!(rendered("let = 1"), ["?", "?", "1"]);
}

#[test]
fn test_function_missing_body() {
    assert_eq!(messages("(x) =>"), ["Expected an expression"]);
    assert_eq!(rendered("(x) =>"), ["(fn [x] ?)"]);
}

#[test]
fn test_unmatched_tokens_become_unrecognized_runs() {
    let parsed = parse("1 ) ] 2");
    let ranges: Vec<TokenRange> = parsed.expressions.iter().map(|e| e.tokens).collect();
    assert_eq!(
        ranges,
        [
            TokenRange::new(0, 1),
            TokenRange::new(1, 3),
            TokenRange::new(3, 4)
        ]
    );
    assert_eq!(messages("1 ) ] 2"), ["Unexpected \")\""]);
}

#[test]
fn test_several_top_level_expressions() {
    assert_eq!(rendered("1 2"), ["1", "2"]);
    assert!(messages("1 2").is_empty());
}

#[test]
fn test_interface_recovers_member_errors() {
    assert_eq!(
        messages("interface Show<T> { show T -> String }; 1"),
        ["Expected \":\""]
    );
    assert_eq!(
        messages("interface Show<T> { show: }; 1"),
        ["Expected a type"]
    );
}

#[test]
fn test_implementation_requires_type_arguments() {
    assert_eq!(
        messages("implement Show { show = f }; 1"),
        ["Expected \"<\""]
    );
}

#[test]
fn test_integer_literal_out_of_range() {
    assert_eq!(
        messages("99999999999999999999"),
        ["Integer literal is too large."]
    );
    assert_eq!(rendered("99999999999999999999"), ["?"]);
}
