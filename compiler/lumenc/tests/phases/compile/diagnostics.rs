use lumen_diagnostic::Level;
use lumen_ir::Position;
use pretty_assertions::assert_eq;

use crate::common::{diagnostics_of, texts};

#[test]
fn test_unrecognized_identifier_spans_the_name() {
    let messages = diagnostics_of("non_existent_function()");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, Level::Error);
    assert_eq!(messages[0].text, "Unrecognized identifier non_existent_function");
    assert_eq!(messages[0].begin, Position::new(0, 0));
    assert_eq!(messages[0].end, Position::new(0, 21));
}

#[test]
fn test_incorrect_argument_points_at_the_argument() {
    let messages = diagnostics_of("1 + \"1\"");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "Argument has an incorrect type.");
    assert_eq!(messages[0].begin, Position::new(0, 4));
    assert_eq!(messages[0].end, Position::new(0, 7));
}

#[test]
fn test_positions_count_lines() {
    let messages = diagnostics_of("let x = 1;\nmissing(x)");
    assert_eq!(texts(&messages), ["Unrecognized identifier missing"]);
    assert_eq!(messages[0].begin, Position::new(1, 0));
    assert_eq!(messages[0].end, Position::new(1, 7));
}

#[test]
fn test_positions_after_a_multi_line_comment() {
    let messages = diagnostics_of("/* first\n   second */ let x = 1;\n  missing(x)");
    assert_eq!(texts(&messages), ["Unrecognized identifier missing"]);
    assert_eq!(messages[0].begin, Position::new(2, 2));
    assert_eq!(messages[0].end, Position::new(2, 9));
}

#[test]
fn test_unterminated_comment_stops_compilation() {
    let messages = diagnostics_of("1 + /* 2");
    assert_eq!(texts(&messages), ["Unterminated block comment"]);
    assert_eq!(messages[0].begin, Position::new(0, 4));
    assert_eq!(messages[0].end, Position::new(0, 8));
}

#[test]
fn test_lexer_errors_stop_compilation() {
    let messages = diagnostics_of("1 + ` 2");
    assert_eq!(texts(&messages), ["Unrecognized characters \"`\""]);
}

#[test]
fn test_type_errors() {
    assert_eq!(
        texts(&diagnostics_of("[1, \"a\"]")),
        ["Array elements have incompatible types."]
    );
    assert_eq!(texts(&diagnostics_of("1(2)")), ["Expression is not a function."]);
    assert_eq!(texts(&diagnostics_of("toFloat(1, 2)")), ["Too many arguments."]);
    assert_eq!(
        texts(&diagnostics_of("sum([true])")),
        ["No implementation of Numeric for Boolean"]
    );
}

#[test]
fn test_let_is_not_recursive() {
    assert_eq!(
        texts(&diagnostics_of("let f = (n) => f(n); f(1)")),
        ["Unrecognized identifier f"]
    );
}

#[test]
fn test_implementation_diagnostics() {
    assert_eq!(
        texts(&diagnostics_of(
            "interface Describe<T> { describe: (T) -> String }; \
             implement Describe<Integer> { describe = (x) => 1 }; 1"
        )),
        ["Implementation member describe has an incorrect type."]
    );
}
