#![allow(clippy::unwrap_used)]

use super::*;
use lumen_ir::{Position, TokenKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).tokens.iter().map(|t| t.kind).collect()
}

fn values(source: &str) -> Vec<String> {
    tokenize(source).tokens.into_iter().map(|t| t.value).collect()
}

#[test]
fn test_lex_binding() {
    assert_eq!(
        kinds("let x = 42; x"),
        [
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Eq,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_lex_keywords_beat_identifiers() {
    assert_eq!(
        kinds("interface implement true false letter"),
        [
            TokenKind::Interface,
            TokenKind::Implement,
            TokenKind::Boolean,
            TokenKind::Boolean,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_lex_longest_operator_wins() {
    assert_eq!(
        kinds("== => = -> - .. <= >= != && ||"),
        [
            TokenKind::EqEq,
            TokenKind::FatArrow,
            TokenKind::Eq,
            TokenKind::Arrow,
            TokenKind::Minus,
            TokenKind::DotDot,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::NotEq,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
        ]
    );
}

#[test]
fn test_lex_range_is_not_a_float() {
    assert_eq!(
        kinds("1..2"),
        [TokenKind::Integer, TokenKind::DotDot, TokenKind::Integer]
    );
    assert_eq!(kinds("1.5"), [TokenKind::Float]);
}

#[test]
fn test_lex_underscore_placeholder() {
    assert_eq!(
        kinds("f(_, _x)"),
        [
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::Underscore,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn test_lex_underscore_before_string() {
    assert_eq!(
        kinds("f(_, \"s\")"),
        [
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::Underscore,
            TokenKind::Comma,
            TokenKind::String,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn test_lex_comments_are_dropped() {
    assert_eq!(values("1 // one\n/* two\n three */ 3"), ["1", "3"]);
}

#[test]
fn test_lex_block_comment_with_inner_stars() {
    assert_eq!(values("1 /** doc **/ + /* a * b */ 2"), ["1", "+", "2"]);
    assert_eq!(values("/***/ x /* ** */ y"), ["x", "y"]);
    assert!(tokenize("/* 1 * 2 */ 3").messages.is_empty());
}

#[test]
fn test_lex_unterminated_block_comment() {
    let result = tokenize("1 /* never closed\n 2");
    assert_eq!(
        result.tokens.iter().map(|t| t.value.as_str()).collect::<Vec<_>>(),
        ["1"]
    );
    let texts: Vec<&str> = result.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["Unterminated block comment"]);
    let message = &result.messages.messages()[0];
    assert_eq!(message.begin, Position::new(0, 2));
    assert_eq!(message.end, Position::new(1, 2));
}

#[test]
fn test_positions_account_for_comment_newlines() {
    let tokens = tokenize("/* a\nb */ x\n  y").tokens;
    assert_eq!(tokens[0].begin, Position::new(1, 5));
    assert_eq!(tokens[0].end, Position::new(1, 6));
    assert_eq!(tokens[1].begin, Position::new(2, 2));
}

#[test]
fn test_string_token_keeps_source_slice() {
    let tokens = tokenize(r#""a \"b\"""#).tokens;
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(string_literal_value(&tokens[0].value), "a \"b\"");
}

#[test]
fn test_unrecognized_run_is_one_message() {
    let result = tokenize("1 @#$ 2 ` 3");
    assert_eq!(values("1 @#$ 2 ` 3"), ["1", "2", "3"]);
    let texts: Vec<&str> = result.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Unrecognized characters \"@#$\"",
            "Unrecognized characters \"`\""
        ]
    );
    let first = &result.messages.messages()[0];
    assert_eq!(first.begin, Position::new(0, 2));
    assert_eq!(first.end, Position::new(0, 5));
}

#[test]
fn test_empty_and_blank_input() {
    assert!(tokenize("").tokens.is_empty());
    let blank = tokenize("  \n\t // nothing");
    assert!(blank.tokens.is_empty());
    assert!(blank.messages.is_empty());
}

fn token_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,5}",
        "[0-9]{1,4}",
        "[0-9]{1,3}\\.[0-9]{1,3}",
        "\"[a-z ]{0,5}\"",
        prop::sample::select(vec![
            "(", ")", "[", "]", "{", "}", ",", ";", ":", "=", "=>", "->", "..", "+", "-", "*",
            "/", "%", "==", "!=", "<", "<=", ">", ">=", "&&", "||", "!", "_",
        ])
        .prop_map(str::to_string),
    ]
}

fn separator() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(" ".to_string()),
        Just("\n".to_string()),
        Just("  \t".to_string()),
        Just(" // note\n".to_string()),
        Just(" /* block\n */ ".to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_token_values_reproduce_input(
        parts in prop::collection::vec((token_text(), separator()), 0..24)
    ) {
        let source: String = parts.iter().map(|(t, s)| format!("{t}{s}")).collect();
        let expected: Vec<String> = parts.into_iter().map(|(t, _)| t).collect();
        let result = tokenize(&source);
        prop_assert!(result.messages.is_empty());
        prop_assert_eq!(values(&source), expected);
    }

    #[test]
    fn prop_tokens_slice_their_positions(source in "\\PC{0,40}") {
        let lines = LineIndex::new(&source);
        let result = tokenize(&source);
        let mut previous_end = 0;
        for token in &result.tokens {
            prop_assert!(token.span.start >= previous_end);
            prop_assert_eq!(&source[token.span.to_range()], token.value.as_str());
            prop_assert_eq!(lines.source_span(token.span), token.source_span());
            previous_end = token.span.end;
        }
    }
}
