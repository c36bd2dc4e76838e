//! Parser tests.
//!
//! - `expressions`: literals, operators, precedence and desugaring
//! - `declarations`: `let`, `interface`, `implement` and type expressions
//! - `recovery`: diagnostics and partial trees on malformed input
//! - `properties`: totality and token-range partitioning

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod recovery;

use lumen_ir::{ExpressionKind, TypeExpression, TypeExpressionKind, UntypedExpression};

use crate::{interpret_syntax_tree, Parsed};

pub(crate) fn parse(source: &str) -> Parsed {
    let tokens = lumen_lexer::tokenize(source).tokens;
    interpret_syntax_tree(&tokens)
}

/// Parse a single clean expression and render it.
pub(crate) fn sexp(source: &str) -> String {
    let parsed = parse(source);
    let messages: Vec<String> = parsed.messages.iter().map(|m| m.text.clone()).collect();
    assert!(messages.is_empty(), "unexpected diagnostics: {messages:?}");
    assert_eq!(parsed.expressions.len(), 1, "expected one expression");
    render(&parsed.expressions[0])
}

/// Diagnostic texts in order.
pub(crate) fn messages(source: &str) -> Vec<String> {
    parse(source)
        .messages
        .iter()
        .map(|m| m.text.clone())
        .collect()
}

/// Compact s-expression rendering of a tree.
pub(crate) fn render(expression: &UntypedExpression) -> String {
    match &expression.kind {
        ExpressionKind::Integer(value) => value.to_string(),
        ExpressionKind::Float(value) => format!("{value:?}"),
        ExpressionKind::String(value) => format!("{value:?}"),
        ExpressionKind::Boolean(value) => value.to_string(),
        ExpressionKind::Identifier(name) => name.clone(),
        ExpressionKind::Array(elements) => format!("[{}]", join(elements.iter().map(render))),
        ExpressionKind::Function { parameters, body } => format!(
            "(fn [{}] {})",
            join(parameters.iter().map(|p| p.value.clone())),
            render(body)
        ),
        ExpressionKind::FunctionCall { callee, arguments } => {
            let mut parts = vec![render(callee)];
            parts.extend(
                arguments
                    .iter()
                    .map(|a| a.as_ref().map_or_else(|| "_".to_string(), render)),
            );
            format!("({})", parts.join(" "))
        }
        ExpressionKind::Binding { name, value, body } => {
            format!("(let {} {} {})", name.value, render(value), render(body))
        }
        ExpressionKind::Interface {
            name,
            parameters,
            members,
            body,
        } => format!(
            "(interface {}<{}> {{{}}} {})",
            name.value,
            join(parameters.iter().map(|p| p.value.clone())),
            join(
                members
                    .iter()
                    .map(|m| format!("{}: {}", m.name.value, render_type(&m.signature)))
            ),
            render(body)
        ),
        ExpressionKind::Implementation {
            interface,
            arguments,
            members,
            body,
        } => format!(
            "(implement {}<{}> {{{}}} {})",
            interface.value,
            join(arguments.iter().map(render_type)),
            join(
                members
                    .iter()
                    .map(|m| format!("{} = {}", m.name.value, render(&m.value)))
            ),
            render(body)
        ),
        ExpressionKind::Unrecognized => "?".to_string(),
    }
}

pub(crate) fn render_type(ty: &TypeExpression) -> String {
    match &ty.kind {
        TypeExpressionKind::Named { name, arguments } if arguments.is_empty() => name.clone(),
        TypeExpressionKind::Named { name, arguments } => {
            format!("{name}<{}>", join(arguments.iter().map(render_type)))
        }
        TypeExpressionKind::Function { parameters, result } => format!(
            "({}) -> {}",
            join(parameters.iter().map(render_type)),
            render_type(result)
        ),
        TypeExpressionKind::Unrecognized => "?".to_string(),
    }
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}
