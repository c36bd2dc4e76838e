//! Type expression parsing.
//!
//! `Name`, `Name<A, B>`, `(A, B) -> R`, `A -> R`, `() -> R` and `(T)`.
//! Arrows associate to the right.

use lumen_ir::{TokenKind, TypeExpression, TypeExpressionKind};

use lumen_stack::ensure_sufficient_stack;
use crate::Parser;

impl Parser<'_> {
    /// Parse a type, or return `None` without consuming anything.
    pub(crate) fn type_expression(&mut self) -> Option<TypeExpression> {
        ensure_sufficient_stack(|| self.try_parse(Self::type_expression_inner))
    }

    fn type_expression_inner(&mut self) -> Option<TypeExpression> {
        let start = self.pos;
        let parameters = if let Some(name) = self.eat(TokenKind::Identifier) {
            let arguments = self
                .match_list(
                    TokenKind::Lt,
                    TokenKind::Comma,
                    TokenKind::Gt,
                    "a type",
                    Self::type_expression,
                )
                .map(|list| list.items)
                .unwrap_or_default();
            let named = self.type_node(
                TypeExpressionKind::Named {
                    name: name.value.clone(),
                    arguments,
                },
                start,
            );
            if !self.check(TokenKind::Arrow) {
                return Some(named);
            }
            vec![named]
        } else {
            let list = self.match_list(
                TokenKind::LParen,
                TokenKind::Comma,
                TokenKind::RParen,
                "a type",
                Self::type_expression,
            )?;
            if !self.check(TokenKind::Arrow) {
                let mut items = list.items;
                if items.len() == 1 {
                    if let Some(inner) = items.pop() {
                        return Some(self.type_node(inner.kind, start));
                    }
                }
                self.expected_token(TokenKind::Arrow);
                return Some(self.type_node(TypeExpressionKind::Unrecognized, start));
            }
            list.items
        };

        self.advance();
        let result = self.required_type();
        Some(self.type_node(
            TypeExpressionKind::Function {
                parameters,
                result: Box::new(result),
            },
            start,
        ))
    }

    pub(crate) fn required_type(&mut self) -> TypeExpression {
        match self.type_expression() {
            Some(ty) => ty,
            None => {
                self.expected("a type");
                self.missing_type()
            }
        }
    }
}
