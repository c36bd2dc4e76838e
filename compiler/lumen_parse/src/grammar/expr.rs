//! Expression interpreters.
//!
//! Operators desugar to calls of plain identifiers so later phases only see
//! calls: `a + b` is `+(a, b)`, `-a` is `negate(a)`, `!a` is `not(a)`,
//! `a..b` is `range(a, b)`, `a..` is `rangeFrom(a)`, `xs[i]` is `at(xs, i)`,
//! `xs[a:b]` is `slice(xs, a, b)`, `xs[a:]` is `drop(xs, a)` and `xs[:b]` is
//! `take(xs, b)`.

use lumen_ir::{ExpressionKind, Token, TokenKind, UntypedExpression};

use super::{POSTFIX_PRECEDENCE, PREFIX_PRECEDENCE};
use crate::Parser;

/// Binding power and callee name of a binary operator token.
fn binary_operator(kind: TokenKind) -> Option<(u8, &'static str)> {
    let operator = match kind {
        TokenKind::PipePipe => (1, "||"),
        TokenKind::AmpAmp => (2, "&&"),
        TokenKind::EqEq => (3, "=="),
        TokenKind::NotEq => (3, "!="),
        TokenKind::Lt => (4, "<"),
        TokenKind::LtEq => (4, "<="),
        TokenKind::Gt => (4, ">"),
        TokenKind::GtEq => (4, ">="),
        TokenKind::Plus => (6, "+"),
        TokenKind::Minus => (6, "-"),
        TokenKind::Star => (7, "*"),
        TokenKind::Slash => (7, "/"),
        TokenKind::Percent => (7, "%"),
        _ => return None,
    };
    Some(operator)
}

const RANGE_PRECEDENCE: u8 = 5;

impl Parser<'_> {
    // Prefix interpreters

    pub(super) fn literal(&mut self, _min_precedence: u8) -> Option<UntypedExpression> {
        let start = self.pos;
        let token = self.current()?;
        let kind = match token.kind {
            TokenKind::Integer => match token.value.parse::<i64>() {
                Ok(value) => ExpressionKind::Integer(value),
                Err(_) => {
                    self.log
                        .error("Integer literal is too large.", token.source_span());
                    ExpressionKind::Unrecognized
                }
            },
            TokenKind::Float => match token.value.parse::<f64>() {
                Ok(value) => ExpressionKind::Float(value),
                Err(_) => {
                    self.log.error("Invalid float literal.", token.source_span());
                    ExpressionKind::Unrecognized
                }
            },
            TokenKind::String => {
                ExpressionKind::String(lumen_lexer::string_literal_value(&token.value))
            }
            TokenKind::Boolean => ExpressionKind::Boolean(token.value == "true"),
            _ => return None,
        };
        self.advance();
        Some(self.node(kind, start))
    }

    pub(super) fn identifier(&mut self, _min_precedence: u8) -> Option<UntypedExpression> {
        let start = self.pos;
        let token = self.eat(TokenKind::Identifier)?;
        Some(self.node(ExpressionKind::Identifier(token.value.clone()), start))
    }

    /// `[a, b, c]`
    pub(super) fn array(&mut self, _min_precedence: u8) -> Option<UntypedExpression> {
        let start = self.pos;
        let list = self.match_list(
            TokenKind::LBracket,
            TokenKind::Comma,
            TokenKind::RBracket,
            "an expression",
            |p| p.expression(0),
        )?;
        Some(self.node(ExpressionKind::Array(list.items), start))
    }

    /// `(a, b) => body`, `() => body` or `a => body`.
    pub(super) fn function(&mut self, _min_precedence: u8) -> Option<UntypedExpression> {
        if !self.look_ahead(Self::function_head) {
            return None;
        }
        let start = self.pos;
        let parameters: Vec<Token> = if self.check(TokenKind::Identifier) {
            self.advance().into_iter().cloned().collect()
        } else {
            self.match_list(
                TokenKind::LParen,
                TokenKind::Comma,
                TokenKind::RParen,
                "a parameter",
                |p| p.eat(TokenKind::Identifier).cloned(),
            )
            .map(|list| list.items)
            .unwrap_or_default()
        };
        self.expect(TokenKind::FatArrow);
        let body = self.required_expression(0);
        Some(self.node(
            ExpressionKind::Function {
                parameters,
                body: Box::new(body),
            },
            start,
        ))
    }

    /// Whether the tokens at the cursor start a function literal.
    fn function_head(&mut self) -> bool {
        if self.eat(TokenKind::Identifier).is_some() {
            return self.check(TokenKind::FatArrow);
        }
        if self.eat(TokenKind::LParen).is_none() {
            return false;
        }
        if self.eat(TokenKind::Identifier).is_some() {
            while self.eat(TokenKind::Comma).is_some() {
                if self.eat(TokenKind::Identifier).is_none() {
                    return false;
                }
            }
        }
        self.eat(TokenKind::RParen).is_some() && self.check(TokenKind::FatArrow)
    }

    /// `(expression)`. The parentheses become part of the inner node's range.
    pub(super) fn parenthesized(&mut self, _min_precedence: u8) -> Option<UntypedExpression> {
        let start = self.pos;
        self.eat(TokenKind::LParen)?;
        let inner = self.required_expression(0);
        self.expect(TokenKind::RParen);
        Some(self.node(inner.kind, start))
    }

    /// `-x` and `!x`.
    pub(super) fn unary(&mut self, _min_precedence: u8) -> Option<UntypedExpression> {
        let start = self.pos;
        let name = match self.current_kind()? {
            TokenKind::Minus => "negate",
            TokenKind::Bang => "not",
            _ => return None,
        };
        let callee = self.operator_identifier(name, start);
        self.advance();
        let operand = self.required_expression(PREFIX_PRECEDENCE);
        Some(self.call_node(callee, vec![Some(operand)], start))
    }

    // Continuations

    /// `callee(a, _, c)`
    pub(super) fn call(
        &mut self,
        previous: UntypedExpression,
        min_precedence: u8,
    ) -> Result<UntypedExpression, UntypedExpression> {
        if POSTFIX_PRECEDENCE <= min_precedence || !self.check(TokenKind::LParen) {
            return Err(previous);
        }
        let start = previous.tokens.start;
        let Some(list) = self.match_list(
            TokenKind::LParen,
            TokenKind::Comma,
            TokenKind::RParen,
            "an expression",
            Self::argument,
        ) else {
            return Err(previous);
        };
        Ok(self.call_node(previous, list.items, start))
    }

    fn argument(&mut self) -> Option<Option<UntypedExpression>> {
        if self.eat(TokenKind::Underscore).is_some() {
            return Some(None);
        }
        self.expression(0).map(Some)
    }

    /// `xs[i]`, `xs[a:b]`, `xs[a:]` and `xs[:b]`.
    pub(super) fn index(
        &mut self,
        previous: UntypedExpression,
        min_precedence: u8,
    ) -> Result<UntypedExpression, UntypedExpression> {
        if POSTFIX_PRECEDENCE <= min_precedence || !self.check(TokenKind::LBracket) {
            return Err(previous);
        }
        let start = previous.tokens.start;
        let bracket = self.pos;
        self.advance();

        let lower = if self.check(TokenKind::Colon) {
            None
        } else {
            Some(self.required_expression(0))
        };
        let (name, arguments) = if self.eat(TokenKind::Colon).is_some() {
            let upper = if self.check(TokenKind::RBracket) {
                None
            } else {
                Some(self.required_expression(0))
            };
            match (lower, upper) {
                (Some(lower), Some(upper)) => ("slice", vec![Some(lower), Some(upper)]),
                (Some(lower), None) => ("drop", vec![Some(lower)]),
                (None, Some(upper)) => ("take", vec![Some(upper)]),
                (None, None) => {
                    self.expected("an expression");
                    ("drop", vec![Some(self.missing())])
                }
            }
        } else {
            ("at", vec![lower])
        };
        self.expect(TokenKind::RBracket);

        let callee = self.operator_identifier(name, bracket);
        let mut all = Vec::with_capacity(arguments.len() + 1);
        all.push(Some(previous));
        all.extend(arguments);
        Ok(self.call_node(callee, all, start))
    }

    /// `a..b`, or `a..` when no upper bound follows.
    pub(super) fn range(
        &mut self,
        previous: UntypedExpression,
        min_precedence: u8,
    ) -> Result<UntypedExpression, UntypedExpression> {
        if RANGE_PRECEDENCE <= min_precedence || !self.check(TokenKind::DotDot) {
            return Err(previous);
        }
        let start = previous.tokens.start;
        let operator = self.pos;
        self.advance();
        match self.expression(RANGE_PRECEDENCE) {
            Some(upper) => {
                let callee = self.operator_identifier("range", operator);
                Ok(self.call_node(callee, vec![Some(previous), Some(upper)], start))
            }
            None => {
                let callee = self.operator_identifier("rangeFrom", operator);
                Ok(self.call_node(callee, vec![Some(previous)], start))
            }
        }
    }

    /// Left-associative binary operators.
    pub(super) fn binary(
        &mut self,
        previous: UntypedExpression,
        min_precedence: u8,
    ) -> Result<UntypedExpression, UntypedExpression> {
        let Some((precedence, name)) = self.current_kind().and_then(binary_operator) else {
            return Err(previous);
        };
        if precedence <= min_precedence {
            return Err(previous);
        }
        let start = previous.tokens.start;
        let callee = self.operator_identifier(name, self.pos);
        self.advance();
        let right = self.required_expression(precedence);
        Ok(self.call_node(callee, vec![Some(previous), Some(right)], start))
    }

    fn call_node(
        &self,
        callee: UntypedExpression,
        arguments: Vec<Option<UntypedExpression>>,
        start: usize,
    ) -> UntypedExpression {
        self.node(
            ExpressionKind::FunctionCall {
                callee: Box::new(callee),
                arguments,
            },
            start,
        )
    }
}
