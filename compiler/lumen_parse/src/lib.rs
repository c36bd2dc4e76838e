//! Lumen Parser - precedence-climbing expression parser with error recovery.
//!
//! The grammar is a family of small interpreters. Prefix interpreters start an
//! expression and are tried in order until one fires ([`Parser::first_of`]);
//! continuation interpreters take the expression parsed so far and extend it
//! (calls, indexing, ranges, binary operators) until none applies.
//!
//! Parsing never fails. Every diagnostic is recorded in the parser's [`Log`]
//! and the returned nodes always cover the whole token list: tokens that no
//! interpreter accepts become `Unrecognized` nodes.

mod grammar;
mod list;
mod snapshot;

use lumen_diagnostic::Log;
use lumen_ir::{
    ExpressionKind, Position, SourceSpan, Token, TokenKind, TokenRange, TypeExpression,
    TypeExpressionKind, UntypedExpression,
};
use tracing::debug;

pub use snapshot::ParserSnapshot;

/// Output of [`interpret_syntax_tree`].
#[derive(Clone, Debug)]
pub struct Parsed {
    /// Never empty. Token ranges partition the input in order.
    pub expressions: Vec<UntypedExpression>,
    pub messages: Log,
}

/// Output of [`interpret_type_expression`].
#[derive(Clone, Debug)]
pub struct ParsedType {
    pub ty: TypeExpression,
    pub messages: Log,
}

/// Parse a token list into top-level expressions.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn interpret_syntax_tree(tokens: &[Token]) -> Parsed {
    let mut parser = Parser::new(tokens);
    let expressions = parser.top_level();
    debug!(
        nodes = expressions.len(),
        errors = parser.log.len(),
        "parsed"
    );
    Parsed {
        expressions,
        messages: parser.log,
    }
}

/// Parse a token list as one type expression, such as a library signature.
pub fn interpret_type_expression(tokens: &[Token]) -> ParsedType {
    let mut parser = Parser::new(tokens);
    let ty = match parser.type_expression() {
        Some(ty) => ty,
        None => {
            parser.expected("a type");
            parser.missing_type()
        }
    };
    if !parser.at_end() {
        let rest = TokenRange::new(parser.pos, tokens.len());
        parser
            .log
            .error("Unexpected tokens after type.", parser.span_of(rest));
    }
    ParsedType {
        ty,
        messages: parser.log,
    }
}

/// Parser state: a cursor over the tokens plus the diagnostic log.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    log: Log,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            log: Log::new(),
        }
    }

    /// Diagnostics recorded so far.
    pub fn log(&self) -> &Log {
        &self.log
    }

    pub fn into_log(self) -> Log {
        self.log
    }

    /// Parse every token into a sequence of top-level nodes.
    pub fn top_level(&mut self) -> Vec<UntypedExpression> {
        let mut expressions = Vec::new();
        if self.tokens.is_empty() {
            self.log
                .error("Expected an expression", SourceSpan::point(Position::default()));
            expressions.push(self.missing());
            return expressions;
        }

        let mut unrecognized: Option<usize> = None;
        while !self.at_end() {
            let start = self.pos;
            if let Some(expression) = self.expression(0) {
                if self.pos > start {
                    self.flush_unrecognized(&mut unrecognized, start, &mut expressions);
                    expressions.push(expression);
                    continue;
                }
            }
            self.pos = start;
            unrecognized.get_or_insert(start);
            self.pos += 1;
        }
        let end = self.pos;
        self.flush_unrecognized(&mut unrecognized, end, &mut expressions);
        expressions
    }

    fn flush_unrecognized(
        &mut self,
        run: &mut Option<usize>,
        end: usize,
        expressions: &mut Vec<UntypedExpression>,
    ) {
        if let Some(start) = run.take() {
            let range = TokenRange::new(start, end);
            let span = self.span_of(range);
            self.log
                .error(format!("Unexpected \"{}\"", self.tokens[start].value), span);
            expressions.push(UntypedExpression::unrecognized(range, span));
        }
    }

    // Cursor

    #[inline]
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume the current token.
    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.current()?;
        self.pos += 1;
        Some(token)
    }

    /// Consume the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Consume `kind` or report `Expected "<kind>"` without consuming anything.
    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind).is_some() {
            true
        } else {
            self.expected_token(kind);
            false
        }
    }

    // Positions

    /// Where a zero-width node at the cursor sits: the start of the current
    /// token, or the end of the last one.
    fn cursor_position(&self) -> Position {
        match self.current() {
            Some(token) => token.begin,
            None => self.tokens.last().map(|token| token.end).unwrap_or_default(),
        }
    }

    fn span_of(&self, range: TokenRange) -> SourceSpan {
        if range.is_empty() {
            let at = match self.tokens.get(range.start) {
                Some(token) => token.begin,
                None => self.tokens.last().map(|token| token.end).unwrap_or_default(),
            };
            return SourceSpan::point(at);
        }
        let first = &self.tokens[range.start];
        let last = &self.tokens[range.end - 1];
        SourceSpan::new(first.begin, last.end)
    }

    /// Span of the current token, or a point at the end of input.
    fn current_span(&self) -> SourceSpan {
        match self.current() {
            Some(token) => token.source_span(),
            None => SourceSpan::point(self.cursor_position()),
        }
    }

    // Node construction

    /// Build a node covering `start..cursor`.
    fn node(&self, kind: ExpressionKind, start: usize) -> UntypedExpression {
        let range = TokenRange::new(start, self.pos);
        UntypedExpression::new(kind, range, self.span_of(range))
    }

    fn type_node(&self, kind: TypeExpressionKind, start: usize) -> TypeExpression {
        let range = TokenRange::new(start, self.pos);
        TypeExpression {
            kind,
            tokens: range,
            span: self.span_of(range),
        }
    }

    /// Zero-width placeholder for a missing child.
    fn missing(&self) -> UntypedExpression {
        let range = TokenRange::empty(self.pos);
        UntypedExpression::unrecognized(range, self.span_of(range))
    }

    fn missing_type(&self) -> TypeExpression {
        self.type_node(TypeExpressionKind::Unrecognized, self.pos)
    }

    /// Identifier node for a desugared operator, spanning the operator token.
    fn operator_identifier(&self, name: &str, at: usize) -> UntypedExpression {
        let range = TokenRange::new(at, at + 1);
        UntypedExpression::new(
            ExpressionKind::Identifier(name.to_string()),
            range,
            self.span_of(range),
        )
    }

    // Diagnostics

    fn expected(&mut self, what: &str) {
        let span = self.current_span();
        self.log.error(format!("Expected {what}"), span);
    }

    fn expected_token(&mut self, kind: TokenKind) {
        let span = self.current_span();
        self.log.error(format!("Expected \"{kind}\""), span);
    }

    /// Parse an expression, reporting and substituting a placeholder when
    /// nothing matches.
    fn required_expression(&mut self, min_precedence: u8) -> UntypedExpression {
        match self.expression(min_precedence) {
            Some(expression) => expression,
            None => {
                self.expected("an expression");
                self.missing()
            }
        }
    }
}

#[cfg(test)]
mod tests;
