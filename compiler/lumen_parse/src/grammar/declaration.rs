//! Declarations: `let`, `interface` and `implement`.
//!
//! Each declaration is an expression with a trailing body, separated from it
//! by `;`. A missing `=`, `;` or body is reported once and the node is still
//! built, with `Unrecognized` placeholders for missing children.

use lumen_ir::{
    ExpressionKind, ImplementationMember, InterfaceMember, Token, TokenKind, UntypedExpression,
};

use crate::Parser;

impl Parser<'_> {
    /// `let name = value; body`
    pub(super) fn binding(&mut self, _min_precedence: u8) -> Option<UntypedExpression> {
        let start = self.pos;
        self.eat(TokenKind::Let)?;
        let Some(name) = self.declared_name() else {
            return Some(self.node(ExpressionKind::Unrecognized, start));
        };
        self.expect(TokenKind::Eq);
        let value = self.required_expression(0);
        let body = self.declaration_body();
        Some(self.node(
            ExpressionKind::Binding {
                name,
                value: Box::new(value),
                body: Box::new(body),
            },
            start,
        ))
    }

    /// `interface Name<T, U> { member: Type, ... }; body`
    pub(super) fn interface(&mut self, _min_precedence: u8) -> Option<UntypedExpression> {
        let start = self.pos;
        self.eat(TokenKind::Interface)?;
        let Some(name) = self.declared_name() else {
            return Some(self.node(ExpressionKind::Unrecognized, start));
        };
        let parameters = self
            .match_list(
                TokenKind::Lt,
                TokenKind::Comma,
                TokenKind::Gt,
                "a type parameter",
                |p| p.eat(TokenKind::Identifier).cloned(),
            )
            .map(|list| list.items)
            .unwrap_or_default();
        let members = self.declaration_members("an interface member", Self::interface_member);
        let body = self.declaration_body();
        Some(self.node(
            ExpressionKind::Interface {
                name,
                parameters,
                members,
                body: Box::new(body),
            },
            start,
        ))
    }

    fn interface_member(&mut self) -> Option<InterfaceMember> {
        let name = self.eat(TokenKind::Identifier)?.clone();
        self.expect(TokenKind::Colon);
        let signature = self.required_type();
        Some(InterfaceMember { name, signature })
    }

    /// `implement Name<Type, ...> { member = value, ... }; body`
    pub(super) fn implementation(&mut self, _min_precedence: u8) -> Option<UntypedExpression> {
        let start = self.pos;
        self.eat(TokenKind::Implement)?;
        let Some(interface) = self.declared_name() else {
            return Some(self.node(ExpressionKind::Unrecognized, start));
        };
        let arguments = match self.match_list(
            TokenKind::Lt,
            TokenKind::Comma,
            TokenKind::Gt,
            "a type",
            Self::type_expression,
        ) {
            Some(list) => list.items,
            None => {
                self.expected_token(TokenKind::Lt);
                Vec::new()
            }
        };
        let members =
            self.declaration_members("an implementation member", Self::implementation_member);
        let body = self.declaration_body();
        Some(self.node(
            ExpressionKind::Implementation {
                interface,
                arguments,
                members,
                body: Box::new(body),
            },
            start,
        ))
    }

    fn implementation_member(&mut self) -> Option<ImplementationMember> {
        let name = self.eat(TokenKind::Identifier)?.clone();
        self.expect(TokenKind::Eq);
        let value = self.required_expression(0);
        Some(ImplementationMember { name, value })
    }

    fn declared_name(&mut self) -> Option<Token> {
        let name = self.eat(TokenKind::Identifier).cloned();
        if name.is_none() {
            self.expected("an identifier");
        }
        name
    }

    fn declaration_members<T>(
        &mut self,
        what: &str,
        member: impl FnMut(&mut Self) -> Option<T>,
    ) -> Vec<T> {
        match self.match_list(
            TokenKind::LBrace,
            TokenKind::Comma,
            TokenKind::RBrace,
            what,
            member,
        ) {
            Some(list) => list.items,
            None => {
                self.expected_token(TokenKind::LBrace);
                Vec::new()
            }
        }
    }

    /// `; body` after a declaration.
    fn declaration_body(&mut self) -> UntypedExpression {
        self.expect(TokenKind::Semicolon);
        self.required_expression(0)
    }
}
