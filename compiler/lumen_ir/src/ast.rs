//! Untyped expression tree.
//!
//! Produced once by the parser and never mutated. Every node records the
//! token range it consumed and the matching source positions, so later phases
//! can report diagnostics against the exact tokens.
//!
//! Operators do not have their own node kinds: `a + b` is a call of the
//! identifier `+`, `-a` a call of `negate`, `a..b` a call of `range`, and so on.

use crate::{SourceSpan, Token, TokenRange};

/// A node of the untyped tree.
#[derive(Clone, Debug, PartialEq)]
pub struct UntypedExpression {
    pub kind: ExpressionKind,
    pub tokens: TokenRange,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExpressionKind {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Identifier(String),
    Array(Vec<UntypedExpression>),
    /// `(a, b) => body`
    Function {
        parameters: Vec<Token>,
        body: Box<UntypedExpression>,
    },
    /// `callee(a, _, c)`; `None` marks a placeholder slot left for partial application.
    FunctionCall {
        callee: Box<UntypedExpression>,
        arguments: Vec<Option<UntypedExpression>>,
    },
    /// `let name = value; body`
    Binding {
        name: Token,
        value: Box<UntypedExpression>,
        body: Box<UntypedExpression>,
    },
    /// `interface Name<T> { member: Type, ... }; body`
    Interface {
        name: Token,
        parameters: Vec<Token>,
        members: Vec<InterfaceMember>,
        body: Box<UntypedExpression>,
    },
    /// `implement Name<Type> { member = value, ... }; body`
    Implementation {
        interface: Token,
        arguments: Vec<TypeExpression>,
        members: Vec<ImplementationMember>,
        body: Box<UntypedExpression>,
    },
    /// Parse failure marker. Carries no semantic content.
    Unrecognized,
}

impl UntypedExpression {
    pub fn new(kind: ExpressionKind, tokens: TokenRange, span: SourceSpan) -> Self {
        UntypedExpression { kind, tokens, span }
    }

    pub fn unrecognized(tokens: TokenRange, span: SourceSpan) -> Self {
        UntypedExpression {
            kind: ExpressionKind::Unrecognized,
            tokens,
            span,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self.kind, ExpressionKind::Unrecognized)
    }

    /// Whether this node or any descendant failed to parse.
    pub fn contains_unrecognized(&self) -> bool {
        match &self.kind {
            ExpressionKind::Unrecognized => true,
            ExpressionKind::Integer(_)
            | ExpressionKind::Float(_)
            | ExpressionKind::String(_)
            | ExpressionKind::Boolean(_)
            | ExpressionKind::Identifier(_) => false,
            ExpressionKind::Array(elements) => {
                elements.iter().any(UntypedExpression::contains_unrecognized)
            }
            ExpressionKind::Function { body, .. } => body.contains_unrecognized(),
            ExpressionKind::FunctionCall { callee, arguments } => {
                callee.contains_unrecognized()
                    || arguments
                        .iter()
                        .flatten()
                        .any(UntypedExpression::contains_unrecognized)
            }
            ExpressionKind::Binding { value, body, .. } => {
                value.contains_unrecognized() || body.contains_unrecognized()
            }
            ExpressionKind::Interface { members, body, .. } => {
                members.iter().any(|member| member.signature.is_unrecognized())
                    || body.contains_unrecognized()
            }
            ExpressionKind::Implementation {
                arguments,
                members,
                body,
                ..
            } => {
                arguments.iter().any(TypeExpression::is_unrecognized)
                    || members
                        .iter()
                        .any(|member| member.value.contains_unrecognized())
                    || body.contains_unrecognized()
            }
        }
    }
}

/// `name: Type` inside an interface declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceMember {
    pub name: Token,
    pub signature: TypeExpression,
}

/// `name = value` inside an implementation.
#[derive(Clone, Debug, PartialEq)]
pub struct ImplementationMember {
    pub name: Token,
    pub value: UntypedExpression,
}

/// Type syntax, used only by interface and implementation declarations.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeExpression {
    pub kind: TypeExpressionKind,
    pub tokens: TokenRange,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpressionKind {
    /// `Name` or `Name<A, B>`
    Named {
        name: String,
        arguments: Vec<TypeExpression>,
    },
    /// `(A, B) -> R`
    Function {
        parameters: Vec<TypeExpression>,
        result: Box<TypeExpression>,
    },
    Unrecognized,
}

impl TypeExpression {
    pub fn is_unrecognized(&self) -> bool {
        match &self.kind {
            TypeExpressionKind::Unrecognized => true,
            TypeExpressionKind::Named { arguments, .. } => {
                arguments.iter().any(TypeExpression::is_unrecognized)
            }
            TypeExpressionKind::Function { parameters, result } => {
                parameters.iter().any(TypeExpression::is_unrecognized) || result.is_unrecognized()
            }
        }
    }
}
