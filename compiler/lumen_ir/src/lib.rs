//! Lumen IR - shared data structures for every compiler phase.
//!
//! This crate contains:
//! - Source positions, byte spans and line indexing
//! - Tokens and token ranges produced by the lexer
//! - The untyped expression tree produced by the parser
//!
//! Nothing here is mutated after construction. Tokens are positional and
//! every diagnostic in the pipeline points back at token positions.

mod ast;
mod span;
mod token;

pub use ast::{
    ExpressionKind, ImplementationMember, InterfaceMember, TypeExpression, TypeExpressionKind,
    UntypedExpression,
};
pub use span::{LineIndex, Position, SourceSpan, Span};
pub use token::{Token, TokenKind, TokenRange};
