//! Tokens produced by the lexer.

use std::fmt;

use crate::{Position, SourceSpan, Span};

/// Token kinds.
///
/// Literal payloads are not stored here; [`Token::value`] keeps the exact
/// source slice and the parser decodes it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    Integer,
    Float,
    String,
    Boolean,
    Identifier,

    // Keywords
    Let,
    Interface,
    Implement,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Eq,
    FatArrow,
    Arrow,
    Underscore,
    DotDot,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AmpAmp,
    PipePipe,
    Bang,
}

impl TokenKind {
    /// How the token is spelled in source, for diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Identifier => "identifier",
            TokenKind::Let => "let",
            TokenKind::Interface => "interface",
            TokenKind::Implement => "implement",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Eq => "=",
            TokenKind::FatArrow => "=>",
            TokenKind::Arrow => "->",
            TokenKind::Underscore => "_",
            TokenKind::DotDot => "..",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::Bang => "!",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Let | TokenKind::Interface | TokenKind::Implement
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A positioned token. Immutable once produced.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub value: String,
    pub begin: Position,
    pub end: Position,
    /// Byte offsets of `value` in the source.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span, location: SourceSpan) -> Self {
        Token {
            kind,
            value: value.into(),
            begin: location.begin,
            end: location.end,
            span,
        }
    }

    #[inline]
    pub fn source_span(&self) -> SourceSpan {
        SourceSpan::new(self.begin, self.end)
    }
}

/// Half-open range of token indices, `start..end`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        TokenRange { start, end }
    }

    /// Empty range positioned at `at`.
    #[inline]
    pub const fn empty(at: usize) -> Self {
        TokenRange { start: at, end: at }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    #[must_use]
    pub fn merge(self, other: TokenRange) -> TokenRange {
        TokenRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}..#{}", self.start, self.end)
    }
}
