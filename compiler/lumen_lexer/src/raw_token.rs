//! Raw Token Definition
//!
//! The logos-derived token set before conversion to [`TokenKind`]. Trivia
//! (comments) appears here so the lexer can consume and drop it.

use logos::{Lexer, Logos};
use lumen_ir::TokenKind;

/// Consume a block comment body. Returns whether the closing `*/` was found;
/// an unterminated comment runs to the end of input.
fn block_comment(lexer: &mut Lexer<'_, RawToken>) -> bool {
    match lexer.remainder().find("*/") {
        Some(end) => {
            lexer.bump(end + 2);
            true
        }
        None => {
            lexer.bump(lexer.remainder().len());
            false
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    /// Carries whether the comment was closed.
    #[token("/*", block_comment)]
    BlockComment(bool),

    #[token("let")]
    Let,
    #[token("interface")]
    Interface,
    #[token("implement")]
    Implement,
    #[token("true")]
    #[token("false")]
    Boolean,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    Arrow,
    #[token("_", priority = 3)]
    Underscore,
    #[token("..")]
    DotDot,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    #[regex(r"[0-9]+")]
    Integer,

    // A digit is required after the dot so `1..2` lexes as a range.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
}

impl RawToken {
    /// The token kind this raw token becomes, or `None` for trivia.
    pub(crate) fn kind(self) -> Option<TokenKind> {
        let kind = match self {
            RawToken::LineComment | RawToken::BlockComment(_) => return None,
            RawToken::Let => TokenKind::Let,
            RawToken::Interface => TokenKind::Interface,
            RawToken::Implement => TokenKind::Implement,
            RawToken::Boolean => TokenKind::Boolean,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Eq => TokenKind::Eq,
            RawToken::FatArrow => TokenKind::FatArrow,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Underscore => TokenKind::Underscore,
            RawToken::DotDot => TokenKind::DotDot,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::PipePipe => TokenKind::PipePipe,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Integer => TokenKind::Integer,
            RawToken::Float => TokenKind::Float,
            RawToken::String => TokenKind::String,
            RawToken::Identifier => TokenKind::Identifier,
        };
        Some(kind)
    }
}
