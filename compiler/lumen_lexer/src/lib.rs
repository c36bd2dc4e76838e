//! Lumen Lexer - tokenization using logos.
//!
//! [`tokenize`] never fails. Whitespace and comments are dropped, every other
//! character either lands in a token or in an `Unrecognized characters`
//! diagnostic (one per contiguous run).

mod raw_token;

use logos::Logos;
use lumen_diagnostic::Log;
use lumen_ir::{LineIndex, Span, Token};
use tracing::debug;

use raw_token::RawToken;

/// Output of [`tokenize`].
#[derive(Clone, Debug, Default)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub messages: Log,
}

/// Tokenize a source string.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Tokenized {
    let lines = LineIndex::new(source);
    let mut result = Tokenized::default();
    let mut unrecognized: Option<Span> = None;
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match raw {
            Ok(raw) => {
                flush_unrecognized(source, &lines, &mut unrecognized, &mut result.messages);
                if raw == RawToken::BlockComment(false) {
                    result
                        .messages
                        .error("Unterminated block comment", lines.source_span(span));
                }
                if let Some(kind) = raw.kind() {
                    result
                        .tokens
                        .push(Token::new(kind, lexer.slice(), span, lines.source_span(span)));
                }
            }
            Err(()) => {
                unrecognized = Some(match unrecognized {
                    Some(run) if run.end == span.start => run.merge(span),
                    Some(_) => {
                        flush_unrecognized(source, &lines, &mut unrecognized, &mut result.messages);
                        span
                    }
                    None => span,
                });
            }
        }
    }
    flush_unrecognized(source, &lines, &mut unrecognized, &mut result.messages);

    debug!(
        tokens = result.tokens.len(),
        errors = result.messages.len(),
        "tokenized"
    );
    result
}

fn flush_unrecognized(source: &str, lines: &LineIndex<'_>, run: &mut Option<Span>, log: &mut Log) {
    if let Some(span) = run.take() {
        let text = source.get(span.to_range()).unwrap_or_default();
        log.error(
            format!("Unrecognized characters \"{text}\""),
            lines.source_span(span),
        );
    }
}

/// Decode the contents of a string literal token, quotes included.
pub fn string_literal_value(token_text: &str) -> String {
    let inner = token_text
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(token_text);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') | None => result.push('\\'),
                Some('"') => result.push('"'),
                Some('0') => result.push('\0'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests;
