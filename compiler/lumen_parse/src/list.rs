//! Delimited list matching.
//!
//! Array literals, call arguments, type parameter lists and declaration
//! bodies all share one shape: `open item sep item ... close`. The matcher
//! reports a missing separator, a missing item or a missing closer and keeps
//! going, returning everything it managed to consume.

use lumen_ir::{TokenKind, TokenRange};

use crate::Parser;

/// Items of a matched list and the tokens the whole list consumed.
#[derive(Debug)]
pub(crate) struct ListMatch<T> {
    pub(crate) items: Vec<T>,
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) tokens: TokenRange,
}

/// Tokens that close an enclosing construct. A list stops instead of asking
/// for a separator when it meets one of them.
fn closes_enclosing(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::Semicolon
            | TokenKind::Gt
    )
}

impl Parser<'_> {
    /// Match `open item (separator item)* close`.
    ///
    /// Returns `None` without consuming anything when the current token is not
    /// `open`. `what` names an item in diagnostics, e.g. `"an expression"`.
    pub(crate) fn match_list<T>(
        &mut self,
        open: TokenKind,
        separator: TokenKind,
        close: TokenKind,
        what: &str,
        mut item: impl FnMut(&mut Self) -> Option<T>,
    ) -> Option<ListMatch<T>> {
        let start = self.pos;
        self.eat(open)?;
        let mut items = Vec::new();

        if self.eat(close).is_some() {
            return Some(ListMatch {
                items,
                tokens: TokenRange::new(start, self.pos),
            });
        }

        loop {
            let before = self.pos;
            let parsed = item(self);
            let progressed = self.pos > before;
            match parsed {
                Some(parsed) => items.push(parsed),
                None if self.check(separator) || self.check(close) => self.expected(what),
                None => {}
            }

            if self.eat(separator).is_some() {
                if self.check(close) {
                    self.expected(what);
                    self.advance();
                    break;
                }
                continue;
            }
            if self.eat(close).is_some() {
                break;
            }
            match self.current_kind() {
                Some(kind) if progressed && !closes_enclosing(kind) => {
                    self.expected_token(separator);
                }
                _ => {
                    self.expected_token(close);
                    break;
                }
            }
        }

        Some(ListMatch {
            items,
            tokens: TokenRange::new(start, self.pos),
        })
    }
}
