//! Parser snapshots for speculative parsing.
//!
//! A snapshot records the cursor and the length of the diagnostic log.
//! Restoring rewinds both, so an interpreter that does not fire leaves no
//! trace.

use crate::Parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserSnapshot {
    pub(crate) position: usize,
    pub(crate) log_len: usize,
}

impl Parser<'_> {
    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            position: self.pos,
            log_len: self.log.len(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        self.pos = snapshot.position;
        self.log.truncate(snapshot.log_len);
    }

    /// Run a token predicate and rewind, whatever it consumed.
    pub(crate) fn look_ahead(&mut self, predicate: impl FnOnce(&mut Self) -> bool) -> bool {
        let snapshot = self.snapshot();
        let result = predicate(self);
        self.restore(snapshot);
        result
    }

    /// Run `parse`; rewind if it produced nothing.
    pub(crate) fn try_parse<T>(&mut self, parse: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.snapshot();
        let result = parse(self);
        if result.is_none() {
            self.restore(snapshot);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_ir::TokenKind;

    #[test]
    fn test_restore_rewinds_cursor_and_log() {
        let tokens = lumen_lexer::tokenize("a b").tokens;
        let mut parser = Parser::new(&tokens);
        let snapshot = parser.snapshot();
        parser.advance();
        parser.expected("nothing");
        assert_eq!(parser.log().len(), 1);

        parser.restore(snapshot);
        assert_eq!(parser.pos, 0);
        assert!(parser.log().is_empty());
    }

    #[test]
    fn test_look_ahead_never_consumes() {
        let tokens = lumen_lexer::tokenize("(x) => x").tokens;
        let mut parser = Parser::new(&tokens);
        let matched = parser.look_ahead(|p| {
            p.eat(TokenKind::LParen).is_some() && p.eat(TokenKind::Identifier).is_some()
        });
        assert!(matched);
        assert_eq!(parser.pos, 0);
    }
}
