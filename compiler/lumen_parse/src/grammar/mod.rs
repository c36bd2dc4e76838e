//! Grammar interpreters.
//!
//! - `expr`: literals, identifiers, arrays, functions, unary and binary
//!   operators, calls, indexing and ranges
//! - `declaration`: `let`, `interface` and `implement`
//! - `ty`: type expressions used by declarations and library signatures

mod declaration;
mod expr;
mod ty;

use lumen_ir::UntypedExpression;

use lumen_stack::ensure_sufficient_stack;
use crate::Parser;

/// Starts an expression, or returns `None` without consuming anything.
pub(crate) type Prefix<'a> = fn(&mut Parser<'a>, u8) -> Option<UntypedExpression>;

/// Extends the expression parsed so far, or hands it back untouched.
pub(crate) type Continuation<'a> =
    fn(&mut Parser<'a>, UntypedExpression, u8) -> Result<UntypedExpression, UntypedExpression>;

/// Precedence of prefix `-` and `!` operands.
pub(crate) const PREFIX_PRECEDENCE: u8 = 8;
/// Precedence of calls and indexing.
pub(crate) const POSTFIX_PRECEDENCE: u8 = 9;

impl<'a> Parser<'a> {
    /// Parse an expression whose operators all bind tighter than
    /// `min_precedence`.
    pub(crate) fn expression(&mut self, min_precedence: u8) -> Option<UntypedExpression> {
        ensure_sufficient_stack(|| self.expression_inner(min_precedence))
    }

    fn expression_inner(&mut self, min_precedence: u8) -> Option<UntypedExpression> {
        let prefixes: [Prefix<'a>; 9] = [
            Self::literal,
            Self::binding,
            Self::interface,
            Self::implementation,
            Self::function,
            Self::identifier,
            Self::array,
            Self::parenthesized,
            Self::unary,
        ];
        let continuations: [Continuation<'a>; 4] =
            [Self::call, Self::index, Self::range, Self::binary];

        let mut expression = self.first_of(&prefixes, min_precedence)?;
        'extend: loop {
            for continuation in continuations {
                match continuation(self, expression, min_precedence) {
                    Ok(extended) => {
                        expression = extended;
                        continue 'extend;
                    }
                    Err(unchanged) => expression = unchanged,
                }
            }
            return Some(expression);
        }
    }

    /// The first alternative that fires wins. Alternatives that do not fire
    /// are rewound.
    pub(crate) fn first_of(
        &mut self,
        alternatives: &[Prefix<'a>],
        min_precedence: u8,
    ) -> Option<UntypedExpression> {
        alternatives
            .iter()
            .find_map(|alternative| self.try_parse(|p| alternative(p, min_precedence)))
    }
}
