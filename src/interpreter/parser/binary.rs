use bigdecimal::BigDecimal;

use crate::interpreter::{
    lexer::{Token, TokenKind},
    operation::Priority,
    parser::core::{EvalResult, Parser},
};

/// Symbols the grammar reads as additive operators even when nothing is
/// registered under them.
const ADDITIVE_SYMBOLS: [&str; 2] = ["+", "-"];

/// Symbols the grammar reads as multiplicative operators even when nothing
/// is registered under them.
const MULTIPLICATIVE_SYMBOLS: [&str; 4] = ["*", "/", "^", "%"];

impl<'a> Parser<'a> {
    /// Parses addition and subtraction expressions.
    ///
    /// Handles left-associative operators of [`Priority::Additive`]: the
    /// defaults `+` and `-` plus any registered additive operator.
    ///
    /// The rule is: `additive := multiplicative (ADDITIVE_OP multiplicative)*`
    ///
    /// # Returns
    /// The value of the folded chain.
    ///
    /// # Errors
    /// Propagates operand errors, and fails with
    /// [`OperationError::Unknown`](crate::error::OperationError::Unknown) if
    /// an operator symbol has been unregistered.
    pub(in crate::interpreter::parser) fn parse_additive(&mut self) -> EvalResult<BigDecimal> {
        let mut left = self.parse_multiplicative()?;
        while let Some(operator) = self.next_operator(Priority::Additive) {
            let right = self.parse_multiplicative()?;
            left = self.apply(operator, &[left, right])?;
        }
        Ok(left)
    }

    /// Parses multiplication-level expressions.
    ///
    /// Handles left-associative operators of [`Priority::Multiplicative`]:
    /// `*`, `/`, `^`, `%` and any registered multiplicative operator. There is
    /// no separate exponent level, so `2 ^ 3 * 2` is `(2 ^ 3) * 2`.
    ///
    /// The rule is: `multiplicative := base (MULTIPLICATIVE_OP base)*`
    pub(in crate::interpreter::parser) fn parse_multiplicative(&mut self) -> EvalResult<BigDecimal> {
        let mut left = self.parse_base()?;
        while let Some(operator) = self.next_operator(Priority::Multiplicative) {
            let right = self.parse_base()?;
            left = self.apply(operator, &[left, right])?;
        }
        Ok(left)
    }

    /// Consumes the next token if it continues a chain of `priority`.
    fn next_operator(&mut self, priority: Priority) -> Option<&'a Token> {
        let token = self.peek()?;
        if !self.continues(priority, token) {
            return None;
        }
        self.advance()
    }

    /// Whether `token` is an infix operator of `priority`.
    ///
    /// A registered infix operator is placed by its own priority. A name with
    /// no infix registration falls back to the grammar's built-in symbol
    /// table, so `+` is still read as an operator after it is unregistered.
    fn continues(&self, priority: Priority, token: &Token) -> bool {
        if token.kind() == TokenKind::Numeric {
            return false;
        }

        if let Some(operation) = self.registry().lookup(token.text())
           && operation.is_infix()
        {
            return operation.priority() == priority;
        }

        let symbols: &[&str] = match priority {
            Priority::Additive => &ADDITIVE_SYMBOLS,
            Priority::Multiplicative => &MULTIPLICATIVE_SYMBOLS,
            Priority::None => &[],
        };
        token.kind() == TokenKind::Symbol && symbols.contains(&token.text())
    }
}
