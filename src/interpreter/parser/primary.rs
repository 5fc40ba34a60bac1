use bigdecimal::BigDecimal;

use crate::{
    error::{EvalError, ParseError},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{EvalResult, Parser},
        registry::ANS_KEYWORD,
    },
    util::num::parse_decimal,
};

impl Parser<'_> {
    /// Parses a base-level operand.
    ///
    /// The rule is:
    /// ```text
    /// base := SIGN NUMERIC
    ///       | NUMERIC
    ///       | KEYWORD "(" arguments
    ///       | "ANS"
    ///       | KEYWORD
    ///       | "(" expression ")"
    /// ```
    ///
    /// A bare keyword other than `ANS` applies the named operation to zero
    /// parameters, which is how constants are read.
    ///
    /// # Returns
    /// The operand's value.
    ///
    /// # Errors
    /// - [`ParseError::UnexpectedToken`] for a token that cannot start an
    ///   operand.
    /// - [`ParseError::UnexpectedEndOfInput`] if the input ends where an
    ///   operand is required.
    /// - [`ParseError::ExpectedClosingParen`] for an unclosed group.
    pub(in crate::interpreter::parser) fn parse_base(&mut self) -> EvalResult<BigDecimal> {
        let Some(token) = self.peek() else {
            return Err(ParseError::UnexpectedEndOfInput { offset: self.end_offset() }.into());
        };

        match token.kind() {
            TokenKind::Numeric => {
                self.advance();
                literal(token.text(), token)
            },
            TokenKind::Symbol if token.is_sign() => self.parse_signed_literal(token),
            TokenKind::Symbol if token.is_symbol("(") => self.parse_group(),
            TokenKind::Keyword => {
                self.advance();
                if self.peek().is_some_and(|next| next.is_symbol("(")) {
                    self.advance();
                    let arguments = self.parse_arguments()?;
                    return self.apply(token, &arguments);
                }
                if token.text() == ANS_KEYWORD {
                    return Ok(self.last_result().clone());
                }
                self.apply(token, &[])
            },
            TokenKind::Symbol => Err(unexpected(token)),
        }
    }

    /// A sign symbol directly followed by an unsigned numeral.
    ///
    /// The lexer already fuses adjacent signs in operand position, so this
    /// handles the separated form `- 3` and a sign after a keyword operator.
    fn parse_signed_literal(&mut self, sign: &Token) -> EvalResult<BigDecimal> {
        match self.peek_nth(1) {
            Some(number) if number.kind() == TokenKind::Numeric
                            && !number.text().starts_with(['+', '-']) =>
            {
                self.advance();
                self.advance();
                literal(&format!("{}{}", sign.text(), number.text()), sign)
            },
            _ => Err(unexpected(sign)),
        }
    }

    /// A parenthesized sub-expression.
    ///
    /// The rule is: `group := "(" expression ")"`
    fn parse_group(&mut self) -> EvalResult<BigDecimal> {
        self.advance();
        let value = self.parse_expression()?;
        match self.peek() {
            Some(token) if token.is_symbol(")") => {
                self.advance();
                Ok(value)
            },
            Some(token) => Err(ParseError::ExpectedClosingParen { offset: token.position() }.into()),
            None => Err(ParseError::ExpectedClosingParen { offset: self.end_offset() }.into()),
        }
    }
}

fn literal(text: &str, at: &Token) -> EvalResult<BigDecimal> {
    parse_decimal(text).ok_or_else(|| {
                           ParseError::InvalidNumber { literal: text.to_string(),
                                                       offset:  at.position(), }.into()
                       })
}

fn unexpected(token: &Token) -> EvalError {
    ParseError::UnexpectedToken { token:  token.text().to_string(),
                                  offset: token.position(), }.into()
}
