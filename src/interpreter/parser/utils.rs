use bigdecimal::BigDecimal;

use crate::{
    error::ParseError,
    interpreter::parser::core::{EvalResult, Parser},
};

impl Parser<'_> {
    /// Parses a function argument list after its opening `(`.
    ///
    /// Each argument is a full expression. After every argument the parser
    /// expects either:
    ///
    /// - a comma, to continue the list, or
    /// - `)`, to end it.
    ///
    /// An immediately encountered `)` produces an empty list; whether that is
    /// acceptable is up to the operation's arity.
    ///
    /// Grammar: `arguments := ")" | expression ("," expression)* ")"`
    ///
    /// # Returns
    /// The evaluated arguments in source order.
    ///
    /// # Errors
    /// - [`ParseError::ExpectedSeparator`] if an argument is followed by
    ///   anything other than `,` or `)`.
    /// - [`ParseError::ExpectedClosingParen`] if the input ends inside the
    ///   list.
    /// - Any error raised while evaluating an argument.
    pub(in crate::interpreter::parser) fn parse_arguments(&mut self) -> EvalResult<Vec<BigDecimal>> {
        let mut arguments = Vec::new();
        if self.peek().is_some_and(|token| token.is_symbol(")")) {
            self.advance();

            return Ok(arguments);
        }
        loop {
            arguments.push(self.parse_expression()?);
            match self.advance() {
                Some(token) if token.is_symbol(",") => {},
                Some(token) if token.is_symbol(")") => break,
                Some(token) => {
                    return Err(ParseError::ExpectedSeparator { token:  token.text().to_string(),
                                                               offset: token.position(), }.into());
                },
                None => return Err(ParseError::ExpectedClosingParen { offset: self.end_offset() }.into()),
            }
        }
        Ok(arguments)
    }
}
