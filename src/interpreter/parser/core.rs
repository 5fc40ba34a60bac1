use bigdecimal::BigDecimal;

use crate::{
    error::{EvalError, OperationError, ParseError},
    interpreter::{lexer::Token, operation::Operation, registry::Registry},
};

/// Result type used by the parser.
///
/// Parsing and evaluation happen in the same pass, so every parse function
/// yields either a decimal value or the [`EvalError`] that stopped it.
pub type EvalResult<T> = Result<T, EvalError>;

/// How many expressions may be open at once through groups and calls.
pub const MAX_NESTING: usize = 256;

/// A recursive-descent evaluator over one token buffer.
///
/// The parser owns the cursor position for a single evaluation. It reads the
/// registry to resolve operator and function names and reads the previous
/// result to answer `ANS`; it never mutates either.
pub struct Parser<'a> {
    tokens:      &'a [Token],
    position:    usize,
    depth:       usize,
    registry:    &'a Registry,
    last_result: &'a BigDecimal,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first token.
    #[must_use]
    pub const fn new(tokens: &'a [Token], registry: &'a Registry, last_result: &'a BigDecimal) -> Self {
        Self { tokens,
               position: 0,
               depth: 0,
               registry,
               last_result }
    }

    /// Parses and evaluates the whole token buffer as one expression.
    ///
    /// Grammar: `input := expression EOF`
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Errors
    /// - [`ParseError::EmptyInput`] if there are no tokens.
    /// - [`ParseError::UnexpectedTrailingTokens`] if tokens remain after a
    ///   complete expression, as in `2 3` or `2+3)`.
    /// - Any error raised while parsing or applying operations.
    pub fn parse(mut self) -> EvalResult<BigDecimal> {
        if self.tokens.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }

        let value = self.parse_expression()?;

        if let Some(token) = self.peek() {
            return Err(ParseError::UnexpectedTrailingTokens { token:  token.text().to_string(),
                                                              offset: token.position(), }.into());
        }
        Ok(value)
    }

    /// Parses a full expression.
    ///
    /// This is the entry point for every nested expression: groups and
    /// function arguments recurse through here. It begins at the lowest
    /// precedence level, addition.
    ///
    /// Grammar: `expression := additive`
    ///
    /// # Errors
    /// Returns [`ParseError::NestingTooDeep`] once more than [`MAX_NESTING`]
    /// expressions are open.
    pub(in crate::interpreter::parser) fn parse_expression(&mut self) -> EvalResult<BigDecimal> {
        if self.depth >= MAX_NESTING {
            let offset = self.peek().map_or_else(|| self.end_offset(), Token::position);
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                    offset }.into());
        }

        self.depth += 1;
        let value = self.parse_additive();
        self.depth -= 1;
        value
    }

    /// The token under the cursor.
    pub(in crate::interpreter::parser) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// The token `n` places after the cursor.
    pub(in crate::interpreter::parser) fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.position + n)
    }

    /// Returns the token under the cursor and moves past it.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    /// Character offset just past the last token.
    pub(in crate::interpreter::parser) fn end_offset(&self) -> usize {
        self.tokens.last().map_or(0, Token::end)
    }

    /// The value `ANS` stands for.
    pub(in crate::interpreter::parser) const fn last_result(&self) -> &'a BigDecimal {
        self.last_result
    }

    pub(in crate::interpreter::parser) const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Finds the operation a token names.
    ///
    /// # Errors
    /// Returns [`OperationError::Unknown`] pointing at the token if the
    /// registry has no such name.
    pub(in crate::interpreter::parser) fn resolve(&self, token: &Token) -> EvalResult<&'a Operation> {
        self.registry
            .lookup(token.text())
            .ok_or_else(|| {
                OperationError::Unknown { name:   token.text().to_string(),
                                          offset: token.position(), }.into()
            })
    }

    /// Resolves `token` and applies the operation to `operands`.
    pub(in crate::interpreter::parser) fn apply(&self,
                                                token: &Token,
                                                operands: &[BigDecimal])
                                                -> EvalResult<BigDecimal> {
        let operation = self.resolve(token)?;
        tracing::trace!(operation = operation.name(), operands = operands.len(), "applying operation");
        Ok(operation.evaluate(operands)?)
    }
}
