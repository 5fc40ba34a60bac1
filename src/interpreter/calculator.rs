use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::{
    error::{EvalError, RegistryError},
    interpreter::{lexer::tokenize, operation::Operation, parser::core::Parser, registry::Registry},
};

/// Evaluates expressions against a registry, remembering the last result.
///
/// Every successful [`Calculator::evaluate`] stores its value so the next
/// expression can refer to it as `ANS`. A failed evaluation leaves the
/// previous value untouched. `ANS` starts at zero.
///
/// # Example
/// ```
/// use decalc::{Calculator, util::num::to_plain_string};
///
/// let mut calculator = Calculator::new();
/// assert_eq!(to_plain_string(&calculator.evaluate("2 + 3 * 4").unwrap()), "14");
/// assert_eq!(to_plain_string(&calculator.evaluate("ANS / 7").unwrap()), "2");
/// assert!(calculator.evaluate("ANS +").is_err());
/// assert_eq!(to_plain_string(calculator.last_result()), "2");
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    registry:    Registry,
    last_result: BigDecimal,
}

impl Calculator {
    /// Creates a calculator over the default operations.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Registry::with_defaults())
    }

    /// Creates a calculator over a caller-built registry.
    #[must_use]
    pub fn with_registry(registry: Registry) -> Self {
        Self { registry,
               last_result: BigDecimal::zero() }
    }

    /// Tokenizes, parses and evaluates one expression.
    ///
    /// # Parameters
    /// - `source`: The expression text, for example `"SQRT(2) * 3"`.
    ///
    /// # Returns
    /// The value of the expression, rounded to 34 significant digits.
    ///
    /// # Errors
    /// Returns an [`EvalError`] describing the first lexical, syntactic or
    /// operation failure. Use [`EvalError::kind`] to branch on its category.
    pub fn evaluate(&mut self, source: &str) -> Result<BigDecimal, EvalError> {
        tracing::debug!(source, "evaluating expression");

        let outcome = tokenize(source).map_err(EvalError::from).and_then(|tokens| {
                                                                  tracing::trace!(count = tokens.len(), "tokenized");
                                                                  Parser::new(&tokens, &self.registry, &self.last_result).parse()
                                                              });

        match outcome {
            Ok(value) => {
                self.last_result.clone_from(&value);
                Ok(value)
            },
            Err(err) => {
                tracing::debug!(%err, kind = ?err.kind(), "evaluation failed");
                Err(err)
            },
        }
    }

    /// Adds an operation to this calculator's registry.
    ///
    /// # Errors
    /// See [`Registry::register`].
    pub fn register(&mut self, operation: Operation) -> Result<(), RegistryError> {
        self.registry.register(operation)
    }

    /// Removes an operation from this calculator's registry.
    ///
    /// # Errors
    /// See [`Registry::unregister`].
    pub fn unregister(&mut self, name: &str) -> Result<Operation, RegistryError> {
        self.registry.unregister(name)
    }

    /// The operations this calculator resolves names against.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The value `ANS` currently stands for.
    #[must_use]
    pub const fn last_result(&self) -> &BigDecimal {
        &self.last_result
    }

    /// Resets `ANS` to zero. Registered operations are kept.
    pub fn reset(&mut self) {
        self.last_result = BigDecimal::zero();
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::error::ErrorKind;

    fn dec(text: &str) -> BigDecimal {
        BigDecimal::from_str(text).unwrap()
    }

    #[test]
    fn ans_starts_at_zero() {
        let mut calculator = Calculator::new();

        assert_eq!(calculator.evaluate("ANS").unwrap(), dec("0"));
        assert_eq!(calculator.evaluate("ANS + 1").unwrap(), dec("1"));
    }

    #[test]
    fn failures_keep_the_previous_result() {
        let mut calculator = Calculator::new();
        calculator.evaluate("6 * 7").unwrap();

        for source in ["1/0", "2+", "2#3", "NOPE(1)"] {
            assert!(calculator.evaluate(source).is_err(), "{source}");
        }
        assert_eq!(calculator.last_result(), &dec("42"));
    }

    #[test]
    fn reset_clears_ans_but_keeps_operations() {
        let mut calculator = Calculator::new();
        calculator.register(Operation::constant("TEN", dec("10"))).unwrap();
        calculator.evaluate("TEN * 2").unwrap();
        calculator.reset();

        assert_eq!(calculator.last_result(), &dec("0"));
        assert_eq!(calculator.evaluate("TEN + ANS").unwrap(), dec("10"));
    }

    #[test]
    fn each_calculator_has_its_own_registry() {
        let mut first = Calculator::new();
        let mut second = Calculator::new();
        first.unregister("SQRT").unwrap();

        assert_eq!(first.evaluate("SQRT(4)").unwrap_err().kind(), ErrorKind::UnknownOperation);
        assert_eq!(second.evaluate("SQRT(4)").unwrap(), dec("2"));
    }

    #[test]
    fn empty_registry_still_parses_literals() {
        let mut calculator = Calculator::with_registry(Registry::new());

        assert_eq!(calculator.evaluate("(((7.25)))").unwrap(), dec("7.25"));
        assert_eq!(calculator.evaluate("1 + 1").unwrap_err().kind(), ErrorKind::UnknownOperation);
    }
}
