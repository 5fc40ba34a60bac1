use bigdecimal::BigDecimal;
use num_traits::{One, Zero};

use crate::{
    error::DomainError,
    interpreter::operation::core::{Operation, Priority},
    util::num::{MAX_EXPONENT, add_in_context, fit_to_context, multiply_in_context, truncate_to_i64},
};

/// Returns the operations every default registry starts with.
///
/// | Name        | Shape                    | Rule                         |
/// |-------------|--------------------------|------------------------------|
/// | `+`         | additive operator        | sum                          |
/// | `-`         | additive operator        | difference                   |
/// | `*`         | multiplicative operator  | product                      |
/// | `/`         | multiplicative operator  | quotient                     |
/// | `^`         | multiplicative operator  | integer power                |
/// | `%`         | multiplicative operator  | `left` percent of `right`    |
/// | `SQRT`      | unary function           | square root                  |
/// | `REMAINDER` | binary function          | truncated remainder          |
/// | `AVG`       | variadic function (2+)   | arithmetic mean              |
#[must_use]
pub fn default_operations() -> Vec<Operation> {
    vec![Operation::binary_operator("+", Priority::Additive, add),
         Operation::binary_operator("-", Priority::Additive, subtract),
         Operation::binary_operator("*", Priority::Multiplicative, multiply),
         Operation::binary_operator("/", Priority::Multiplicative, divide),
         Operation::binary_operator("^", Priority::Multiplicative, power),
         Operation::binary_operator("%", Priority::Multiplicative, percent),
         Operation::unary_function("SQRT", sqrt),
         Operation::binary_function("REMAINDER", remainder),
         Operation::variadic_function("AVG", 2, average),]
}

/// `left + right`.
pub fn add(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, DomainError> {
    add_in_context(left, right)
}

/// `left - right`.
pub fn subtract(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, DomainError> {
    add_in_context(left, &-right.clone())
}

/// `left * right`.
pub fn multiply(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, DomainError> {
    multiply_in_context(left, right)
}

/// `left / right`, failing on a zero divisor.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use decalc::{error::DomainError, interpreter::operation::builtin::divide, util::num::to_plain_string};
///
/// let one = BigDecimal::from_str("1").unwrap();
/// let three = BigDecimal::from_str("3").unwrap();
/// let zero = BigDecimal::from_str("0.00").unwrap();
///
/// let third = divide(&one, &three).unwrap();
/// assert_eq!(to_plain_string(&third), "0.3333333333333333333333333333333333");
/// assert_eq!(divide(&one, &zero), Err(DomainError::DivisionByZero));
/// ```
pub fn divide(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, DomainError> {
    if right.is_zero() {
        return Err(DomainError::DivisionByZero);
    }
    fit_to_context(&(left / right))
}

/// Raises `base` to the integer part of `exponent`.
///
/// The exponent is truncated toward zero before raising, so `2 ^ 3.9` is
/// `8`. Negative exponents yield the reciprocal of the positive power.
/// Intermediate products are rounded to the decimal128 context.
///
/// # Errors
/// - [`DomainError::ZeroToZeroPower`] for `0 ^ 0`.
/// - [`DomainError::DivisionByZero`] for zero raised to a negative power.
/// - [`DomainError::ExponentOutOfRange`] if the exponent's magnitude exceeds
///   [`MAX_EXPONENT`].
/// - [`DomainError::Overflow`] if the power leaves the representable scale
///   range, as in `(10 ^ 999999999) ^ 999999999`.
pub fn power(base: &BigDecimal, exponent: &BigDecimal) -> Result<BigDecimal, DomainError> {
    let exponent = truncate_to_i64(exponent).filter(|e| e.unsigned_abs() <= MAX_EXPONENT)
                                            .ok_or(DomainError::ExponentOutOfRange)?;

    if base.is_zero() {
        return match exponent {
            0 => Err(DomainError::ZeroToZeroPower),
            e if e < 0 => Err(DomainError::DivisionByZero),
            _ => Ok(BigDecimal::zero()),
        };
    }

    let magnitude = integer_power(base, exponent.unsigned_abs())?;
    if exponent < 0 {
        return fit_to_context(&(BigDecimal::one() / magnitude));
    }
    Ok(magnitude)
}

/// Exponentiation by squaring with a checked, rounded product at every step.
fn integer_power(base: &BigDecimal, mut exponent: u64) -> Result<BigDecimal, DomainError> {
    let mut result = BigDecimal::one();
    let mut square = fit_to_context(base)?;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = multiply_in_context(&result, &square)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            square = multiply_in_context(&square, &square)?;
        }
    }
    Ok(result)
}

/// `left` percent of `right`, computed as `(left * right) / 100`.
///
/// This is not a modulo; see [`remainder`] for that.
pub fn percent(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, DomainError> {
    let product = multiply_in_context(left, right)?;
    fit_to_context(&(product / BigDecimal::from(100_i64)))
}

/// Square root of a non-negative value.
pub fn sqrt(value: &BigDecimal) -> Result<BigDecimal, DomainError> {
    if *value < BigDecimal::zero() {
        return Err(DomainError::NegativeSquareRoot);
    }
    if value.is_zero() {
        return Ok(BigDecimal::zero());
    }
    value.sqrt()
         .ok_or(DomainError::NegativeSquareRoot)
         .and_then(|root| fit_to_context(&root))
}

/// Remainder of truncated division; the result takes the dividend's sign.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use decalc::interpreter::operation::builtin::remainder;
///
/// let dividend = BigDecimal::from_str("-7").unwrap();
/// let divisor = BigDecimal::from_str("3").unwrap();
/// assert_eq!(remainder(&dividend, &divisor).unwrap(), BigDecimal::from_str("-1").unwrap());
/// ```
pub fn remainder(dividend: &BigDecimal, divisor: &BigDecimal) -> Result<BigDecimal, DomainError> {
    if divisor.is_zero() {
        return Err(DomainError::DivisionByZero);
    }
    fit_to_context(&(dividend.clone() % divisor.clone()))
}

/// Arithmetic mean of all operands.
pub fn average(operands: &[BigDecimal]) -> Result<BigDecimal, DomainError> {
    if operands.is_empty() {
        return Err(DomainError::DivisionByZero);
    }
    let sum = operands.iter()
                      .try_fold(BigDecimal::zero(), |total, operand| add_in_context(&total, operand))?;
    let count = BigDecimal::from(u64::try_from(operands.len()).unwrap_or(u64::MAX));
    fit_to_context(&(sum / count))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(text: &str) -> BigDecimal {
        BigDecimal::from_str(text).unwrap()
    }

    #[test]
    fn defaults_have_unique_names() {
        let operations = default_operations();
        let mut names: Vec<&str> = operations.iter().map(Operation::name).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), operations.len());
    }

    #[test]
    fn power_truncates_the_exponent() {
        assert_eq!(power(&dec("2"), &dec("3.9")).unwrap(), dec("8"));
        assert_eq!(power(&dec("2"), &dec("-2.5")).unwrap(), dec("0.25"));
        assert_eq!(power(&dec("-3"), &dec("3")).unwrap(), dec("-27"));
        assert_eq!(power(&dec("1.5"), &dec("0")).unwrap(), dec("1"));
    }

    #[test]
    fn power_rejects_degenerate_zero_bases() {
        assert_eq!(power(&dec("0"), &dec("0.7")), Err(DomainError::ZeroToZeroPower));
        assert_eq!(power(&dec("0"), &dec("-1")), Err(DomainError::DivisionByZero));
        assert_eq!(power(&dec("0"), &dec("5")).unwrap(), dec("0"));
    }

    #[test]
    fn power_rejects_huge_exponents() {
        assert_eq!(power(&dec("2"), &dec("1e12")), Err(DomainError::ExponentOutOfRange));
    }

    #[test]
    fn chained_powers_overflow_instead_of_panicking() {
        let huge = power(&dec("10"), &dec("999999999")).unwrap();
        let tiny = power(&dec("0.1"), &dec("999999999")).unwrap();

        assert_eq!(power(&huge, &dec("999999999")), Err(DomainError::Overflow));
        assert_eq!(power(&tiny, &dec("999999999")), Err(DomainError::Overflow));
        assert!(multiply(&huge, &huge).is_ok());
    }

    #[test]
    fn power_is_exact_within_the_context() {
        assert_eq!(power(&dec("1.5"), &dec("10")).unwrap(), dec("57.6650390625"));
        assert_eq!(power(&dec("2"), &dec("100")).unwrap(),
                   dec("1267650600228229401496703205376"));
    }

    #[test]
    fn percent_is_not_modulo() {
        assert_eq!(percent(&dec("50"), &dec("200")).unwrap(), dec("100"));
        assert_eq!(percent(&dec("7"), &dec("3")).unwrap(), dec("0.21"));
    }

    #[test]
    fn sqrt_of_perfect_square() {
        assert_eq!(sqrt(&dec("16")).unwrap(), dec("4"));
        assert_eq!(sqrt(&dec("0.25")).unwrap(), dec("0.5"));
        assert_eq!(sqrt(&dec("-0.01")), Err(DomainError::NegativeSquareRoot));
    }

    #[test]
    fn sqrt_of_two_is_rounded_to_context() {
        assert_eq!(sqrt(&dec("2")).unwrap(), dec("1.414213562373095048801688724209698"));
    }

    #[test]
    fn remainder_of_decimals() {
        assert_eq!(remainder(&dec("7.5"), &dec("2")).unwrap(), dec("1.5"));
        assert_eq!(remainder(&dec("7"), &dec("-3")).unwrap(), dec("1"));
        assert_eq!(remainder(&dec("1"), &dec("0.0")), Err(DomainError::DivisionByZero));
    }

    #[test]
    fn average_of_many() {
        assert_eq!(average(&[dec("1"), dec("2"), dec("3"), dec("4")]).unwrap(), dec("2.5"));
        assert_eq!(average(&[dec("1"), dec("2")]).unwrap(), dec("1.5"));
        assert_eq!(average(&[dec("1"), dec("1"), dec("2")]).unwrap(),
                   dec("1.333333333333333333333333333333333"));
    }
}
