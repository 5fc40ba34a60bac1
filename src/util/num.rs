use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{ToPrimitive, Zero};

use crate::error::DomainError;

/// Number of significant digits kept by every rounded operation.
///
/// This is the precision of the IEEE 754 `decimal128` format. Results with
/// more digits are rounded half-to-even, which keeps non-terminating
/// expansions such as `1/3` finite.
pub const DECIMAL128_DIGITS: u64 = 34;

/// Largest exponent magnitude accepted by the `^` operator.
pub const MAX_EXPONENT: u64 = 999_999_999;

/// Largest decimal scale magnitude a result may carry.
///
/// Scales stay inside the 32-bit range, so the sum of two scales can never
/// overflow the 64-bit scale `BigDecimal` stores.
pub const MAX_SCALE: i64 = i32::MAX as i64;

/// Rounds a decimal to [`DECIMAL128_DIGITS`] significant digits.
///
/// Values that already fit are returned unchanged, so exact results keep
/// their scale and are never padded with trailing zeros.
///
/// ## Parameters
/// - `value`: The decimal to round.
///
/// ## Returns
/// The value rounded half-to-even to the decimal128 precision.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use decalc::util::num::round_to_context;
///
/// let third = BigDecimal::from_str("0.33333333333333333333333333333333333333").unwrap();
/// let rounded = round_to_context(&third);
/// assert_eq!(rounded, BigDecimal::from_str("0.3333333333333333333333333333333333").unwrap());
///
/// let exact = BigDecimal::from_str("2.5").unwrap();
/// assert_eq!(round_to_context(&exact), exact);
/// ```
#[must_use]
pub fn round_to_context(value: &BigDecimal) -> BigDecimal {
    let precision = value.digits();
    if precision <= DECIMAL128_DIGITS {
        return value.clone();
    }

    let scale = scale_of(value);
    let excess = i64::try_from(precision - DECIMAL128_DIGITS).unwrap_or(i64::MAX);
    value.with_scale_round(scale.saturating_sub(excess), RoundingMode::HalfEven)
}

/// Rounds to the decimal128 context and checks the scale range.
///
/// # Errors
/// Returns [`DomainError::Overflow`] if the rounded scale magnitude exceeds
/// [`MAX_SCALE`].
pub fn fit_to_context(value: &BigDecimal) -> Result<BigDecimal, DomainError> {
    let rounded = round_to_context(value);
    if scale_of(&rounded).abs() > MAX_SCALE {
        return Err(DomainError::Overflow);
    }
    Ok(rounded)
}

/// Multiplies two decimals and rounds the product to the context.
///
/// The operand scales are added with overflow checking before the product
/// is formed.
///
/// # Errors
/// Returns [`DomainError::Overflow`] if the product's scale leaves the
/// representable range.
pub fn multiply_in_context(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, DomainError> {
    scale_of(left).checked_add(scale_of(right))
                  .ok_or(DomainError::Overflow)?;
    fit_to_context(&(left * right))
}

/// Adds two decimals and rounds the sum to the context.
///
/// When one operand lies entirely below the last digit that can survive
/// rounding, it is replaced by a single sticky unit of the same sign just
/// under that digit. The rounded sum is unchanged, and the exact sum is
/// never built at the full width of the exponent gap, so `10^99999999 + 0.1`
/// costs as much as `10 + 0.1`.
///
/// # Errors
/// Returns [`DomainError::Overflow`] if the sum's scale leaves the
/// representable range.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use decalc::util::num::add_in_context;
///
/// let big = BigDecimal::from_str("1e40").unwrap();
/// let tiny = BigDecimal::from_str("0.1").unwrap();
/// assert_eq!(add_in_context(&big, &tiny).unwrap(), big);
/// ```
pub fn add_in_context(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, DomainError> {
    let (Some(left_exponent), Some(right_exponent)) = (leading_exponent(left), leading_exponent(right))
    else {
        return fit_to_context(&(left + right));
    };

    let (large, small, large_exponent, small_exponent) = if left_exponent >= right_exponent {
        (left, right, left_exponent, right_exponent)
    } else {
        (right, left, right_exponent, left_exponent)
    };

    let guard = i64::try_from(DECIMAL128_DIGITS).unwrap_or(i64::MAX);
    let floor = large_exponent.saturating_sub(guard + 2)
                              .min(scale_of(large).saturating_neg().saturating_sub(1));
    if small_exponent >= floor {
        return fit_to_context(&(left + right));
    }

    let unit = if *small < BigDecimal::zero() { -1 } else { 1 };
    let (digits, _) = BigDecimal::from(unit).into_bigint_and_exponent();
    let sticky = BigDecimal::new(digits, floor.saturating_neg());
    fit_to_context(&(large + &sticky))
}

/// Decimal exponent of the most significant digit, `None` for zero.
fn leading_exponent(value: &BigDecimal) -> Option<i64> {
    if value.is_zero() {
        return None;
    }
    let digits = i64::try_from(value.digits()).ok()?;
    Some(digits - 1 - scale_of(value))
}

fn scale_of(value: &BigDecimal) -> i64 {
    value.as_bigint_and_exponent().1
}

/// Parses the text of a numeric token into a decimal.
///
/// Accepts an optional leading sign and the literal forms the tokenizer
/// produces, including a bare leading or trailing decimal point (`.5`,
/// `2.`).
///
/// ## Parameters
/// - `text`: The numeric token text.
///
/// ## Returns
/// - `Some(BigDecimal)`: The parsed value.
/// - `None`: If the text contains no digits or is not a decimal literal.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use decalc::util::num::parse_decimal;
///
/// assert_eq!(parse_decimal("-.5"), BigDecimal::from_str("-0.5").ok());
/// assert_eq!(parse_decimal("+2."), BigDecimal::from_str("2").ok());
/// assert_eq!(parse_decimal("."), None);
/// ```
#[must_use]
pub fn parse_decimal(text: &str) -> Option<BigDecimal> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if !unsigned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut literal = String::with_capacity(unsigned.len() + 3);
    if negative {
        literal.push('-');
    }
    if unsigned.starts_with('.') {
        literal.push('0');
    }
    literal.push_str(unsigned);
    if unsigned.ends_with('.') {
        literal.push('0');
    }

    BigDecimal::from_str(&literal).ok()
}

/// Truncates a decimal toward zero and converts it to an `i64`.
///
/// ## Returns
/// - `Some(i64)`: The integer part of the value.
/// - `None`: If the integer part does not fit into an `i64`.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use decalc::util::num::truncate_to_i64;
///
/// assert_eq!(truncate_to_i64(&BigDecimal::from_str("2.9").unwrap()), Some(2));
/// assert_eq!(truncate_to_i64(&BigDecimal::from_str("-2.9").unwrap()), Some(-2));
/// assert_eq!(truncate_to_i64(&BigDecimal::from_str("1e30").unwrap()), None);
/// ```
#[must_use]
pub fn truncate_to_i64(value: &BigDecimal) -> Option<i64> {
    value.with_scale(0).to_i64()
}

/// Renders a decimal in plain positional notation.
///
/// Trailing fractional zeros are removed and no exponent is ever emitted,
/// so `1E+3` renders as `1000` and `2.500` as `2.5`.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use decalc::util::num::to_plain_string;
///
/// assert_eq!(to_plain_string(&BigDecimal::from_str("1e3").unwrap()), "1000");
/// assert_eq!(to_plain_string(&BigDecimal::from_str("-0.0250").unwrap()), "-0.025");
/// assert_eq!(to_plain_string(&BigDecimal::from_str("0.000").unwrap()), "0");
/// ```
#[must_use]
pub fn to_plain_string(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    let rendered = digits.to_string();
    let (negative, magnitude) = match rendered.strip_prefix('-') {
        Some(magnitude) => (true, magnitude),
        None => (false, rendered.as_str()),
    };

    if magnitude.bytes().all(|b| b == b'0') {
        return "0".to_string();
    }

    let mut plain = String::with_capacity(magnitude.len() + 2);
    if negative {
        plain.push('-');
    }

    if scale <= 0 {
        plain.push_str(magnitude);
        let zeros = usize::try_from(scale.unsigned_abs()).unwrap_or(usize::MAX);
        plain.extend(std::iter::repeat_n('0', zeros));
        return plain;
    }

    let scale = usize::try_from(scale).unwrap_or(usize::MAX);
    let (integer, fraction) = if magnitude.len() > scale {
        let split = magnitude.len() - scale;
        (magnitude[..split].to_string(), magnitude[split..].to_string())
    } else {
        let mut fraction = "0".repeat(scale - magnitude.len());
        fraction.push_str(magnitude);
        ("0".to_string(), fraction)
    };

    plain.push_str(&integer);
    let fraction = fraction.trim_end_matches('0');
    if !fraction.is_empty() {
        plain.push('.');
        plain.push_str(fraction);
    }
    plain
}
