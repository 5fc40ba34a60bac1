/// Decimal context and conversion helpers.
///
/// This module fixes the rounding context every default operation computes
/// in, and provides the conversions the tokenizer, the `^` operator and the
/// history file need: parsing numeric token text, truncating a decimal to a
/// machine integer, and rendering a decimal without exponent notation.
pub mod num;
