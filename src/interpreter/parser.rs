/// Binary operator parsing.
///
/// Implements the additive and multiplicative precedence levels: each parses
/// operands from the next tighter level and folds same-level operators left
/// to right.
pub mod binary;

/// Core parsing logic.
///
/// Declares the [`Parser`](core::Parser) cursor over a token buffer, the
/// entry point for a complete expression, and the shared cursor helpers.
pub mod core;

/// Primary (base level) parsing.
///
/// Handles literals, signed literals, `ANS`, constants, function calls and
/// parenthesized groups.
pub mod primary;

/// Parser utilities.
///
/// Helpers shared by several grammar levels, such as argument lists.
pub mod utils;
