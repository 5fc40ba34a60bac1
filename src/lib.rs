//! # decalc
//!
//! decalc is an arbitrary-precision decimal expression calculator written in
//! Rust. It tokenizes and evaluates arithmetic expressions with signed
//! literals, parenthesized groups, precedence-aware infix operators and named
//! functions, all over an extensible operation registry.
//!
//! ```
//! use decalc::{Calculator, util::num::to_plain_string};
//!
//! let mut calculator = Calculator::new();
//! let value = calculator.evaluate("AVG(1, 2, 3) + SQRT(16) * 2").unwrap();
//! assert_eq!(to_plain_string(&value), "10");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

pub use bigdecimal::BigDecimal;

pub use crate::{
    error::{ErrorKind, EvalError},
    interpreter::{
        calculator::Calculator,
        lexer::{Token, TokenKind, tokenize},
        operation::{Arity, Operation, OperationKind, Priority},
        registry::Registry,
    },
};

/// Provides unified error types for lexing, parsing and evaluation.
///
/// Every failure the calculator can report is a variant of one of the enums
/// declared here, and each carries a human-readable message plus, where it
/// has one, the character offset it points at.
///
/// # Responsibilities
/// - Defines error enums for every failure mode (lexer, parser, operations,
///   registry, history).
/// - Groups evaluation failures under [`EvalError`] with a coarse
///   [`ErrorKind`].
pub mod error;
/// A plain-text log of evaluated expressions.
///
/// The calculator core never touches the file system; front-ends record
/// `(expression, result)` pairs through [`History`](history::History).
pub mod history;
/// Orchestrates lexing, parsing and evaluation.
///
/// This module exposes the calculator, the tokenizer, the operation model and
/// the registry that front-ends extend.
pub mod interpreter;
/// Shared decimal helpers.
pub mod util;

/// Evaluates a single expression on a fresh calculator.
///
/// This is a convenience for one-off evaluations; `ANS` is always zero here.
/// Keep a [`Calculator`] around to chain results or register operations.
///
/// # Errors
/// Returns the [`EvalError`] that stopped evaluation.
///
/// # Examples
/// ```
/// use decalc::{ErrorKind, evaluate, util::num::to_plain_string};
///
/// let value = evaluate("1 / 3").unwrap();
/// assert_eq!(to_plain_string(&value), "0.3333333333333333333333333333333333");
///
/// let err = evaluate("SQRT(-1)").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Domain);
/// ```
pub fn evaluate(source: &str) -> Result<BigDecimal, EvalError> {
    Calculator::new().evaluate(source)
}
