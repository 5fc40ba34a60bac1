use thiserror::Error;

use crate::interpreter::operation::Arity;

/// Represents all errors raised while applying an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// No operation with this name is registered.
    #[error("operation '{name}' at offset {offset} is not implemented")]
    Unknown {
        /// The name used in the expression.
        name:   String,
        /// Where the name appears in the source.
        offset: usize,
    },
    /// The operation received a parameter count outside its arity.
    #[error("'{name}' requires {expected} parameter(s) but received {found}")]
    Arity {
        /// The operation name.
        name:     String,
        /// The arity declared by the operation.
        expected: Arity,
        /// The number of parameters supplied.
        found:    usize,
    },
    /// The parameters are well-formed but numerically invalid.
    #[error("'{name}' failed: {reason}")]
    Domain {
        /// The operation name.
        name:   String,
        /// Why the operands were rejected.
        reason: DomainError,
    },
}

/// Why an evaluation rule rejected its operands.
///
/// Evaluation rules return this without knowing the operation name;
/// [`Operation::evaluate`](crate::Operation::evaluate) wraps it into
/// [`OperationError::Domain`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A divisor equal to zero.
    #[error("division by zero")]
    DivisionByZero,
    /// A square root of a negative number.
    #[error("cannot take the square root of a negative number")]
    NegativeSquareRoot,
    /// `0 ^ 0`.
    #[error("zero to the power zero is undefined")]
    ZeroToZeroPower,
    /// An exponent whose integer part is too large to raise to.
    #[error("exponent is out of range")]
    ExponentOutOfRange,
    /// A result whose decimal scale leaves the 32-bit range.
    #[error("result is too large or too small to represent")]
    Overflow,
    /// A failure reported by a host-registered rule.
    #[error("{0}")]
    Other(String),
}
