/// History storage errors.
///
/// Raised while reading or writing the plain-text history file, either
/// because of an I/O failure or because a stored record is malformed.
pub mod history_error;
/// Lexical errors.
///
/// Raised by the tokenizer when a character matches none of the token
/// patterns.
pub mod lex_error;
/// Operation errors.
///
/// Raised while applying an operator, function or constant: unknown names,
/// parameter counts outside an operation's arity, and numerically invalid
/// input such as division by zero.
pub mod operation_error;
/// Parsing errors.
///
/// Defines the structural failures of the recursive-descent parser: missing
/// delimiters and separators, unexpected tokens, empty input and trailing
/// tokens.
pub mod parse_error;
/// Registry errors.
///
/// Raised when registering or unregistering operations violates the
/// registry's naming rules.
pub mod registry_error;

pub use history_error::HistoryError;
pub use lex_error::LexError;
pub use operation_error::{DomainError, OperationError};
pub use parse_error::ParseError;
pub use registry_error::RegistryError;
use thiserror::Error;

/// Any failure produced while evaluating an expression.
///
/// Every phase of [`Calculator::evaluate`](crate::Calculator::evaluate)
/// reports through this type, and the underlying error is kept intact so
/// callers can inspect offsets and names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The input contains a character no token pattern accepts.
    #[error(transparent)]
    Lexical(#[from] LexError),
    /// The tokens do not form a valid expression.
    #[error(transparent)]
    Syntax(#[from] ParseError),
    /// An operation could not be resolved or rejected its operands.
    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Coarse classification of an [`EvalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`LexError`].
    Lexical,
    /// See [`ParseError`].
    Syntax,
    /// See [`OperationError::Unknown`].
    UnknownOperation,
    /// See [`OperationError::Arity`].
    Arity,
    /// See [`OperationError::Domain`].
    Domain,
}

impl EvalError {
    /// Returns the category of this error.
    ///
    /// # Example
    /// ```
    /// use decalc::{Calculator, error::ErrorKind};
    ///
    /// let mut calculator = Calculator::new();
    /// let err = calculator.evaluate("1/0").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Domain);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lexical(_) => ErrorKind::Lexical,
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::Operation(OperationError::Unknown { .. }) => ErrorKind::UnknownOperation,
            Self::Operation(OperationError::Arity { .. }) => ErrorKind::Arity,
            Self::Operation(OperationError::Domain { .. }) => ErrorKind::Domain,
        }
    }

    /// Character offset in the source the error points at, when known.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::Lexical(err) => Some(err.offset),
            Self::Syntax(err) => err.offset(),
            Self::Operation(OperationError::Unknown { offset, .. }) => Some(*offset),
            Self::Operation(_) => None,
        }
    }
}
