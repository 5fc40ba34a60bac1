use thiserror::Error;

/// Represents all structural errors found while parsing an expression.
///
/// Offsets are character offsets into the source text. Tokens are reported
/// by their source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source contains no tokens at all.
    #[error("cannot evaluate an empty expression")]
    EmptyInput,
    /// Found a token where an operand was required.
    #[error("unexpected token '{token}' at offset {offset}")]
    UnexpectedToken {
        /// The token encountered.
        token:  String,
        /// Where the token starts.
        offset: usize,
    },
    /// Reached the end of input while an operand was still required.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput {
        /// The length of the source in characters.
        offset: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("expected closing parenthesis ')' at offset {offset}")]
    ExpectedClosingParen {
        /// Where the parenthesis was expected.
        offset: usize,
    },
    /// An argument list continued without a `,` or `)`.
    #[error("expected ',' or ')' but found '{token}' at offset {offset}")]
    ExpectedSeparator {
        /// The token found in place of the separator.
        token:  String,
        /// Where the token starts.
        offset: usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("extra tokens after expression, starting with '{token}' at offset {offset}")]
    UnexpectedTrailingTokens {
        /// The first unconsumed token.
        token:  String,
        /// Where the token starts.
        offset: usize,
    },
    /// A numeric token could not be read as a decimal.
    #[error("invalid numeric literal '{literal}' at offset {offset}")]
    InvalidNumber {
        /// The literal text.
        literal: String,
        /// Where the literal starts.
        offset:  usize,
    },
    /// Groups or calls nested deeper than the parser allows.
    #[error("expression nested deeper than {limit} levels at offset {offset}")]
    NestingTooDeep {
        /// The maximum nesting depth.
        limit:  usize,
        /// Where the innermost rejected expression starts.
        offset: usize,
    },
}

impl ParseError {
    /// Character offset the error points at, if it has one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::EmptyInput => None,
            Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEndOfInput { offset }
            | Self::ExpectedClosingParen { offset }
            | Self::ExpectedSeparator { offset, .. }
            | Self::UnexpectedTrailingTokens { offset, .. }
            | Self::InvalidNumber { offset, .. }
            | Self::NestingTooDeep { offset, .. } => Some(*offset),
        }
    }
}
