use thiserror::Error;

/// A character that cannot start any token.
///
/// Keywords, numerals and the operator symbols are the only lexemes the
/// tokenizer knows; anything else, such as `#` or a non-ASCII letter, stops
/// tokenizing at that character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid character '{character}' at offset {offset}")]
pub struct LexError {
    /// The rejected character.
    pub character: char,
    /// Character offset of `character` in the source.
    pub offset:    usize,
}
