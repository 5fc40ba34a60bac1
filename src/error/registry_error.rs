use thiserror::Error;

/// Represents all errors raised by registry mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Another operation already uses this name.
    #[error("another operation with name '{name}' is already registered")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },
    /// No operation with this name is registered.
    #[error("no operation found with name '{name}'")]
    UnknownName {
        /// The requested name.
        name: String,
    },
    /// The name is reserved by the expression grammar.
    #[error("'{name}' is reserved and cannot name an operation")]
    ReservedName {
        /// The reserved name.
        name: String,
    },
    /// An infix operator was registered without a precedence class.
    #[error("binary operator '{name}' needs an additive or multiplicative priority")]
    MissingPriority {
        /// The operator name.
        name: String,
    },
}
