/// Default evaluation rules.
///
/// The numeric rules behind the operators and functions every registry is
/// seeded with: `+`, `-`, `*`, `/`, `^`, `%`, `SQRT`, `REMAINDER` and `AVG`.
pub mod builtin;
/// The operation type.
///
/// Declares [`Operation`], its variants, precedence classes and arity
/// descriptors, and the single arity-checked evaluation entry point.
pub mod core;

pub use self::core::{Arity, BinaryRule, Operation, OperationKind, Priority, UnaryRule, VariadicRule};
