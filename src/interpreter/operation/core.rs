use std::fmt;

use bigdecimal::BigDecimal;

use crate::error::{DomainError, OperationError};

/// Evaluation rule of a unary function.
pub type UnaryRule = fn(&BigDecimal) -> Result<BigDecimal, DomainError>;
/// Evaluation rule of a binary operator or binary function.
pub type BinaryRule = fn(&BigDecimal, &BigDecimal) -> Result<BigDecimal, DomainError>;
/// Evaluation rule of a variadic function.
pub type VariadicRule = fn(&[BigDecimal]) -> Result<BigDecimal, DomainError>;

/// Precedence class of an infix operator.
///
/// Multiplicative operators bind tighter than additive ones. Functions and
/// constants carry [`Priority::None`], which the parser never consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// `+`, `-`
    Additive,
    /// `*`, `/`, `^`, `%`
    Multiplicative,
    /// Not an infix operator.
    None,
}

/// Specifies the allowed number of parameters for an operation.
///
/// - `Exact(n)` means the operation must receive exactly `n` parameters.
/// - `AtLeast(n)` means the operation accepts `n` or more parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given parameter count satisfies this arity.
    #[must_use]
    pub const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// The closed set of operation shapes.
#[derive(Debug, Clone)]
pub enum OperationKind {
    /// No parameters; always yields the stored value.
    Constant(BigDecimal),
    /// Infix operator taking `left` and `right`.
    BinaryOperator(BinaryRule),
    /// Function called as `NAME(x)`.
    UnaryFunction(UnaryRule),
    /// Function called as `NAME(a, b)`.
    BinaryFunction(BinaryRule),
    /// Function called with `min_arity` or more parameters.
    VariadicFunction {
        /// Fewest parameters accepted.
        min_arity: usize,
        /// The rule applied to all parameters.
        rule:      VariadicRule,
    },
}

/// A named operator, function or constant.
///
/// Operations are looked up by name in a
/// [`Registry`](crate::interpreter::registry::Registry) and applied through
/// [`Operation::evaluate`], which validates the parameter count before the
/// rule runs.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use decalc::{Operation, Priority};
///
/// let max = Operation::binary_function("MAX", |a, b| Ok(if a >= b { a.clone() } else { b.clone() }));
/// let args = [BigDecimal::from_str("2").unwrap(), BigDecimal::from_str("7").unwrap()];
/// assert_eq!(max.evaluate(&args).unwrap(), BigDecimal::from_str("7").unwrap());
/// assert!(max.evaluate(&args[..1]).is_err());
/// assert_eq!(max.priority(), Priority::None);
/// ```
#[derive(Debug, Clone)]
pub struct Operation {
    name:     String,
    priority: Priority,
    kind:     OperationKind,
}

impl Operation {
    /// Creates a nullary constant.
    #[must_use]
    pub fn constant(name: impl Into<String>, value: BigDecimal) -> Self {
        Self { name:     name.into(),
               priority: Priority::None,
               kind:     OperationKind::Constant(value), }
    }

    /// Creates an infix binary operator in the given precedence class.
    #[must_use]
    pub fn binary_operator(name: impl Into<String>, priority: Priority, rule: BinaryRule) -> Self {
        Self { name: name.into(),
               priority,
               kind: OperationKind::BinaryOperator(rule) }
    }

    /// Creates a function of exactly one parameter.
    #[must_use]
    pub fn unary_function(name: impl Into<String>, rule: UnaryRule) -> Self {
        Self { name:     name.into(),
               priority: Priority::None,
               kind:     OperationKind::UnaryFunction(rule), }
    }

    /// Creates a function of exactly two parameters.
    #[must_use]
    pub fn binary_function(name: impl Into<String>, rule: BinaryRule) -> Self {
        Self { name:     name.into(),
               priority: Priority::None,
               kind:     OperationKind::BinaryFunction(rule), }
    }

    /// Creates a function of `min_arity` or more parameters.
    ///
    /// Variadic functions always take at least two parameters; a smaller
    /// `min_arity` is raised to two.
    #[must_use]
    pub fn variadic_function(name: impl Into<String>, min_arity: usize, rule: VariadicRule) -> Self {
        Self { name:     name.into(),
               priority: Priority::None,
               kind:     OperationKind::VariadicFunction { min_arity: min_arity.max(2),
                                                           rule }, }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub const fn kind(&self) -> &OperationKind {
        &self.kind
    }

    /// The number of parameters the operation accepts.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        match self.kind {
            OperationKind::Constant(_) => Arity::Exact(0),
            OperationKind::UnaryFunction(_) => Arity::Exact(1),
            OperationKind::BinaryOperator(_) | OperationKind::BinaryFunction(_) => Arity::Exact(2),
            OperationKind::VariadicFunction { min_arity, .. } => Arity::AtLeast(min_arity),
        }
    }

    /// Whether the parser may use this operation in infix position.
    #[must_use]
    pub const fn is_infix(&self) -> bool {
        matches!(self.kind, OperationKind::BinaryOperator(_))
        && !matches!(self.priority, Priority::None)
    }

    /// Applies the operation to `operands`.
    ///
    /// The parameter count is checked against [`Operation::arity`] first; the
    /// rule only ever sees an acceptable number of operands.
    ///
    /// # Parameters
    /// - `operands`: The evaluated parameters in source order.
    ///
    /// # Returns
    /// The value produced by the rule.
    ///
    /// # Errors
    /// - [`OperationError::Arity`] if the count does not match the arity.
    /// - [`OperationError::Domain`] if the rule rejects the operands.
    pub fn evaluate(&self, operands: &[BigDecimal]) -> Result<BigDecimal, OperationError> {
        let outcome = match (&self.kind, operands) {
            (OperationKind::Constant(value), []) => Ok(value.clone()),
            (OperationKind::UnaryFunction(rule), [operand]) => rule(operand),
            (OperationKind::BinaryOperator(rule) | OperationKind::BinaryFunction(rule),
             [left, right]) => rule(left, right),
            (OperationKind::VariadicFunction { min_arity, rule }, operands)
                if operands.len() >= *min_arity =>
            {
                rule(operands)
            },
            _ => {
                return Err(OperationError::Arity { name:     self.name.clone(),
                                                   expected: self.arity(),
                                                   found:    operands.len(), });
            },
        };

        outcome.map_err(|reason| OperationError::Domain { name: self.name.clone(),
                                                          reason })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{:?}, {} parameter(s)]", self.name, self.priority, self.arity())
    }
}
