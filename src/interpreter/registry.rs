use std::collections::HashMap;

use crate::{
    error::RegistryError,
    interpreter::operation::{Operation, OperationKind, Priority, builtin::default_operations},
};

/// Keyword that refers to the previous result and can never name an
/// operation.
pub const ANS_KEYWORD: &str = "ANS";

/// Maps operation names to operations.
///
/// Names are unique across the whole registry. Infix operators are also
/// indexed by precedence class, in registration order, so the parser can ask
/// whether a token continues the current precedence level.
///
/// # Example
/// ```
/// use decalc::{Operation, Priority, Registry};
///
/// let mut registry = Registry::with_defaults();
/// assert!(registry.contains("SQRT"));
///
/// let modulo = Operation::binary_operator("MOD", Priority::Multiplicative, |a, b| Ok(a.clone() % b.clone()));
/// registry.register(modulo).unwrap();
/// assert!(registry.is_operator(Priority::Multiplicative, "MOD"));
///
/// registry.unregister("MOD").unwrap();
/// assert!(registry.unregister("MOD").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    operations: HashMap<String, Operation>,
    operators:  HashMap<Priority, Vec<String>>,
}

impl Registry {
    /// Creates a registry with no operations at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the default operators and functions.
    ///
    /// See [`default_operations`] for the list.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for operation in default_operations() {
            registry.insert(operation);
        }
        registry
    }

    /// Adds an operation.
    ///
    /// # Errors
    /// - [`RegistryError::DuplicateName`] if the name is already taken.
    /// - [`RegistryError::ReservedName`] for [`ANS_KEYWORD`].
    /// - [`RegistryError::MissingPriority`] for a binary operator with
    ///   [`Priority::None`], which could never be parsed in infix position.
    pub fn register(&mut self, operation: Operation) -> Result<(), RegistryError> {
        let name = operation.name();

        if name == ANS_KEYWORD {
            return Err(RegistryError::ReservedName { name: name.to_string() });
        }
        if self.operations.contains_key(name) {
            return Err(RegistryError::DuplicateName { name: name.to_string() });
        }
        if matches!(operation.kind(), OperationKind::BinaryOperator(_))
           && operation.priority() == Priority::None
        {
            return Err(RegistryError::MissingPriority { name: name.to_string() });
        }

        tracing::trace!(name, "registering operation");
        self.insert(operation);
        Ok(())
    }

    /// Removes an operation and returns it.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownName`] if nothing is registered under
    /// `name`.
    pub fn unregister(&mut self, name: &str) -> Result<Operation, RegistryError> {
        let operation = self.operations
                            .remove(name)
                            .ok_or_else(|| RegistryError::UnknownName { name: name.to_string() })?;

        if let Some(names) = self.operators.get_mut(&operation.priority()) {
            names.retain(|registered| registered != name);
        }

        tracing::trace!(name, "unregistered operation");
        Ok(operation)
    }

    /// Looks up an operation by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Whether `name` is an infix operator of the given precedence class.
    #[must_use]
    pub fn is_operator(&self, priority: Priority, name: &str) -> bool {
        self.operators(priority).iter().any(|registered| registered == name)
    }

    /// Infix operator names of one precedence class, in registration order.
    #[must_use]
    pub fn operators(&self, priority: Priority) -> &[String] {
        self.operators.get(&priority).map(Vec::as_slice).unwrap_or_default()
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Inserts without validation; callers guarantee the name is free.
    fn insert(&mut self, operation: Operation) {
        if operation.is_infix() {
            self.operators
                .entry(operation.priority())
                .or_default()
                .push(operation.name().to_string());
        }
        self.operations.insert(operation.name().to_string(), operation);
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::*;

    #[test]
    fn defaults_are_indexed_by_priority() {
        let registry = Registry::with_defaults();

        assert_eq!(registry.operators(Priority::Additive), ["+", "-"]);
        assert_eq!(registry.operators(Priority::Multiplicative), ["*", "/", "^", "%"]);
        assert!(registry.operators(Priority::None).is_empty());
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn functions_are_not_infix() {
        let registry = Registry::with_defaults();

        assert!(!registry.is_operator(Priority::Multiplicative, "SQRT"));
        assert!(registry.lookup("SQRT").is_some());
    }

    #[test]
    fn duplicate_names_are_rejected_across_shapes() {
        let mut registry = Registry::with_defaults();
        let err = registry.register(Operation::unary_function("+", |x| Ok(x.clone())))
                          .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateName { name: "+".to_string() });
        assert_eq!(registry.operators(Priority::Additive), ["+", "-"]);
    }

    #[test]
    fn ans_is_reserved() {
        let mut registry = Registry::new();
        let err = registry.register(Operation::constant(ANS_KEYWORD, BigDecimal::from(1_i64)))
                          .unwrap_err();

        assert!(matches!(err, RegistryError::ReservedName { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn unranked_binary_operator_is_rejected() {
        let mut registry = Registry::new();
        let nop = Operation::binary_operator("NOP", Priority::None, |a, _| Ok(a.clone()));
        let err = registry.register(nop).unwrap_err();

        assert!(matches!(err, RegistryError::MissingPriority { .. }));
    }

    #[test]
    fn unregister_removes_both_indexes() {
        let mut registry = Registry::with_defaults();
        let removed = registry.unregister("-").unwrap();

        assert_eq!(removed.name(), "-");
        assert!(!registry.contains("-"));
        assert_eq!(registry.operators(Priority::Additive), ["+"]);
        assert_eq!(registry.unregister("-").unwrap_err(),
                   RegistryError::UnknownName { name: "-".to_string() });
    }

    #[test]
    fn reregistering_appends_to_the_priority_list() {
        let mut registry = Registry::with_defaults();
        let plus = registry.unregister("+").unwrap();
        registry.register(plus).unwrap();

        assert_eq!(registry.operators(Priority::Additive), ["-", "+"]);
    }

    #[test]
    fn names_are_sorted() {
        let registry = Registry::with_defaults();

        assert_eq!(registry.names(),
                   ["%", "*", "+", "-", "/", "AVG", "REMAINDER", "SQRT", "^"]);
    }
}
