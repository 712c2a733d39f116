// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Selection among a fixed catalog of functions.

use crate::error::{LookupError, Result, ValidationError};
use crate::functions::Function;

/// A selected function plus the catalog it was chosen from.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionOption {
    /// Currently selected function.
    pub value: Function,
    /// Selectable functions, in display order.
    pub functions: Vec<Function>,
}

impl FunctionOption {
    /// Create an option selecting the first catalog entry.
    pub fn new(functions: Vec<Function>) -> Result<Self> {
        let value = functions.first().cloned().ok_or_else(|| ValidationError::Field {
            field: "functions".into(),
            message: "function catalog cannot be empty".into(),
        })?;
        Ok(Self { value, functions })
    }

    /// Catalog entry with the given name.
    pub fn function_by_name(&self, name: &str) -> Result<&Function> {
        self.functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| LookupError::Function(name.to_string()).into())
    }

    /// Select a catalog entry by name.
    pub fn select(&mut self, name: &str) -> Result<()> {
        self.value = self.function_by_name(name)?.clone();
        Ok(())
    }

    /// Replace the selected function. Not checked against the catalog.
    pub fn set_value(&mut self, value: Function) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selects_first() {
        let opt = FunctionOption::new(Function::pulse_shapes()).unwrap();
        assert_eq!(opt.value, Function::rect());
        assert_eq!(opt.functions.len(), 4);
    }

    #[test]
    fn test_new_empty_catalog_fails() {
        assert!(FunctionOption::new(Vec::new()).is_err());
    }

    #[test]
    fn test_function_by_name() {
        let opt = FunctionOption::new(Function::pulse_shapes()).unwrap();
        assert_eq!(opt.function_by_name("Gaussian").unwrap(), &Function::gaussian());
        let err = opt.function_by_name("Chirp").unwrap_err();
        assert!(err.to_string().contains("Chirp"));
    }

    #[test]
    fn test_select() {
        let mut opt = FunctionOption::new(Function::pulse_shapes()).unwrap();
        opt.select("sinc").unwrap();
        assert_eq!(opt.value, Function::sinc());
        assert!(opt.select("missing").is_err());
        assert_eq!(opt.value, Function::sinc());
    }
}
