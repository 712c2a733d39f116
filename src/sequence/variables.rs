// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sweep variables.
//!
//! Variables in one group advance together; separate groups nest, so a
//! sweep visits the product of the group lengths.

use crate::error::{Result, ValidationError};

/// A named list of values to step through.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    values: Vec<f64>,
}

impl Variable {
    /// # Errors
    ///
    /// Fails if `name` is blank.
    pub fn new(name: &str, values: Vec<f64>) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(ValidationError::Field {
                field: "variable".into(),
                message: "name must not be empty".into(),
            }
            .into());
        }
        Ok(Self {
            name: name.to_string(),
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Variables that step in lock-step.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableGroup {
    name: String,
    variables: Vec<Variable>,
}

impl VariableGroup {
    /// # Errors
    ///
    /// Fails if `name` is blank.
    pub fn new(name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(ValidationError::Field {
                field: "variable group".into(),
                message: "name must not be empty".into(),
            }
            .into());
        }
        Ok(Self {
            name: name.to_string(),
            variables: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Add a variable. Names are unique within the group.
    pub fn add_variable(&mut self, variable: Variable) -> Result<()> {
        if self.variables.iter().any(|v| v.name == variable.name) {
            return Err(ValidationError::Field {
                field: variable.name,
                message: format!("variable already exists in group '{}'", self.name),
            }
            .into());
        }
        self.variables.push(variable);
        Ok(())
    }

    /// Number of steps: the longest variable.
    pub fn len(&self) -> usize {
        self.variables.iter().map(Variable::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
