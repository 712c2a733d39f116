// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Typed, named values attached to pulse parameters.
//!
//! A [`PulseOption`] is a name plus one of a closed set of [`OptionKind`]s:
//!
//! - `Boolean`: overwritten unconditionally
//! - `Numeric`: bounded number, see [`NumericOption`]
//! - `Function`: selection from a fixed catalog, see [`FunctionOption`]
//! - `Table` / `Readout`: row payload with column templates, see [`TableOption`]
//!
//! Documents are produced and consumed by the [`codec`] module.

pub mod codec;
pub mod function;
pub mod numeric;
pub mod table;

pub use function::FunctionOption;
pub use numeric::NumericOption;
pub use table::TableOption;

use serde_json::Value;

use crate::error::{Result, ValidationError};
use crate::functions::Function;

/// Payload of an option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    Boolean(bool),
    Numeric(NumericOption),
    Function(FunctionOption),
    Table(TableOption),
    /// Table whose rows are phase cycles: phase column plus sign column.
    Readout(TableOption),
}

impl OptionKind {
    /// Persisted discriminant.
    pub fn class_name(&self) -> &'static str {
        match self {
            OptionKind::Boolean(_) => codec::BOOLEAN_CLASS,
            OptionKind::Numeric(_) => codec::NUMERIC_CLASS,
            OptionKind::Function(_) => codec::FUNCTION_CLASS,
            OptionKind::Table(_) => codec::TABLE_CLASS,
            OptionKind::Readout(_) => codec::READOUT_CLASS,
        }
    }
}

/// A value handed to or read from an option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Function(Function),
    Table(Value),
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Number(v)
    }
}

impl From<Function> for OptionValue {
    fn from(v: Function) -> Self {
        OptionValue::Function(v)
    }
}

impl From<Value> for OptionValue {
    fn from(v: Value) -> Self {
        OptionValue::Table(v)
    }
}

/// A named, typed option.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseOption {
    pub name: String,
    pub kind: OptionKind,
}

impl PulseOption {
    pub fn new(name: &str, kind: OptionKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }

    pub fn boolean(name: &str, value: bool) -> Self {
        Self::new(name, OptionKind::Boolean(value))
    }

    pub fn numeric(name: &str, numeric: NumericOption) -> Self {
        Self::new(name, OptionKind::Numeric(numeric))
    }

    /// Function option selecting the first entry of `functions`.
    pub fn function(name: &str, functions: Vec<Function>) -> Result<Self> {
        Ok(Self::new(
            name,
            OptionKind::Function(FunctionOption::new(functions)?),
        ))
    }

    pub fn table(name: &str, value: Value) -> Self {
        Self::new(name, OptionKind::Table(TableOption::new(value)))
    }

    /// Readout scheme with `n_phase_cycles` rows.
    pub fn readout(name: &str, value: Value, n_phase_cycles: usize) -> Result<Self> {
        let mut table = TableOption::readout(value)?;
        table.set_n_rows(n_phase_cycles);
        Ok(Self::new(name, OptionKind::Readout(table)))
    }

    /// Current value.
    pub fn value(&self) -> OptionValue {
        match &self.kind {
            OptionKind::Boolean(v) => OptionValue::Bool(*v),
            OptionKind::Numeric(n) => OptionValue::Number(n.value),
            OptionKind::Function(f) => OptionValue::Function(f.value.clone()),
            OptionKind::Table(t) | OptionKind::Readout(t) => OptionValue::Table(t.value.clone()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.kind {
            OptionKind::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match &self.kind {
            OptionKind::Numeric(n) => Some(n.value),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match &self.kind {
            OptionKind::Function(f) => Some(&f.value),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericOption> {
        match &self.kind {
            OptionKind::Numeric(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableOption> {
        match &self.kind {
            OptionKind::Table(t) | OptionKind::Readout(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut TableOption> {
        match &mut self.kind {
            OptionKind::Table(t) | OptionKind::Readout(t) => Some(t),
            _ => None,
        }
    }

    /// Variant-specific setter.
    ///
    /// Numeric options use the clamp-or-reject policy of
    /// [`NumericOption::set_value`]; the other kinds overwrite.
    pub fn set_value(&mut self, value: impl Into<OptionValue>) -> Result<()> {
        let value = value.into();
        if let (OptionKind::Numeric(n), OptionValue::Number(v)) = (&mut self.kind, &value) {
            return n.set_value(&self.name, *v);
        }
        self.overwrite(value)
    }

    /// Strict setter: numeric values must lie within bounds.
    pub fn try_set_value(&mut self, value: impl Into<OptionValue>) -> Result<()> {
        let value = value.into();
        if let (OptionKind::Numeric(n), OptionValue::Number(v)) = (&mut self.kind, &value) {
            return n.try_set(&self.name, *v);
        }
        self.overwrite(value)
    }

    /// Store a value with only a type check, bypassing bounds.
    pub fn overwrite(&mut self, value: impl Into<OptionValue>) -> Result<()> {
        let value = value.into();
        match (&mut self.kind, value) {
            (OptionKind::Boolean(b), OptionValue::Bool(v)) => *b = v,
            (OptionKind::Numeric(n), OptionValue::Number(v)) => n.value = v,
            (OptionKind::Function(f), OptionValue::Function(v)) => f.set_value(v),
            (OptionKind::Table(t), OptionValue::Table(v))
            | (OptionKind::Readout(t), OptionValue::Table(v)) => t.set_value(v),
            (kind, value) => {
                return Err(ValidationError::Field {
                    field: self.name.clone(),
                    message: format!("{} cannot hold {:?}", kind.class_name(), value),
                }
                .into())
            }
        }
        Ok(())
    }

    /// Numeric value outside its declared bounds, if any.
    pub fn bounds_violation(&self) -> Option<ValidationError> {
        let n = self.as_numeric()?;
        if n.contains(n.value) {
            return None;
        }
        Some(ValidationError::OutOfRange {
            option: self.name.clone(),
            value: n.value,
            min: n.min,
            max: n.max,
        })
    }
}
