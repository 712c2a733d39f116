// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Table options: a row payload plus column templates.
//!
//! The row count is set independently of the payload and the columns; the
//! two are never cross-checked.

use serde_json::Value;

use super::numeric::NumericOption;
use super::{FunctionOption, OptionKind, PulseOption};
use crate::error::Result;
use crate::functions::Function;

/// Default name of a readout scheme option.
pub const READOUT_OPTION: &str = "Readout Option";
/// Readout column holding the receiver phase of a cycle.
pub const READOUT_PHASE: &str = "Phase";
/// Readout column holding the sign/weight of a cycle.
pub const READOUT_SIGN: &str = "Function";

/// Table payload shared by the table and readout variants.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOption {
    /// Opaque row payload.
    pub value: Value,
    /// Column templates.
    pub columns: Vec<PulseOption>,
    n_rows: usize,
}

impl TableOption {
    /// Table with no columns and no rows.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            columns: Vec::new(),
            n_rows: 0,
        }
    }

    /// Readout layout: a phase column and a sign column.
    pub fn readout(value: Value) -> Result<Self> {
        let mut table = Self::new(value);
        table.add_option(PulseOption::new(
            READOUT_PHASE,
            OptionKind::Numeric(NumericOption::float(0.0).with_bounds(Some(0.0), Some(360.0))),
        ));
        table.add_option(PulseOption::new(
            READOUT_SIGN,
            OptionKind::Function(FunctionOption::new(Function::readout_signs())?),
        ));
        Ok(table)
    }

    /// Append a column template.
    pub fn add_option(&mut self, option: PulseOption) {
        self.columns.push(option);
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Set the number of rows.
    pub fn set_n_rows(&mut self, n_rows: usize) {
        self.n_rows = n_rows;
    }

    /// Replace the row payload.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}
