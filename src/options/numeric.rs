// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bounded numeric option payload.

use crate::error::{Result, ValidationError};

/// A number with optional inclusive bounds.
///
/// # Invariants
///
/// - `min <= max` when both are set
/// - after [`check`](NumericOption::check), `value` lies in `[min, max]`
#[derive(Debug, Clone, PartialEq)]
pub struct NumericOption {
    /// Current value.
    pub value: f64,
    /// Whether fractional values are meaningful.
    pub is_float: bool,
    /// Inclusive lower bound (`None` = unbounded).
    pub min: Option<f64>,
    /// Inclusive upper bound (`None` = unbounded).
    pub max: Option<f64>,
    /// UI hint: render as a slider.
    pub slider: bool,
}

impl NumericOption {
    /// Unbounded floating-point value.
    pub fn float(value: f64) -> Self {
        Self {
            value,
            is_float: true,
            min: None,
            max: None,
            slider: false,
        }
    }

    /// Bounded integer value.
    pub fn integer(value: i64, min: i64, max: i64) -> Self {
        Self {
            value: value as f64,
            is_float: false,
            min: Some(min as f64),
            max: Some(max as f64),
            slider: false,
        }
    }

    /// Set the slider hint.
    pub fn with_slider(mut self, slider: bool) -> Self {
        self.slider = slider;
        self
    }

    /// Set inclusive bounds.
    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Whether `value` satisfies both bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |m| value >= m) && self.max.map_or(true, |m| value <= m)
    }

    /// Validate `value` against bounds and integrality without storing it.
    pub fn check(&self, name: &str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(ValidationError::Field {
                field: name.to_string(),
                message: format!("{} is not a finite number", value),
            }
            .into());
        }
        if !self.is_float && value.fract() != 0.0 {
            return Err(ValidationError::Field {
                field: name.to_string(),
                message: format!("{} is not an integer", value),
            }
            .into());
        }
        if !self.contains(value) {
            return Err(ValidationError::OutOfRange {
                option: name.to_string(),
                value,
                min: self.min,
                max: self.max,
            }
            .into());
        }
        Ok(value)
    }

    /// Store `value` only if it passes [`check`](NumericOption::check).
    pub fn try_set(&mut self, name: &str, value: f64) -> Result<()> {
        self.value = self.check(name, value)?;
        Ok(())
    }

    /// Legacy setter: clamps at the bounds and rejects interior values.
    ///
    /// `value < min` stores `min`, `value >= max` stores `max`. Anything
    /// strictly inside the bounds is an error; use
    /// [`try_set`](NumericOption::try_set) for in-range values.
    pub fn set_value(&mut self, name: &str, value: f64) -> Result<()> {
        if let Some(min) = self.min {
            if value < min {
                self.value = min;
                return Ok(());
            }
        }
        if let Some(max) = self.max {
            if value >= max {
                self.value = max;
                return Ok(());
            }
        }
        Err(ValidationError::Field {
            field: name.to_string(),
            message: format!("value {} is not at or beyond a bound", value),
        }
        .into())
    }
}
