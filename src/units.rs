// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! SI-prefixed number parsing.
//!
//! Durations are entered as `"10u"`, `"1m"` or plain `"10"` and stored as a
//! real number in base units.

use crate::error::{Result, ValidationError};

/// Recognized SI suffixes and their multipliers.
const SI_PREFIXES: &[(char, f64)] = &[
    ('n', 1e-9),
    ('u', 1e-6),
    ('µ', 1e-6),
    ('m', 1e-3),
    ('k', 1e3),
    ('M', 1e6),
    ('G', 1e9),
];

/// Parse a number with an optional single-character SI suffix.
///
/// # Errors
///
/// Returns [`ValidationError::Field`] if the text is empty or not a finite
/// number after the suffix is removed.
pub fn parse_si(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let invalid = || ValidationError::Field {
        field: "value".into(),
        message: format!("'{}' is not a number", text),
    };

    let last = trimmed.chars().last().ok_or_else(invalid)?;
    let (number, multiplier) = match SI_PREFIXES.iter().find(|(c, _)| *c == last) {
        Some((c, m)) => (&trimmed[..trimmed.len() - c.len_utf8()], *m),
        None => (trimmed, 1.0),
    };

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid().into());
    }
    Ok(value * multiplier)
}

/// Anything that can be turned into an event duration.
pub trait IntoDuration {
    /// Convert to a duration in base units.
    fn into_duration(self) -> Result<f64>;
}

impl IntoDuration for f64 {
    fn into_duration(self) -> Result<f64> {
        check_duration(self, &self.to_string())
    }
}

impl IntoDuration for &str {
    fn into_duration(self) -> Result<f64> {
        let value = parse_si(self)
            .map_err(|_| ValidationError::Duration(format!("'{}' is not a number", self)))?;
        check_duration(value, self)
    }
}

impl IntoDuration for String {
    fn into_duration(self) -> Result<f64> {
        self.as_str().into_duration()
    }
}

impl IntoDuration for &String {
    fn into_duration(self) -> Result<f64> {
        self.as_str().into_duration()
    }
}

fn check_duration(value: f64, raw: &str) -> Result<f64> {
    if !value.is_finite() {
        return Err(ValidationError::Duration(format!("'{}' is not a finite number", raw)).into());
    }
    if value < 0.0 {
        return Err(ValidationError::Duration(format!("'{}' is negative", raw)).into());
    }
    Ok(value)
}
