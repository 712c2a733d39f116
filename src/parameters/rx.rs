// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Receiver readout parameter.

use serde_json::json;

use super::{Parameter, ParameterKind};
use crate::error::Result;
use crate::options::PulseOption;

pub const RX: &str = "Enable RX Readout";
pub const READOUT_SCHEME: &str = "Readout Scheme";

/// Build an RX readout parameter: disabled, with a single `[+1, 0°]` row.
pub fn build(name: &str) -> Result<Parameter> {
    let mut p = Parameter::new(name, ParameterKind::RxReadout);
    p.add_option(PulseOption::boolean(RX, false))?;
    p.add_option(PulseOption::table(READOUT_SCHEME, json!([[1, 0]])))?;
    Ok(p)
}

/// Whether the receiver is enabled.
pub fn is_enabled(parameter: &Parameter) -> Result<bool> {
    let option = parameter.option(RX)?;
    Ok(option.as_bool().unwrap_or(false))
}
