// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Digital gate parameter.

use super::{Parameter, ParameterKind};
use crate::error::Result;
use crate::options::PulseOption;

pub const GATE_STATE: &str = "Gate State";

/// Build a gate parameter, initially closed.
pub fn build(name: &str) -> Result<Parameter> {
    let mut p = Parameter::new(name, ParameterKind::Gate);
    p.add_option(PulseOption::boolean(GATE_STATE, false))?;
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_defaults_closed() {
        let p = build("Gate").unwrap();
        assert_eq!(p.option(GATE_STATE).unwrap().as_bool(), Some(false));
    }
}
