// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Transmit pulse parameter.
//!
//! Options, in order: relative amplitude (%), phase (degrees), number of
//! phase cycles, phase-cycle group and pulse shape.

use serde_json::{json, Value};

use super::{Parameter, ParameterKind};
use crate::error::{Result, ValidationError};
use crate::functions::Function;
use crate::options::{NumericOption, PulseOption};

pub const RELATIVE_AMPLITUDE: &str = "Relative TX Amplitude (%)";
pub const TX_PHASE: &str = "TX Phase";
pub const N_PHASE_CYCLES: &str = "Number of Phase Cycles";
pub const PHASE_CYCLE_GROUP: &str = "Phase Cycle Group";
pub const TX_PULSE_SHAPE: &str = "TX Pulse Shape";

/// Largest phase-cycle count a TX pulse accepts.
pub const MAX_PHASE_CYCLES: i64 = 360;
/// Largest phase-cycle group id a TX pulse accepts.
pub const MAX_PHASE_CYCLE_GROUP: i64 = 10;

/// Build a TX pulse parameter with default options.
pub fn build(name: &str) -> Result<Parameter> {
    let mut p = Parameter::new(name, ParameterKind::TxPulse);
    p.add_option(PulseOption::numeric(
        RELATIVE_AMPLITUDE,
        NumericOption::integer(0, 0, 100).with_slider(true),
    ))?;
    p.add_option(PulseOption::numeric(TX_PHASE, NumericOption::float(0.0)))?;
    p.add_option(PulseOption::numeric(
        N_PHASE_CYCLES,
        NumericOption::integer(1, 1, MAX_PHASE_CYCLES),
    ))?;
    p.add_option(PulseOption::numeric(
        PHASE_CYCLE_GROUP,
        NumericOption::integer(0, 0, MAX_PHASE_CYCLE_GROUP),
    ))?;
    p.add_option(PulseOption::function(TX_PULSE_SHAPE, Function::pulse_shapes())?)?;
    Ok(p)
}

/// `count` phases evenly spaced over a full turn, starting at `phase`.
///
/// `value[i] = (phase + i * 360 / count) mod 360`, always in `[0, 360)`.
pub fn get_phases(count: usize, phase: f64) -> Vec<f64> {
    (0..count)
        .map(|i| (phase + i as f64 * 360.0 / count as f64).rem_euclid(360.0))
        .collect()
}

fn phase_cycle_error(parameter: &Parameter, msg: String) -> crate::error::Error {
    ValidationError::PhaseCycle(format!("parameter '{}': {}", parameter.name(), msg)).into()
}

/// Declared phase-cycle count, checked to be an integer in `[1, max]`.
///
/// `max` is the option's upper bound, capped at [`MAX_PHASE_CYCLES`].
pub fn phase_cycle_count(parameter: &Parameter) -> Result<usize> {
    let raw = parameter.number(N_PHASE_CYCLES)?;
    let max = parameter
        .option(N_PHASE_CYCLES)?
        .as_numeric()
        .and_then(|n| n.max)
        .map_or(MAX_PHASE_CYCLES as f64, |m| m.min(MAX_PHASE_CYCLES as f64));
    if !raw.is_finite() || raw.fract() != 0.0 || raw < 1.0 {
        return Err(phase_cycle_error(
            parameter,
            format!("'{}' must be an integer >= 1, got {}", N_PHASE_CYCLES, raw),
        ));
    }
    if raw > max {
        return Err(phase_cycle_error(
            parameter,
            format!("'{}' must be at most {}, got {}", N_PHASE_CYCLES, max, raw),
        ));
    }
    Ok(raw as usize)
}

/// Declared phase-cycle group id, checked to be a non-negative integer.
pub fn phase_cycle_group(parameter: &Parameter) -> Result<u32> {
    let raw = parameter.number(PHASE_CYCLE_GROUP)?;
    if !raw.is_finite() || raw.fract() != 0.0 || raw < 0.0 || raw > u32::MAX as f64 {
        return Err(phase_cycle_error(
            parameter,
            format!("'{}' must be a non-negative integer, got {}", PHASE_CYCLE_GROUP, raw),
        ));
    }
    Ok(raw as u32)
}

/// Phase sequence this pulse steps through while phase cycling.
pub fn phases(parameter: &Parameter) -> Result<Vec<f64>> {
    let count = phase_cycle_count(parameter)?;
    let phase = parameter.number(TX_PHASE)?;
    if !phase.is_finite() {
        return Err(phase_cycle_error(
            parameter,
            format!("'{}' must be finite, got {}", TX_PHASE, phase),
        ));
    }
    Ok(get_phases(count, phase))
}

/// Relative amplitude in percent.
pub fn amplitude(parameter: &Parameter) -> Result<f64> {
    parameter.number(RELATIVE_AMPLITUDE)
}

/// Readout scheme sized to this pulse's phase cycle.
///
/// One row per cycle, each `[sign, phase]` with a positive sign.
pub fn readout_scheme(parameter: &Parameter) -> Result<PulseOption> {
    let phases = phases(parameter)?;
    let rows: Vec<Value> = phases.iter().map(|p| json!([1, p])).collect();
    PulseOption::readout(
        crate::options::table::READOUT_OPTION,
        Value::Array(rows),
        phases.len(),
    )
}
