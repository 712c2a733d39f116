// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities.

use parking_lot::Mutex;

use crate::backend::{BackendType, Measurement, Spectrometer};
use crate::error::Result;
use crate::functions::Function;
use crate::parameters::ParameterCatalog;
use crate::phase_table::PhaseTable;
use crate::sequence::{Sequence, StandardSequence};

/// Mock spectrometer that accepts settings and returns one sample per scan.
pub struct MockSpectrometer {
    pub name: String,
    frequency: Mutex<f64>,
    averages: Mutex<u32>,
}

impl MockSpectrometer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            frequency: Mutex::new(0.0),
            averages: Mutex::new(1),
        }
    }
}

impl Spectrometer for MockSpectrometer {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Simulator
    }

    fn catalog(&self) -> ParameterCatalog {
        ParameterCatalog::standard()
    }

    fn run_sequence(&self, sequence: &Sequence) -> Result<Measurement> {
        let table = PhaseTable::new(sequence)?;
        // Receiver phase of each scan is the sum of its pulse phases
        let samples = table
            .matrix()
            .rows()
            .into_iter()
            .map(|row| {
                let phase = row.sum().to_radians();
                (phase.cos(), phase.sin())
            })
            .collect();
        Ok(Measurement {
            sequence: sequence.name().to_string(),
            scans: table.n_rows(),
            averages: *self.averages.lock(),
            frequency: *self.frequency.lock(),
            samples,
        })
    }

    fn set_frequency(&self, frequency: f64) -> Result<()> {
        *self.frequency.lock() = frequency;
        Ok(())
    }

    fn set_averages(&self, averages: u32) -> Result<()> {
        *self.averages.lock() = averages;
        Ok(())
    }
}

/// Hahn echo: 90° pulse, delay, 180° pulse, delay, readout.
pub fn spin_echo() -> StandardSequence {
    let mut seq = StandardSequence::new("spin echo", None);
    seq.add_pulse_event("pi/2", "10u", 100.0, 0.0, Function::rect())
        .unwrap();
    seq.add_blank_event("tau", "100u").unwrap();
    seq.add_pulse_event("pi", "20u", 100.0, 90.0, Function::rect())
        .unwrap();
    seq.add_blank_event("tau2", "100u").unwrap();
    seq.add_readout_event("rx", "1m").unwrap();
    seq
}

/// Two pulses in separate groups with 2 and 3 phase cycles (6 scans).
pub fn two_group_sequence() -> Sequence {
    let mut seq = StandardSequence::new("two groups", None);
    seq.add_pulse_event("a", "10u", 100.0, 0.0, Function::rect())
        .unwrap();
    seq.add_blank_event("tau", "1m").unwrap();
    seq.add_pulse_event("b", "10u", 100.0, 0.0, Function::rect())
        .unwrap();
    seq.set_tx_n_phase_cycles("a", 2).unwrap();
    seq.set_tx_n_phase_cycles("b", 3).unwrap();
    seq.set_tx_phase_cycle_group("b", 1).unwrap();
    seq.add_readout_event("rx", "1m").unwrap();
    seq.into_inner()
}
