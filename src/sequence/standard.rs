// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Backend-agnostic sequence with TX/RX convenience setters.
//!
//! The plain setters overwrite option values after a type check only, so a
//! script may store an out-of-range amplitude and have it reported later by
//! [`Sequence::validate`]. The `_checked` setters refuse such values.

use std::ops::{Deref, DerefMut};

use serde_json::Value;

use super::{Event, Sequence};
use crate::error::Result;
use crate::functions::Function;
use crate::parameters::{rx, tx, ParameterCatalog, RX_READOUT, TX_PULSE};
use crate::units::IntoDuration;

/// A [`Sequence`] over [`ParameterCatalog::standard`].
#[derive(Debug, Clone, PartialEq)]
pub struct StandardSequence {
    sequence: Sequence,
}

impl StandardSequence {
    pub fn new(name: &str, version: Option<&str>) -> Self {
        Self {
            sequence: Sequence::new(name, version, ParameterCatalog::standard()),
        }
    }

    /// Load with the standard catalog.
    pub fn decode(doc: &Value) -> Result<Self> {
        Ok(Self {
            sequence: Sequence::decode(doc, ParameterCatalog::standard())?,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self {
            sequence: Sequence::from_json_str(text, ParameterCatalog::standard())?,
        })
    }

    pub fn into_inner(self) -> Sequence {
        self.sequence
    }

    // ---------------------------------------------------------------------
    // Event builders
    // ---------------------------------------------------------------------

    /// Event with default parameters (TX off, RX off).
    pub fn add_blank_event(
        &mut self,
        name: &str,
        duration: impl IntoDuration,
    ) -> Result<&mut Event> {
        self.sequence.create_event(name, duration)
    }

    /// Event carrying a TX pulse. The sequence is unchanged on failure.
    pub fn add_pulse_event(
        &mut self,
        name: &str,
        duration: impl IntoDuration,
        amplitude: f64,
        phase: f64,
        shape: Function,
    ) -> Result<&mut Event> {
        let mut event = Event::new(name, duration, self.sequence.catalog())?;
        let p = event.parameter_mut(TX_PULSE)?;
        p.option_mut(tx::RELATIVE_AMPLITUDE)?.overwrite(amplitude)?;
        p.option_mut(tx::TX_PHASE)?.overwrite(phase)?;
        p.option_mut(tx::TX_PULSE_SHAPE)?.overwrite(shape)?;
        self.sequence.add_event(event)
    }

    /// Event with the receiver enabled.
    pub fn add_readout_event(
        &mut self,
        name: &str,
        duration: impl IntoDuration,
    ) -> Result<&mut Event> {
        let mut event = Event::new(name, duration, self.sequence.catalog())?;
        event.option_mut(RX_READOUT, rx::RX)?.overwrite(true)?;
        self.sequence.add_event(event)
    }

    // ---------------------------------------------------------------------
    // Setters
    // ---------------------------------------------------------------------

    pub fn set_tx_amplitude(&mut self, event: &str, amplitude: f64) -> Result<()> {
        self.tx_option(event, tx::RELATIVE_AMPLITUDE, amplitude)
    }

    pub fn set_tx_phase(&mut self, event: &str, phase: f64) -> Result<()> {
        self.tx_option(event, tx::TX_PHASE, phase)
    }

    pub fn set_tx_n_phase_cycles(&mut self, event: &str, count: usize) -> Result<()> {
        self.tx_option(event, tx::N_PHASE_CYCLES, count as f64)
    }

    pub fn set_tx_phase_cycle_group(&mut self, event: &str, group: u32) -> Result<()> {
        self.tx_option(event, tx::PHASE_CYCLE_GROUP, f64::from(group))
    }

    pub fn set_tx_shape(&mut self, event: &str, shape: Function) -> Result<()> {
        self.sequence
            .event_mut(event)?
            .option_mut(TX_PULSE, tx::TX_PULSE_SHAPE)?
            .overwrite(shape)
    }

    pub fn set_rx(&mut self, event: &str, enabled: bool) -> Result<()> {
        self.sequence
            .event_mut(event)?
            .option_mut(RX_READOUT, rx::RX)?
            .overwrite(enabled)
    }

    /// Like [`set_tx_amplitude`](Self::set_tx_amplitude) but the value must
    /// lie within the option's bounds.
    pub fn set_tx_amplitude_checked(&mut self, event: &str, amplitude: f64) -> Result<()> {
        self.sequence
            .event_mut(event)?
            .option_mut(TX_PULSE, tx::RELATIVE_AMPLITUDE)?
            .try_set_value(amplitude)
    }

    pub fn set_tx_phase_checked(&mut self, event: &str, phase: f64) -> Result<()> {
        self.sequence
            .event_mut(event)?
            .option_mut(TX_PULSE, tx::TX_PHASE)?
            .try_set_value(phase)
    }

    fn tx_option(&mut self, event: &str, option: &str, value: f64) -> Result<()> {
        self.sequence
            .event_mut(event)?
            .option_mut(TX_PULSE, option)?
            .overwrite(value)
    }
}

impl Deref for StandardSequence {
    type Target = Sequence;

    fn deref(&self) -> &Sequence {
        &self.sequence
    }
}

impl DerefMut for StandardSequence {
    fn deref_mut(&mut self) -> &mut Sequence {
        &mut self.sequence
    }
}

impl From<StandardSequence> for Sequence {
    fn from(s: StandardSequence) -> Self {
        s.sequence
    }
}
