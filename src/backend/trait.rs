// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Spectrometer trait definition.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::parameters::ParameterCatalog;
use crate::phase_table::PhaseTable;
use crate::sequence::Sequence;

/// Type of spectrometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Hardware-independent description only
    Generic,
    /// Simulated instrument
    Simulator,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Generic => write!(f, "generic"),
            BackendType::Simulator => write!(f, "simulator"),
        }
    }
}

/// Data returned by a sequence run.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Name of the sequence that produced the data
    pub sequence: String,
    /// One scan per phase-table row
    pub scans: usize,
    /// Averages per scan
    pub averages: u32,
    /// Carrier frequency in Hz
    pub frequency: f64,
    /// Complex samples as (real, imag) pairs
    pub samples: Vec<(f64, f64)>,
}

/// A concrete spectrometer.
///
/// Only the name, type and parameter catalog are required. Capabilities a
/// backend does not provide return [`Error::Unsupported`].
pub trait Spectrometer: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Parameters every event of this backend carries.
    fn catalog(&self) -> ParameterCatalog;

    /// Empty sequence over this backend's catalog.
    fn new_sequence(&self, name: &str) -> Sequence {
        Sequence::new(name, None, self.catalog())
    }

    /// Load a sequence document with this backend's catalog.
    fn load_sequence(&self, doc: &Value) -> Result<Sequence> {
        Sequence::decode(doc, self.catalog())
    }

    /// Phase table the backend would step through for `sequence`.
    fn phase_table(&self, sequence: &Sequence) -> Result<PhaseTable> {
        PhaseTable::new(sequence)
    }

    /// Execute a sequence and return the acquired data.
    fn run_sequence(&self, _sequence: &Sequence) -> Result<Measurement> {
        Err(Error::Unsupported(format!(
            "{} cannot run sequences",
            self.name()
        )))
    }

    /// Set the carrier frequency in Hz.
    fn set_frequency(&self, _frequency: f64) -> Result<()> {
        Err(Error::Unsupported(format!(
            "{} cannot set the frequency",
            self.name()
        )))
    }

    /// Set the number of averages per scan.
    fn set_averages(&self, _averages: u32) -> Result<()> {
        Err(Error::Unsupported(format!(
            "{} cannot set averages",
            self.name()
        )))
    }
}

/// Backend-independent spectrometer over the standard catalog.
///
/// Builds, validates and persists sequences but cannot run them.
#[derive(Debug, Clone)]
pub struct GenericSpectrometer {
    name: String,
}

impl GenericSpectrometer {
    /// Registry name of the built-in backend.
    pub const NAME: &'static str = "generic";

    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Default for GenericSpectrometer {
    fn default() -> Self {
        Self::new(Self::NAME)
    }
}

impl Spectrometer for GenericSpectrometer {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Generic
    }

    fn catalog(&self) -> ParameterCatalog {
        ParameterCatalog::standard()
    }
}
