// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! QubitOS magnetic-resonance pulse sequences
//!
//! This crate describes pulse sequences independently of the spectrometer
//! that will run them, persists them as versioned JSON documents and
//! derives their phase-cycling tables.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       Sequence  ──►  PhaseTable         │
//! ├─────────────────────────────────────────┤
//! │   Event ─► Parameter ─► PulseOption     │
//! ├──────────────────┬──────────────────────┤
//! │ ParameterCatalog │ Spectrometer registry│
//! └──────────────────┴──────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`options`]: typed option values and their document codec
//! - [`parameters`]: parameters, the TX/RX/gate builders and the catalog
//! - [`sequence`]: events, sequences and persistence
//! - [`phase_table`]: phase-cycling table derivation
//! - [`backend`]: spectrometer trait and registry
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod backend;
pub mod config;
pub mod error;
pub mod functions;
pub mod options;
pub mod parameters;
pub mod phase_table;
pub mod sequence;
pub mod units;

pub use config::Config;
pub use error::{Error, LookupError, Result, ValidationError};
pub use phase_table::{ParameterRef, PhaseTable};
pub use sequence::{Event, Sequence, StandardSequence};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
