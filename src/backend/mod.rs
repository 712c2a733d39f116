// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Spectrometer backends.
//!
//! This module provides the [`Spectrometer`] trait, the built-in
//! [`GenericSpectrometer`] and the [`SpectrometerRegistry`] that tracks the
//! active backend.

pub mod registry;
pub mod r#trait;

pub use r#trait::{BackendType, GenericSpectrometer, Measurement, Spectrometer};
pub use registry::SpectrometerRegistry;
