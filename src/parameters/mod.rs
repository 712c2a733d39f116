// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pulse parameters and the catalog that instantiates them.
//!
//! A [`Parameter`] is an ordered, name-unique list of options. Every event
//! carries one parameter per [`ParameterCatalog`] entry; the catalog is
//! supplied by the active spectrometer and maps a logical name to a
//! [`ParameterKind`].

pub mod gate;
pub mod rx;
pub mod tx;

use crate::error::{LookupError, Result, ValidationError};
use crate::options::PulseOption;

/// Catalog name of the transmit parameter in the standard catalog.
pub const TX_PULSE: &str = "TXParameters";
/// Catalog name of the receive parameter in the standard catalog.
pub const RX_READOUT: &str = "RXParameters";

/// Kinds of parameter a catalog can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Transmit pulse: amplitude, phase, phase cycling, shape
    TxPulse,
    /// Receiver: enable flag and readout scheme
    RxReadout,
    /// Digital gate line
    Gate,
}

impl ParameterKind {
    /// Build a parameter of this kind with default options.
    pub fn build(self, name: &str) -> Result<Parameter> {
        match self {
            ParameterKind::TxPulse => tx::build(name),
            ParameterKind::RxReadout => rx::build(name),
            ParameterKind::Gate => gate::build(name),
        }
    }
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterKind::TxPulse => write!(f, "tx-pulse"),
            ParameterKind::RxReadout => write!(f, "rx-readout"),
            ParameterKind::Gate => write!(f, "gate"),
        }
    }
}

/// A named, ordered set of options.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    kind: ParameterKind,
    options: Vec<PulseOption>,
}

impl Parameter {
    /// Empty parameter.
    pub fn new(name: &str, kind: ParameterKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            options: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn options(&self) -> &[PulseOption] {
        &self.options
    }

    /// Append an option.
    ///
    /// # Errors
    ///
    /// Fails if an option with the same name is already present.
    pub fn add_option(&mut self, option: PulseOption) -> Result<()> {
        if self.options.iter().any(|o| o.name == option.name) {
            return Err(ValidationError::Field {
                field: option.name,
                message: format!("option already exists on parameter '{}'", self.name),
            }
            .into());
        }
        self.options.push(option);
        Ok(())
    }

    /// Replace all options at once. Nothing changes if the new list
    /// repeats a name.
    pub fn replace_options(&mut self, options: Vec<PulseOption>) -> Result<()> {
        let mut fresh = Parameter::new(&self.name, self.kind);
        for option in options {
            fresh.add_option(option)?;
        }
        self.options = fresh.options;
        Ok(())
    }

    /// Option with the given name.
    pub fn option(&self, name: &str) -> Result<&PulseOption> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| self.missing(name))
    }

    /// Mutable option with the given name.
    pub fn option_mut(&mut self, name: &str) -> Result<&mut PulseOption> {
        let missing = self.missing(name);
        self.options
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or(missing)
    }

    /// Value of a numeric option.
    pub fn number(&self, name: &str) -> Result<f64> {
        let option = self.option(name)?;
        option.as_number().ok_or_else(|| {
            ValidationError::Field {
                field: name.to_string(),
                message: format!(
                    "expected a numeric option on '{}', found {}",
                    self.name,
                    option.kind.class_name()
                ),
            }
            .into()
        })
    }

    fn missing(&self, option: &str) -> crate::error::Error {
        LookupError::Option {
            parameter: self.name.clone(),
            option: option.to_string(),
        }
        .into()
    }
}

/// Logical parameter name to parameter kind, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterCatalog {
    entries: Vec<(String, ParameterKind)>,
}

impl ParameterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The backend-agnostic catalog: one TX pulse and one RX readout.
    pub fn standard() -> Self {
        Self::new()
            .with(TX_PULSE, ParameterKind::TxPulse)
            .with(RX_READOUT, ParameterKind::RxReadout)
    }

    /// Builder form of [`insert`](ParameterCatalog::insert).
    pub fn with(mut self, name: &str, kind: ParameterKind) -> Self {
        self.insert(name, kind);
        self
    }

    /// Register a parameter kind. An existing entry keeps its position and
    /// takes the new kind.
    pub fn insert(&mut self, name: &str, kind: ParameterKind) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = kind,
            None => self.entries.push((name.to_string(), kind)),
        }
    }

    pub fn get(&self, name: &str) -> Option<ParameterKind> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, k)| *k)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParameterKind)> {
        self.entries.iter().map(|(n, k)| (n.as_str(), *k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fresh parameters with default options, one per entry.
    pub fn instantiate(&self) -> Result<Vec<Parameter>> {
        self.iter().map(|(name, kind)| kind.build(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::NumericOption;

    // =========================================================================
    // Parameter
    // =========================================================================

    #[test]
    fn test_add_option_rejects_duplicate() {
        let mut p = Parameter::new("custom", ParameterKind::Gate);
        p.add_option(PulseOption::boolean("a", false)).unwrap();
        let err = p.add_option(PulseOption::boolean("a", true)).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(p.options().len(), 1);
    }

    #[test]
    fn test_option_lookup_not_found() {
        let p = Parameter::new("custom", ParameterKind::Gate);
        let err = p.option("missing").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Lookup(LookupError::Option { .. })
        ));
    }

    #[test]
    fn test_replace_options_is_atomic() {
        let mut p = Parameter::new("custom", ParameterKind::Gate);
        p.add_option(PulseOption::boolean("keep", true)).unwrap();
        let dup = vec![
            PulseOption::boolean("x", true),
            PulseOption::boolean("x", false),
        ];
        assert!(p.replace_options(dup).is_err());
        assert_eq!(p.options().len(), 1);
        assert_eq!(p.options()[0].name, "keep");
    }

    #[test]
    fn test_number_requires_numeric() {
        let mut p = Parameter::new("custom", ParameterKind::Gate);
        p.add_option(PulseOption::boolean("flag", true)).unwrap();
        p.add_option(PulseOption::numeric("n", NumericOption::float(3.0)))
            .unwrap();
        assert_eq!(p.number("n").unwrap(), 3.0);
        assert!(p.number("flag").is_err());
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    #[test]
    fn test_standard_catalog() {
        let catalog = ParameterCatalog::standard();
        let names: Vec<&str> = catalog.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec![TX_PULSE, RX_READOUT]);
        assert_eq!(catalog.get(TX_PULSE), Some(ParameterKind::TxPulse));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut catalog = ParameterCatalog::standard();
        catalog.insert(TX_PULSE, ParameterKind::Gate);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(TX_PULSE), Some(ParameterKind::Gate));
        assert_eq!(catalog.iter().next().unwrap().0, TX_PULSE);
    }

    #[test]
    fn test_instantiate_builds_defaults() {
        let params = ParameterCatalog::standard()
            .with("Gate", ParameterKind::Gate)
            .instantiate()
            .unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].kind(), ParameterKind::TxPulse);
        assert_eq!(params[0].options().len(), 5);
        assert_eq!(params[1].options().len(), 2);
        assert_eq!(params[2].name(), "Gate");
    }
}
