// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! A fixed-duration slot in a pulse sequence.

use tracing::{debug, warn};

use super::document::{DurationField, EventDocument, ParameterDocument};
use crate::error::{LookupError, Result};
use crate::options::PulseOption;
use crate::parameters::{Parameter, ParameterCatalog};
use crate::units::IntoDuration;

/// An event: a name, a non-negative duration and one parameter per catalog
/// entry.
///
/// The catalog is only consulted while constructing; an event keeps no
/// link to the sequence that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    name: String,
    duration: f64,
    parameters: Vec<Parameter>,
}

impl Event {
    /// Create an event with default parameters for every catalog entry.
    ///
    /// # Errors
    ///
    /// Fails if the duration is negative or not a number.
    pub fn new(
        name: &str,
        duration: impl IntoDuration,
        catalog: &ParameterCatalog,
    ) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            duration: duration.into_duration()?,
            parameters: catalog.instantiate()?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Duration in base units.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Assign a new duration. The previous value is kept on failure.
    pub fn set_duration(&mut self, duration: impl IntoDuration) -> Result<()> {
        let duration = duration.into_duration()?;
        debug!(event = %self.name, duration, "Duration changed");
        self.duration = duration;
        Ok(())
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Result<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| LookupError::Parameter(name.to_string()).into())
    }

    pub fn parameter_mut(&mut self, name: &str) -> Result<&mut Parameter> {
        self.parameters
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| LookupError::Parameter(name.to_string()).into())
    }

    /// Option `option` of parameter `parameter`.
    pub fn option_mut(&mut self, parameter: &str, option: &str) -> Result<&mut PulseOption> {
        self.parameter_mut(parameter)?.option_mut(option)
    }

    pub(crate) fn to_document(&self) -> EventDocument {
        EventDocument {
            name: self.name.clone(),
            duration: DurationField::Number(self.duration),
            parameters: self
                .parameters
                .iter()
                .map(|p| ParameterDocument {
                    name: p.name().to_string(),
                    value: p.options().iter().map(PulseOption::to_document).collect(),
                })
                .collect(),
        }
    }

    /// Rebuild an event from its document.
    ///
    /// Parameters named in both the document and the catalog take the
    /// decoded options. Catalog parameters missing from the document keep
    /// their defaults; document parameters unknown to the catalog are
    /// skipped, since a file may come from a different spectrometer.
    pub(crate) fn from_document(doc: &EventDocument, catalog: &ParameterCatalog) -> Result<Self> {
        let mut event = Event::new(&doc.name, doc.duration.resolve()?, catalog)?;
        for param_doc in &doc.parameters {
            if !catalog.contains(&param_doc.name) {
                warn!(
                    event = %doc.name,
                    parameter = %param_doc.name,
                    "Parameter not in active catalog, ignoring"
                );
                continue;
            }
            let options = param_doc
                .value
                .iter()
                .map(PulseOption::from_document)
                .collect::<Result<Vec<_>>>()?;
            event.parameter_mut(&param_doc.name)?.replace_options(options)?;
        }
        debug!(event = %event.name, parameters = event.parameters.len(), "Decoded event");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{tx, ParameterKind, RX_READOUT, TX_PULSE};
    use serde_json::json;

    fn catalog() -> ParameterCatalog {
        ParameterCatalog::standard()
    }

    // =========================================================================
    // Construction and duration
    // =========================================================================

    #[test]
    fn test_new_builds_parameter_per_catalog_entry() {
        let event = Event::new("tx", 10.0, &catalog()).unwrap();
        let names: Vec<&str> = event.parameters().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec![TX_PULSE, RX_READOUT]);
    }

    #[test]
    fn test_events_do_not_share_parameters() {
        let mut a = Event::new("a", 1.0, &catalog()).unwrap();
        let b = Event::new("b", 1.0, &catalog()).unwrap();
        a.option_mut(TX_PULSE, tx::RELATIVE_AMPLITUDE)
            .unwrap()
            .overwrite(80.0)
            .unwrap();
        assert_eq!(
            tx::amplitude(b.parameter(TX_PULSE).unwrap()).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_new_rejects_bad_duration() {
        assert!(Event::new("tx", "-1", &catalog()).is_err());
        assert!(Event::new("tx", "abc", &catalog()).is_err());
    }

    #[test]
    fn test_set_duration_text() {
        let mut event = Event::new("tx", 1.0, &catalog()).unwrap();
        event.set_duration("10").unwrap();
        assert_eq!(event.duration(), 10.0);
    }

    #[test]
    fn test_failed_set_duration_keeps_previous() {
        let mut event = Event::new("tx", 5.0, &catalog()).unwrap();
        assert!(event.set_duration("-1").is_err());
        assert!(event.set_duration("abc").is_err());
        assert!(event.set_duration(f64::NAN).is_err());
        assert_eq!(event.duration(), 5.0);
    }

    #[test]
    fn test_parameter_lookup_missing() {
        let event = Event::new("tx", 1.0, &catalog()).unwrap();
        assert!(matches!(
            event.parameter("Gate").unwrap_err(),
            crate::Error::Lookup(LookupError::Parameter(_))
        ));
    }

    // =========================================================================
    // Documents
    // =========================================================================

    #[test]
    fn test_to_document_lists_options() {
        let event = Event::new("tx", 2.0, &catalog()).unwrap();
        let doc = event.to_document();
        assert_eq!(doc.parameters.len(), 2);
        assert_eq!(doc.parameters[0].value.len(), 5);
        assert_eq!(doc.duration, DurationField::Number(2.0));
    }

    #[test]
    fn test_from_document_ignores_unknown_parameters() {
        let doc: EventDocument = serde_json::from_value(json!({
            "name": "tx",
            "duration": 1.0,
            "parameters": [
                {"name": "Gate", "value": [
                    {"name": "Gate State", "value": true, "class": "BooleanOption"}
                ]}
            ]
        }))
        .unwrap();
        let event = Event::from_document(&doc, &catalog()).unwrap();
        assert!(event.parameter("Gate").is_err());
        assert_eq!(event.parameters().len(), 2);
    }

    #[test]
    fn test_from_document_keeps_defaults_for_absent() {
        let doc: EventDocument = serde_json::from_value(json!({
            "name": "rx",
            "duration": 1.0,
            "parameters": [
                {"name": "RXParameters", "value": [
                    {"name": "Enable RX Readout", "value": true, "class": "BooleanOption"}
                ]}
            ]
        }))
        .unwrap();
        let event = Event::from_document(&doc, &catalog()).unwrap();
        let rx = event.parameter(RX_READOUT).unwrap();
        assert_eq!(rx.options().len(), 1);
        assert_eq!(rx.options()[0].as_bool(), Some(true));
        assert_eq!(event.parameter(TX_PULSE).unwrap().options().len(), 5);
    }

    #[test]
    fn test_from_document_other_catalog() {
        let gate_catalog = ParameterCatalog::new().with("Gate", ParameterKind::Gate);
        let doc = Event::new("tx", 1.0, &catalog()).unwrap().to_document();
        let event = Event::from_document(&doc, &gate_catalog).unwrap();
        assert_eq!(event.parameters().len(), 1);
        assert_eq!(event.parameters()[0].name(), "Gate");
    }
}
