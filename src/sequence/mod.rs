// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pulse sequences.
//!
//! A [`Sequence`] is an ordered list of uniquely named [`Event`]s plus the
//! [`ParameterCatalog`] used to populate them. [`StandardSequence`] fixes
//! the catalog to the backend-agnostic TX/RX pair and adds convenience
//! setters.
//!
//! Sequences persist as a JSON document (see [`document`]); loading
//! requires a `version` field.

pub mod document;
pub mod event;
pub mod standard;
pub mod variables;

pub use document::{DurationField, EventDocument, ParameterDocument, SequenceDocument};
pub use event::Event;
pub use standard::StandardSequence;
pub use variables::{Variable, VariableGroup};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, LookupError, Result, ValidationError};
use crate::parameters::ParameterCatalog;
use crate::phase_table::PhaseTable;
use crate::units::IntoDuration;

/// An ordered collection of events sharing one parameter catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    name: String,
    version: String,
    events: Vec<Event>,
    catalog: ParameterCatalog,
    variable_groups: Vec<VariableGroup>,
}

impl Sequence {
    /// Empty sequence. `version` defaults to the library version.
    pub fn new(name: &str, version: Option<&str>, catalog: ParameterCatalog) -> Self {
        Self {
            name: name.to_string(),
            version: version.unwrap_or(crate::VERSION).to_string(),
            events: Vec::new(),
            catalog,
            variable_groups: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Event names in order.
    pub fn event_names(&self) -> Vec<&str> {
        self.events.iter().map(Event::name).collect()
    }

    pub fn event(&self, name: &str) -> Result<&Event> {
        self.events
            .iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| LookupError::Event(name.to_string()).into())
    }

    pub fn event_mut(&mut self, name: &str) -> Result<&mut Event> {
        self.events
            .iter_mut()
            .find(|e| e.name() == name)
            .ok_or_else(|| LookupError::Event(name.to_string()).into())
    }

    /// Append an event.
    ///
    /// # Errors
    ///
    /// [`ValidationError::DuplicateEvent`] if the name is taken; the
    /// sequence is left unchanged.
    pub fn add_event(&mut self, event: Event) -> Result<&mut Event> {
        if self.events.iter().any(|e| e.name() == event.name()) {
            return Err(ValidationError::DuplicateEvent(event.name().to_string()).into());
        }
        debug!(sequence = %self.name, event = %event.name(), "Adding event");
        self.events.push(event);
        let last = self.events.len() - 1;
        Ok(&mut self.events[last])
    }

    /// Build an event from this sequence's catalog and append it.
    pub fn create_event(&mut self, name: &str, duration: impl IntoDuration) -> Result<&mut Event> {
        let event = Event::new(name, duration, &self.catalog)?;
        self.add_event(event)
    }

    /// Remove the first event with this name. Unknown names are a no-op.
    pub fn delete_event(&mut self, name: &str) -> Option<Event> {
        let index = self.events.iter().position(|e| e.name() == name)?;
        debug!(sequence = %self.name, event = %name, "Deleting event");
        Some(self.events.remove(index))
    }

    /// Sum of event durations.
    pub fn total_duration(&self) -> f64 {
        self.events.iter().map(Event::duration).sum()
    }

    // ---------------------------------------------------------------------
    // Variables
    // ---------------------------------------------------------------------

    pub fn variable_groups(&self) -> &[VariableGroup] {
        &self.variable_groups
    }

    /// Register a variable group. Group names are unique.
    pub fn add_variable_group(&mut self, group: VariableGroup) -> Result<()> {
        if self.variable_groups.iter().any(|g| g.name() == group.name()) {
            return Err(ValidationError::Field {
                field: group.name().to_string(),
                message: format!("variable group already exists in sequence '{}'", self.name),
            }
            .into());
        }
        self.variable_groups.push(group);
        Ok(())
    }

    /// Number of sweep steps. Groups nest; an empty group counts once.
    pub fn sweep_len(&self) -> usize {
        self.variable_groups
            .iter()
            .map(|g| g.len().max(1))
            .product()
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    pub fn to_document(&self) -> SequenceDocument {
        SequenceDocument {
            name: self.name.clone(),
            version: Some(self.version.clone()),
            events: self.events.iter().map(Event::to_document).collect(),
        }
    }

    /// Encode as a JSON value.
    pub fn encode(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_document())?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Rebuild a sequence from its document using `catalog`.
    ///
    /// # Errors
    ///
    /// - [`Error::Versioning`] if the document has no `version`
    /// - [`Error::Serialization`] on malformed structure or options
    /// - [`ValidationError`] on a bad duration or repeated event name
    pub fn decode(doc: &Value, catalog: ParameterCatalog) -> Result<Self> {
        if doc.get("version").map_or(true, Value::is_null) {
            return Err(Error::Versioning(
                "sequence document has no version; it predates versioned files".into(),
            ));
        }
        let parsed: SequenceDocument = serde_json::from_value(doc.clone())?;
        Self::from_document(&parsed, catalog)
    }

    pub fn from_document(doc: &SequenceDocument, catalog: ParameterCatalog) -> Result<Self> {
        let version = doc
            .version
            .as_deref()
            .ok_or_else(|| Error::Versioning("sequence document has no version".into()))?;
        let mut sequence = Sequence::new(&doc.name, Some(version), catalog);
        for event_doc in &doc.events {
            let event = Event::from_document(event_doc, &sequence.catalog)?;
            sequence.add_event(event)?;
        }
        info!(
            sequence = %sequence.name,
            version = %sequence.version,
            events = sequence.events.len(),
            "Loaded sequence"
        );
        Ok(sequence)
    }

    pub fn from_json_str(text: &str, catalog: ParameterCatalog) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::decode(&value, catalog)
    }

    // ---------------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------------

    /// Full validation of the sequence.
    ///
    /// Returns a list of issues. Empty means all valid.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for event in &self.events {
            for (name, _) in self.catalog.iter() {
                if event.parameter(name).is_err() {
                    issues.push(format!(
                        "CATALOG: Event '{}' is missing parameter '{}'",
                        event.name(),
                        name
                    ));
                }
            }
            for parameter in event.parameters() {
                if !self.catalog.contains(parameter.name()) {
                    issues.push(format!(
                        "CATALOG: Event '{}' has parameter '{}' not in catalog",
                        event.name(),
                        parameter.name()
                    ));
                }
                for option in parameter.options() {
                    if let Some(violation) = option.bounds_violation() {
                        issues.push(format!(
                            "RANGE: Event '{}', parameter '{}': {violation}",
                            event.name(),
                            parameter.name()
                        ));
                    }
                }
            }
        }

        if let Err(e) = PhaseTable::new(self) {
            issues.push(format!("PHASE: {e}"));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{tx, ParameterKind, TX_PULSE};
    use serde_json::json;

    fn sequence() -> Sequence {
        Sequence::new("fid", None, ParameterCatalog::standard())
    }

    // =========================================================================
    // Events
    // =========================================================================

    #[test]
    fn test_new_defaults_version() {
        let seq = sequence();
        assert_eq!(seq.version(), crate::VERSION);
        assert!(seq.events().is_empty());
        let seq = Sequence::new("fid", Some("0.0.1"), ParameterCatalog::standard());
        assert_eq!(seq.version(), "0.0.1");
    }

    #[test]
    fn test_create_event_appends_in_order() {
        let mut seq = sequence();
        seq.create_event("tx", "10u").unwrap();
        seq.create_event("d1", 1e-3).unwrap();
        assert_eq!(seq.event_names(), vec!["tx", "d1"]);
        assert_eq!(seq.event("tx").unwrap().parameters().len(), 2);
    }

    #[test]
    fn test_duplicate_event_leaves_sequence_unchanged() {
        let mut seq = sequence();
        seq.create_event("tx", 1.0).unwrap();
        let err = seq.create_event("tx", 2.0).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateEvent(_))
        ));
        assert_eq!(seq.events().len(), 1);
        assert_eq!(seq.event("tx").unwrap().duration(), 1.0);
    }

    #[test]
    fn test_create_event_bad_duration() {
        let mut seq = sequence();
        assert!(seq.create_event("tx", "-5").is_err());
        assert!(seq.events().is_empty());
    }

    #[test]
    fn test_delete_event() {
        let mut seq = sequence();
        seq.create_event("a", 1.0).unwrap();
        seq.create_event("b", 1.0).unwrap();
        assert!(seq.delete_event("a").is_some());
        assert!(seq.delete_event("zzz").is_none());
        assert_eq!(seq.event_names(), vec!["b"]);
    }

    #[test]
    fn test_event_lookup_missing() {
        let seq = sequence();
        assert!(matches!(
            seq.event("nope").unwrap_err(),
            Error::Lookup(LookupError::Event(_))
        ));
    }

    #[test]
    fn test_total_duration() {
        let mut seq = sequence();
        seq.create_event("a", 1.5).unwrap();
        seq.create_event("b", 2.5).unwrap();
        assert_eq!(seq.total_duration(), 4.0);
    }

    // =========================================================================
    // Variables
    // =========================================================================

    #[test]
    fn test_sweep_len_is_product() {
        let mut seq = sequence();
        assert_eq!(seq.sweep_len(), 1);

        let mut a = VariableGroup::new("a").unwrap();
        a.add_variable(Variable::new("x", vec![1.0, 2.0]).unwrap()).unwrap();
        let mut b = VariableGroup::new("b").unwrap();
        b.add_variable(Variable::new("y", vec![1.0, 2.0, 3.0]).unwrap()).unwrap();
        seq.add_variable_group(a).unwrap();
        seq.add_variable_group(b).unwrap();
        assert_eq!(seq.sweep_len(), 6);

        assert!(seq
            .add_variable_group(VariableGroup::new("a").unwrap())
            .is_err());
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    #[test]
    fn test_encode_shape() {
        let mut seq = sequence();
        seq.create_event("tx", 2.0).unwrap();
        let doc = seq.encode().unwrap();
        assert_eq!(doc["name"], "fid");
        assert_eq!(doc["version"], crate::VERSION);
        assert_eq!(doc["events"][0]["name"], "tx");
        assert_eq!(doc["events"][0]["duration"], json!(2.0));
        assert_eq!(doc["events"][0]["parameters"][0]["name"], TX_PULSE);
    }

    #[test]
    fn test_roundtrip_preserves_events() {
        let mut seq = sequence();
        seq.create_event("tx", "10u").unwrap();
        seq.create_event("rx", 3e-3).unwrap();
        seq.event_mut("tx")
            .unwrap()
            .option_mut(TX_PULSE, tx::RELATIVE_AMPLITUDE)
            .unwrap()
            .overwrite(60.0)
            .unwrap();

        let text = seq.to_json_string().unwrap();
        let back = Sequence::from_json_str(&text, ParameterCatalog::standard()).unwrap();
        assert_eq!(back, seq);
    }

    #[test]
    fn test_decode_without_version() {
        let doc = json!({"name": "fid", "events": []});
        let err = Sequence::decode(&doc, ParameterCatalog::standard()).unwrap_err();
        assert!(matches!(err, Error::Versioning(_)));
    }

    #[test]
    fn test_decode_rejects_repeated_event_names() {
        let doc = json!({
            "name": "fid", "version": "0.1.0",
            "events": [
                {"name": "tx", "duration": 1.0, "parameters": []},
                {"name": "tx", "duration": 2.0, "parameters": []}
            ]
        });
        assert!(Sequence::decode(&doc, ParameterCatalog::standard()).is_err());
    }

    #[test]
    fn test_decode_malformed_structure() {
        let doc = json!({"name": "fid", "version": "0.1.0", "events": "none"});
        assert!(matches!(
            Sequence::decode(&doc, ParameterCatalog::standard()).unwrap_err(),
            Error::Serialization(_)
        ));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn test_validate_clean_sequence() {
        let mut seq = sequence();
        seq.create_event("tx", 1.0).unwrap();
        assert!(seq.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_out_of_range_and_catalog_mismatch() {
        let mut seq = sequence();
        seq.create_event("tx", 1.0)
            .unwrap()
            .option_mut(TX_PULSE, tx::RELATIVE_AMPLITUDE)
            .unwrap()
            .overwrite(150.0)
            .unwrap();
        let foreign = ParameterCatalog::new().with("Gate", ParameterKind::Gate);
        seq.add_event(Event::new("gate", 1.0, &foreign).unwrap()).unwrap();

        let issues = seq.validate();
        assert!(issues.iter().any(|i| i.starts_with("RANGE:")));
        assert!(issues
            .iter()
            .any(|i| i.contains("missing parameter 'TXParameters'")));
        assert!(issues.iter().any(|i| i.contains("'Gate' not in catalog")));
    }

    #[test]
    fn test_validate_reports_phase_cycle_errors() {
        let mut seq = sequence();
        let event = seq.create_event("tx", 1.0).unwrap();
        let p = event.parameter_mut(TX_PULSE).unwrap();
        p.option_mut(tx::RELATIVE_AMPLITUDE).unwrap().overwrite(100.0).unwrap();
        p.option_mut(tx::N_PHASE_CYCLES).unwrap().overwrite(2.5).unwrap();
        let issues = seq.validate();
        assert!(issues.iter().any(|i| i.starts_with("PHASE:")));
    }
}
