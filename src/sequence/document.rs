// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Persisted sequence document.
//!
//! ```text
//! { "name": ..., "version": ...,
//!   "events": [ { "name": ..., "duration": ...,
//!                 "parameters": [ { "name": ..., "value": [<option>, ...] } ] } ] }
//! ```
//!
//! A parameter's `value` is its full ordered option list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::units::IntoDuration;

/// Top-level document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceDocument {
    pub name: String,
    /// Required on load; `None` only while the document is being inspected.
    #[serde(default)]
    pub version: Option<String>,
    pub events: Vec<EventDocument>,
}

/// One event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDocument {
    pub name: String,
    pub duration: DurationField,
    #[serde(default)]
    pub parameters: Vec<ParameterDocument>,
}

/// Durations are written as numbers; older files may hold suffixed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Number(f64),
    Text(String),
}

impl DurationField {
    /// Validated duration in base units.
    pub fn resolve(&self) -> Result<f64> {
        match self {
            DurationField::Number(v) => v.into_duration(),
            DurationField::Text(s) => s.as_str().into_duration(),
        }
    }
}

/// One parameter: its name and its option documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDocument {
    pub name: String,
    pub value: Vec<Value>,
}
