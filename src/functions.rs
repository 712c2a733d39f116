// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Function value objects.
//!
//! A [`Function`] names an envelope shape (for TX pulses) or a sign/weight
//! (for readout schemes). Sequences only select and persist them; sampling
//! the envelope belongs to whatever executes the sequence.

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, Result};

/// The family a function belongs to. Persisted as the `class` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionKind {
    /// Constant envelope over the pulse
    #[serde(rename = "RectFunction")]
    Rect,
    /// sinc envelope
    #[serde(rename = "SincFunction")]
    Sinc,
    /// Gaussian envelope
    #[serde(rename = "GaussianFunction")]
    Gaussian,
    /// User supplied expression
    #[serde(rename = "CustomFunction")]
    Custom,
    /// Scalar weight, used for readout signs
    #[serde(rename = "ConstantFunction")]
    Constant,
}

/// A named numeric parameter of a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub name: String,
    pub value: f64,
}

/// A selectable function value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Display name, unique within a function catalog.
    pub name: String,
    #[serde(rename = "class")]
    pub kind: FunctionKind,
    #[serde(default)]
    pub parameters: Vec<FunctionParameter>,
    /// Expression text, only meaningful for [`FunctionKind::Custom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Lower end of the sampling interval.
    #[serde(default = "default_start_x")]
    pub start_x: f64,
    /// Upper end of the sampling interval.
    #[serde(default = "default_end_x")]
    pub end_x: f64,
}

fn default_start_x() -> f64 {
    -1.0
}

fn default_end_x() -> f64 {
    1.0
}

impl Function {
    fn new(name: &str, kind: FunctionKind, parameters: Vec<FunctionParameter>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            parameters,
            expression: None,
            start_x: default_start_x(),
            end_x: default_end_x(),
        }
    }

    /// Rectangular pulse shape.
    pub fn rect() -> Self {
        Self::new("Rectangular", FunctionKind::Rect, Vec::new())
    }

    /// sinc pulse shape with a default scale factor of 2.
    pub fn sinc() -> Self {
        let mut f = Self::new(
            "sinc",
            FunctionKind::Sinc,
            vec![FunctionParameter {
                name: "Scale Factor".into(),
                value: 2.0,
            }],
        );
        f.start_x = -std::f64::consts::PI;
        f.end_x = std::f64::consts::PI;
        f
    }

    /// Gaussian pulse shape centred at 0 with unit width.
    pub fn gaussian() -> Self {
        Self::new(
            "Gaussian",
            FunctionKind::Gaussian,
            vec![
                FunctionParameter {
                    name: "Mean".into(),
                    value: 0.0,
                },
                FunctionParameter {
                    name: "Standard Deviation".into(),
                    value: 1.0,
                },
            ],
        )
    }

    /// User expression, defaulting to a linear ramp.
    pub fn custom() -> Self {
        let mut f = Self::new("Custom", FunctionKind::Custom, Vec::new());
        f.expression = Some("0.5 * x".into());
        f
    }

    /// Scalar weight, named after its value (`"+1"`, `"-1"`, `"0"`).
    pub fn constant(value: f64) -> Self {
        let name = if value > 0.0 {
            format!("+{}", value)
        } else {
            format!("{}", value)
        };
        let mut f = Self::new(
            &name,
            FunctionKind::Constant,
            vec![FunctionParameter {
                name: "Value".into(),
                value,
            }],
        );
        f.start_x = 0.0;
        f.end_x = 0.0;
        f
    }

    /// The pulse-shape catalog offered by a TX pulse.
    pub fn pulse_shapes() -> Vec<Function> {
        vec![
            Function::rect(),
            Function::sinc(),
            Function::gaussian(),
            Function::custom(),
        ]
    }

    /// The sign catalog offered by a readout scheme.
    pub fn readout_signs() -> Vec<Function> {
        vec![
            Function::constant(1.0),
            Function::constant(-1.0),
            Function::constant(0.0),
        ]
    }

    /// Value of a named function parameter.
    pub fn parameter(&self, name: &str) -> Result<f64> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
            .ok_or_else(|| LookupError::Function(format!("{}.{}", self.name, name)).into())
    }

    /// Encode as a structured document.
    pub fn to_document(&self) -> serde_json::Value {
        // Plain struct of strings and finite numbers: serializing cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Decode from a structured document.
    pub fn from_document(doc: &serde_json::Value) -> Result<Self> {
        Ok(Self::deserialize(doc)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pulse_shape_catalog_names() {
        let names: Vec<String> = Function::pulse_shapes()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Rectangular", "sinc", "Gaussian", "Custom"]);
    }

    #[test]
    fn test_readout_sign_names() {
        let names: Vec<String> = Function::readout_signs()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["+1", "-1", "0"]);
    }

    #[test]
    fn test_document_carries_class() {
        let doc = Function::gaussian().to_document();
        assert_eq!(doc["class"], "GaussianFunction");
        assert_eq!(doc["name"], "Gaussian");
        assert_eq!(doc["parameters"][1]["name"], "Standard Deviation");
    }

    #[test]
    fn test_document_roundtrip_custom() {
        let f = Function::custom();
        let back = Function::from_document(&f.to_document()).unwrap();
        assert_eq!(back, f);
        assert_eq!(back.expression.as_deref(), Some("0.5 * x"));
    }

    #[test]
    fn test_decode_minimal_document() {
        let doc = json!({"name": "Rectangular", "class": "RectFunction"});
        let f = Function::from_document(&doc).unwrap();
        assert_eq!(f, Function::rect());
    }

    #[test]
    fn test_decode_unknown_class_fails() {
        let doc = json!({"name": "Chirp", "class": "ChirpFunction"});
        assert!(Function::from_document(&doc).is_err());
    }

    #[test]
    fn test_parameter_lookup() {
        assert_eq!(Function::sinc().parameter("Scale Factor").unwrap(), 2.0);
        assert!(Function::rect().parameter("Scale Factor").is_err());
    }
}
