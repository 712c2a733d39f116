// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Option document encoding.
//!
//! Every option document carries `name`, `value` and the discriminant
//! `class`. Numeric options add `is_float`, `min_value`, `max_value` and
//! `slider`; function options nest the selected function under `value` and
//! add the `functions` catalog. Tables persist only their payload.
//!
//! Decoding dispatches on `class` through [`DECODERS`]. A kind either
//! rebuilds itself from `(name, value)` or reads its own fields.

use serde_json::{json, Map, Value};
use tracing::debug;

use super::{FunctionOption, NumericOption, OptionKind, PulseOption, TableOption};
use crate::error::{Error, Result};
use crate::functions::Function;

pub const BOOLEAN_CLASS: &str = "BooleanOption";
pub const NUMERIC_CLASS: &str = "NumericOption";
pub const FUNCTION_CLASS: &str = "FunctionOption";
pub const TABLE_CLASS: &str = "TableOption";
pub const READOUT_CLASS: &str = "ReadoutOption";

/// How a kind is rebuilt from its document.
#[derive(Clone, Copy)]
pub enum Decoder {
    /// Rebuilt from `name` and `value` alone.
    Generic(fn(Value) -> Result<OptionKind>),
    /// Reads its own fields from the whole document.
    Custom(fn(&Map<String, Value>) -> Result<OptionKind>),
}

/// Discriminant to decoder.
pub const DECODERS: &[(&str, Decoder)] = &[
    (BOOLEAN_CLASS, Decoder::Generic(decode_boolean)),
    (NUMERIC_CLASS, Decoder::Custom(decode_numeric)),
    (FUNCTION_CLASS, Decoder::Custom(decode_function)),
    (TABLE_CLASS, Decoder::Generic(decode_table)),
    (READOUT_CLASS, Decoder::Generic(decode_readout)),
];

fn malformed(msg: impl Into<String>) -> Error {
    Error::Serialization(msg.into())
}

fn field<'a>(doc: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    doc.get(key)
        .ok_or_else(|| malformed(format!("option document is missing '{}'", key)))
}

fn number_field(doc: &Map<String, Value>, key: &str) -> Result<f64> {
    field(doc, key)?
        .as_f64()
        .ok_or_else(|| malformed(format!("option field '{}' is not a number", key)))
}

fn optional_number(doc: &Map<String, Value>, key: &str) -> Result<Option<f64>> {
    match doc.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| malformed(format!("option field '{}' is not a number", key))),
    }
}

/// Integral values of integer options are written as JSON integers.
fn encode_number(value: f64, is_float: bool) -> Value {
    if !is_float && value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

fn decode_boolean(value: Value) -> Result<OptionKind> {
    value
        .as_bool()
        .map(OptionKind::Boolean)
        .ok_or_else(|| malformed(format!("boolean option value {} is not a bool", value)))
}

fn decode_table(value: Value) -> Result<OptionKind> {
    Ok(OptionKind::Table(TableOption::new(value)))
}

fn decode_readout(value: Value) -> Result<OptionKind> {
    Ok(OptionKind::Readout(TableOption::readout(value)?))
}

fn decode_numeric(doc: &Map<String, Value>) -> Result<OptionKind> {
    let is_float = doc.get("is_float").and_then(Value::as_bool).unwrap_or(true);
    Ok(OptionKind::Numeric(NumericOption {
        value: number_field(doc, "value")?,
        is_float,
        min: optional_number(doc, "min_value")?,
        max: optional_number(doc, "max_value")?,
        slider: doc.get("slider").and_then(Value::as_bool).unwrap_or(false),
    }))
}

fn decode_function(doc: &Map<String, Value>) -> Result<OptionKind> {
    let functions = field(doc, "functions")?
        .as_array()
        .ok_or_else(|| malformed("'functions' is not a list"))?
        .iter()
        .map(Function::from_document)
        .collect::<Result<Vec<_>>>()?;
    let mut option = FunctionOption::new(functions)?;
    option.set_value(Function::from_document(field(doc, "value")?)?);
    Ok(OptionKind::Function(option))
}

impl PulseOption {
    /// Encode as an option document.
    pub fn to_document(&self) -> Value {
        let class = self.kind.class_name();
        match &self.kind {
            OptionKind::Boolean(v) => json!({"name": self.name, "value": v, "class": class}),
            OptionKind::Numeric(n) => json!({
                "name": self.name,
                "value": encode_number(n.value, n.is_float),
                "class": class,
                "is_float": n.is_float,
                "min_value": n.min.map(|m| encode_number(m, n.is_float)),
                "max_value": n.max.map(|m| encode_number(m, n.is_float)),
                "slider": n.slider,
            }),
            OptionKind::Function(f) => json!({
                "name": self.name,
                "value": f.value.to_document(),
                "class": class,
                "functions": f.functions.iter().map(Function::to_document).collect::<Vec<_>>(),
            }),
            OptionKind::Table(t) | OptionKind::Readout(t) => {
                json!({"name": self.name, "value": t.value, "class": class})
            }
        }
    }

    /// Decode an option document.
    ///
    /// # Errors
    ///
    /// [`Error::Serialization`] when the document is not an object, lacks
    /// `name`/`class`, names an unknown class, or has ill-typed fields.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let map = doc
            .as_object()
            .ok_or_else(|| malformed("option document is not an object"))?;
        let name = field(map, "name")?
            .as_str()
            .ok_or_else(|| malformed("option 'name' is not a string"))?;
        let class = field(map, "class")?
            .as_str()
            .ok_or_else(|| malformed("option 'class' is not a string"))?;
        debug!(option = %name, class = %class, "Decoding option");

        let decoder = DECODERS
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, d)| *d)
            .ok_or_else(|| malformed(format!("unknown option class '{}'", class)))?;

        let kind = match decoder {
            Decoder::Generic(decode) => decode(field(map, "value")?.clone())?,
            Decoder::Custom(decode) => decode(map)?,
        };
        Ok(PulseOption::new(name, kind))
    }
}
