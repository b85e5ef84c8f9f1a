//! Field values and their wire representations.

use ordered_float::OrderedFloat;

use crate::error::{Error, Result};
use crate::types::ValueKind;

/// A value stored in an InfluxDB field.
///
/// Integers and floats are kept apart because the line protocol writes them
/// differently (`42i` versus `42`), and InfluxDB rejects a point whose field
/// changes type between writes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Signed 64-bit integer, written with an `i` suffix.
    Int(i64),

    /// 64-bit floating point, written as-is.
    Float(OrderedFloat<f64>),

    /// UTF-8 string, written double-quoted.
    String(String),

    /// Boolean value.
    Boolean(bool),
}

impl FieldValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Int(_) => ValueKind::Int,
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::String(_) => ValueKind::String,
            FieldValue::Boolean(_) => ValueKind::Boolean,
        }
    }

    /// Returns the value as an i64 if it is an `Int` variant.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a f64 if it is a `Float` variant.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(f.into_inner()),
            _ => None,
        }
    }

    /// Returns the value as a string reference if it is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a bool if it is a `Boolean` variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Format this value as a line protocol field literal.
    ///
    /// - Int: suffixed with `i` (e.g. `42i`)
    /// - Float: written as-is (e.g. `3.5`); `NaN` and infinities are not
    ///   valid line protocol and are dropped by [`crate::Measurement`]
    /// - Boolean: `true` or `false`
    /// - String: wrapped in double quotes, contents untouched
    pub fn to_line_protocol(&self) -> String {
        match self {
            FieldValue::Int(i) => format!("{}i", i),
            FieldValue::Float(f) => format!("{}", f),
            FieldValue::Boolean(b) => format!("{}", b),
            FieldValue::String(s) => format!("\"{}\"", s),
        }
    }

    /// Coerce a JSON literal from a query response into a value of `kind`.
    ///
    /// Numbers are never silently converted into strings (or back); the only
    /// widening allowed is an integer literal into a `Float` and a whole
    /// float literal into an `Int`.
    pub fn coerce(kind: ValueKind, json: &serde_json::Value, column: &str) -> Result<Self> {
        let mismatch = || Error::TypeCoercion {
            column: column.to_string(),
            expected: kind.to_string(),
            value: json.to_string(),
        };

        match kind {
            ValueKind::Int => {
                if let Some(i) = json.as_i64() {
                    return Ok(FieldValue::Int(i));
                }
                // i64::MAX as f64 rounds up to 2^63, which is already out of range.
                match json.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Ok(FieldValue::Int(f as i64))
                    }
                    _ => Err(mismatch()),
                }
            }
            ValueKind::Float => json
                .as_f64()
                .map(|f| FieldValue::Float(OrderedFloat(f)))
                .ok_or_else(mismatch),
            ValueKind::String => json
                .as_str()
                .map(|s| FieldValue::String(s.to_string()))
                .ok_or_else(mismatch),
            ValueKind::Boolean => json.as_bool().map(FieldValue::Boolean).ok_or_else(mismatch),
        }
    }

    /// Convert an untyped JSON literal, inferring the kind from its shape.
    ///
    /// Returns `None` for `null`, arrays and objects.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Bool(b) => Some(FieldValue::Boolean(*b)),
            serde_json::Value::String(s) => Some(FieldValue::String(s.clone())),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(FieldValue::Int(i)),
                None => n.as_f64().map(|f| FieldValue::Float(OrderedFloat(f))),
            },
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(OrderedFloat(value))
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(OrderedFloat(value.into()))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}
