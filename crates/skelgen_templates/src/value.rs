//! Scalar values and string coercion.
//!
//! Option values flowing through the pipeline are plain scalars. Rendered
//! expression strings are coerced back into typed scalars with fixed
//! literal rules so that `"{{ docs != 'False' }}"` yields a real boolean
//! rather than the string `"true"`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Flat mapping from option name to scalar value.
///
/// Values may still hold raw expression strings before context resolution;
/// after [`crate::context::resolve_defaults`] runs, remaining expression
/// strings are deliberate fallbacks from failed renders.
pub type Context = HashMap<String, ScalarValue>;

impl ScalarValue {
    /// The underlying string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "null"),
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Int(i) => write!(f, "{}", i),
            // Integral floats keep their decimal point so the text reads
            // back as a float, not an integer.
            ScalarValue::Float(x) if x.fract() == 0.0 && x.is_finite() => {
                write!(f, "{:.1}", x)
            }
            ScalarValue::Float(x) => write!(f, "{}", x),
            ScalarValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Bool(b)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Int(i)
    }
}

impl From<f64> for ScalarValue {
    fn from(x: f64) -> Self {
        ScalarValue::Float(x)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

/// Convert a rendered string into the scalar it represents.
///
/// Matching is attempted in fixed order: boolean literals, null literals,
/// numeric parse (float when the text contains a decimal point, integer
/// otherwise), and finally the original string unchanged. Never fails.
pub fn coerce_scalar(value: &str) -> ScalarValue {
    let lowered = value.trim().to_lowercase();

    match lowered.as_str() {
        "true" | "yes" | "on" => return ScalarValue::Bool(true),
        "false" | "no" | "off" => return ScalarValue::Bool(false),
        "null" | "none" => return ScalarValue::Null,
        _ => {}
    }

    if lowered.contains('.') {
        if let Ok(x) = lowered.parse::<f64>() {
            return ScalarValue::Float(x);
        }
    } else if let Ok(i) = lowered.parse::<i64>() {
        return ScalarValue::Int(i);
    }

    ScalarValue::String(value.to_string())
}
