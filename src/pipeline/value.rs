//! Attribute values and numeric coercion

use serde::Serialize;
use std::fmt;

/// A single cell of a dataset row.
///
/// Values keep the shape they were loaded with; numeric interpretation is
/// always done through [`coerce_to_f64`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl AttributeValue {
    /// Numeric view of this value, see [`coerce_to_f64`].
    pub fn as_f64(&self) -> Option<f64> {
        coerce_to_f64(self)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value as f64)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Number(value as f64)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

/// Convert an attribute value to a finite `f64`.
///
/// Numbers pass through. Text is parsed with the invariant `.` decimal
/// separator first, then retried with `,` replaced by `.` so European
/// notation such as `"3,75"` is accepted. Booleans, unparsable text and
/// non-finite numbers yield `None`.
pub fn coerce_to_f64(value: &AttributeValue) -> Option<f64> {
    let parsed = match value {
        AttributeValue::Number(n) => Some(*n),
        AttributeValue::Text(s) => parse_numeric_text(s),
        AttributeValue::Boolean(_) => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(v) = trimmed.parse::<f64>() {
        return Some(v);
    }

    if trimmed.contains(',') {
        return trimmed.replace(',', ".").parse::<f64>().ok();
    }

    None
}
