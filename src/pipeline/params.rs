//! Typed discretization parameters with a string-keyed escape hatch
//!
//! The well-known options (bin count, recursion depth, ...) live in typed
//! fields. Anything else set by a custom step lands in `extra` so unrelated
//! steps can still pass metadata along.

use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::error::DiscretizeError;

/// Bin count used when neither an explicit nor an optimal count is known
pub const DEFAULT_NUM_BINS: usize = 5;

/// Default recursion depth cap for recursive strategies
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Canonical parameter keys
pub const NUMBER_OF_BINS: &str = "NumberOfBins";
pub const NUM_BINS: &str = "numBins";
pub const OPTIMAL_NUM_BINS: &str = "optimalNumBins";
pub const MIN_GAIN_THRESHOLD: &str = "MinGainThreshold";
pub const MAX_DEPTH: &str = "MaxDepth";

/// A dynamically-typed parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            ParamValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl FromStr for ParamValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(i) = s.parse::<i64>() {
            return Ok(ParamValue::Int(i));
        }
        if let Ok(f) = s.parse::<f64>() {
            return Ok(ParamValue::Float(f));
        }
        Ok(ParamValue::Text(s.to_string()))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnownKey {
    NumBins,
    OptimalNumBins,
    MaxDepth,
    MinGainThreshold,
}

fn known_key(key: &str) -> Option<KnownKey> {
    match key.to_ascii_lowercase().as_str() {
        "numberofbins" | "numbins" => Some(KnownKey::NumBins),
        "optimalnumbins" => Some(KnownKey::OptimalNumBins),
        "maxdepth" => Some(KnownKey::MaxDepth),
        "mingainthreshold" => Some(KnownKey::MinGainThreshold),
        _ => None,
    }
}

/// Per-call configuration threaded through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Parameters {
    /// Explicit bin count for width/frequency strategies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_bins: Option<usize>,
    /// Sturges-derived fallback bin count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal_num_bins: Option<usize>,
    /// Recursion depth cap override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Advisory gain threshold for recursive strategies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_gain_threshold: Option<f64>,
    /// Values under keys this crate does not interpret
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, ParamValue>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_bins(mut self, num_bins: usize) -> Self {
        self.num_bins = Some(num_bins);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_min_gain_threshold(mut self, threshold: f64) -> Self {
        self.min_gain_threshold = Some(threshold);
        self
    }

    /// Set a parameter by name; last write wins.
    ///
    /// Well-known keys are matched case-insensitively and validated.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<(), DiscretizeError> {
        let value = value.into();
        match known_key(key) {
            Some(KnownKey::NumBins) => self.num_bins = Some(non_negative(key, &value)?),
            Some(KnownKey::OptimalNumBins) => {
                self.optimal_num_bins = Some(non_negative(key, &value)?)
            }
            Some(KnownKey::MaxDepth) => self.max_depth = Some(non_negative(key, &value)?),
            Some(KnownKey::MinGainThreshold) => {
                let threshold = value.as_f64().ok_or_else(|| DiscretizeError::InvalidParameter {
                    key: key.to_string(),
                    message: format!("expected a number, got {:?}", value),
                })?;
                self.min_gain_threshold = Some(threshold);
            }
            None => {
                self.extra.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    /// Read a parameter by name, typed fields included.
    pub fn get(&self, key: &str) -> Option<ParamValue> {
        match known_key(key) {
            Some(KnownKey::NumBins) => self.num_bins.map(ParamValue::from),
            Some(KnownKey::OptimalNumBins) => self.optimal_num_bins.map(ParamValue::from),
            Some(KnownKey::MaxDepth) => self.max_depth.map(ParamValue::from),
            Some(KnownKey::MinGainThreshold) => self.min_gain_threshold.map(ParamValue::from),
            None => self.extra.get(key).cloned(),
        }
    }

    /// Parse a `KEY=VALUE` assignment and apply it.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), DiscretizeError> {
        let (key, raw) = assignment.split_once('=').ok_or_else(|| DiscretizeError::InvalidParameter {
            key: assignment.to_string(),
            message: "expected KEY=VALUE".to_string(),
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DiscretizeError::InvalidParameter {
                key: assignment.to_string(),
                message: "parameter name is empty".to_string(),
            });
        }
        let value = raw.parse::<ParamValue>().unwrap_or_else(|never| match never {});
        self.set(key, value)
    }

    /// Overlay every value set in `other` on top of `self`.
    pub fn merge(&mut self, other: &Parameters) {
        if other.num_bins.is_some() {
            self.num_bins = other.num_bins;
        }
        if other.optimal_num_bins.is_some() {
            self.optimal_num_bins = other.optimal_num_bins;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.min_gain_threshold.is_some() {
            self.min_gain_threshold = other.min_gain_threshold;
        }
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Bin count to use: explicit count if > 1, else the optimal count if
    /// > 1, else [`DEFAULT_NUM_BINS`].
    pub fn resolve_bin_count(&self) -> usize {
        self.num_bins
            .filter(|&n| n > 1)
            .or(self.optimal_num_bins.filter(|&n| n > 1))
            .unwrap_or(DEFAULT_NUM_BINS)
    }

    pub fn resolve_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }
}

fn non_negative(key: &str, value: &ParamValue) -> Result<usize, DiscretizeError> {
    value
        .as_i64()
        .filter(|&v| v >= 0)
        .map(|v| v as usize)
        .ok_or_else(|| DiscretizeError::InvalidParameter {
            key: key.to_string(),
            message: format!("expected a non-negative integer, got {:?}", value),
        })
}
