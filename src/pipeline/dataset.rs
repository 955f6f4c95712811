//! In-memory tabular dataset: rows, target labels and the attribute type registry

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::value::{coerce_to_f64, AttributeValue};

/// Inferred type of an attribute column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Numeric,
    Text,
    Boolean,
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeType::Numeric => write!(f, "numeric"),
            AttributeType::Text => write!(f, "text"),
            AttributeType::Boolean => write!(f, "boolean"),
        }
    }
}

/// One record: attribute values keyed by name plus the target label.
///
/// Missing cells are simply absent from `attributes`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataRow {
    pub attributes: BTreeMap<String, AttributeValue>,
    pub target: String,
}

impl DataRow {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            attributes: BTreeMap::new(),
            target: target.into(),
        }
    }

    /// Builder-style setter, mostly for fixtures.
    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Numeric value of `name`, if present and coercible.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).and_then(coerce_to_f64)
    }
}

/// A loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub rows: Vec<DataRow>,
    /// Attribute names in column order (target excluded)
    pub attributes: Vec<String>,
    pub attribute_types: HashMap<String, AttributeType>,
    pub target_name: Option<String>,
}

/// Shape of a dataset for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub attributes: usize,
    pub numeric: usize,
    pub text: usize,
    pub boolean: usize,
}

impl Dataset {
    pub fn new(target_name: Option<String>) -> Self {
        Self {
            target_name,
            ..Default::default()
        }
    }

    /// Register an attribute column. Re-registering updates its type.
    pub fn add_attribute(&mut self, name: &str, attribute_type: AttributeType) {
        if !self.attribute_types.contains_key(name) {
            self.attributes.push(name.to_string());
        }
        self.attribute_types.insert(name.to_string(), attribute_type);
    }

    pub fn push_row(&mut self, row: DataRow) {
        self.rows.push(row);
    }

    pub fn attribute_type(&self, name: &str) -> Option<AttributeType> {
        self.attribute_types.get(name).copied()
    }

    /// All coercible values of an attribute, in row order.
    pub fn numeric_values(&self, name: &str) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.numeric(name)).collect()
    }

    /// Attributes registered as numeric, in column order.
    pub fn numeric_attributes(&self) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|name| self.attribute_type(name) == Some(AttributeType::Numeric))
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        let count = |t: AttributeType| {
            self.attributes
                .iter()
                .filter(|name| self.attribute_type(name) == Some(t))
                .count()
        };

        DatasetSummary {
            rows: self.rows.len(),
            attributes: self.attributes.len(),
            numeric: count(AttributeType::Numeric),
            text: count(AttributeType::Text),
            boolean: count(AttributeType::Boolean),
        }
    }
}
