//! Per-call working state threaded through the discretization steps

use super::dataset::{DataRow, Dataset};
use super::params::Parameters;
use super::stats::{sort_ascending, sorted_distinct};

/// Mutable state of one discretization call.
///
/// A context is created by [`Discretizer::discretize`](super::Discretizer::discretize),
/// moved through every step, and dropped once the result is built. It only
/// borrows the dataset, so independent calls can share one dataset.
#[derive(Debug, Clone)]
pub struct DiscretizationContext<'a> {
    pub dataset: &'a Dataset,
    pub attribute_name: String,
    /// Coerced values of the attribute, ascending, duplicates kept
    pub numeric_values: Vec<f64>,
    /// Decision boundaries, strictly ascending
    pub cut_points: Vec<f64>,
    pub parameters: Parameters,
}

impl<'a> DiscretizationContext<'a> {
    pub fn new(dataset: &'a Dataset, attribute_name: &str, parameters: Parameters) -> Self {
        Self {
            dataset,
            attribute_name: attribute_name.to_string(),
            numeric_values: Vec::new(),
            cut_points: Vec::new(),
            parameters,
        }
    }

    /// Rows whose attribute value coerces to a number.
    pub fn numeric_rows(&self) -> Vec<&'a DataRow> {
        let name = self.attribute_name.as_str();
        self.dataset
            .rows
            .iter()
            .filter(|row| row.numeric(name).is_some())
            .collect()
    }

    /// Replace the numeric values, keeping them sorted.
    pub fn set_numeric_values(&mut self, mut values: Vec<f64>) {
        sort_ascending(&mut values);
        self.numeric_values = values;
    }

    /// Replace the cut points, deduplicated and sorted.
    pub fn set_cut_points(&mut self, cut_points: Vec<f64>) {
        self.cut_points = sorted_distinct(&cut_points);
    }

    /// `(min, max)` of the numeric values, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        match (self.numeric_values.first(), self.numeric_values.last()) {
            (Some(&min), Some(&max)) => Some((min, max)),
            _ => None,
        }
    }
}
