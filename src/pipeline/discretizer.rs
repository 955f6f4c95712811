//! The discretization engine: an ordered list of steps run against one context

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use super::binning::{all_bins, bin_index, BinInterval};
use super::context::DiscretizationContext;
use super::dataset::{AttributeType, DataRow, Dataset};
use super::error::DiscretizeError;
use super::params::Parameters;
use super::stats::sorted_distinct;
use super::steps::Step;
use super::value::AttributeValue;

/// How a discretization call ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum DiscretizationStatus {
    /// Numeric values were replaced by bin labels
    Discretized,
    /// Rows were returned unchanged for the given reason
    PassThrough(DiscretizeError),
}

/// Output of one discretization call
#[derive(Debug, Clone, Serialize)]
pub struct DiscretizationResult {
    /// Copies of the input rows with the attribute replaced by its bin label
    pub discretized_rows: Vec<DataRow>,
    /// Sorted, deduplicated cut points (empty on pass-through)
    pub final_cut_points: Vec<f64>,
    /// Sorted numeric values the cut points were derived from
    pub original_numeric_values: Vec<f64>,
    pub discretized_attribute_name: String,
    /// Name of the discretizer that produced this result
    pub algorithm: String,
    pub status: DiscretizationStatus,
}

impl DiscretizationResult {
    fn pass_through(
        dataset: &Dataset,
        attribute: &str,
        algorithm: &str,
        numeric_values: Vec<f64>,
        reason: DiscretizeError,
    ) -> Self {
        Self {
            discretized_rows: dataset.rows.clone(),
            final_cut_points: Vec::new(),
            original_numeric_values: numeric_values,
            discretized_attribute_name: attribute.to_string(),
            algorithm: algorithm.to_string(),
            status: DiscretizationStatus::PassThrough(reason),
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self.status, DiscretizationStatus::PassThrough(_))
    }

    /// Cause of a pass-through, if any.
    pub fn pass_through_reason(&self) -> Option<&DiscretizeError> {
        match &self.status {
            DiscretizationStatus::PassThrough(reason) => Some(reason),
            DiscretizationStatus::Discretized => None,
        }
    }

    /// Every bin defined by the final cut points, lowest first.
    pub fn bins(&self) -> Vec<BinInterval> {
        all_bins(&self.final_cut_points)
    }

    /// Number of numeric values falling in each bin.
    pub fn bin_counts(&self) -> Vec<(BinInterval, usize)> {
        let mut counts: Vec<(BinInterval, usize)> =
            self.bins().into_iter().map(|bin| (bin, 0)).collect();
        for &value in &self.original_numeric_values {
            counts[bin_index(value, &self.final_cut_points)].1 += 1;
        }
        counts
    }
}

/// A named, ordered pipeline of [`Step`]s.
///
/// ```ignore
/// let discretizer = Discretizer::new("Equal-Width Binning")
///     .step(SetParameters(Parameters::new().with_num_bins(4)))
///     .step(CoerceNumericValues)
///     .step(IterativeBinning::new(EqualWidth));
/// let result = discretizer.discretize(&dataset, "Age", None)?;
/// ```
pub struct Discretizer {
    name: String,
    steps: Vec<Box<dyn Step>>,
}

impl std::fmt::Debug for Discretizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discretizer")
            .field("name", &self.name)
            .field("steps", &self.step_names())
            .finish()
    }
}

impl Discretizer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn with_steps(name: impl Into<String>, steps: Vec<Box<dyn Step>>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Append a step.
    pub fn step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Discretize one attribute of `dataset`.
    ///
    /// A fresh context is seeded with a copy of `initial_parameters` and run
    /// through every step. Every row whose value coerces to a number gets
    /// its value replaced by the label of its bin; other rows are copied
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Only an empty attribute name is rejected. Unknown or non-numeric
    /// attributes, attributes without numeric values and failing steps all
    /// yield a pass-through result instead; see
    /// [`DiscretizationResult::status`].
    pub fn discretize(
        &self,
        dataset: &Dataset,
        attribute_name: &str,
        initial_parameters: Option<&Parameters>,
    ) -> Result<DiscretizationResult, DiscretizeError> {
        if attribute_name.trim().is_empty() {
            return Err(DiscretizeError::invalid_argument(
                "attribute name cannot be empty",
            ));
        }

        let span = info_span!("discretize", algorithm = %self.name, attribute = attribute_name);
        let _guard = span.enter();

        match dataset.attribute_type(attribute_name) {
            Some(AttributeType::Numeric) => {}
            Some(other) => {
                let reason = DiscretizeError::not_discretizable(
                    attribute_name,
                    format!("attribute type is {}", other),
                );
                warn!("{}", reason);
                return Ok(DiscretizationResult::pass_through(
                    dataset,
                    attribute_name,
                    &self.name,
                    Vec::new(),
                    reason,
                ));
            }
            None => {
                let reason = DiscretizeError::not_discretizable(
                    attribute_name,
                    "attribute not found in the type registry",
                );
                warn!("{}", reason);
                return Ok(DiscretizationResult::pass_through(
                    dataset,
                    attribute_name,
                    &self.name,
                    Vec::new(),
                    reason,
                ));
            }
        }

        let mut context = DiscretizationContext::new(
            dataset,
            attribute_name,
            initial_parameters.cloned().unwrap_or_default(),
        );

        for step in &self.steps {
            debug!(step = step.name(), "Running step");
            context = match step.apply(context) {
                Ok(next) => next,
                Err(e) => {
                    let reason = DiscretizeError::StepExecutionFailure {
                        step: step.name().to_string(),
                        message: format!("{:#}", e),
                    };
                    warn!("{}", reason);
                    return Ok(DiscretizationResult::pass_through(
                        dataset,
                        attribute_name,
                        &self.name,
                        Vec::new(),
                        reason,
                    ));
                }
            };
        }

        if context.numeric_values.is_empty() {
            let reason = DiscretizeError::not_discretizable(
                attribute_name,
                "no numeric values after coercion",
            );
            warn!("{}", reason);
            return Ok(DiscretizationResult::pass_through(
                dataset,
                attribute_name,
                &self.name,
                Vec::new(),
                reason,
            ));
        }

        let cut_points = sorted_distinct(&context.cut_points);
        let bins = all_bins(&cut_points);

        let discretized_rows: Vec<DataRow> = dataset
            .rows
            .iter()
            .map(|row| {
                let mut new_row = row.clone();
                if let Some(value) = row.numeric(attribute_name) {
                    let label = bins[bin_index(value, &cut_points)].label();
                    new_row
                        .attributes
                        .insert(attribute_name.to_string(), AttributeValue::Text(label));
                }
                new_row
            })
            .collect();

        info!(
            bins = cut_points.len() + 1,
            values = context.numeric_values.len(),
            "Discretization complete"
        );

        Ok(DiscretizationResult {
            discretized_rows,
            final_cut_points: cut_points,
            original_numeric_values: context.numeric_values,
            discretized_attribute_name: attribute_name.to_string(),
            algorithm: self.name.clone(),
            status: DiscretizationStatus::Discretized,
        })
    }
}
