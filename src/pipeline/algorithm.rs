//! Ready-made discretizers and batch discretization over several attributes

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use super::dataset::Dataset;
use super::discretizer::{DiscretizationResult, Discretizer};
use super::error::DiscretizeError;
use super::iterative::IterativeBinning;
use super::params::Parameters;
use super::recursive::RecursiveBinning;
use super::steps::{CoerceNumericValues, OptimalBinCount};
use super::strategies::{EqualFrequency, EqualWidth, InformationDensity};

/// Built-in discretization algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    EqualWidth,
    EqualFrequency,
    SupervisedDensity,
    UnsupervisedDensity,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::EqualWidth,
        Algorithm::EqualFrequency,
        Algorithm::SupervisedDensity,
        Algorithm::UnsupervisedDensity,
    ];

    /// Human readable name used as the discretizer name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::EqualWidth => "Equal-Width Binning",
            Algorithm::EqualFrequency => "Equal-Frequency Binning",
            Algorithm::SupervisedDensity => "Supervised Information Density",
            Algorithm::UnsupervisedDensity => "Unsupervised Information Density",
        }
    }

    /// Whether the algorithm reads the target labels.
    pub fn is_supervised(&self) -> bool {
        matches!(self, Algorithm::SupervisedDensity)
    }

    /// Build the discretizer for this algorithm.
    ///
    /// Every pipeline coerces the attribute, records the Sturges bin count
    /// and then runs its driver.
    pub fn discretizer(&self) -> Discretizer {
        let base = Discretizer::new(self.display_name())
            .step(CoerceNumericValues)
            .step(OptimalBinCount);
        match self {
            Algorithm::EqualWidth => base.step(IterativeBinning::new(EqualWidth)),
            Algorithm::EqualFrequency => base.step(IterativeBinning::new(EqualFrequency)),
            Algorithm::SupervisedDensity => {
                base.step(RecursiveBinning::new(InformationDensity::supervised()))
            }
            Algorithm::UnsupervisedDensity => {
                base.step(RecursiveBinning::new(InformationDensity::unsupervised()))
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::EqualWidth => "equal-width",
            Algorithm::EqualFrequency => "equal-frequency",
            Algorithm::SupervisedDensity => "supervised-density",
            Algorithm::UnsupervisedDensity => "unsupervised-density",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal-width" | "width" => Ok(Algorithm::EqualWidth),
            "equal-frequency" | "frequency" | "quantile" => Ok(Algorithm::EqualFrequency),
            "supervised-density" | "supervised" => Ok(Algorithm::SupervisedDensity),
            "unsupervised-density" | "unsupervised" => Ok(Algorithm::UnsupervisedDensity),
            _ => Err(format!(
                "Unknown algorithm '{}'. Valid options: equal-width, equal-frequency, \
                 supervised-density, unsupervised-density",
                s
            )),
        }
    }
}

/// Discretize several attributes in parallel, keeping input order.
///
/// Each attribute gets its own context; the dataset is shared read-only.
pub fn discretize_attributes(
    discretizer: &Discretizer,
    dataset: &Dataset,
    attributes: &[String],
    parameters: Option<&Parameters>,
) -> Vec<(String, Result<DiscretizationResult, DiscretizeError>)> {
    discretize_attributes_with(discretizer, dataset, attributes, parameters, |_| {})
}

/// Like [`discretize_attributes`], calling `on_complete` as each attribute
/// finishes (in completion order, from worker threads).
pub fn discretize_attributes_with<F>(
    discretizer: &Discretizer,
    dataset: &Dataset,
    attributes: &[String],
    parameters: Option<&Parameters>,
    on_complete: F,
) -> Vec<(String, Result<DiscretizationResult, DiscretizeError>)>
where
    F: Fn(&str) + Sync,
{
    let results: Vec<(String, Result<DiscretizationResult, DiscretizeError>)> = attributes
        .par_iter()
        .map(|attribute| {
            let result = discretizer.discretize(dataset, attribute, parameters);
            on_complete(attribute);
            (attribute.clone(), result)
        })
        .collect();

    let discretized = results
        .iter()
        .filter(|(_, r)| matches!(r, Ok(res) if !res.is_pass_through()))
        .count();
    info!(
        algorithm = discretizer.name(),
        attributes = attributes.len(),
        discretized,
        "Batch discretization complete"
    );

    results
}

/// Attributes registered as numeric, excluding the target.
pub fn numeric_attributes(dataset: &Dataset) -> Vec<String> {
    let target = dataset.target_name.as_deref();
    dataset
        .numeric_attributes()
        .into_iter()
        .filter(|name| Some(name.as_str()) != target)
        .collect()
}
