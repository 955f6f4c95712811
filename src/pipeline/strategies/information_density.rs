//! Information density split criteria (supervised and unsupervised)
//!
//! Information density is entropy normalized by `log2(distinct + 1)`. A
//! partition is split at the midpoint that minimizes the range-weighted
//! density of its two halves, but only when that beats the density of the
//! partition as a whole.
//!
//! Every midpoint between consecutive distinct values is scored, so a
//! partition costs O(n * distinct) per level. There is no caching between
//! sibling partitions.

use serde::Serialize;
use tracing::{debug, trace};

use crate::pipeline::dataset::DataRow;
use crate::pipeline::params::Parameters;
use crate::pipeline::recursive::{Bounds, RecursiveSplitStrategy, SplitDecision};
use crate::pipeline::stats::{class_entropy, information_density, midpoint, sorted_distinct, value_entropy};

/// Which entropy measures the purity of a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityMeasure {
    /// Entropy of the target labels
    Supervised,
    /// Entropy of the value frequencies
    Unsupervised,
}

impl DensityMeasure {
    fn entropy(&self, points: &[(f64, &str)]) -> f64 {
        match self {
            DensityMeasure::Supervised => class_entropy(points.iter().map(|(_, label)| *label)),
            DensityMeasure::Unsupervised => {
                let values: Vec<f64> = points.iter().map(|(v, _)| *v).collect();
                value_entropy(&values)
            }
        }
    }

    /// Information density of a run of points sorted by value; zero when empty.
    fn density(&self, points: &[(f64, &str)]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }
        let distinct = 1 + points.windows(2).filter(|pair| pair[0].0 != pair[1].0).count();
        information_density(self.entropy(points), distinct)
    }
}

/// Recursive split criterion based on information density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InformationDensity {
    pub measure: DensityMeasure,
}

impl InformationDensity {
    pub fn new(measure: DensityMeasure) -> Self {
        Self { measure }
    }

    pub fn supervised() -> Self {
        Self::new(DensityMeasure::Supervised)
    }

    pub fn unsupervised() -> Self {
        Self::new(DensityMeasure::Unsupervised)
    }
}

/// Range-weighted density of the halves `value < cut` and `value >= cut`.
///
/// Each half is weighted by the fraction of `bounds` it covers, not by its
/// row count. `points` must be sorted by value.
pub fn conditional_information_density(
    measure: DensityMeasure,
    points: &[(f64, &str)],
    cut: f64,
    bounds: Bounds,
) -> f64 {
    if bounds.max <= bounds.min {
        return 0.0;
    }

    let split = points.partition_point(|(v, _)| *v < cut);
    let (left, right) = points.split_at(split);

    let p_left = bounds.fraction_below(cut);
    let p_right = bounds.fraction_above(cut);

    p_left * measure.density(left) + p_right * measure.density(right)
}

impl RecursiveSplitStrategy for InformationDensity {
    fn name(&self) -> &str {
        match self.measure {
            DensityMeasure::Supervised => "supervised-density",
            DensityMeasure::Unsupervised => "unsupervised-density",
        }
    }

    fn evaluate(
        &self,
        partition: &[&DataRow],
        attribute: &str,
        bounds: Bounds,
        parameters: &Parameters,
    ) -> SplitDecision {
        if partition.is_empty() || bounds.max <= bounds.min {
            return SplitDecision::Stop;
        }

        let mut points: Vec<(f64, &str)> = partition
            .iter()
            .filter_map(|row| row.numeric(attribute).map(|v| (v, row.target.as_str())))
            .collect();
        if points.len() < 2 {
            return SplitDecision::Stop;
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let values: Vec<f64> = points.iter().map(|(v, _)| *v).collect();
        let distinct = sorted_distinct(&values);
        if distinct.len() < 2 {
            return SplitDecision::Stop;
        }

        let initial_density = information_density(self.measure.entropy(&points), distinct.len());

        let mut best: Option<(f64, f64)> = None; // (cut, density)
        for pair in distinct.windows(2) {
            let cut = midpoint(pair[0], pair[1]);
            let density = conditional_information_density(self.measure, &points, cut, bounds);
            trace!(cut, density, "Scored candidate");
            if best.map_or(true, |(_, d)| density < d) {
                best = Some((cut, density));
            }
        }

        match best {
            Some((cut, density)) if density < initial_density => {
                debug!(
                    strategy = self.name(),
                    cut,
                    conditional_density = density,
                    initial_density,
                    min_gain_threshold = ?parameters.min_gain_threshold,
                    "Found improving split"
                );
                SplitDecision::Split(cut)
            }
            _ => SplitDecision::Stop,
        }
    }
}
