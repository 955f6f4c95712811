//! Quantile (equal-frequency) binning

use anyhow::Result;
use tracing::debug;

use crate::pipeline::context::DiscretizationContext;
use crate::pipeline::iterative::IterativeBinningStrategy;
use crate::pipeline::stats::{midpoint, sort_ascending, sorted_distinct};

/// Places cut points so each bin holds roughly the same number of values.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualFrequency;

impl IterativeBinningStrategy for EqualFrequency {
    fn name(&self) -> &str {
        "equal-frequency"
    }

    fn compute(&self, context: &DiscretizationContext<'_>) -> Result<Vec<f64>> {
        let num_bins = context.parameters.resolve_bin_count();
        debug!(num_bins, "Equal-frequency binning");
        Ok(equal_frequency_cut_points(&context.numeric_values, num_bins))
    }
}

/// Quantile cut points over `values` (duplicates count towards frequency).
///
/// With fewer values than bins, every distinct value except the largest
/// becomes a cut point. Otherwise the `i`-th boundary is the midpoint of the
/// two values straddling index `floor(i * n / num_bins)`.
pub fn equal_frequency_cut_points(values: &[f64], num_bins: usize) -> Vec<f64> {
    let distinct = sorted_distinct(values);
    if distinct.len() < 2 || num_bins < 2 {
        return Vec::new();
    }

    let mut sorted = values.to_vec();
    sort_ascending(&mut sorted);
    let count = sorted.len();

    if count < num_bins {
        return distinct[..distinct.len() - 1].to_vec();
    }

    let elements_per_bin = count as f64 / num_bins as f64;
    let cut_points: Vec<f64> = (1..num_bins)
        .filter_map(|i| {
            let index = (i as f64 * elements_per_bin).floor() as usize;
            (index > 0 && index < count).then(|| midpoint(sorted[index - 1], sorted[index]))
        })
        .collect();

    sorted_distinct(&cut_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_to_ten() -> Vec<f64> {
        (1..=10).map(f64::from).collect()
    }

    #[test]
    fn test_two_bins_split_at_median() {
        assert_eq!(equal_frequency_cut_points(&one_to_ten(), 2), vec![5.5]);
    }

    #[test]
    fn test_unsorted_input_is_handled() {
        let values = [10.0, 3.0, 7.0, 1.0, 5.0, 9.0, 2.0, 8.0, 4.0, 6.0];
        assert_eq!(equal_frequency_cut_points(&values, 2), vec![5.5]);
    }

    #[test]
    fn test_five_bins_over_ten_values() {
        assert_eq!(
            equal_frequency_cut_points(&one_to_ten(), 5),
            vec![2.5, 4.5, 6.5, 8.5]
        );
    }

    #[test]
    fn test_fewer_values_than_bins_uses_distinct_values() {
        assert_eq!(equal_frequency_cut_points(&[3.0, 1.0, 2.0], 5), vec![1.0, 2.0]);
    }

    #[test]
    fn test_constant_values_give_single_bin() {
        assert!(equal_frequency_cut_points(&[7.0; 10], 5).is_empty());
        assert!(equal_frequency_cut_points(&[7.0, 7.0], 5).is_empty());
        assert!(equal_frequency_cut_points(&[], 3).is_empty());
    }

    #[test]
    fn test_ties_at_boundary_are_merged() {
        // Boundaries at indices 2 and 4 both fall inside the run of 2.0s
        let values = [1.0, 2.0, 2.0, 2.0, 2.0, 3.0];
        assert_eq!(equal_frequency_cut_points(&values, 3), vec![2.0]);
    }

    #[test]
    fn test_midpoints_near_f64_max_stay_finite() {
        let values = [1.5e308, 1.6e308, 1.7e308, 1.75e308];
        let cuts = equal_frequency_cut_points(&values, 2);
        assert_eq!(cuts.len(), 1);
        assert!((cuts[0] - 1.65e308).abs() <= 1.65e308 * 1e-15, "got {:?}", cuts);
    }
}
