//! Fixed-width binning

use anyhow::Result;
use tracing::debug;

use crate::pipeline::context::DiscretizationContext;
use crate::pipeline::iterative::IterativeBinningStrategy;
use crate::pipeline::stats::{distinct_count, sorted_distinct};

/// Splits `[min, max]` into bins of equal width.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualWidth;

impl IterativeBinningStrategy for EqualWidth {
    fn name(&self) -> &str {
        "equal-width"
    }

    fn compute(&self, context: &DiscretizationContext<'_>) -> Result<Vec<f64>> {
        let num_bins = context.parameters.resolve_bin_count();
        debug!(num_bins, "Equal-width binning");
        Ok(equal_width_cut_points(&context.numeric_values, num_bins))
    }
}

/// Interior boundaries `min + i * width` for `i = 1..num_bins`.
///
/// The bin count is capped by the number of distinct values and raised to 2
/// when there is more than one; a zero range or a single distinct value
/// gives no cut points. Boundaries that round up to `max` are dropped.
pub fn equal_width_cut_points(values: &[f64], num_bins: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min <= f64::EPSILON {
        return Vec::new();
    }

    let distinct = distinct_count(values);
    if distinct <= 1 {
        return Vec::new();
    }
    let num_bins = num_bins.min(distinct).max(2);

    let range = max - min;
    let cut_points: Vec<f64> = (1..num_bins)
        .map(|i| {
            if range.is_finite() {
                min + i as f64 * (range / num_bins as f64)
            } else {
                // The range overflows; interpolate between the ends instead
                let fraction = i as f64 / num_bins as f64;
                min * (1.0 - fraction) + max * fraction
            }
        })
        .filter(|&c| c.is_finite() && c > min && c < max)
        .collect();

    sorted_distinct(&cut_points)
}
