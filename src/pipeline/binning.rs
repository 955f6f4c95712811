//! Bin assignment and label rendering
//!
//! Bins are left-closed, right-open intervals: a value equal to a cut point
//! belongs to the bin above it.

use serde::Serialize;
use std::fmt;

/// Decimal places used for labels unless neighbouring cut points collide
pub const DEFAULT_LABEL_PRECISION: usize = 2;

/// Upper limit on label decimals; enough to tell adjacent doubles near 1 apart
pub const MAX_LABEL_PRECISION: usize = 17;

/// A half-open interval `[lower, upper)`; infinite bounds are open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinInterval {
    /// Position of the bin, 0 for the lowest
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
    /// Decimal places shown in the label
    #[serde(skip)]
    pub precision: usize,
}

impl BinInterval {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }

    /// Textual label such as `"[3.00, 7.50)"` or `"(-inf, 3.00)"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BinInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.precision;
        if self.lower == f64::NEG_INFINITY {
            write!(f, "(-inf, ")?;
        } else {
            write!(f, "[{:.*}, ", precision, self.lower)?;
        }
        if self.upper == f64::INFINITY {
            write!(f, "+inf)")
        } else {
            write!(f, "{:.*})", precision, self.upper)
        }
    }
}

/// Fewest decimals (at least two) at which adjacent cut points render
/// differently, so distinct bins never share a label.
pub fn label_precision(cut_points: &[f64]) -> usize {
    (DEFAULT_LABEL_PRECISION..MAX_LABEL_PRECISION)
        .find(|&precision| {
            cut_points.windows(2).all(|pair| {
                format!("{:.*}", precision, pair[0]) != format!("{:.*}", precision, pair[1])
            })
        })
        .unwrap_or(MAX_LABEL_PRECISION)
}

/// Index of the bin holding `value` given sorted, deduplicated `cut_points`.
pub fn bin_index(value: f64, cut_points: &[f64]) -> usize {
    cut_points.partition_point(|&c| c <= value)
}

/// Find the bin of `value` given sorted, deduplicated `cut_points`.
///
/// The bin is bounded above by the first cut point strictly greater than
/// the value; with no cut points there is a single `(-inf, +inf)` bin.
pub fn assign_bin(value: f64, cut_points: &[f64]) -> BinInterval {
    bin_at(bin_index(value, cut_points), cut_points)
}

/// Interval of the bin at `index`; `index` ranges over `0..=cut_points.len()`.
pub fn bin_at(index: usize, cut_points: &[f64]) -> BinInterval {
    interval(index, cut_points, label_precision(cut_points))
}

/// Every bin defined by `cut_points`, lowest first.
pub fn all_bins(cut_points: &[f64]) -> Vec<BinInterval> {
    let precision = label_precision(cut_points);
    (0..=cut_points.len())
        .map(|i| interval(i, cut_points, precision))
        .collect()
}

/// Label of the bin containing `value`.
pub fn bin_label(value: f64, cut_points: &[f64]) -> String {
    assign_bin(value, cut_points).label()
}

fn interval(index: usize, cut_points: &[f64], precision: usize) -> BinInterval {
    let lower = if index == 0 {
        f64::NEG_INFINITY
    } else {
        cut_points[index - 1]
    };
    let upper = cut_points.get(index).copied().unwrap_or(f64::INFINITY);
    BinInterval {
        index,
        lower,
        upper,
        precision,
    }
}
