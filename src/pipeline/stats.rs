//! Entropy measures and bin-count heuristics shared by the strategies

use std::collections::BTreeMap;

/// Sort floats ascending in place (total order, NaN last).
pub fn sort_ascending(values: &mut [f64]) {
    values.sort_by(f64::total_cmp);
}

/// Sorted copy of the finite `values` with exact duplicates removed.
pub fn sorted_distinct(values: &[f64]) -> Vec<f64> {
    let mut distinct: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sort_ascending(&mut distinct);
    distinct.dedup();
    distinct
}

/// Midpoint of `a` and `b` that stays finite for finite inputs.
pub fn midpoint(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum.is_finite() {
        sum / 2.0
    } else {
        a / 2.0 + b / 2.0
    }
}

/// Number of distinct values (exact equality).
pub fn distinct_count(values: &[f64]) -> usize {
    sorted_distinct(values).len()
}

/// Shannon entropy in bits: `-Σ p·log2(p)` over the positive probabilities.
///
/// Empty or degenerate distributions have zero entropy.
pub fn shannon_entropy(probabilities: &[f64]) -> f64 {
    let entropy: f64 = probabilities
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum();
    // A single certain outcome sums to -0.0
    entropy.max(0.0)
}

fn entropy_from_counts(counts: impl Iterator<Item = usize>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let probabilities: Vec<f64> = counts.map(|c| c as f64 / total as f64).collect();
    shannon_entropy(&probabilities)
}

/// Entropy of the target label distribution.
pub fn class_entropy<'a, I>(labels: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
        total += 1;
    }
    entropy_from_counts(counts.into_values(), total)
}

/// Entropy of the value frequency distribution.
///
/// Values are grouped by exact equality, so repeated values show up as
/// concentrated mass rather than a continuous density.
pub fn value_entropy(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sort_ascending(&mut sorted);

    let mut run_lengths = Vec::new();
    let mut run = 1usize;
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            run += 1;
        } else {
            run_lengths.push(run);
            run = 1;
        }
    }
    run_lengths.push(run);

    entropy_from_counts(run_lengths.into_iter(), sorted.len())
}

/// Entropy normalized by `log2(distinct + 1)`; zero for an empty partition.
pub fn information_density(entropy: f64, distinct_values: usize) -> f64 {
    if distinct_values == 0 {
        return 0.0;
    }
    entropy / ((distinct_values + 1) as f64).log2()
}

/// Sturges' rule bin count for `n` samples with `distinct` distinct values.
///
/// `ceil(1 + log2(n))` for `n > 1`, else 1; capped at `distinct - 1` when
/// there is more than one distinct value, and never below 1.
pub fn optimal_bin_count(n: usize, distinct: usize) -> usize {
    let mut bins = if n > 1 {
        (1.0 + (n as f64).log2()).ceil() as usize
    } else {
        1
    };

    if distinct > 1 {
        bins = bins.min(distinct - 1);
    }

    bins.max(1)
}
