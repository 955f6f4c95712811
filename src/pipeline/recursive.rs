//! Generic recursive driver: top-down partitioning by a split criterion
//!
//! The driver owns the bookkeeping (partitioning rows, tracking ranges,
//! depth limiting) and asks a [`RecursiveSplitStrategy`] for one decision per
//! partition. Partitions are processed from an explicit work stack, so deep
//! splitting does not grow the call stack.

use anyhow::Result;
use tracing::debug;

use super::context::DiscretizationContext;
use super::dataset::DataRow;
use super::params::Parameters;
use super::steps::Step;

/// Value range `[min, max]` of a partition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Share of the range below `value`.
    ///
    /// Works on halved bounds so ranges wider than `f64::MAX` stay finite.
    pub fn fraction_below(&self, value: f64) -> f64 {
        self.fraction_between(self.min, value)
    }

    /// Share of the range above `value`.
    pub fn fraction_above(&self, value: f64) -> f64 {
        self.fraction_between(value, self.max)
    }

    fn fraction_between(&self, low: f64, high: f64) -> f64 {
        let half_width = self.max / 2.0 - self.min / 2.0;
        if half_width <= 0.0 {
            return 0.0;
        }
        (high / 2.0 - low / 2.0) / half_width
    }
}

/// Outcome of evaluating one partition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitDecision {
    /// Accept the cut point and recurse into both sides
    Split(f64),
    /// Leave the partition as a single bin
    Stop,
}

impl SplitDecision {
    /// Build a decision from a `(candidate, should_split)` pair.
    pub fn from_parts(candidate: Option<f64>, should_split: bool) -> Self {
        match candidate {
            Some(c) if should_split => SplitDecision::Split(c),
            _ => SplitDecision::Stop,
        }
    }

    pub fn cut_point(&self) -> Option<f64> {
        match self {
            SplitDecision::Split(c) => Some(*c),
            SplitDecision::Stop => None,
        }
    }
}

/// A split criterion evaluated per partition.
pub trait RecursiveSplitStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Decide whether `partition` (rows within `bounds`) should be split.
    ///
    /// Numeric edge cases (empty partitions, a single distinct value) must
    /// yield [`SplitDecision::Stop`] rather than fail.
    fn evaluate(
        &self,
        partition: &[&DataRow],
        attribute: &str,
        bounds: Bounds,
        parameters: &Parameters,
    ) -> SplitDecision;
}

/// Cut points found by the recursive driver plus recursion statistics
#[derive(Debug, Clone, PartialEq)]
pub struct RecursionOutcome {
    /// Sorted, deduplicated cut points
    pub cut_points: Vec<f64>,
    /// Number of times the strategy was consulted
    pub evaluations: usize,
    /// Number of levels at which at least one split was accepted
    pub levels: usize,
}

struct Partition<'r> {
    rows: Vec<&'r DataRow>,
    bounds: Bounds,
    depth: usize,
}

/// Pipeline step running a [`RecursiveSplitStrategy`].
pub struct RecursiveBinning<S> {
    strategy: S,
    name: String,
}

impl<S: RecursiveSplitStrategy> RecursiveBinning<S> {
    pub fn new(strategy: S) -> Self {
        let name = format!("recursive-binning({})", strategy.name());
        Self { strategy, name }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Split the context's numeric rows and store the resulting cut points.
    pub fn execute<'a>(&self, mut context: DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> {
        let rows = context.numeric_rows();
        let outcome = self.find_cut_points(
            rows,
            &context.attribute_name,
            &context.parameters,
        );
        debug!(
            strategy = self.strategy.name(),
            cut_points = outcome.cut_points.len(),
            evaluations = outcome.evaluations,
            levels = outcome.levels,
            "Recursive binning complete"
        );
        context.cut_points = outcome.cut_points;
        Ok(context)
    }

    /// Run the top-down search over `rows`, starting from their global range.
    pub fn find_cut_points(
        &self,
        rows: Vec<&DataRow>,
        attribute: &str,
        parameters: &Parameters,
    ) -> RecursionOutcome {
        let max_depth = parameters.resolve_max_depth();
        let mut cut_points = Vec::new();
        let mut evaluations = 0usize;
        let mut levels = 0usize;

        let Some(bounds) = numeric_bounds(&rows, attribute) else {
            return RecursionOutcome {
                cut_points,
                evaluations,
                levels,
            };
        };

        let mut stack = vec![Partition {
            rows,
            bounds,
            depth: 0,
        }];

        while let Some(partition) = stack.pop() {
            if partition.rows.is_empty()
                || partition.bounds.max <= partition.bounds.min
                || partition.depth >= max_depth
            {
                continue;
            }

            evaluations += 1;
            let decision =
                self.strategy
                    .evaluate(&partition.rows, attribute, partition.bounds, parameters);

            let cut = match decision {
                SplitDecision::Split(c) if c.is_finite() => c,
                _ => continue,
            };

            debug!(
                cut,
                depth = partition.depth,
                rows = partition.rows.len(),
                "Accepted split"
            );
            cut_points.push(cut);
            levels = levels.max(partition.depth + 1);

            let (left, right): (Vec<&DataRow>, Vec<&DataRow>) = partition
                .rows
                .into_iter()
                .filter(|row| row.numeric(attribute).is_some())
                .partition(|row| row.numeric(attribute).is_some_and(|v| v < cut));

            stack.push(Partition {
                rows: right,
                bounds: Bounds::new(cut, partition.bounds.max),
                depth: partition.depth + 1,
            });
            stack.push(Partition {
                rows: left,
                bounds: Bounds::new(partition.bounds.min, cut),
                depth: partition.depth + 1,
            });
        }

        RecursionOutcome {
            cut_points: super::stats::sorted_distinct(&cut_points),
            evaluations,
            levels,
        }
    }
}

impl<S: RecursiveSplitStrategy> Step for RecursiveBinning<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&self, context: DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> {
        self.execute(context)
    }
}

fn numeric_bounds(rows: &[&DataRow], attribute: &str) -> Option<Bounds> {
    rows.iter()
        .filter_map(|row| row.numeric(attribute))
        .fold(None, |acc: Option<Bounds>, v| match acc {
            None => Some(Bounds::new(v, v)),
            Some(b) => Some(Bounds::new(b.min.min(v), b.max.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::dataset::{AttributeType, Dataset};

    /// Always splits at the middle of the range.
    struct Midpoint;

    impl RecursiveSplitStrategy for Midpoint {
        fn name(&self) -> &str {
            "midpoint"
        }

        fn evaluate(&self, _: &[&DataRow], _: &str, bounds: Bounds, _: &Parameters) -> SplitDecision {
            SplitDecision::Split(bounds.min + bounds.width() / 2.0)
        }
    }

    struct Never;

    impl RecursiveSplitStrategy for Never {
        fn name(&self) -> &str {
            "never"
        }

        fn evaluate(&self, _: &[&DataRow], _: &str, _: Bounds, _: &Parameters) -> SplitDecision {
            SplitDecision::Stop
        }
    }

    fn dataset(n: usize) -> Dataset {
        let mut ds = Dataset::new(None);
        ds.add_attribute("x", AttributeType::Numeric);
        for i in 0..n {
            ds.push_row(DataRow::new("t").with("x", i as f64));
        }
        ds.push_row(DataRow::new("t").with("x", "skip me"));
        ds
    }

    #[test]
    fn test_bounds_fractions() {
        let bounds = Bounds::new(2.0, 10.0);
        assert_eq!(bounds.fraction_below(4.0), 0.25);
        assert_eq!(bounds.fraction_above(4.0), 0.75);
        assert_eq!(Bounds::new(3.0, 3.0).fraction_below(3.0), 0.0);

        let huge = Bounds::new(-f64::MAX, f64::MAX);
        assert!(huge.width().is_infinite());
        assert_eq!(huge.fraction_below(0.0), 0.5);
    }

    #[test]
    fn test_split_decision_from_parts() {
        assert_eq!(SplitDecision::from_parts(Some(1.5), true), SplitDecision::Split(1.5));
        assert_eq!(SplitDecision::from_parts(Some(1.5), false), SplitDecision::Stop);
        assert_eq!(SplitDecision::from_parts(None, true), SplitDecision::Stop);
        assert_eq!(SplitDecision::Split(2.0).cut_point(), Some(2.0));
    }

    #[test]
    fn test_depth_cap_limits_levels() {
        let ds = dataset(1000);
        let driver = RecursiveBinning::new(Midpoint);
        let params = Parameters::new().with_max_depth(3);
        let outcome = driver.find_cut_points(ds.rows.iter().collect(), "x", &params);

        // Full binary tree of depth 3
        assert_eq!(outcome.levels, 3);
        assert_eq!(outcome.cut_points.len(), 7);
        assert_eq!(outcome.evaluations, 7);
    }

    #[test]
    fn test_zero_depth_never_evaluates() {
        let ds = dataset(10);
        let driver = RecursiveBinning::new(Midpoint);
        let params = Parameters::new().with_max_depth(0);
        let outcome = driver.find_cut_points(ds.rows.iter().collect(), "x", &params);
        assert!(outcome.cut_points.is_empty());
        assert_eq!(outcome.evaluations, 0);
    }

    #[test]
    fn test_stop_decision_ends_at_root() {
        let ds = dataset(10);
        let driver = RecursiveBinning::new(Never);
        let outcome = driver.find_cut_points(ds.rows.iter().collect(), "x", &Parameters::new());
        assert!(outcome.cut_points.is_empty());
        assert_eq!(outcome.evaluations, 1);
        assert_eq!(outcome.levels, 0);
    }

    #[test]
    fn test_constant_partition_is_not_evaluated() {
        let mut ds = Dataset::new(None);
        ds.add_attribute("x", AttributeType::Numeric);
        for _ in 0..5 {
            ds.push_row(DataRow::new("t").with("x", 7.0));
        }
        let outcome = RecursiveBinning::new(Midpoint).find_cut_points(
            ds.rows.iter().collect(),
            "x",
            &Parameters::new(),
        );
        assert_eq!(outcome.evaluations, 0);
        assert!(outcome.cut_points.is_empty());
    }

    #[test]
    fn test_execute_writes_sorted_cut_points() {
        let ds = dataset(100);
        let ctx = DiscretizationContext::new(&ds, "x", Parameters::new().with_max_depth(2));
        let ctx = RecursiveBinning::new(Midpoint).execute(ctx).unwrap();
        assert_eq!(ctx.cut_points, vec![24.75, 49.5, 74.25]);
    }
}
